use crate::ports::notification_service::NotificationService as NotificationServiceTrait;
use async_trait::async_trait;
use std::sync::Mutex;

/// Toast shown by the mock notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

/// Mock implementation of NotificationService
///
/// Keeps every toast in order instead of displaying it.
pub struct NotificationService {
    toasts: Mutex<Vec<Toast>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            toasts: Mutex::new(Vec::new()),
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter_map(|t| match t {
                Toast::Error(msg) => Some(msg),
                Toast::Success(_) => None,
            })
            .collect()
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn success(&self, message: &str) {
        self.toasts
            .lock()
            .unwrap()
            .push(Toast::Success(message.to_string()));
    }

    async fn error(&self, message: &str) {
        self.toasts
            .lock()
            .unwrap()
            .push(Toast::Error(message.to_string()));
    }
}
