use crate::ports::NotificationService;
use async_trait::async_trait;

/// 端末にトーストを表示する通知アダプター
pub struct ConsoleNotifier;

#[async_trait]
impl NotificationService for ConsoleNotifier {
    async fn success(&self, message: &str) {
        println!("✔ {}", message);
    }

    async fn error(&self, message: &str) {
        eprintln!("✘ {}", message);
    }
}
