use async_trait::async_trait;

/// 通知（トースト）ポート
///
/// 表示方法はアダプターに任せる。
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn success(&self, message: &str);

    async fn error(&self, message: &str);
}
