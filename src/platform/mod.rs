pub mod telegram;

use async_trait::async_trait;

/// Outbound half of a platform: sends one text reply for the event being
/// handled. Errors are the transport's own and are not retried.
#[async_trait]
pub trait ReplySink: Send + Sync {
    type Error: Send;

    async fn reply(&self, text: String) -> Result<(), Self::Error>;
}
