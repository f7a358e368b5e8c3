use async_trait::async_trait;
use crate::CoreResult;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a single prompt to the model and return its text reply.
    /// Failures of the call itself surface as `CoreError::Upstream`.
    async fn generate(&self, prompt: &str) -> CoreResult<String>;
}
