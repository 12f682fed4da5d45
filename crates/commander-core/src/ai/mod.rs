pub mod openai;

pub use openai::OpenAIClient;

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::state::ChatMessage;

/// A remote text-completion endpoint.
///
/// Implementations own their model and sampling settings; callers only hand
/// over the role-tagged message sequence.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short label for logs (e.g. "openai")
    fn name(&self) -> &str;

    /// Send one request and return the first completion's text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}
