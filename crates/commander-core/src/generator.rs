//! Reply generation: one remote attempt, canned fallback on anything else.
//!
//! `generate` cannot fail. Provider problems become a [`FallbackReason`]
//! carried on the [`Reply`] so callers can see what happened without ever
//! having to handle an error.

use std::sync::Arc;

use crate::ai::{CompletionProvider, OpenAIClient};
use crate::config::Config;
use crate::error::CompletionError;
use crate::fallback::FallbackResponder;
use crate::persona::Persona;
use crate::prompt;
use crate::state::ChatMessage;

/// Why the canned table answered instead of the provider
#[derive(Debug)]
pub enum FallbackReason {
    NoCredential,
    Remote(CompletionError),
}

#[derive(Debug)]
pub enum ReplyOrigin {
    Remote,
    Fallback(FallbackReason),
}

/// A reply ready to show; `text` is never empty
#[derive(Debug)]
pub struct Reply {
    pub text: String,
    pub origin: ReplyOrigin,
}

impl Reply {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, ReplyOrigin::Fallback(_))
    }
}

pub struct ResponseGenerator {
    provider: Option<Arc<dyn CompletionProvider>>,
    fallback: FallbackResponder,
}

impl ResponseGenerator {
    /// Fallback-only generator
    pub fn new(fallback: FallbackResponder) -> Self {
        Self {
            provider: None,
            fallback,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// OpenAI-compatible provider when a key is configured, canned replies otherwise
    pub fn from_config(config: &Config) -> Self {
        let generator = Self::new(FallbackResponder::from_entropy());

        match OpenAIClient::from_config(config) {
            Ok(Some(client)) => {
                tracing::info!(model = %client.model(), base_url = %config.base_url, "Completion provider configured");
                generator.with_provider(Arc::new(client))
            }
            Ok(None) => {
                tracing::warn!("No completion API key configured; the commander will use canned replies");
                generator
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not build completion client; the commander will use canned replies");
                generator
            }
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn generate(
        &self,
        user_message: &str,
        planet: Option<&str>,
        persona: &Persona,
        history: &[ChatMessage],
    ) -> Reply {
        let reason = match self.try_remote(user_message, planet, persona, history).await {
            Ok(text) => {
                return Reply {
                    text,
                    origin: ReplyOrigin::Remote,
                };
            }
            Err(reason) => reason,
        };

        let text = self.fallback.respond(planet).await;
        Reply {
            text,
            origin: ReplyOrigin::Fallback(reason),
        }
    }

    async fn try_remote(
        &self,
        user_message: &str,
        planet: Option<&str>,
        persona: &Persona,
        history: &[ChatMessage],
    ) -> Result<String, FallbackReason> {
        let Some(provider) = self.provider.as_ref() else {
            tracing::warn!("No completion credential; answering from canned replies");
            return Err(FallbackReason::NoCredential);
        };

        let messages = prompt::build_messages(user_message, planet, persona, history);
        tracing::debug!(
            provider = provider.name(),
            planet = ?planet,
            turns = messages.len(),
            "Requesting completion"
        );

        match provider.complete(&messages).await {
            Ok(text) if !text.trim().is_empty() => Ok(text),
            Ok(_) => {
                tracing::warn!(provider = provider.name(), "Completion was empty; falling back");
                Err(FallbackReason::Remote(CompletionError::EmptyReply))
            }
            Err(e) => {
                tracing::warn!(provider = provider.name(), error = %e, "Completion failed; falling back");
                Err(FallbackReason::Remote(e))
            }
        }
    }
}
