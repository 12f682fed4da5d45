pub mod ai;
pub mod config;
pub mod controller;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod persona;
pub mod planet;
pub mod prompt;
pub mod state;

// Re-export main types for convenience
pub use ai::{CompletionProvider, OpenAIClient};
pub use config::Config;
pub use controller::{ConversationController, InFlightReply, Rejection, SendOutcome, SettledReply};
pub use error::CompletionError;
pub use fallback::{DelayRange, FallbackResponder};
pub use generator::{FallbackReason, Reply, ReplyOrigin, ResponseGenerator};
pub use persona::{Persona, PersonaRegistry, COMMANDER_NAME};
pub use planet::{Planet, PlanetCatalog};
pub use state::{ChatMessage, ChatRole, ChatState, Message, MessageId, Sender};
