//! The conversation contract consumed by a UI.
//!
//! `ConversationController` is the only thing that mutates [`ChatState`].
//! Sending is split in two so a surface can keep drawing while the reply is
//! generated: [`ConversationController::begin_send`] records the user message
//! and spawns generation, [`ConversationController::complete_send`] records
//! the outcome. [`ConversationController::send_message`] does both.
//!
//! Only one reply may be in flight: a send while `is_typing` is set is
//! rejected with [`Rejection::Busy`] and changes nothing.

use std::sync::Arc;

use chrono::Local;
use tokio::task::{JoinError, JoinHandle};

use crate::config::Config;
use crate::generator::{Reply, ResponseGenerator};
use crate::persona::{PersonaRegistry, COMMANDER_NAME};
use crate::planet::Planet;
use crate::state::{ChatState, Message, MessageId, Sender};

/// Prior messages handed to the generator as context
pub const HISTORY_WINDOW: usize = 5;

/// Why a send did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing left after trimming
    Empty,
    /// No planet in focus
    NoPlanetContext,
    /// A reply is still being generated
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// User message and commander reply both appended
    Replied(MessageId),
    /// User message appended, generation task died before producing a reply
    NoReply,
    Rejected(Rejection),
}

/// A reply being generated on a background task
pub struct InFlightReply {
    planet_context: String,
    handle: JoinHandle<Reply>,
}

impl InFlightReply {
    pub fn planet_context(&self) -> &str {
        &self.planet_context
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn settle(self) -> SettledReply {
        let result = self.handle.await;
        SettledReply {
            planet_context: self.planet_context,
            result,
        }
    }
}

/// Outcome of an [`InFlightReply`], ready for `complete_send`
pub struct SettledReply {
    planet_context: String,
    result: Result<Reply, JoinError>,
}

pub struct ConversationController {
    state: ChatState,
    personas: Arc<PersonaRegistry>,
    generator: Arc<ResponseGenerator>,
    next_id: u64,
}

impl ConversationController {
    pub fn new(personas: Arc<PersonaRegistry>, generator: Arc<ResponseGenerator>) -> Self {
        Self {
            state: ChatState::default(),
            personas,
            generator,
            next_id: 1,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(PersonaRegistry::new()),
            Arc::new(ResponseGenerator::from_config(config)),
        )
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    /// False when every reply will come from the canned tables
    pub fn has_provider(&self) -> bool {
        self.generator.has_provider()
    }

    pub fn is_typing(&self) -> bool {
        self.state.is_typing
    }

    /// Send and wait for the reply
    pub async fn send_message(&mut self, content: &str) -> SendOutcome {
        let in_flight = match self.begin_send(content) {
            Ok(in_flight) => in_flight,
            Err(rejection) => return SendOutcome::Rejected(rejection),
        };

        let settled = in_flight.settle().await;
        match self.complete_send(settled) {
            Some(id) => SendOutcome::Replied(id),
            None => SendOutcome::NoReply,
        }
    }

    /// Record the user message and start generating a reply.
    ///
    /// Must be called from within a tokio runtime.
    pub fn begin_send(&mut self, content: &str) -> Result<InFlightReply, Rejection> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Rejection::Empty);
        }
        let Some(planet) = self.state.current_planet_context.clone() else {
            return Err(Rejection::NoPlanetContext);
        };
        if self.state.is_typing {
            tracing::debug!("Send rejected while a reply is in flight");
            return Err(Rejection::Busy);
        }

        // History is what came before this message
        let history = self.state.recent_history(HISTORY_WINDOW);

        let message = self.new_message(Sender::User, content.to_string(), Some(planet.clone()));
        self.state.messages.push(message);
        self.state.input_value.clear();
        self.state.is_typing = true;

        let persona = self.personas.persona_for(Some(&planet)).clone();
        let generator = Arc::clone(&self.generator);
        let user_message = content.to_string();
        let task_planet = planet.clone();

        let handle = tokio::spawn(async move {
            generator
                .generate(&user_message, Some(&task_planet), &persona, &history)
                .await
        });

        Ok(InFlightReply {
            planet_context: planet,
            handle,
        })
    }

    /// Append the reply (if any) and go back to idle
    pub fn complete_send(&mut self, settled: SettledReply) -> Option<MessageId> {
        self.state.is_typing = false;

        match settled.result {
            Ok(reply) => {
                if reply.is_fallback() {
                    tracing::debug!(origin = ?reply.origin, "Commander answered from canned replies");
                }
                let message = self.new_message(
                    Sender::Commander,
                    reply.text,
                    Some(settled.planet_context),
                );
                let id = message.id;
                self.state.messages.push(message);
                Some(id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Reply generation task failed; no reply appended");
                None
            }
        }
    }

    pub fn clear_chat(&mut self) {
        self.state.messages.clear();
    }

    pub fn toggle_visibility(&mut self) {
        self.state.is_visible = !self.state.is_visible;
    }

    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.state.input_value = value.into();
    }

    /// Follow the planet selection; an arrival message is added on each new planet
    pub fn set_planet_context(&mut self, planet: Option<&str>) {
        match planet.filter(|name| !name.is_empty()) {
            None => {
                if let Some(previous) = self.state.current_planet_context.take() {
                    tracing::info!(planet = %previous, "Left planet; drifting in deep space");
                }
            }
            Some(name) if self.state.current_planet_context.as_deref() == Some(name) => {}
            Some(name) => {
                tracing::info!(planet = %name, "Arrived at planet");
                self.state.current_planet_context = Some(name.to_string());
                let welcome = self.welcome_text(name);
                let message = self.new_message(Sender::Commander, welcome, Some(name.to_string()));
                self.state.messages.push(message);
            }
        }
    }

    /// Same as `set_planet_context`, taking a catalog entry
    pub fn select_planet(&mut self, planet: Option<&Planet>) {
        self.set_planet_context(planet.map(|p| p.name));
    }

    fn welcome_text(&self, planet: &str) -> String {
        let line = self
            .personas
            .get(planet)
            .map(|p| p.personality.as_str())
            .filter(|p| !p.is_empty())
            .unwrap_or("Ready for your orders.");
        format!("{} here, reporting from {} sector. {}", COMMANDER_NAME, planet, line)
    }

    fn new_message(&mut self, sender: Sender, content: String, planet_context: Option<String>) -> Message {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        Message {
            id,
            sender,
            content,
            timestamp: Local::now(),
            planet_context,
        }
    }
}
