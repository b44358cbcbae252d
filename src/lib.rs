//! truyen-assist — the conversational assistant core of a story-reading app.
//!
//! A small retrieval-augmented pipeline:
//!
//! 1. [`intent::classify`] maps the user's message to an [`intent::Intent`]
//! 2. the [`catalog`] gateway fetches grounding data when the intent calls
//!    for it
//! 3. [`grounding`] formats the results (or the `NO RESULTS` sentinel)
//! 4. [`prompt`] assembles system rules + grounding + recent history
//! 5. the [`llm`] client runs the completion
//! 6. the reply lands in the per-session [`session::ConversationStore`]
//!
//! [`pipeline::Assistant`] drives the whole turn; everything below the
//! completion call degrades instead of failing, so the user always gets a
//! reply.

pub mod catalog;
pub mod config;
pub mod error;
pub mod grounding;
pub mod intent;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod session;

pub use config::AssistantConfig;
pub use error::{CompletionError, ConfigError, Error, GatewayError, Result};
pub use pipeline::{Assistant, TurnOutcome};
pub use session::Session;
