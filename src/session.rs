//! Per-session conversation state.
//!
//! Each open assistant surface owns exactly one [`Session`]; there is no
//! process-wide history. The store is a small bounded FIFO — old turns fall
//! off the front, and the prompt builder only ever asks for a short recent
//! window anyway.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum turns retained per session.
pub const MAX_TURNS: usize = 8;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Glyph used when rendering history into the prompt.
    pub fn glyph(&self) -> &'static str {
        match self {
            Role::User => "🧑",
            Role::Assistant => "🤖",
        }
    }
}

/// One message unit in a conversation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Bounded, ordered turn history with FIFO eviction.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    turns: VecDeque<Turn>,
    max_turns: usize,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(MAX_TURNS)
    }
}

impl ConversationStore {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_turns),
            max_turns,
        }
    }

    /// Append a turn; evicts from the front once the bound is exceeded.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
    }

    /// The last `k` turns, in chronological order (oldest of the window
    /// first).
    pub fn recent(&self, k: usize) -> Vec<&Turn> {
        let start = self.turns.len().saturating_sub(k);
        self.turns.iter().skip(start).collect()
    }

    /// Drop all turns.
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// One open assistant surface: an id for log correlation plus its
/// conversation store. Dies with the surface that created it.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub store: ConversationStore,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            store: ConversationStore::new(MAX_TURNS),
        }
    }

    /// Clear conversation state. The intent vocabulary and clients are not
    /// session state and are unaffected.
    pub fn reset(&mut self) {
        self.store.reset();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
