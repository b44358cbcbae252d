//! The assistant turn pipeline.
//!
//! One user message flows through classify → fetch (intent-dependent) →
//! format → build prompt → complete, then lands in the session history.
//! The caller drives turns sequentially: holding `&mut Session` for the
//! whole turn is what enforces "one in-flight turn per session".
//!
//! Failure policy:
//! - Catalog failures are absorbed: the turn continues with a no-data
//!   grounding block and a logged diagnostic. The user still gets a reply,
//!   just an ungrounded one.
//! - Completion failures are user-visible but non-fatal: the turn's reply is
//!   a fixed apology, a synthetic assistant turn is appended so history
//!   stays consistent, and the session remains usable.
//!
//! History is only touched at the very end of a turn: either both the user
//! and assistant turns land, or the user turn plus the synthetic failure
//! turn land. Cancelling the turn mid-flight (dropping the future at either
//! network await) leaves the store untouched.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::CatalogProvider;
use crate::error::{CompletionError, GatewayError};
use crate::grounding::{self, GroundingBlock};
use crate::intent::{self, Intent};
use crate::llm::LlmProvider;
use crate::prompt;
use crate::session::{Session, Turn};

/// Fixed reply appended (and shown) when the completion call fails.
const APOLOGY: &str = "Xin lỗi, mình đang gặp chút sự cố. Bạn thử gửi lại tin nhắn sau nhé.";

/// How many recent turns the prompt includes.
const RECENT_WINDOW: usize = 3;

/// Result of one assistant turn. There is always a reply; `error` records
/// the completion failure behind an apology reply, for the surface to log.
#[derive(Debug)]
pub struct TurnOutcome {
    pub intent: Intent,
    /// Whether a grounding block was included in the prompt.
    pub grounded: bool,
    pub reply: String,
    pub error: Option<CompletionError>,
}

/// The assistant: stateless pipeline over shared catalog and completion
/// clients. Per-session state lives in the [`Session`] passed to each turn.
pub struct Assistant {
    catalog: Arc<dyn CatalogProvider>,
    llm: Arc<dyn LlmProvider>,
}

impl Assistant {
    pub fn new(catalog: Arc<dyn CatalogProvider>, llm: Arc<dyn LlmProvider>) -> Self {
        Self { catalog, llm }
    }

    /// Run one full turn for `message` against `session`.
    pub async fn run_turn(&self, session: &mut Session, message: &str) -> TurnOutcome {
        let message = message.trim();

        let intent = intent::classify(message);
        debug!(session = %session.id, intent = intent.label(), "Classified message");

        let grounding = self.fetch_grounding(&intent).await;

        let request = {
            let history = session.store.recent(RECENT_WINDOW);
            prompt::build(grounding.as_ref(), &history, message)
        };

        match self.llm.complete(request).await {
            Ok(reply) => {
                session.store.append(Turn::user(message));
                session.store.append(Turn::assistant(&reply));
                info!(
                    session = %session.id,
                    intent = intent.label(),
                    grounded = grounding.is_some(),
                    "Turn delivered"
                );
                TurnOutcome {
                    intent,
                    grounded: grounding.is_some(),
                    reply,
                    error: None,
                }
            }
            Err(e) => {
                warn!(session = %session.id, error = %e, "Completion failed; replying with apology");
                session.store.append(Turn::user(message));
                session.store.append(Turn::assistant(APOLOGY));
                TurnOutcome {
                    intent,
                    grounded: grounding.is_some(),
                    reply: APOLOGY.to_string(),
                    error: Some(e),
                }
            }
        }
    }

    /// Fetch and format grounding data for intents that use the catalog.
    ///
    /// Returns `None` for intents that never fetch; gateway errors degrade
    /// to a no-data block rather than failing the turn.
    async fn fetch_grounding(&self, intent: &Intent) -> Option<GroundingBlock> {
        match intent {
            Intent::Search { keyword } => {
                // classify() never emits an empty keyword, but the gateway
                // precondition is ours to uphold.
                if keyword.trim().is_empty() {
                    return None;
                }
                let items = recover(self.catalog.search_stories(keyword).await, "search");
                Some(grounding::format_stories(intent, &items))
            }
            Intent::Trending => {
                let items = recover(self.catalog.trending_stories().await, "trending");
                Some(grounding::format_stories(intent, &items))
            }
            Intent::Author { query } => {
                if query.trim().is_empty() {
                    return None;
                }
                // No author endpoint upstream; searching the author string is
                // what the catalog supports.
                let items = recover(self.catalog.search_stories(query).await, "author");
                Some(grounding::format_stories(intent, &items))
            }
            Intent::Category { .. } => {
                let items = recover(self.catalog.list_categories().await, "categories");
                Some(grounding::format_categories(&items))
            }
            Intent::Recommendation | Intent::General => None,
        }
    }
}

/// Collapse a gateway failure into "no items", with a diagnostic.
fn recover<T>(result: Result<Vec<T>, GatewayError>, op: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!(op, error = %e, "Catalog fetch failed; grounding degraded to no-data");
            Vec::new()
        }
    }
}
