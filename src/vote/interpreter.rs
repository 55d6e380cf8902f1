//! Effect interpreter that executes effects against the backend API.
//!
//! The interpreter is the boundary between the pure vote machine and the
//! impure world of I/O. It takes effects (descriptions of what to do) and
//! executes them. Persistence is best-effort by design: the viewer's UI
//! reflects the toggle instantly, a failed sync is logged and never retried,
//! and a later transition simply supersedes the pending value.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info};

use super::effect::Effect;
use super::state::{ReportId, UserId, VoteToggle};
use crate::api::VoteTally;

/// Seam between the vote machine and the vote-persistence backend.
///
/// Implemented by the real API client; tests drive the interpreter with a
/// recording double instead of HTTP.
#[async_trait]
pub trait VoteSync: Send + Sync {
    /// Persist the viewer's settled toggle for a report. Returns the
    /// report's post-vote tallies.
    async fn persist_vote(
        &self,
        state: VoteToggle,
        user_id: &UserId,
        report_id: &ReportId,
    ) -> Result<VoteTally>;
}

/// Context needed by the interpreter to execute effects.
///
/// Effects themselves are identity-free; the context says which report and
/// which viewer they apply to.
#[derive(Clone)]
pub struct InterpreterContext {
    pub sync: Arc<dyn VoteSync>,
    pub report_id: ReportId,
    pub user_id: UserId,
}

/// Execute a list of effects sequentially.
///
/// A failed effect is logged and does not stop the remaining effects, and
/// never feeds back into the machine's state.
pub async fn execute_effects(ctx: &InterpreterContext, effects: Vec<Effect>) {
    for effect in effects {
        execute_effect(ctx, effect).await;
    }
}

/// Execute a single effect.
async fn execute_effect(ctx: &InterpreterContext, effect: Effect) {
    match effect {
        Effect::SyncVote { state } => {
            match ctx
                .sync
                .persist_vote(state, &ctx.user_id, &ctx.report_id)
                .await
            {
                Ok(tally) => {
                    info!(
                        "Persisted vote '{}' for report {}: now {} up / {} down",
                        state, ctx.report_id, tally.upvotes, tally.downvotes
                    );
                }
                Err(e) => {
                    error!(
                        "Failed to persist vote '{}' for report {}: {:#}",
                        state, ctx.report_id, e
                    );
                }
            }
        }
    }
}
