//! State store for per-report vote machines.
//!
//! This module provides a thread-safe store holding one `VoteState` per
//! report the viewer currently has open. It integrates the transition
//! function with the effect interpreter: commands transition the state
//! synchronously, and persistence happens fire-and-forget afterwards.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::info;

use super::event::VoteEvent;
use super::interpreter::{execute_effects, InterpreterContext};
use super::state::{Helpfulness, ReportId, VoteSeed, VoteState};
use super::transition::{transition, TransitionResult};

/// Thread-safe store for per-report vote state.
///
/// Instances for different reports are fully isolated; a vote on one report
/// never touches another's bookkeeping.
pub struct VoteStore {
    states: RwLock<HashMap<ReportId, VoteState>>,
}

impl Default for VoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VoteStore {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Seed the state for a report from server-sourced values.
    ///
    /// Called when a report page loads. Replaces any state already held for
    /// the report, since the seed reflects the freshest server data.
    pub async fn seed(&self, report_id: ReportId, seed: VoteSeed) -> VoteState {
        let state = VoteState::seeded(seed);
        self.states.write().await.insert(report_id, state);
        state
    }

    /// Get the current state for a report.
    pub async fn get(&self, report_id: &ReportId) -> Option<VoteState> {
        self.states.read().await.get(report_id).copied()
    }

    /// Get the current state for a report, or a zeroed default.
    ///
    /// Callers are expected to `seed` on page load; the default only covers
    /// a command racing ahead of the seed.
    pub async fn get_or_default(&self, report_id: &ReportId) -> VoteState {
        self.states
            .read()
            .await
            .get(report_id)
            .copied()
            .unwrap_or_default()
    }

    /// Drop the state for a report (viewer navigated away).
    pub async fn remove(&self, report_id: &ReportId) -> Option<VoteState> {
        self.states.write().await.remove(report_id)
    }

    /// Derived helpfulness statistics for a report, if it is tracked.
    pub async fn helpfulness(&self, report_id: &ReportId) -> Option<Helpfulness> {
        self.get(report_id).await.map(|state| state.helpfulness())
    }

    /// The viewer pressed the upvote control for the context's report.
    pub async fn upvote(&self, ctx: &InterpreterContext) -> VoteState {
        self.process_event(ctx, VoteEvent::Upvote).await
    }

    /// The viewer pressed the downvote control for the context's report.
    pub async fn downvote(&self, ctx: &InterpreterContext) -> VoteState {
        self.process_event(ctx, VoteEvent::Downvote).await
    }

    /// Process a vote event: transition the state, store the result, and
    /// schedule the persistence effects.
    ///
    /// The transition is synchronous and the new state is returned
    /// immediately; persistence runs on a spawned task that this method
    /// never awaits. A sync failure is logged by the interpreter and does
    /// not roll the state back.
    pub async fn process_event(&self, ctx: &InterpreterContext, event: VoteEvent) -> VoteState {
        let current = self.get_or_default(&ctx.report_id).await;

        info!(
            "Processing {} for report {} in state {:?}",
            event.log_summary(),
            ctx.report_id,
            current.last_action
        );

        let TransitionResult { state, effects } = transition(current, event);
        self.states
            .write()
            .await
            .insert(ctx.report_id.clone(), state);

        let ctx = ctx.clone();
        tokio::spawn(async move {
            execute_effects(&ctx, effects).await;
        });

        state
    }
}

#[cfg(test)]
mod tests {
    use super::super::interpreter::VoteSync;
    use super::super::state::{UserId, VoteToggle};
    use super::*;
    use crate::api::VoteTally;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    /// Forwards every persistence call onto a channel so tests can await
    /// the fire-and-forget sync deterministically.
    struct ChannelSync {
        calls: mpsc::UnboundedSender<(VoteToggle, ReportId)>,
        fail: bool,
    }

    #[async_trait]
    impl VoteSync for ChannelSync {
        async fn persist_vote(
            &self,
            state: VoteToggle,
            _user_id: &UserId,
            report_id: &ReportId,
        ) -> anyhow::Result<VoteTally> {
            self.calls
                .send((state, report_id.clone()))
                .expect("test receiver dropped");
            if self.fail {
                return Err(anyhow!("backend unavailable"));
            }
            Ok(VoteTally {
                upvotes: 0,
                downvotes: 0,
            })
        }
    }

    fn test_ctx(
        report_id: &str,
        fail: bool,
    ) -> (
        InterpreterContext,
        mpsc::UnboundedReceiver<(VoteToggle, ReportId)>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ctx = InterpreterContext {
            sync: Arc::new(ChannelSync { calls: tx, fail }),
            report_id: ReportId::from(report_id),
            user_id: UserId::from("viewer-1"),
        };
        (ctx, rx)
    }

    fn seed_48() -> VoteSeed {
        VoteSeed {
            score: 42,
            vote: VoteToggle::Up,
            total_votes: 48,
            author_upvotes_received: 45,
            author_downvotes_received: 3,
        }
    }

    #[tokio::test]
    async fn test_seed_and_get() {
        let store = VoteStore::new();
        let report_id = ReportId::from("report-1");

        let seeded = store.seed(report_id.clone(), seed_48()).await;
        assert!(!seeded.sync);
        assert_eq!(store.get(&report_id).await, Some(seeded));
    }

    #[tokio::test]
    async fn test_upvote_transitions_and_syncs_once() {
        let store = VoteStore::new();
        let (ctx, mut rx) = test_ctx("report-1", false);

        let state = store.upvote(&ctx).await;

        assert_eq!(state.last_action, VoteToggle::Up);
        assert_eq!(state.votes, 1);
        assert!(state.sync);

        // Exactly one persistence call, carrying the settled toggle.
        let call = rx.recv().await.expect("sync never fired");
        assert_eq!(call, (VoteToggle::Up, ReportId::from("report-1")));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cancel_syncs_the_none_state() {
        let store = VoteStore::new();
        let (ctx, mut rx) = test_ctx("report-1", false);

        store.upvote(&ctx).await;
        assert_eq!(rx.recv().await.unwrap().0, VoteToggle::Up);

        let cancelled = store.upvote(&ctx).await;
        assert_eq!(cancelled.last_action, VoteToggle::None);
        assert_eq!(cancelled.votes, 0);
        assert_eq!(cancelled.total, 0);

        // The later transition's sync supersedes the earlier one.
        assert_eq!(rx.recv().await.unwrap().0, VoteToggle::None);
    }

    #[tokio::test]
    async fn test_sync_failure_does_not_roll_back() {
        let store = VoteStore::new();
        let (ctx, mut rx) = test_ctx("report-1", true);

        let state = store.downvote(&ctx).await;
        assert_eq!(state.last_action, VoteToggle::Down);

        // Wait for the failed sync to have run, then confirm the optimistic
        // state survived it.
        rx.recv().await.expect("sync never fired");
        assert_eq!(store.get(&ctx.report_id).await, Some(state));

        // And the machine keeps accepting commands afterwards.
        let flipped = store.upvote(&ctx).await;
        assert_eq!(flipped.last_action, VoteToggle::Up);
        assert_eq!(flipped.votes, 1);
    }

    #[tokio::test]
    async fn test_reports_are_isolated() {
        let store = VoteStore::new();
        let (ctx_a, _rx_a) = test_ctx("report-a", false);
        let (ctx_b, _rx_b) = test_ctx("report-b", false);

        store.seed(ctx_a.report_id.clone(), seed_48()).await;
        store.upvote(&ctx_b).await;

        // Voting on report-b never touched report-a's seeded counters.
        let a = store.get(&ctx_a.report_id).await.unwrap();
        assert_eq!(a.votes, 42);
        assert_eq!(a.total, 48);

        let b = store.get(&ctx_b.report_id).await.unwrap();
        assert_eq!(b.votes, 1);
    }

    #[tokio::test]
    async fn test_commands_thread_through_seeded_state() {
        let store = VoteStore::new();
        let (ctx, mut rx) = test_ctx("report-1", false);
        store.seed(ctx.report_id.clone(), seed_48()).await;

        // The viewer already upvoted; pressing up again withdraws it.
        let state = store.upvote(&ctx).await;

        assert_eq!(state.last_action, VoteToggle::None);
        assert_eq!(state.votes, 41);
        assert_eq!(state.total, 47);
        assert_eq!(state.user_upvotes, 44);

        assert_eq!(rx.recv().await.unwrap().0, VoteToggle::None);

        let helpfulness = store.helpfulness(&ctx.report_id).await.unwrap();
        assert_eq!(helpfulness.report_helpfulness_pct, 87);
        assert_eq!(helpfulness.user_helpfulness, 41);
    }

    #[tokio::test]
    async fn test_remove_discards_state() {
        let store = VoteStore::new();
        let report_id = ReportId::from("report-1");
        store.seed(report_id.clone(), seed_48()).await;

        assert!(store.remove(&report_id).await.is_some());
        assert_eq!(store.get(&report_id).await, None);
        assert_eq!(store.helpfulness(&report_id).await, None);
    }
}
