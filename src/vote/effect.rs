//! Effects (side effects as data).
//!
//! Effects describe what should happen as a result of a vote transition.
//! They are pure data - the interpreter executes them against the backend
//! API. This separation keeps the transition function testable without
//! mocking HTTP.
//!
//! Effects are identity-free: which report and which viewer they apply to
//! comes from the interpreter's context, not from the effect itself.

use super::state::VoteToggle;

/// All effects that can be produced by vote transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Persist the viewer's settled toggle to the backend.
    ///
    /// Emitted exactly once per transition. Best-effort: the interpreter
    /// fires it once, logs any failure, and never retries or rolls the
    /// local state back.
    SyncVote { state: VoteToggle },
}
