//! Vote engine for the AI-model risk database.
//!
//! Browsing surfaces show each vulnerability report with a vote control and
//! a helpfulness score. This crate owns that bookkeeping: a pure state
//! machine per report tracks the viewer's toggle, the score and vote count,
//! and the author's lifetime received-vote counters; a store threads
//! commands through it and persists each settled toggle to the backend,
//! best-effort.

pub mod api;
pub mod config;
pub mod report;
pub mod vote;

pub use api::{RiskDbClient, VoteTally};
pub use config::Config;
pub use report::{Report, ReportAuthor, ReportEnvelope};
pub use vote::{
    Effect, Helpfulness, InterpreterContext, ReportId, TransitionResult, UserId, VoteEvent,
    VoteSeed, VoteState, VoteStore, VoteSync, VoteToggle,
};
