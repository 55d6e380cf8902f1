//! State types for the vote machine.
//!
//! A `VoteState` tracks one viewer's vote bookkeeping for one report: the
//! active toggle, the net score and participation count, and the report
//! author's lifetime received-vote counters. The toggle enum is the sole
//! source of truth for which vote (if any) is currently active.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype for report IDs to prevent mixing with other strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ReportId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ReportId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Newtype for user IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The viewer's current toggle position on a report.
///
/// `None` means no active vote. The two directions are mutually exclusive;
/// the transition function guarantees a viewer never holds both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteToggle {
    #[default]
    None,
    Up,
    Down,
}

impl VoteToggle {
    /// Wire form of the toggle, as the backend expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Parse from the backend's wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    /// Returns true if the viewer currently holds an active vote.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for VoteToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Server-sourced values that seed a fresh `VoteState` when a report page
/// loads: the report's current score and vote count, the viewer's prior
/// toggle (if any), and the author's lifetime received-vote counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteSeed {
    pub score: i64,
    pub vote: VoteToggle,
    pub total_votes: i64,
    pub author_upvotes_received: i64,
    pub author_downvotes_received: i64,
}

/// Per-report, per-viewer vote bookkeeping.
///
/// Seeded once from server data, mutated exclusively by the transition
/// function, discarded when the viewer navigates away. `sync` is false only
/// in the freshly-seeded state; every transition sets it, and the store emits
/// exactly one persistence call per transition in response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteState {
    /// The viewer's active toggle.
    pub last_action: VoteToggle,
    /// Net score (upvotes minus downvotes) including this viewer's toggles.
    pub votes: i64,
    /// Participation count (upvotes plus downvotes).
    pub total: i64,
    /// Lifetime upvotes received by the report's author.
    pub user_upvotes: i64,
    /// Lifetime downvotes received by the report's author.
    pub user_downvotes: i64,
    /// True if the state resulted from a user action not yet persisted.
    pub sync: bool,
}

impl VoteState {
    /// Build the initial state from server-sourced seed values.
    pub fn seeded(seed: VoteSeed) -> Self {
        Self {
            last_action: seed.vote,
            votes: seed.score,
            total: seed.total_votes,
            user_upvotes: seed.author_upvotes_received,
            user_downvotes: seed.author_downvotes_received,
            sync: false,
        }
    }

    /// Derived helpfulness statistics for display.
    ///
    /// The percentage truncates rather than rounds, matching the integer
    /// percentage shown in the UI, and is 0 whenever `votes <= 0` (which
    /// also guards the `total == 0` division).
    pub fn helpfulness(&self) -> Helpfulness {
        let report_helpfulness_pct = if self.votes > 0 && self.total != 0 {
            self.votes * 100 / self.total
        } else {
            0
        };

        Helpfulness {
            report_helpfulness_pct,
            user_helpfulness: self.user_upvotes - self.user_downvotes,
        }
    }
}

impl Default for VoteState {
    fn default() -> Self {
        Self {
            last_action: VoteToggle::None,
            votes: 0,
            total: 0,
            user_upvotes: 0,
            user_downvotes: 0,
            sync: false,
        }
    }
}

/// Derived statistics: how helpful a report is, and how helpful its author
/// has been over their lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Helpfulness {
    /// Truncated integer percentage of net votes over total votes.
    pub report_helpfulness_pct: i64,
    /// Author's received upvotes minus received downvotes. May be negative.
    pub user_helpfulness: i64,
}
