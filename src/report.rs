//! Report payload types and seed derivation.
//!
//! The backend returns a report together with its author and version map.
//! The per-user vote lists on the raw report are what the vote machine's
//! seed is derived from: the score and vote count fall out of the list
//! lengths, and the viewer's prior toggle out of list membership.

use std::collections::HashMap;

use serde::Deserialize;

use crate::vote::{UserId, VoteSeed, VoteToggle};

/// Response of the report-fetch endpoint: the report, its author, and the
/// affected model versions.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportEnvelope {
    pub report: Report,
    pub user: ReportAuthor,
    /// Affected model versions, keyed by version string, valued by date.
    pub versions: HashMap<String, String>,
}

/// A vulnerability report as stored by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    pub report_id: String,
    pub created: String,
    pub title: String,
    pub description: String,
    pub reference_uris: Vec<String>,
    pub purls: Vec<String>,
    /// Users who upvoted, as (user_id, timestamp) pairs.
    pub upvoted: Vec<(String, String)>,
    /// Users who downvoted, as (user_id, timestamp) pairs.
    pub downvoted: Vec<(String, String)>,
    pub domain: String,
    pub vulnerabilities: Vec<String>,
}

/// The report author's public profile, including lifetime received-vote
/// counters used for the helpfulness statistic.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportAuthor {
    pub login: String,
    pub avatar_url: String,
    pub company: String,
    pub report_upvotes_received: i64,
    pub report_downvotes_received: i64,
}

impl Report {
    /// The model name: the first purl up to its version marker.
    pub fn model_name(&self) -> &str {
        match self.purls.first() {
            Some(purl) => purl.split('@').next().unwrap_or(""),
            None => "",
        }
    }

    /// Net score: upvotes minus downvotes.
    pub fn score(&self) -> i64 {
        self.upvoted.len() as i64 - self.downvoted.len() as i64
    }

    /// Participation count: upvotes plus downvotes.
    pub fn total_votes(&self) -> i64 {
        self.upvoted.len() as i64 + self.downvoted.len() as i64
    }

    /// The viewer's prior toggle, from membership in the vote lists.
    pub fn viewer_vote(&self, viewer: &UserId) -> VoteToggle {
        let voted = |entries: &[(String, String)]| {
            entries.iter().any(|(user_id, _)| user_id == &viewer.0)
        };

        if voted(&self.upvoted) {
            VoteToggle::Up
        } else if voted(&self.downvoted) {
            VoteToggle::Down
        } else {
            VoteToggle::None
        }
    }
}

impl ReportEnvelope {
    /// Derive the vote machine's seed for the given viewer.
    pub fn vote_seed(&self, viewer: &UserId) -> VoteSeed {
        VoteSeed {
            score: self.report.score(),
            vote: self.report.viewer_vote(viewer),
            total_votes: self.report.total_votes(),
            author_upvotes_received: self.user.report_upvotes_received,
            author_downvotes_received: self.user.report_downvotes_received,
        }
    }
}
