//! HTTP client for the risk-database backend.
//!
//! Thin, typed wrapper over the two endpoints the vote engine touches:
//! fetching a report (to seed the machine) and persisting a vote. Every
//! request carries the bearer API key.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::report::ReportEnvelope;
use crate::vote::{ReportId, UserId, VoteSync, VoteToggle};

/// Client for the risk-database backend API.
#[derive(Clone)]
pub struct RiskDbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Post-vote tallies returned by the vote-persistence endpoint.
///
/// Logged for observability and otherwise discarded: the optimistic local
/// state never depends on the best-effort persistence call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct VoteTally {
    pub upvotes: u64,
    pub downvotes: u64,
}

/// Body of the vote-persistence call. The viewer's identity is attached
/// here, at the adapter boundary; the machine itself only settles the state.
#[derive(Debug, Serialize)]
struct VoteRequest<'a> {
    state: VoteToggle,
    user_id: &'a str,
    report_id: &'a str,
}

impl RiskDbClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch a report with its author and version map.
    pub async fn get_report(&self, report_id: &ReportId) -> Result<ReportEnvelope> {
        let url = format!("{}/api/get_report", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("id", report_id.0.as_str())])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .with_context(|| format!("get_report request for {} failed", report_id))?;

        let status = response.status();
        if !status.is_success() {
            bail!("get_report for {} returned {}", report_id, status);
        }

        response
            .json::<ReportEnvelope>()
            .await
            .context("Failed to decode report payload")
    }

    /// Set the viewer's vote state on a report. Returns the report's
    /// post-vote tallies.
    pub async fn report_vote(
        &self,
        state: VoteToggle,
        user_id: &UserId,
        report_id: &ReportId,
    ) -> Result<VoteTally> {
        let url = format!("{}/api/report_vote", self.base_url);
        let body = VoteRequest {
            state,
            user_id: &user_id.0,
            report_id: &report_id.0,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("report_vote request for {} failed", report_id))?;

        let status = response.status();
        if !status.is_success() {
            bail!("report_vote for {} returned {}", report_id, status);
        }

        response
            .json::<VoteTally>()
            .await
            .context("Failed to decode vote tally")
    }
}

#[async_trait]
impl VoteSync for RiskDbClient {
    async fn persist_vote(
        &self,
        state: VoteToggle,
        user_id: &UserId,
        report_id: &ReportId,
    ) -> Result<VoteTally> {
        self.report_vote(state, user_id, report_id).await
    }
}
