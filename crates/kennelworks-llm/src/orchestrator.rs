//! Per-role report orchestration with bounded retries.
//!
//! Each requested role gets its own independent call loop: up to 5 attempts,
//! each bounded by a timeout, with capped exponential backoff between
//! attempts. One role exhausting its attempts only loses that role's
//! narrative; the request as a whole fails only when every requested role
//! failed.

use std::collections::BTreeMap;
use std::time::Duration;

use kennelworks_core::models::{AggregateResult, AggregateSummary};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::{LlmClient, LlmError, LlmResult};
use crate::prompts;

/// Lines taken from each narrative when synthesizing the combined report.
const COMBINED_SECTION_LINES: usize = 10;

/// Static closing template appended to every combined narrative.
const ACTION_PLAN: &str = "\n## Prioritized Action Plan\n\
1. Resolve all urgent care items before anything else.\n\
2. Review animals with negative return on investment and decide keep/sell.\n\
3. Confirm due-soon vaccinations with the attending veterinarian.\n\
4. Plan upcoming pairings around the projected heat cycles.\n\
5. Revisit the expense categories growing fastest month over month.\n";

/// The three narrative-generation lenses over one aggregated snapshot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExpertRole {
    Financial,
    Breeding,
    Health,
}

impl ExpertRole {
    /// All roles, the default request set.
    pub const ALL: [ExpertRole; 3] = [
        ExpertRole::Financial,
        ExpertRole::Breeding,
        ExpertRole::Health,
    ];

    /// Stable key used in result maps and logs.
    pub fn key(&self) -> &'static str {
        match self {
            ExpertRole::Financial => "financial",
            ExpertRole::Breeding => "breeding",
            ExpertRole::Health => "health",
        }
    }

    /// Section title used in the combined narrative.
    pub fn section_title(&self) -> &'static str {
        match self {
            ExpertRole::Financial => "Financial Overview",
            ExpertRole::Breeding => "Breeding Program",
            ExpertRole::Health => "Herd Health",
        }
    }
}

/// Retry and timeout policy for per-role calls.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Attempts per role.
    pub max_attempts: u32,
    /// Bound on each individual attempt.
    pub request_timeout: Duration,
    /// Backoff after the first failed attempt; doubles per attempt.
    pub initial_backoff: Duration,
    /// Backoff ceiling.
    pub max_backoff: Duration,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            request_timeout: Duration::from_secs(60),
            initial_backoff: Duration::from_millis(1000),
            max_backoff: Duration::from_millis(10_000),
        }
    }
}

/// The narrative output of one report request.
///
/// Callers must check which roles are present: a missing role means its
/// calls exhausted their retries, and no partial narrative is ever presented
/// as complete.
#[derive(Debug, Clone, Serialize)]
pub struct ExpertAnalysisResult {
    /// Per-role narratives, keyed by role.
    pub expert_analyses: BTreeMap<ExpertRole, String>,
    /// Combined narrative, present only for full-set requests with at least
    /// one successful role.
    pub combined_narrative: Option<String>,
    /// The summary the narratives were generated from.
    pub summary: AggregateSummary,
}

/// Report request errors.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("all requested roles failed: {details}")]
    AllRolesFailed { details: String },
}

/// Drives the per-role call sequence against an LLM client.
pub struct ReportOrchestrator<C: LlmClient> {
    client: C,
    config: ReportConfig,
}

impl<C: LlmClient> ReportOrchestrator<C> {
    /// Create an orchestrator with the default policy.
    pub fn new(client: C) -> Self {
        Self::with_config(client, ReportConfig::default())
    }

    /// Create an orchestrator with a custom policy.
    pub fn with_config(client: C, config: ReportConfig) -> Self {
        Self { client, config }
    }

    /// Produce expert analyses for the requested roles over one snapshot.
    ///
    /// An empty role slice requests all three roles.
    pub async fn generate(
        &self,
        data: &AggregateResult,
        roles: &[ExpertRole],
    ) -> Result<ExpertAnalysisResult, ReportError> {
        let requested: Vec<ExpertRole> = if roles.is_empty() {
            ExpertRole::ALL.to_vec()
        } else {
            roles.to_vec()
        };

        let mut narratives: BTreeMap<ExpertRole, String> = BTreeMap::new();
        let mut failures: Vec<(ExpertRole, LlmError)> = Vec::new();

        for role in &requested {
            match self.call_role(*role, data).await {
                Ok(narrative) => {
                    narratives.insert(*role, narrative);
                }
                Err(err) => {
                    tracing::warn!(
                        role = role.key(),
                        error = %err,
                        "expert role failed after all attempts"
                    );
                    failures.push((*role, err));
                }
            }
        }

        if narratives.is_empty() {
            let details = failures
                .iter()
                .map(|(role, err)| format!("{}: {}", role.key(), err))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ReportError::AllRolesFailed { details });
        }

        let full_set_requested = ExpertRole::ALL.iter().all(|r| requested.contains(r));
        let combined_narrative = if full_set_requested {
            Some(combined_narrative(&narratives))
        } else {
            None
        };

        Ok(ExpertAnalysisResult {
            expert_analyses: narratives,
            combined_narrative,
            summary: data.summary.clone(),
        })
    }

    /// One role's independent retry loop; attempts are single-flight.
    async fn call_role(&self, role: ExpertRole, data: &AggregateResult) -> LlmResult<String> {
        let system = prompts::system_prompt(role);
        let user = prompts::user_prompt(role, data);

        let mut attempt = 1;
        loop {
            let outcome = match tokio::time::timeout(
                self.config.request_timeout,
                self.client.complete(system, &user),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(LlmError::Timeout(self.config.request_timeout)),
            };

            match outcome {
                Ok(narrative) => {
                    tracing::info!(
                        role = role.key(),
                        attempt,
                        model = self.client.model_name(),
                        "narrative generated"
                    );
                    return Ok(narrative);
                }
                Err(err) if attempt < self.config.max_attempts => {
                    tracing::warn!(role = role.key(), attempt, error = %err, "expert call failed");
                    tokio::time::sleep(backoff_delay(attempt, &self.config)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Backoff after the Nth failed attempt: `initial x 2^(N-1)`, capped.
fn backoff_delay(attempt: u32, config: &ReportConfig) -> Duration {
    let doubled = config.initial_backoff * 2u32.pow(attempt.saturating_sub(1));
    doubled.min(config.max_backoff)
}

/// Concatenate the first lines of each successful narrative under fixed
/// section headers, then append the static action plan. Failed roles are
/// simply absent.
fn combined_narrative(narratives: &BTreeMap<ExpertRole, String>) -> String {
    let mut out = String::from("# Comprehensive Kennel Report\n");
    for (role, narrative) in narratives {
        out.push_str(&format!("\n## {}\n", role.section_title()));
        for line in narrative.lines().take(COMBINED_SECTION_LINES) {
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(ACTION_PLAN);
    out
}
