//! Fixed role personas and prompt builders.
//!
//! The templates are deterministic strings; all business judgment lives in
//! the aggregated data they embed, not here.

use kennelworks_core::models::AggregateResult;
use serde::Serialize;

use crate::orchestrator::ExpertRole;

/// System prompt for the financial expert role.
pub const FINANCIAL_SYSTEM_PROMPT: &str = "You are a senior financial advisor specializing in \
professional dog-breeding businesses. You analyze kennel financial data and write clear, \
structured reports a kennel owner can act on. Cover these dimensions: overall profitability, \
per-animal return on investment highlights and concerns, expense structure, and concrete \
recommendations to improve margins. Ground every statement in the figures provided.";

/// System prompt for the breeding expert role.
pub const BREEDING_SYSTEM_PROMPT: &str = "You are an experienced canine reproduction specialist \
advising professional breeding kennels. You analyze breeding program data and write clear, \
structured reports. Cover these dimensions: current pregnancies and their stages, breeding \
availability across females and studs, litter history outcomes, and recommendations for pairing \
and timing. Ground every statement in the records provided.";

/// System prompt for the health expert role.
pub const HEALTH_SYSTEM_PROMPT: &str = "You are a veterinary consultant for professional \
dog-breeding kennels. You analyze herd health data and write clear, structured reports. Cover \
these dimensions: overall health posture, vaccination coverage and gaps, animals needing urgent \
attention, and preventive-care recommendations. Ground every statement in the records provided.";

/// System prompt for a role.
pub fn system_prompt(role: ExpertRole) -> &'static str {
    match role {
        ExpertRole::Financial => FINANCIAL_SYSTEM_PROMPT,
        ExpertRole::Breeding => BREEDING_SYSTEM_PROMPT,
        ExpertRole::Health => HEALTH_SYSTEM_PROMPT,
    }
}

/// User prompt for a role, embedding the snapshot summary and the role's
/// analysis block as JSON.
pub fn user_prompt(role: ExpertRole, data: &AggregateResult) -> String {
    let summary = to_json_block(&data.summary);
    match role {
        ExpertRole::Financial => format!(
            "Business snapshot summary:\n{}\n\nFinancial analysis:\n{}\n\n\
             Write your expert financial report for this kennel.",
            summary,
            to_json_block(&data.financial),
        ),
        ExpertRole::Breeding => format!(
            "Business snapshot summary:\n{}\n\nBreeding analysis:\n{}\n\n\
             Write your expert breeding-program report for this kennel.",
            summary,
            to_json_block(&data.breeding),
        ),
        ExpertRole::Health => format!(
            "Business snapshot summary:\n{}\n\nHealth analysis:\n{}\n\n\
             Write your expert herd-health report for this kennel.",
            summary,
            to_json_block(&data.health),
        ),
    }
}

fn to_json_block<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| String::from("{}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn empty_result() -> AggregateResult {
        AggregateResult::empty(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap())
    }

    #[test]
    fn test_system_prompts_carry_personas() {
        assert!(system_prompt(ExpertRole::Financial).contains("financial advisor"));
        assert!(system_prompt(ExpertRole::Breeding).contains("reproduction specialist"));
        assert!(system_prompt(ExpertRole::Health).contains("veterinary consultant"));
    }

    #[test]
    fn test_user_prompt_embeds_summary() {
        let mut data = empty_result();
        data.summary.total_dogs = 7;
        data.summary.pregnant_count = 2;

        let prompt = user_prompt(ExpertRole::Breeding, &data);
        assert!(prompt.contains("\"total_dogs\": 7"));
        assert!(prompt.contains("\"pregnant_count\": 2"));
        assert!(prompt.contains("Breeding analysis"));
    }

    #[test]
    fn test_user_prompt_embeds_role_block() {
        let mut data = empty_result();
        data.financial.total_revenue = 12500.0;

        let prompt = user_prompt(ExpertRole::Financial, &data);
        assert!(prompt.contains("12500"));
        assert!(prompt.contains("expert financial report"));
    }
}
