//! Pure date estimators for breeding and care scheduling.
//!
//! The biological figures here (gestation length, heat interval, month
//! length) are approximations baked into the business rules; they are named
//! constants so a future revision can tune them per breed without touching
//! the algorithms that consume them.

use chrono::{Duration, NaiveDate};

use crate::models::GestationStage;

/// Average calendar month length in days.
pub const AVG_DAYS_PER_MONTH: f64 = 30.44;

/// Fixed canine gestation period in days.
pub const GESTATION_DAYS: i64 = 63;

/// An open pregnancy older than this is considered stale and dropped.
pub const PREGNANCY_STALE_DAYS: i64 = 70;

/// Approximate interval between heat cycles, in months.
pub const HEAT_CYCLE_MONTHS: f64 = 6.0;

/// Minimum age for heat-cycle estimation, in months.
pub const MIN_HEAT_AGE_MONTHS: u32 = 6;

/// Fallback revaccination interval for unrecognized vaccine types.
pub const DEFAULT_VACCINE_INTERVAL_DAYS: i64 = 365;

/// Gestation stage day thresholds: early < 21, mid < 42, late < 63.
const MID_STAGE_DAYS: i64 = 21;
const LATE_STAGE_DAYS: i64 = 42;

/// Revaccination intervals in days, by vaccine name fragment.
///
/// Every entry is currently annual; the table exists so individual vaccines
/// can diverge without touching the callers. The list is best-effort, not a
/// closed enumeration: unlisted vaccines fall back to the default interval
/// by explicit policy.
const VACCINE_INTERVALS: &[(&str, i64)] = &[
    ("rabies", 365),
    ("狂犬", 365),
    ("dhpp", 365),
    ("distemper", 365),
    ("parvo", 365),
    ("犬瘟", 365),
    ("细小", 365),
    ("bordetella", 365),
    ("kennel cough", 365),
    ("leptospirosis", 365),
    ("lyme", 365),
    ("influenza", 365),
];

/// Age in whole months, floored; 0 for a birth date in the future.
pub fn age_in_months(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let days = (today - birth_date).num_days();
    if days <= 0 {
        return 0;
    }
    (days as f64 / AVG_DAYS_PER_MONTH).floor() as u32
}

/// Whole days elapsed since mating; a mating date in the future counts as 0.
pub fn gestation_days(mating_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - mating_date).num_days().max(0)
}

/// Bucket an elapsed gestation day count into a stage.
pub fn gestation_stage(days: i64) -> GestationStage {
    if days < MID_STAGE_DAYS {
        GestationStage::Early
    } else if days < LATE_STAGE_DAYS {
        GestationStage::Mid
    } else if days < GESTATION_DAYS {
        GestationStage::Late
    } else {
        GestationStage::Imminent
    }
}

/// Revaccination interval for a vaccine name.
pub fn vaccine_interval_days(vaccine_type: &str) -> i64 {
    let lower = vaccine_type.to_lowercase();
    VACCINE_INTERVALS
        .iter()
        .find(|(fragment, _)| lower.contains(fragment))
        .map(|(_, days)| *days)
        .unwrap_or(DEFAULT_VACCINE_INTERVAL_DAYS)
}

/// Date the next administration of a vaccine falls due.
pub fn next_vaccination_due(vaccine_type: &str, last_date: NaiveDate) -> NaiveDate {
    last_date + Duration::days(vaccine_interval_days(vaccine_type))
}

/// Estimate the next heat cycle from the last observed one.
///
/// Returns `None` for animals below the minimum age or with no heat on
/// record. The six-month interval is a documented approximation, not a
/// veterinary guarantee.
pub fn estimate_next_heat_cycle(
    last_heat_date: Option<NaiveDate>,
    age_months: u32,
) -> Option<NaiveDate> {
    if age_months < MIN_HEAT_AGE_MONTHS {
        return None;
    }
    let last = last_heat_date?;
    Some(last + Duration::days((HEAT_CYCLE_MONTHS * AVG_DAYS_PER_MONTH) as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_in_months() {
        let today = date(2026, 6, 1);
        assert_eq!(age_in_months(date(2024, 6, 1), today), 23);
        assert_eq!(age_in_months(date(2026, 5, 1), today), 1);
        assert_eq!(age_in_months(date(2026, 5, 15), today), 0);
        // Birth date in the future clamps to 0
        assert_eq!(age_in_months(date(2027, 1, 1), today), 0);
    }

    #[test]
    fn test_gestation_days_clamps_future_mating() {
        let today = date(2026, 6, 1);
        assert_eq!(gestation_days(date(2026, 5, 22), today), 10);
        assert_eq!(gestation_days(date(2026, 6, 10), today), 0);
    }

    #[test]
    fn test_gestation_stage_thresholds() {
        assert_eq!(gestation_stage(0), GestationStage::Early);
        assert_eq!(gestation_stage(20), GestationStage::Early);
        assert_eq!(gestation_stage(21), GestationStage::Mid);
        assert_eq!(gestation_stage(41), GestationStage::Mid);
        assert_eq!(gestation_stage(42), GestationStage::Late);
        assert_eq!(gestation_stage(62), GestationStage::Late);
        assert_eq!(gestation_stage(63), GestationStage::Imminent);
        assert_eq!(gestation_stage(70), GestationStage::Imminent);
    }

    #[test]
    fn test_next_vaccination_due_annual() {
        let last = date(2026, 1, 15);
        assert_eq!(next_vaccination_due("Rabies", last), date(2027, 1, 15));
        assert_eq!(next_vaccination_due("狂犬疫苗", last), date(2027, 1, 15));
        // Unrecognized types use the default interval by policy
        assert_eq!(next_vaccination_due("giardia", last), date(2027, 1, 15));
    }

    #[test]
    fn test_estimate_next_heat_cycle() {
        let last = date(2026, 1, 1);
        // 6 x 30.44 days floors to 182
        assert_eq!(
            estimate_next_heat_cycle(Some(last), 24),
            Some(date(2026, 7, 2))
        );
        assert_eq!(estimate_next_heat_cycle(Some(last), 5), None);
        assert_eq!(estimate_next_heat_cycle(None, 24), None);
    }
}
