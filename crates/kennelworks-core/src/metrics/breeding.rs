//! Breeding eligibility, pregnancy derivation, and breeding history.

use chrono::{Duration, NaiveDate};

use crate::models::{
    BreedingEntry, BreedingEventKind, BreedingOutcome, BreedingStatus, LitterOutcome,
    PregnancyDetail,
};
use crate::temporal;

/// Minimum female breeding age in months.
pub const FEMALE_MIN_BREEDING_MONTHS: u32 = 6;

/// Maximum female breeding age in months.
pub const FEMALE_MAX_BREEDING_MONTHS: u32 = 96;

/// Minimum male stud age in months.
pub const MALE_MIN_BREEDING_MONTHS: u32 = 8;

/// Maximum male stud age in months.
pub const MALE_MAX_BREEDING_MONTHS: u32 = 96;

/// A female whose latest birth is younger than this is nursing.
pub const NURSING_WINDOW_DAYS: i64 = 60;

/// Classify a female's breeding availability.
///
/// An open pregnancy takes precedence over everything else, then nursing,
/// then the age bands.
pub fn classify_female(
    age_months: u32,
    has_open_pregnancy: bool,
    days_since_last_birth: Option<i64>,
) -> BreedingStatus {
    if has_open_pregnancy {
        return BreedingStatus::Pregnant;
    }
    if let Some(days) = days_since_last_birth {
        if (0..NURSING_WINDOW_DAYS).contains(&days) {
            return BreedingStatus::Nursing;
        }
    }
    if age_months < FEMALE_MIN_BREEDING_MONTHS {
        BreedingStatus::TooYoung
    } else if age_months > FEMALE_MAX_BREEDING_MONTHS {
        BreedingStatus::TooOld
    } else {
        BreedingStatus::Available
    }
}

/// Classify a male's stud availability.
pub fn classify_male(age_months: u32) -> BreedingStatus {
    if age_months < MALE_MIN_BREEDING_MONTHS {
        BreedingStatus::TooYoung
    } else if age_months > MALE_MAX_BREEDING_MONTHS {
        BreedingStatus::Retired
    } else {
        BreedingStatus::Available
    }
}

/// Derive the current pregnancy from an animal's breeding records.
///
/// Selects the most recent mating entry with no recorded birth; an open
/// mating older than the stale cutoff yields `None` (considered miscarried
/// or unrecorded from the model's point of view).
pub fn current_pregnancy(
    breeding_records: &[BreedingEntry],
    today: NaiveDate,
) -> Option<PregnancyDetail> {
    let open = breeding_records
        .iter()
        .filter(|r| matches!(r.kind, BreedingEventKind::Mating) && r.birth_date.is_none())
        .max_by_key(|r| r.date)?;

    let days = temporal::gestation_days(open.date, today);
    if days > temporal::PREGNANCY_STALE_DAYS {
        return None;
    }

    Some(PregnancyDetail {
        mating_date: open.date,
        expected_birth: open.date + Duration::days(temporal::GESTATION_DAYS),
        current_stage: temporal::gestation_stage(days),
        days_pregnant: days,
        partner_id: open.partner_id.clone(),
        partner_name: None,
    })
}

/// Map recorded births to history entries, preserving input order.
pub fn breeding_history(breeding_records: &[BreedingEntry]) -> Vec<BreedingOutcome> {
    breeding_records
        .iter()
        .filter(|r| matches!(r.kind, BreedingEventKind::Birth))
        .map(|r| {
            let puppies = r.puppies_count.unwrap_or(0);
            BreedingOutcome {
                date: r.date,
                partner_id: r.partner_id.clone(),
                outcome: if puppies > 0 {
                    LitterOutcome::Success
                } else {
                    LitterOutcome::Failure
                },
                puppies_count: puppies,
            }
        })
        .collect()
}
