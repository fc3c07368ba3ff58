//! Health scoring, vaccination classification, and upcoming-care tasks.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use strsim::jaro_winkler;

use crate::models::{
    CarePriority, CareTask, HealthEvent, HealthRecordType, OptionalVaccine, VaccinationEntry,
    VaccinationStatus, VaccineSlot, VaccineStatus,
};

/// Baseline score for an animal with any health history.
pub const HEALTH_SCORE_BASE: i64 = 80;

/// Score for an animal with no health events at all, signaling "unknown"
/// rather than "healthy".
pub const HEALTH_SCORE_UNKNOWN: u8 = 70;

/// Only events within this window affect the score.
pub const RECENT_EVENT_WINDOW_DAYS: i64 = 90;

/// Score bonus per recent vaccination, and its cap.
pub const VACCINATION_BONUS: i64 = 5;
pub const VACCINATION_BONUS_CAP: i64 = 20;

/// Score penalty per recent treatment, and its cap.
pub const TREATMENT_PENALTY: i64 = 10;
pub const TREATMENT_PENALTY_CAP: i64 = 30;

/// Vaccinations due within this many days produce a care task.
pub const UPCOMING_CARE_WINDOW_DAYS: i64 = 30;

/// A score below this adds an urgent checkup task.
pub const CHECKUP_SCORE_THRESHOLD: u8 = 70;

/// Jaro-Winkler similarity required for the fuzzy classification tier.
const FUZZY_MATCH_THRESHOLD: f64 = 0.85;

/// Synthetic 0-100 health index from recent vaccination/treatment counts.
///
/// Not a clinical measurement: base 80, +5 per vaccination within the last
/// 90 days (capped at +20), -10 per treatment (capped at -30), clamped to
/// [0, 100]. An animal with no events at all scores 70.
pub fn health_score(events: &[HealthEvent], today: NaiveDate) -> u8 {
    if events.is_empty() {
        return HEALTH_SCORE_UNKNOWN;
    }

    let mut vaccinations: i64 = 0;
    let mut treatments: i64 = 0;
    for event in events {
        let age_days = (today - event.record_date).num_days();
        if !(0..=RECENT_EVENT_WINDOW_DAYS).contains(&age_days) {
            continue;
        }
        match event.record_type {
            HealthRecordType::Vaccination => vaccinations += 1,
            HealthRecordType::Treatment => treatments += 1,
            _ => {}
        }
    }

    let bonus = (vaccinations * VACCINATION_BONUS).min(VACCINATION_BONUS_CAP);
    let penalty = (treatments * TREATMENT_PENALTY).min(TREATMENT_PENALTY_CAP);
    (HEALTH_SCORE_BASE + bonus - penalty).clamp(0, 100) as u8
}

/// The three core vaccine slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreVaccine {
    Rabies,
    DhppCombo,
    Bordetella,
}

/// Best-effort classifier mapping recorded vaccine names to core slots.
///
/// Matching is substring-first against Chinese/English synonym lists, with a
/// Jaro-Winkler fallback for typos. The lists are configuration, not a
/// closed enumeration; anything unmatched lands in the optional list.
pub struct VaccineClassifier {
    synonyms: Vec<(CoreVaccine, Vec<String>)>,
}

impl Default for VaccineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl VaccineClassifier {
    /// Create a classifier with the default synonym lists.
    pub fn new() -> Self {
        Self {
            synonyms: Self::default_synonyms(),
        }
    }

    /// Classify a recorded vaccine name into a core slot.
    pub fn classify(&self, vaccine_name: &str) -> Option<CoreVaccine> {
        let lower = vaccine_name.to_lowercase();

        for (slot, names) in &self.synonyms {
            if names.iter().any(|n| lower.contains(n.as_str())) {
                return Some(*slot);
            }
        }

        // Fuzzy tier for typos ("rabeis", "bordatella")
        for (slot, names) in &self.synonyms {
            if names
                .iter()
                .any(|n| jaro_winkler(&lower, n) >= FUZZY_MATCH_THRESHOLD)
            {
                return Some(*slot);
            }
        }

        None
    }

    /// Add a custom synonym for a core slot.
    pub fn add_synonym(&mut self, vaccine: CoreVaccine, synonym: &str) {
        if let Some((_, names)) = self.synonyms.iter_mut().find(|(slot, _)| *slot == vaccine) {
            names.push(synonym.to_lowercase());
        }
    }

    /// Classify an animal's vaccination records into the status view.
    pub fn vaccination_status(
        &self,
        records: &[VaccinationEntry],
        today: NaiveDate,
    ) -> VaccinationStatus {
        let mut rabies: Option<&VaccinationEntry> = None;
        let mut dhpp: Option<&VaccinationEntry> = None;
        let mut bordetella: Option<&VaccinationEntry> = None;
        let mut optional: BTreeMap<String, &VaccinationEntry> = BTreeMap::new();

        for record in records {
            match self.classify(&record.vaccine_type) {
                Some(CoreVaccine::Rabies) => keep_latest(&mut rabies, record),
                Some(CoreVaccine::DhppCombo) => keep_latest(&mut dhpp, record),
                Some(CoreVaccine::Bordetella) => keep_latest(&mut bordetella, record),
                None => {
                    let key = record.vaccine_type.to_lowercase();
                    let entry = optional.entry(key).or_insert(record);
                    if record.date > entry.date {
                        *entry = record;
                    }
                }
            }
        }

        VaccinationStatus {
            rabies: slot_from(rabies, today),
            dhpp_combo: slot_from(dhpp, today),
            bordetella: slot_from(bordetella, today),
            optional_vaccines: optional
                .into_values()
                .map(|r| OptionalVaccine {
                    name: r.vaccine_type.clone(),
                    last_date: r.date,
                    next_due: r.next_due,
                    status: due_status(r.next_due, today),
                })
                .collect(),
        }
    }

    /// Default synonym lists for the three core slots.
    fn default_synonyms() -> Vec<(CoreVaccine, Vec<String>)> {
        vec![
            (
                CoreVaccine::Rabies,
                vec!["rabies".into(), "狂犬".into()],
            ),
            (
                CoreVaccine::DhppCombo,
                vec![
                    "dhpp".into(),
                    "da2pp".into(),
                    "dapp".into(),
                    "distemper".into(),
                    "parvo".into(),
                    "犬瘟".into(),
                    "细小".into(),
                    "四联".into(),
                    "五联".into(),
                    "六联".into(),
                ],
            ),
            (
                CoreVaccine::Bordetella,
                vec![
                    "bordetella".into(),
                    "kennel cough".into(),
                    "窝咳".into(),
                ],
            ),
        ]
    }
}

fn keep_latest<'a>(slot: &mut Option<&'a VaccinationEntry>, record: &'a VaccinationEntry) {
    match slot {
        Some(current) if current.date >= record.date => {}
        _ => *slot = Some(record),
    }
}

/// Current iff the due date is strictly in the future; recorded-but-past
/// collapses to Due.
fn due_status(next_due: NaiveDate, today: NaiveDate) -> VaccineStatus {
    if next_due > today {
        VaccineStatus::Current
    } else {
        VaccineStatus::Due
    }
}

fn slot_from(record: Option<&VaccinationEntry>, today: NaiveDate) -> VaccineSlot {
    match record {
        Some(r) => VaccineSlot {
            last_date: Some(r.date),
            next_due: Some(r.next_due),
            status: due_status(r.next_due, today),
        },
        // A slot with no record at all is overdue
        None => VaccineSlot {
            last_date: None,
            next_due: None,
            status: VaccineStatus::Overdue,
        },
    }
}

/// Upcoming care tasks: vaccinations due within the next 30 days (urgent if
/// already past due) plus an urgent checkup when the score is low. Sorted
/// ascending by due date.
///
/// Historical administrations are deduplicated to the latest per vaccine
/// name so superseded rows do not produce stale tasks.
pub fn upcoming_care(
    records: &[VaccinationEntry],
    health_score: u8,
    today: NaiveDate,
) -> Vec<CareTask> {
    let mut latest: BTreeMap<String, &VaccinationEntry> = BTreeMap::new();
    for record in records {
        let key = record.vaccine_type.to_lowercase();
        let entry = latest.entry(key).or_insert(record);
        if record.next_due > entry.next_due {
            *entry = record;
        }
    }

    let mut tasks: Vec<CareTask> = Vec::new();
    for record in latest.values() {
        let days_until = (record.next_due - today).num_days();
        if days_until <= UPCOMING_CARE_WINDOW_DAYS {
            let priority = if record.next_due < today {
                CarePriority::Urgent
            } else {
                CarePriority::Important
            };
            tasks.push(CareTask {
                description: format!("{} vaccination", record.vaccine_type),
                due_date: record.next_due,
                priority,
            });
        }
    }

    if health_score < CHECKUP_SCORE_THRESHOLD {
        tasks.push(CareTask {
            description: "General health checkup".into(),
            due_date: today,
            priority: CarePriority::Urgent,
        });
    }

    tasks.sort_by_key(|t| t.due_date);
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(record_type: HealthRecordType, date_: NaiveDate) -> HealthEvent {
        HealthEvent {
            dog_id: "dog-1".into(),
            record_type,
            description: "event".into(),
            record_date: date_,
            veterinarian: None,
            cost: None,
        }
    }

    fn vaccination(name: &str, date_: NaiveDate) -> VaccinationEntry {
        VaccinationEntry {
            vaccine_type: name.into(),
            date: date_,
            next_due: temporal::next_vaccination_due(name, date_),
            veterinarian: None,
            cost: None,
        }
    }

    #[test]
    fn test_health_score_no_events_is_unknown() {
        assert_eq!(health_score(&[], date(2026, 6, 1)), 70);
    }

    #[test]
    fn test_health_score_vaccination_bonus_caps() {
        let today = date(2026, 6, 1);
        let recent = date(2026, 5, 1);
        let events: Vec<HealthEvent> = (0..4)
            .map(|_| event(HealthRecordType::Vaccination, recent))
            .collect();
        // 80 + 4x5 = 100
        assert_eq!(health_score(&events, today), 100);

        let more: Vec<HealthEvent> = (0..6)
            .map(|_| event(HealthRecordType::Vaccination, recent))
            .collect();
        // Bonus capped at +20
        assert_eq!(health_score(&more, today), 100);
    }

    #[test]
    fn test_health_score_treatment_penalty_caps() {
        let today = date(2026, 6, 1);
        let recent = date(2026, 5, 1);
        let events: Vec<HealthEvent> = (0..5)
            .map(|_| event(HealthRecordType::Treatment, recent))
            .collect();
        // 80 - 30 (capped) = 50
        assert_eq!(health_score(&events, today), 50);
    }

    #[test]
    fn test_health_score_old_events_excluded() {
        let today = date(2026, 6, 1);
        let stale = date(2025, 1, 1);
        let events = vec![event(HealthRecordType::Treatment, stale)];
        // Events exist but none recent: plain base
        assert_eq!(health_score(&events, today), 80);
    }

    #[test]
    fn test_health_score_mixed() {
        let today = date(2026, 6, 1);
        let recent = date(2026, 5, 15);
        let events = vec![
            event(HealthRecordType::Vaccination, recent),
            event(HealthRecordType::Treatment, recent),
            event(HealthRecordType::Checkup, recent),
        ];
        // 80 + 5 - 10 = 75
        assert_eq!(health_score(&events, today), 75);
    }

    #[test]
    fn test_classify_core_vaccines() {
        let classifier = VaccineClassifier::new();

        assert_eq!(classifier.classify("Rabies"), Some(CoreVaccine::Rabies));
        assert_eq!(classifier.classify("狂犬疫苗"), Some(CoreVaccine::Rabies));
        assert_eq!(classifier.classify("DHPP booster"), Some(CoreVaccine::DhppCombo));
        assert_eq!(classifier.classify("犬瘟热"), Some(CoreVaccine::DhppCombo));
        assert_eq!(classifier.classify("细小病毒"), Some(CoreVaccine::DhppCombo));
        assert_eq!(classifier.classify("五联疫苗"), Some(CoreVaccine::DhppCombo));
        assert_eq!(
            classifier.classify("Bordetella"),
            Some(CoreVaccine::Bordetella)
        );
        assert_eq!(
            classifier.classify("kennel cough"),
            Some(CoreVaccine::Bordetella)
        );
    }

    #[test]
    fn test_classify_fuzzy_fallback() {
        let classifier = VaccineClassifier::new();
        // Typos caught by the fuzzy tier
        assert_eq!(classifier.classify("rabeis"), Some(CoreVaccine::Rabies));
        assert_eq!(
            classifier.classify("bordatella"),
            Some(CoreVaccine::Bordetella)
        );
    }

    #[test]
    fn test_classify_unknown_is_optional() {
        let classifier = VaccineClassifier::new();
        assert_eq!(classifier.classify("giardia"), None);
    }

    #[test]
    fn test_classify_custom_synonym() {
        let mut classifier = VaccineClassifier::new();
        classifier.add_synonym(CoreVaccine::Rabies, "rage");
        assert_eq!(classifier.classify("RAGE 2026"), Some(CoreVaccine::Rabies));
    }

    #[test]
    fn test_vaccination_status_slots() {
        let classifier = VaccineClassifier::new();
        let today = date(2026, 6, 1);
        let records = vec![
            vaccination("rabies", date(2026, 1, 1)),
            vaccination("dhpp", date(2024, 1, 1)),
            vaccination("giardia", date(2026, 5, 1)),
        ];

        let status = classifier.vaccination_status(&records, today);

        // Rabies due 2027-01-01: current
        assert_eq!(status.rabies.status, VaccineStatus::Current);
        assert_eq!(status.rabies.last_date, Some(date(2026, 1, 1)));
        // Dhpp due 2025-01-01: recorded but past due
        assert_eq!(status.dhpp_combo.status, VaccineStatus::Due);
        // Bordetella never recorded
        assert_eq!(status.bordetella.status, VaccineStatus::Overdue);
        assert_eq!(status.bordetella.last_date, None);
        // Giardia is optional
        assert_eq!(status.optional_vaccines.len(), 1);
        assert_eq!(status.optional_vaccines[0].name, "giardia");
    }

    #[test]
    fn test_vaccination_status_keeps_latest_per_slot() {
        let classifier = VaccineClassifier::new();
        let today = date(2026, 6, 1);
        let records = vec![
            vaccination("rabies", date(2024, 1, 1)),
            vaccination("rabies", date(2026, 1, 1)),
        ];

        let status = classifier.vaccination_status(&records, today);
        assert_eq!(status.rabies.last_date, Some(date(2026, 1, 1)));
        assert_eq!(status.rabies.status, VaccineStatus::Current);
    }

    #[test]
    fn test_upcoming_care_priorities_and_sort() {
        let today = date(2026, 6, 1);
        // Due 2026-06-10: within the window, not yet passed
        let soon = vaccination("rabies", date(2025, 6, 10));
        // Due 2026-05-20: already passed
        let overdue = vaccination("dhpp", date(2025, 5, 20));
        // Due 2026-12-01: outside the window
        let far = vaccination("bordetella", date(2025, 12, 1));

        let tasks = upcoming_care(&[soon, overdue, far], 90, today);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].due_date, date(2026, 5, 20));
        assert_eq!(tasks[0].priority, CarePriority::Urgent);
        assert_eq!(tasks[1].due_date, date(2026, 6, 10));
        assert_eq!(tasks[1].priority, CarePriority::Important);
    }

    #[test]
    fn test_upcoming_care_low_score_adds_urgent_checkup() {
        let today = date(2026, 6, 1);
        let tasks = upcoming_care(&[], 65, today);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].priority, CarePriority::Urgent);
        assert_eq!(tasks[0].due_date, today);
        assert!(tasks[0].description.contains("checkup"));
    }

    #[test]
    fn test_upcoming_care_dedups_superseded_records() {
        let today = date(2026, 6, 1);
        let records = vec![
            // Superseded row, due long past
            vaccination("rabies", date(2024, 1, 1)),
            // Replacement, due far in the future
            vaccination("rabies", date(2026, 5, 1)),
        ];
        assert!(upcoming_care(&records, 90, today).is_empty());
    }
}
