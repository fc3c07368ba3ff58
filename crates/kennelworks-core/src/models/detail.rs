//! Per-animal derived detail assembled by the aggregator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::animal::Dog;

/// Kind of breeding event in an animal's derived history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BreedingEventKind {
    /// A mating took place
    Mating,
    /// An ongoing pregnancy derived from an open mating
    Pregnancy,
    /// A recorded birth
    Birth,
}

/// One breeding event from an animal's point of view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreedingEntry {
    /// Event kind
    pub kind: BreedingEventKind,
    /// Event date (mating date for mating/pregnancy entries, birth date for births)
    pub date: NaiveDate,
    /// The other parent
    pub partner_id: String,
    /// Puppies born, for birth entries
    pub puppies_count: Option<u32>,
    /// Birth date of the underlying litter, if recorded
    pub birth_date: Option<NaiveDate>,
}

/// Kind of financial event in an animal's derived history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FinancialEventKind {
    Purchase,
    Sale,
    Expense,
}

/// One financial event attributed to an animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialEntry {
    /// Event kind
    pub kind: FinancialEventKind,
    /// Event date
    pub date: NaiveDate,
    /// Amount
    pub amount: f64,
    /// Category label, for expense entries
    pub category: Option<String>,
}

/// One vaccine administration with its derived due date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaccinationEntry {
    /// Vaccine name as recorded
    pub vaccine_type: String,
    /// Administration date
    pub date: NaiveDate,
    /// Next due date per the revaccination interval
    pub next_due: NaiveDate,
    /// Administering veterinarian, if recorded
    pub veterinarian: Option<String>,
    /// Cost, if recorded
    pub cost: Option<f64>,
}

/// Full derived detail for one animal, valid for one aggregation snapshot.
///
/// Sub-record ordering mirrors the repository's original row order filtered
/// per animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DogDetail {
    /// Identity and raw attributes
    pub dog: Dog,
    /// Age in whole months at the snapshot date
    pub age_months: u32,
    /// Synthetic 0-100 health index
    pub health_score: u8,
    /// Most recent health event of any kind
    pub last_health_check: Option<NaiveDate>,
    /// Vaccine administrations with derived due dates
    pub vaccination_records: Vec<VaccinationEntry>,
    /// Breeding events from this animal's point of view
    pub breeding_records: Vec<BreedingEntry>,
    /// Purchases, sales, and expenses attributed to this animal
    pub financial_records: Vec<FinancialEntry>,
}
