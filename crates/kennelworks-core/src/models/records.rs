//! Raw event records as read from the external store.
//!
//! The store owns and mutates these rows; the engine only reads snapshots.
//! Each row gets an explicit typed shape here so the metrics modules never
//! see loosely-typed data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Acquisition of an animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseRecord {
    /// Animal this purchase is for
    pub dog_id: String,
    /// Purchase amount
    pub amount: f64,
    /// Date of purchase
    pub purchase_date: NaiveDate,
}

/// Sale of an animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleRecord {
    /// Animal that was sold
    pub dog_id: String,
    /// Sale amount
    pub amount: f64,
    /// Date of sale
    pub sale_date: NaiveDate,
    /// Litter this sale belongs to, for puppy sales
    pub litter_id: Option<String>,
}

/// An operating expense, attributable to an animal, a litter, or neither.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    /// Animal this expense is for, if per-animal
    pub dog_id: Option<String>,
    /// Expense amount
    pub amount: f64,
    /// Free-form category label as entered by the operator
    pub category: String,
    /// Date of the expense
    pub expense_date: NaiveDate,
    /// Optional note
    pub description: Option<String>,
    /// Litter this expense belongs to, if litter-level
    pub litter_id: Option<String>,
}

/// Kind of veterinary/health event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthRecordType {
    /// A vaccine administration
    Vaccination,
    /// Medical treatment for an illness or injury
    Treatment,
    /// Routine examination
    Checkup,
    /// Observed start of a heat cycle
    HeatCycle,
    /// Anything else the operator recorded
    Other,
}

/// A single health event for one animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthEvent {
    /// Animal the event is for
    pub dog_id: String,
    /// Event kind
    pub record_type: HealthRecordType,
    /// Vaccine name, treatment description, or note
    pub description: String,
    /// Date of the event
    pub record_date: NaiveDate,
    /// Attending veterinarian, if recorded
    pub veterinarian: Option<String>,
    /// Cost of the event, if recorded
    pub cost: Option<f64>,
}

/// A combined mating/pregnancy/birth record linking one female and one male.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LitterRecord {
    /// Unique identifier, referenced by litter-tagged sales and expenses
    pub id: String,
    /// Mother animal id
    pub mother_id: String,
    /// Father animal id
    pub father_id: String,
    /// Date of mating
    pub mating_date: NaiveDate,
    /// Date of birth; absent while the pregnancy is open
    pub birth_date: Option<NaiveDate>,
    /// Expected birth date as recorded by the operator
    pub expected_birth_date: Option<NaiveDate>,
    /// Number of puppies born (0 while open)
    pub puppies_count: u32,
    /// Optional note
    pub notes: Option<String>,
}

impl LitterRecord {
    /// Create a new open litter record with a generated id.
    pub fn new(mother_id: String, father_id: String, mating_date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            mother_id,
            father_id,
            mating_date,
            birth_date: None,
            expected_birth_date: None,
            puppies_count: 0,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_litter_record_new() {
        let litter = LitterRecord::new(
            "mother-1".into(),
            "father-1".into(),
            NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        );
        assert_eq!(litter.id.len(), 36);
        assert!(litter.birth_date.is_none());
        assert_eq!(litter.puppies_count, 0);
    }
}
