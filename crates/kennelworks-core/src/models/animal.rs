//! Animal inventory models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Biological sex of an animal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

/// Lifecycle status of an animal in the kennel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DogStatus {
    /// Currently part of the operation
    Active,
    /// Sold to a buyer
    Sold,
    /// Retired from breeding, still on premises
    Retired,
    /// Deceased
    Deceased,
}

/// A single animal in the kennel inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dog {
    /// Unique identifier
    pub id: String,
    /// Call name
    pub name: String,
    /// Breed label as recorded by the store
    pub breed: String,
    /// Biological sex
    pub gender: Gender,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Lifecycle status
    pub status: DogStatus,
    /// Body weight in kilograms, if recorded
    pub weight_kg: Option<f64>,
}

impl Dog {
    /// Create a new active dog with a generated id.
    pub fn new(name: String, breed: String, gender: Gender, birth_date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            breed,
            gender,
            birth_date,
            status: DogStatus::Active,
            weight_kg: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dog_new() {
        let dog = Dog::new(
            "Luna".into(),
            "Golden Retriever".into(),
            Gender::Female,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        assert_eq!(dog.name, "Luna");
        assert_eq!(dog.status, DogStatus::Active);
        assert_eq!(dog.id.len(), 36);
        assert!(dog.weight_kg.is_none());
    }
}
