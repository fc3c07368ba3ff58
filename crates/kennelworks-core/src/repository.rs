//! Read boundary to the external entity store.
//!
//! The store itself (remote relational database, sync layer, whatever) is an
//! external collaborator; this module only defines the six bulk read
//! operations the aggregator consumes, plus a `Vec`-backed implementation
//! for tests and local development.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Dog, ExpenseRecord, HealthEvent, LitterRecord, PurchaseRecord, SaleRecord};

/// Repository read errors.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("malformed row: {0}")]
    MalformedRow(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Bulk read access to the six raw record sets.
///
/// No filtering or pagination contract is assumed: every operation returns
/// the full set in the store's row order, and callers filter client-side.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// All animals in the inventory.
    async fn fetch_dogs(&self) -> RepositoryResult<Vec<Dog>>;

    /// All purchase events.
    async fn fetch_purchases(&self) -> RepositoryResult<Vec<PurchaseRecord>>;

    /// All sale events.
    async fn fetch_sales(&self) -> RepositoryResult<Vec<SaleRecord>>;

    /// All expense events.
    async fn fetch_expenses(&self) -> RepositoryResult<Vec<ExpenseRecord>>;

    /// All health events.
    async fn fetch_health_events(&self) -> RepositoryResult<Vec<HealthEvent>>;

    /// All litter (mating/pregnancy/birth) events.
    async fn fetch_litters(&self) -> RepositoryResult<Vec<LitterRecord>>;
}

/// In-memory repository (for testing and local development).
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    pub dogs: Vec<Dog>,
    pub purchases: Vec<PurchaseRecord>,
    pub sales: Vec<SaleRecord>,
    pub expenses: Vec<ExpenseRecord>,
    pub health_events: Vec<HealthEvent>,
    pub litters: Vec<LitterRecord>,
}

#[async_trait]
impl EntityRepository for InMemoryRepository {
    async fn fetch_dogs(&self) -> RepositoryResult<Vec<Dog>> {
        Ok(self.dogs.clone())
    }

    async fn fetch_purchases(&self) -> RepositoryResult<Vec<PurchaseRecord>> {
        Ok(self.purchases.clone())
    }

    async fn fetch_sales(&self) -> RepositoryResult<Vec<SaleRecord>> {
        Ok(self.sales.clone())
    }

    async fn fetch_expenses(&self) -> RepositoryResult<Vec<ExpenseRecord>> {
        Ok(self.expenses.clone())
    }

    async fn fetch_health_events(&self) -> RepositoryResult<Vec<HealthEvent>> {
        Ok(self.health_events.clone())
    }

    async fn fetch_litters(&self) -> RepositoryResult<Vec<LitterRecord>> {
        Ok(self.litters.clone())
    }
}
