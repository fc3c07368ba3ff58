//! Kennelworks Core Library
//!
//! Business-metrics engine for dog-breeding operations. Reads raw entity
//! snapshots from an external store, derives the computed business model,
//! and hands the result to the report layer.
//!
//! # Architecture
//!
//! ```text
//! EntityRepository (external store, injected)
//!         │  six bulk reads, serial, each with bounded retry
//!         ▼
//! BusinessDataAggregator
//!         │  per-animal assembly via the metrics modules
//!         ├── temporal        (age, gestation, due dates, heat cycles)
//!         ├── metrics::breeding
//!         ├── metrics::financial
//!         └── metrics::health
//!         ▼
//! AggregateResult (DogDetail list + analysis blocks + summary)
//!         ▼
//! report layer (kennelworks-llm) / export
//! ```
//!
//! # Modules
//!
//! - [`models`]: typed records, derived detail, and analysis blocks
//! - [`repository`]: read boundary to the external entity store
//! - [`temporal`]: pure date estimators and the biological constants
//! - [`metrics`]: breeding/financial/health derivations
//! - [`aggregator`]: full-snapshot aggregation with per-fetch retry
//! - [`export`]: JSON/CSV financial report export

pub mod aggregator;
pub mod export;
pub mod metrics;
pub mod models;
pub mod repository;
pub mod temporal;

// Re-export commonly used types
pub use aggregator::{AggregationError, AggregatorConfig, BusinessDataAggregator};
pub use export::FinancialExport;
pub use models::{
    AggregateResult, AggregateSummary, BreedingStatus, Dog, DogDetail, Gender, GestationStage,
    PregnancyDetail, VaccinationStatus,
};
pub use repository::{EntityRepository, InMemoryRepository, RepositoryError, RepositoryResult};
