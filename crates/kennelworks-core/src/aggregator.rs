//! Full-snapshot business aggregation.
//!
//! Pipeline: six serial repository fetches (each with its own bounded retry)
//! → per-animal `DogDetail` assembly → breeding/financial/health analysis
//! blocks → aggregate summary. The result is pure given the snapshot; the
//! only side effect is diagnostic logging.

use std::future::Future;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::metrics::{breeding, financial, health};
use crate::metrics::financial::MarketValuer;
use crate::metrics::health::VaccineClassifier;
use crate::models::{
    AggregateResult, AggregateSummary, BreedingAnalysis, BreedingEntry, BreedingEventKind,
    BreedingStatus, CarePriority, Dog, DogDetail, DogHealthInfo, ExpenseRecord,
    FemaleBreedingInfo, FinancialAnalysis, FinancialEntry, FinancialEventKind, Gender,
    HealthAnalysis, HealthEvent, HealthRecordType, LitterRecord, MaleBreedingInfo,
    PurchaseRecord, SaleRecord, VaccinationEntry,
};
use crate::repository::{EntityRepository, RepositoryError, RepositoryResult};
use crate::temporal;

/// Retry policy for repository fetches.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Attempts per entity fetch.
    pub max_attempts: u32,
    /// Backoff after attempt N is `N x backoff_unit`.
    pub backoff_unit: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_millis(1000),
        }
    }
}

/// Aggregation errors.
#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("{entity} fetch failed after {attempts} attempts: {source}")]
    Repository {
        entity: &'static str,
        attempts: u32,
        #[source]
        source: RepositoryError,
    },
}

pub type AggregationResult<T> = Result<T, AggregationError>;

/// Assembles the unified business model from one repository snapshot.
pub struct BusinessDataAggregator<R: EntityRepository> {
    repository: R,
    config: AggregatorConfig,
    valuer: MarketValuer,
    vaccines: VaccineClassifier,
}

impl<R: EntityRepository> BusinessDataAggregator<R> {
    /// Create an aggregator with default retry policy and lookup tables.
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, AggregatorConfig::default())
    }

    /// Create an aggregator with a custom retry policy.
    pub fn with_config(repository: R, config: AggregatorConfig) -> Self {
        Self {
            repository,
            config,
            valuer: MarketValuer::new(),
            vaccines: VaccineClassifier::new(),
        }
    }

    /// Aggregate against today's date.
    pub async fn aggregate(&self) -> AggregationResult<AggregateResult> {
        self.aggregate_at(Utc::now().date_naive()).await
    }

    /// Aggregate against an explicit snapshot date.
    ///
    /// An empty animal set is not an error: all derived collections are
    /// empty and the summary counts are zero.
    pub async fn aggregate_at(&self, today: NaiveDate) -> AggregationResult<AggregateResult> {
        // Serial fetches; each owns its retry budget so failure/backoff
        // state never overlaps across entity kinds.
        let dogs = self
            .fetch_with_retry("animals", || self.repository.fetch_dogs())
            .await?;
        let purchases = self
            .fetch_with_retry("purchases", || self.repository.fetch_purchases())
            .await?;
        let sales = self
            .fetch_with_retry("sales", || self.repository.fetch_sales())
            .await?;
        let expenses = self
            .fetch_with_retry("expenses", || self.repository.fetch_expenses())
            .await?;
        let health_events = self
            .fetch_with_retry("health events", || self.repository.fetch_health_events())
            .await?;
        let litters = self
            .fetch_with_retry("litters", || self.repository.fetch_litters())
            .await?;

        tracing::info!(
            dogs = dogs.len(),
            purchases = purchases.len(),
            sales = sales.len(),
            expenses = expenses.len(),
            health_events = health_events.len(),
            litters = litters.len(),
            "snapshot fetched"
        );

        let details: Vec<DogDetail> = dogs
            .iter()
            .map(|dog| {
                self.build_detail(dog, &purchases, &sales, &expenses, &health_events, &litters, today)
            })
            .collect();

        let breeding = self.build_breeding_analysis(&details, &health_events, today);
        let financial =
            self.build_financial_analysis(&details, &purchases, &sales, &expenses, &litters);
        let health = self.build_health_analysis(&details, today);
        let summary = build_summary(&details, &breeding, &health, &sales, &expenses);

        Ok(AggregateResult {
            generated_on: today,
            dogs: details,
            breeding,
            financial,
            health,
            summary,
        })
    }

    /// Run one entity fetch with bounded retries and linear backoff.
    async fn fetch_with_retry<T, Fut>(
        &self,
        entity: &'static str,
        fetch: impl Fn() -> Fut,
    ) -> AggregationResult<Vec<T>>
    where
        Fut: Future<Output = RepositoryResult<Vec<T>>>,
    {
        let mut attempt = 1;
        loop {
            match fetch().await {
                Ok(rows) => return Ok(rows),
                Err(err) if attempt < self.config.max_attempts => {
                    tracing::warn!(entity, attempt, error = %err, "entity fetch failed, retrying");
                    tokio::time::sleep(self.config.backoff_unit * attempt).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::warn!(entity, attempt, error = %err, "entity fetch exhausted retries");
                    return Err(AggregationError::Repository {
                        entity,
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }

    /// Build one animal's derived detail from the filtered raw sets.
    #[allow(clippy::too_many_arguments)]
    fn build_detail(
        &self,
        dog: &Dog,
        purchases: &[PurchaseRecord],
        sales: &[SaleRecord],
        expenses: &[ExpenseRecord],
        health_events: &[HealthEvent],
        litters: &[LitterRecord],
        today: NaiveDate,
    ) -> DogDetail {
        let age_months = temporal::age_in_months(dog.birth_date, today);

        let my_events: Vec<HealthEvent> = health_events
            .iter()
            .filter(|e| e.dog_id == dog.id)
            .cloned()
            .collect();

        let vaccination_records: Vec<VaccinationEntry> = my_events
            .iter()
            .filter(|e| e.record_type == HealthRecordType::Vaccination)
            .map(|e| VaccinationEntry {
                vaccine_type: e.description.clone(),
                date: e.record_date,
                next_due: temporal::next_vaccination_due(&e.description, e.record_date),
                veterinarian: e.veterinarian.clone(),
                cost: e.cost,
            })
            .collect();

        let mut breeding_records: Vec<BreedingEntry> = Vec::new();
        for litter in litters
            .iter()
            .filter(|l| l.mother_id == dog.id || l.father_id == dog.id)
        {
            let partner_id = if litter.mother_id == dog.id {
                litter.father_id.clone()
            } else {
                litter.mother_id.clone()
            };
            breeding_records.push(BreedingEntry {
                kind: BreedingEventKind::Mating,
                date: litter.mating_date,
                partner_id: partner_id.clone(),
                puppies_count: None,
                birth_date: litter.birth_date,
            });
            if litter.birth_date.is_none()
                && litter.mother_id == dog.id
                && temporal::gestation_days(litter.mating_date, today)
                    <= temporal::PREGNANCY_STALE_DAYS
            {
                breeding_records.push(BreedingEntry {
                    kind: BreedingEventKind::Pregnancy,
                    date: litter.mating_date,
                    partner_id: partner_id.clone(),
                    puppies_count: None,
                    birth_date: None,
                });
            }
            if let Some(birth) = litter.birth_date {
                breeding_records.push(BreedingEntry {
                    kind: BreedingEventKind::Birth,
                    date: birth,
                    partner_id,
                    puppies_count: Some(litter.puppies_count),
                    birth_date: Some(birth),
                });
            }
        }

        let mut financial_records: Vec<FinancialEntry> = Vec::new();
        for p in purchases.iter().filter(|p| p.dog_id == dog.id) {
            financial_records.push(FinancialEntry {
                kind: FinancialEventKind::Purchase,
                date: p.purchase_date,
                amount: p.amount,
                category: None,
            });
        }
        for s in sales.iter().filter(|s| s.dog_id == dog.id) {
            financial_records.push(FinancialEntry {
                kind: FinancialEventKind::Sale,
                date: s.sale_date,
                amount: s.amount,
                category: None,
            });
        }
        for e in expenses
            .iter()
            .filter(|e| e.dog_id.as_deref() == Some(dog.id.as_str()))
        {
            financial_records.push(FinancialEntry {
                kind: FinancialEventKind::Expense,
                date: e.expense_date,
                amount: e.amount,
                category: Some(e.category.clone()),
            });
        }

        DogDetail {
            dog: dog.clone(),
            age_months,
            health_score: health::health_score(&my_events, today),
            last_health_check: my_events.iter().map(|e| e.record_date).max(),
            vaccination_records,
            breeding_records,
            financial_records,
        }
    }

    fn build_breeding_analysis(
        &self,
        details: &[DogDetail],
        health_events: &[HealthEvent],
        today: NaiveDate,
    ) -> BreedingAnalysis {
        let mut analysis = BreedingAnalysis::default();

        for detail in details {
            match detail.dog.gender {
                Gender::Female => {
                    let mut pregnancy = breeding::current_pregnancy(&detail.breeding_records, today);
                    if let Some(p) = pregnancy.as_mut() {
                        p.partner_name = details
                            .iter()
                            .find(|d| d.dog.id == p.partner_id)
                            .map(|d| d.dog.name.clone());
                    }

                    let days_since_last_birth = detail
                        .breeding_records
                        .iter()
                        .filter(|r| r.kind == BreedingEventKind::Birth)
                        .map(|r| (today - r.date).num_days())
                        .filter(|days| *days >= 0)
                        .min();

                    let last_heat = health_events
                        .iter()
                        .filter(|e| {
                            e.dog_id == detail.dog.id
                                && e.record_type == HealthRecordType::HeatCycle
                        })
                        .map(|e| e.record_date)
                        .max();

                    analysis.female_dogs.push(FemaleBreedingInfo {
                        dog_id: detail.dog.id.clone(),
                        name: detail.dog.name.clone(),
                        age_months: detail.age_months,
                        breeding_status: breeding::classify_female(
                            detail.age_months,
                            pregnancy.is_some(),
                            days_since_last_birth,
                        ),
                        pregnancy_details: pregnancy,
                        next_heat_estimate: temporal::estimate_next_heat_cycle(
                            last_heat,
                            detail.age_months,
                        ),
                        breeding_history: breeding::breeding_history(&detail.breeding_records),
                    });
                }
                Gender::Male => {
                    analysis.male_dogs.push(MaleBreedingInfo {
                        dog_id: detail.dog.id.clone(),
                        name: detail.dog.name.clone(),
                        age_months: detail.age_months,
                        breeding_status: breeding::classify_male(detail.age_months),
                    });
                }
            }
        }

        analysis
    }

    fn build_financial_analysis(
        &self,
        details: &[DogDetail],
        purchases: &[PurchaseRecord],
        sales: &[SaleRecord],
        expenses: &[ExpenseRecord],
        litters: &[LitterRecord],
    ) -> FinancialAnalysis {
        let dog_summaries = details
            .iter()
            .map(|detail| {
                let dog = &detail.dog;
                let my_purchases: Vec<PurchaseRecord> = purchases
                    .iter()
                    .filter(|p| p.dog_id == dog.id)
                    .cloned()
                    .collect();
                let my_sales: Vec<SaleRecord> =
                    sales.iter().filter(|s| s.dog_id == dog.id).cloned().collect();
                let my_expenses: Vec<ExpenseRecord> = expenses
                    .iter()
                    .filter(|e| e.dog_id.as_deref() == Some(dog.id.as_str()))
                    .cloned()
                    .collect();
                financial::summarize(
                    dog,
                    detail.age_months,
                    &my_purchases,
                    &my_sales,
                    &my_expenses,
                    &self.valuer,
                )
            })
            .collect();

        let litter_summaries = litters
            .iter()
            .map(|litter| {
                let tagged_sales: Vec<SaleRecord> = sales
                    .iter()
                    .filter(|s| s.litter_id.as_deref() == Some(litter.id.as_str()))
                    .cloned()
                    .collect();
                let tagged_expenses: Vec<ExpenseRecord> = expenses
                    .iter()
                    .filter(|e| e.litter_id.as_deref() == Some(litter.id.as_str()))
                    .cloned()
                    .collect();
                financial::litter_profitability(litter, &tagged_sales, &tagged_expenses)
            })
            .collect();

        FinancialAnalysis {
            dog_summaries,
            litter_summaries,
            total_revenue: sales.iter().map(|s| s.amount).sum(),
            total_expenses: expenses.iter().map(|e| e.amount).sum(),
        }
    }

    fn build_health_analysis(&self, details: &[DogDetail], today: NaiveDate) -> HealthAnalysis {
        HealthAnalysis {
            dogs: details
                .iter()
                .map(|detail| DogHealthInfo {
                    dog_id: detail.dog.id.clone(),
                    name: detail.dog.name.clone(),
                    health_score: detail.health_score,
                    last_health_check: detail.last_health_check,
                    vaccination_status: self
                        .vaccines
                        .vaccination_status(&detail.vaccination_records, today),
                    upcoming_care: health::upcoming_care(
                        &detail.vaccination_records,
                        detail.health_score,
                        today,
                    ),
                })
                .collect(),
        }
    }
}

/// Reduce the per-animal results and raw totals into the summary.
fn build_summary(
    details: &[DogDetail],
    breeding: &BreedingAnalysis,
    health: &HealthAnalysis,
    sales: &[SaleRecord],
    expenses: &[ExpenseRecord],
) -> AggregateSummary {
    let eligible_females = breeding
        .female_dogs
        .iter()
        .filter(|f| f.breeding_status == BreedingStatus::Available)
        .count();
    let eligible_males = breeding
        .male_dogs
        .iter()
        .filter(|m| m.breeding_status == BreedingStatus::Available)
        .count();

    AggregateSummary {
        total_dogs: details.len(),
        female_count: details
            .iter()
            .filter(|d| d.dog.gender == Gender::Female)
            .count(),
        male_count: details
            .iter()
            .filter(|d| d.dog.gender == Gender::Male)
            .count(),
        breeding_eligible_count: eligible_females + eligible_males,
        pregnant_count: breeding
            .female_dogs
            .iter()
            .filter(|f| f.breeding_status == BreedingStatus::Pregnant)
            .count(),
        total_revenue: sales.iter().map(|s| s.amount).sum(),
        total_expenses: expenses.iter().map(|e| e.amount).sum(),
        urgent_care_count: health
            .dogs
            .iter()
            .filter(|d| {
                d.upcoming_care
                    .iter()
                    .any(|t| t.priority == CarePriority::Urgent)
            })
            .count(),
    }
}
