//! Derived analysis blocks and the aggregate snapshot result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::detail::DogDetail;

/// Coarse gestation bucket derived from elapsed days since mating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GestationStage {
    /// Days 0-20
    Early,
    /// Days 21-41
    Mid,
    /// Days 42-62
    Late,
    /// Day 63 onward
    Imminent,
}

/// Breeding availability classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BreedingStatus {
    /// Eligible for breeding
    Available,
    /// Open pregnancy in progress (females)
    Pregnant,
    /// Recent litter still nursing (females)
    Nursing,
    /// Below the minimum breeding age
    TooYoung,
    /// Past the maximum breeding age (females)
    TooOld,
    /// Past the maximum stud age (males)
    Retired,
}

/// Detail of an ongoing pregnancy.
///
/// Exists only while the elapsed gestation is within the stale cutoff; an
/// open mating older than that yields no detail at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PregnancyDetail {
    /// Date of the mating that opened this pregnancy
    pub mating_date: NaiveDate,
    /// Mating date plus the fixed gestation period
    pub expected_birth: NaiveDate,
    /// Current gestation bucket
    pub current_stage: GestationStage,
    /// Whole days elapsed since mating
    pub days_pregnant: i64,
    /// Sire id
    pub partner_id: String,
    /// Sire name, when resolvable from the snapshot
    pub partner_name: Option<String>,
}

/// Outcome of one recorded birth.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LitterOutcome {
    /// At least one puppy born
    Success,
    /// No live puppies
    Failure,
}

/// One entry of an animal's breeding history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreedingOutcome {
    /// Birth date
    pub date: NaiveDate,
    /// The other parent
    pub partner_id: String,
    /// Success iff the litter produced puppies
    pub outcome: LitterOutcome,
    /// Number of puppies born
    pub puppies_count: u32,
}

/// Breeding view of one female.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FemaleBreedingInfo {
    pub dog_id: String,
    pub name: String,
    pub age_months: u32,
    pub breeding_status: BreedingStatus,
    /// Present only for an open, non-stale pregnancy
    pub pregnancy_details: Option<PregnancyDetail>,
    /// Estimated next heat, when a heat event is on record and age permits
    pub next_heat_estimate: Option<NaiveDate>,
    /// Recorded births in repository order
    pub breeding_history: Vec<BreedingOutcome>,
}

/// Breeding view of one male.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaleBreedingInfo {
    pub dog_id: String,
    pub name: String,
    pub age_months: u32,
    pub breeding_status: BreedingStatus,
}

/// Breeding analysis over the whole snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BreedingAnalysis {
    pub female_dogs: Vec<FemaleBreedingInfo>,
    pub male_dogs: Vec<MaleBreedingInfo>,
}

/// Status of one vaccine slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VaccineStatus {
    /// Next due date is strictly in the future
    Current,
    /// Recorded but past due
    Due,
    /// Never recorded
    Overdue,
}

/// One core-vaccine slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaccineSlot {
    /// Most recent administration, if any
    pub last_date: Option<NaiveDate>,
    /// Due date derived from the most recent administration
    pub next_due: Option<NaiveDate>,
    /// Slot status
    pub status: VaccineStatus,
}

/// A vaccine outside the three core slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionalVaccine {
    /// Vaccine name as recorded
    pub name: String,
    /// Most recent administration
    pub last_date: NaiveDate,
    /// Derived due date
    pub next_due: NaiveDate,
    /// Slot status
    pub status: VaccineStatus,
}

/// Vaccination posture across the three core vaccines plus extras.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaccinationStatus {
    pub rabies: VaccineSlot,
    pub dhpp_combo: VaccineSlot,
    pub bordetella: VaccineSlot,
    /// Non-core vaccines, deduplicated to the latest administration per name
    pub optional_vaccines: Vec<OptionalVaccine>,
}

/// Priority of an upcoming care task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CarePriority {
    /// Already past due
    Urgent,
    /// Due within the upcoming window
    Important,
}

/// One upcoming care task for an animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareTask {
    /// What needs doing
    pub description: String,
    /// When it is due
    pub due_date: NaiveDate,
    /// Task priority
    pub priority: CarePriority,
}

/// Health view of one animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DogHealthInfo {
    pub dog_id: String,
    pub name: String,
    pub health_score: u8,
    pub last_health_check: Option<NaiveDate>,
    pub vaccination_status: VaccinationStatus,
    /// Sorted ascending by due date
    pub upcoming_care: Vec<CareTask>,
}

/// Health analysis over the whole snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HealthAnalysis {
    pub dogs: Vec<DogHealthInfo>,
}

/// Expense totals bucketed by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpenseBreakdown {
    pub food: f64,
    pub healthcare: f64,
    pub breeding: f64,
    pub grooming: f64,
    pub other: f64,
}

/// Total spend within one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyCost {
    /// Month in `YYYY-MM` form
    pub month: String,
    /// Total expenses in that month
    pub total: f64,
}

/// Financial view of one animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialSummary {
    pub dog_id: String,
    pub name: String,
    /// First recorded purchase amount, 0 when none
    pub purchase_price: f64,
    /// First recorded sale amount, 0 when none
    pub sale_price: f64,
    /// Heuristic market value, not a market query
    pub estimated_market_value: f64,
    pub total_expenses: f64,
    /// sale - purchase - expenses
    pub profit_loss: f64,
    /// profit_loss / purchase_price x 100, 0 when never purchased
    pub roi_percentage: f64,
    pub expense_breakdown: ExpenseBreakdown,
    /// Chronological month buckets
    pub monthly_costs: Vec<MonthlyCost>,
}

/// Profitability of one litter, over the rows tagged to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LitterProfitability {
    pub litter_id: String,
    pub total_revenue: f64,
    pub total_costs: f64,
    pub net_profit: f64,
    /// costs / puppies, 0 for an empty litter
    pub cost_per_puppy: f64,
    /// revenue / sale count, 0 when nothing sold yet
    pub average_sale_price: f64,
    pub puppies_count: u32,
}

/// Financial analysis over the whole snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialAnalysis {
    pub dog_summaries: Vec<FinancialSummary>,
    pub litter_summaries: Vec<LitterProfitability>,
    /// Sum over all raw sale rows
    pub total_revenue: f64,
    /// Sum over all raw expense rows
    pub total_expenses: f64,
}

/// Top-level counts and totals, recomputed every aggregation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AggregateSummary {
    pub total_dogs: usize,
    pub female_count: usize,
    pub male_count: usize,
    /// Animals of either sex classified Available
    pub breeding_eligible_count: usize,
    pub pregnant_count: usize,
    pub total_revenue: f64,
    pub total_expenses: f64,
    /// Animals with at least one urgent care task
    pub urgent_care_count: usize,
}

/// Everything one aggregation run produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateResult {
    /// Snapshot date all derivations were computed against
    pub generated_on: NaiveDate,
    pub dogs: Vec<DogDetail>,
    pub breeding: BreedingAnalysis,
    pub financial: FinancialAnalysis,
    pub health: HealthAnalysis,
    pub summary: AggregateSummary,
}

impl AggregateResult {
    /// An empty snapshot for the given date.
    pub fn empty(generated_on: NaiveDate) -> Self {
        Self {
            generated_on,
            dogs: Vec::new(),
            breeding: BreedingAnalysis::default(),
            financial: FinancialAnalysis::default(),
            health: HealthAnalysis::default(),
            summary: AggregateSummary::default(),
        }
    }
}
