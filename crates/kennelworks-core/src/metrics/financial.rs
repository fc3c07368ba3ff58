//! Per-animal and per-litter financial metrics.

use std::collections::{BTreeMap, HashMap};

use crate::models::{
    Dog, ExpenseBreakdown, ExpenseRecord, FinancialSummary, Gender, LitterProfitability,
    LitterRecord, MonthlyCost, PurchaseRecord, SaleRecord,
};

/// Base market value for breeds not in the lookup table.
pub const DEFAULT_BREED_BASE_VALUE: f64 = 800.0;

/// Premium multiplier for breeding-age females.
pub const BREEDING_FEMALE_PREMIUM: f64 = 1.1;

/// Breeding-age band (months) that earns the female premium.
const PREMIUM_AGE_MONTHS: std::ops::RangeInclusive<u32> = 6..=60;

/// Expense keyword groups, checked in order; first matching group wins.
///
/// Keywords cover both the English and Chinese labels the source data uses.
const FOOD_KEYWORDS: &[&str] = &["food", "feed", "kibble", "treat", "狗粮", "粮", "食"];
const HEALTHCARE_KEYWORDS: &[&str] = &[
    "vet", "medical", "health", "vaccin", "medicine", "treatment", "疫苗", "医", "药",
];
const BREEDING_KEYWORDS: &[&str] = &["breed", "stud", "mating", "whelp", "配种", "繁育"];
const GROOMING_KEYWORDS: &[&str] = &["groom", "wash", "trim", "美容", "洗"];

/// Return on investment as a percentage; 0 when there was no purchase price.
pub fn roi(purchase_price: f64, sale_price: f64, total_expenses: f64) -> f64 {
    if purchase_price == 0.0 {
        return 0.0;
    }
    (sale_price - purchase_price - total_expenses) / purchase_price * 100.0
}

/// Heuristic market valuation from breed, age, and sex.
///
/// This is an estimate from a lookup table, not a market query.
pub struct MarketValuer {
    /// Base value by lowercased breed label
    breed_values: HashMap<String, f64>,
}

impl Default for MarketValuer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketValuer {
    /// Create a valuer with the default breed table.
    pub fn new() -> Self {
        Self {
            breed_values: Self::default_breed_values(),
        }
    }

    /// Estimate the market value of one animal.
    pub fn estimate(&self, breed: &str, age_months: u32, gender: Gender) -> f64 {
        let base = self
            .breed_values
            .get(&breed.to_lowercase())
            .copied()
            .unwrap_or(DEFAULT_BREED_BASE_VALUE);

        let age_multiplier = if age_months < 3 {
            1.2
        } else if age_months < 12 {
            1.0
        } else if age_months < 24 {
            0.8
        } else {
            0.6
        };

        let mut value = base * age_multiplier;
        if gender == Gender::Female && PREMIUM_AGE_MONTHS.contains(&age_months) {
            value *= BREEDING_FEMALE_PREMIUM;
        }
        value
    }

    /// Add or override a breed base value.
    pub fn add_breed_value(&mut self, breed: &str, base_value: f64) {
        self.breed_values.insert(breed.to_lowercase(), base_value);
    }

    /// Default breed base values.
    fn default_breed_values() -> HashMap<String, f64> {
        let mut map = HashMap::new();

        map.insert("golden retriever".into(), 1200.0);
        map.insert("labrador retriever".into(), 1000.0);
        map.insert("labrador".into(), 1000.0);
        map.insert("german shepherd".into(), 1500.0);
        map.insert("poodle".into(), 1400.0);
        map.insert("泰迪".into(), 1400.0);
        map.insert("bulldog".into(), 2500.0);
        map.insert("french bulldog".into(), 3000.0);
        map.insert("法斗".into(), 3000.0);
        map.insert("corgi".into(), 1800.0);
        map.insert("柯基".into(), 1800.0);
        map.insert("siberian husky".into(), 1200.0);
        map.insert("husky".into(), 1200.0);
        map.insert("samoyed".into(), 2000.0);
        map.insert("萨摩耶".into(), 2000.0);
        map.insert("border collie".into(), 1500.0);
        map.insert("边牧".into(), 1500.0);
        map.insert("shiba inu".into(), 1800.0);
        map.insert("柴犬".into(), 1800.0);
        map.insert("pomeranian".into(), 1500.0);
        map.insert("博美".into(), 1500.0);
        map.insert("bichon frise".into(), 1200.0);
        map.insert("比熊".into(), 1200.0);

        map
    }
}

/// Bucket expenses by category keyword.
pub fn categorize_expenses(expenses: &[ExpenseRecord]) -> ExpenseBreakdown {
    let mut breakdown = ExpenseBreakdown::default();
    for expense in expenses {
        let category = expense.category.to_lowercase();
        let bucket = if matches_any(&category, FOOD_KEYWORDS) {
            &mut breakdown.food
        } else if matches_any(&category, HEALTHCARE_KEYWORDS) {
            &mut breakdown.healthcare
        } else if matches_any(&category, BREEDING_KEYWORDS) {
            &mut breakdown.breeding
        } else if matches_any(&category, GROOMING_KEYWORDS) {
            &mut breakdown.grooming
        } else {
            &mut breakdown.other
        };
        *bucket += expense.amount;
    }
    breakdown
}

fn matches_any(category: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| category.contains(k))
}

/// Sum expenses into chronological `YYYY-MM` buckets.
pub fn monthly_costs(expenses: &[ExpenseRecord]) -> Vec<MonthlyCost> {
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
    for expense in expenses {
        let month = expense.expense_date.format("%Y-%m").to_string();
        *buckets.entry(month).or_insert(0.0) += expense.amount;
    }
    buckets
        .into_iter()
        .map(|(month, total)| MonthlyCost { month, total })
        .collect()
}

/// Build the full financial summary for one animal.
///
/// ROI consumes the first purchase and first sale on record.
pub fn summarize(
    dog: &Dog,
    age_months: u32,
    purchases: &[PurchaseRecord],
    sales: &[SaleRecord],
    expenses: &[ExpenseRecord],
    valuer: &MarketValuer,
) -> FinancialSummary {
    let purchase_price = purchases.first().map(|p| p.amount).unwrap_or(0.0);
    let sale_price = sales.first().map(|s| s.amount).unwrap_or(0.0);
    let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();

    FinancialSummary {
        dog_id: dog.id.clone(),
        name: dog.name.clone(),
        purchase_price,
        sale_price,
        estimated_market_value: valuer.estimate(&dog.breed, age_months, dog.gender),
        total_expenses,
        profit_loss: sale_price - purchase_price - total_expenses,
        roi_percentage: roi(purchase_price, sale_price, total_expenses),
        expense_breakdown: categorize_expenses(expenses),
        monthly_costs: monthly_costs(expenses),
    }
}

/// Profitability of one litter over the sales/expenses tagged to it.
///
/// Callers pass pre-filtered rows; the aggregator tags by `litter_id`.
pub fn litter_profitability(
    litter: &LitterRecord,
    sales: &[SaleRecord],
    expenses: &[ExpenseRecord],
) -> LitterProfitability {
    let total_revenue: f64 = sales.iter().map(|s| s.amount).sum();
    let total_costs: f64 = expenses.iter().map(|e| e.amount).sum();

    let cost_per_puppy = if litter.puppies_count == 0 {
        0.0
    } else {
        total_costs / litter.puppies_count as f64
    };
    let average_sale_price = if sales.is_empty() {
        0.0
    } else {
        total_revenue / sales.len() as f64
    };

    LitterProfitability {
        litter_id: litter.id.clone(),
        total_revenue,
        total_costs,
        net_profit: total_revenue - total_costs,
        cost_per_puppy,
        average_sale_price,
        puppies_count: litter.puppies_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(category: &str, amount: f64, date_: NaiveDate) -> ExpenseRecord {
        ExpenseRecord {
            dog_id: Some("dog-1".into()),
            amount,
            category: category.into(),
            expense_date: date_,
            description: None,
            litter_id: None,
        }
    }

    #[test]
    fn test_roi() {
        assert_eq!(roi(1000.0, 1500.0, 200.0), 30.0);
        assert_eq!(roi(1000.0, 800.0, 0.0), -20.0);
    }

    #[test]
    fn test_roi_zero_purchase_price() {
        assert_eq!(roi(0.0, 5000.0, 300.0), 0.0);
    }

    #[test]
    fn test_market_value_age_multipliers() {
        let valuer = MarketValuer::new();

        // Golden retriever base 1200
        assert_eq!(valuer.estimate("Golden Retriever", 2, Gender::Male), 1440.0);
        assert_eq!(valuer.estimate("Golden Retriever", 6, Gender::Male), 1200.0);
        assert_eq!(valuer.estimate("Golden Retriever", 18, Gender::Male), 960.0);
        assert_eq!(valuer.estimate("Golden Retriever", 36, Gender::Male), 720.0);
    }

    #[test]
    fn test_market_value_breeding_female_premium() {
        let valuer = MarketValuer::new();

        let male = valuer.estimate("corgi", 24, Gender::Male);
        let female = valuer.estimate("corgi", 24, Gender::Female);
        assert!((female - male * BREEDING_FEMALE_PREMIUM).abs() < 1e-9);

        // Premium stops past 60 months
        let older_female = valuer.estimate("corgi", 61, Gender::Female);
        let older_male = valuer.estimate("corgi", 61, Gender::Male);
        assert_eq!(older_female, older_male);
    }

    #[test]
    fn test_market_value_unknown_breed_default() {
        let valuer = MarketValuer::new();
        assert_eq!(
            valuer.estimate("mystery mix", 36, Gender::Male),
            DEFAULT_BREED_BASE_VALUE * 0.6
        );
    }

    #[test]
    fn test_market_value_custom_breed() {
        let mut valuer = MarketValuer::new();
        valuer.add_breed_value("Tibetan Mastiff", 5000.0);
        assert_eq!(valuer.estimate("tibetan mastiff", 36, Gender::Male), 3000.0);
    }

    #[test]
    fn test_categorize_expenses_keyword_groups() {
        let d = date(2026, 1, 1);
        let expenses = vec![
            expense("dog food", 100.0, d),
            expense("狗粮", 50.0, d),
            expense("vet visit", 200.0, d),
            expense("疫苗接种", 80.0, d),
            expense("stud fee", 300.0, d),
            expense("grooming salon", 40.0, d),
            expense("toys", 25.0, d),
        ];

        let breakdown = categorize_expenses(&expenses);
        assert_eq!(breakdown.food, 150.0);
        assert_eq!(breakdown.healthcare, 280.0);
        assert_eq!(breakdown.breeding, 300.0);
        assert_eq!(breakdown.grooming, 40.0);
        assert_eq!(breakdown.other, 25.0);
    }

    #[test]
    fn test_categorize_expenses_first_group_wins() {
        // "food" matches before anything else even with other words present
        let breakdown = categorize_expenses(&[expense("medical food", 60.0, date(2026, 1, 1))]);
        assert_eq!(breakdown.food, 60.0);
        assert_eq!(breakdown.healthcare, 0.0);
    }

    #[test]
    fn test_monthly_costs_buckets_sorted() {
        let expenses = vec![
            expense("food", 100.0, date(2026, 2, 10)),
            expense("food", 50.0, date(2026, 1, 5)),
            expense("vet", 75.0, date(2026, 2, 20)),
        ];

        let costs = monthly_costs(&expenses);
        assert_eq!(costs.len(), 2);
        assert_eq!(costs[0].month, "2026-01");
        assert_eq!(costs[0].total, 50.0);
        assert_eq!(costs[1].month, "2026-02");
        assert_eq!(costs[1].total, 175.0);
    }

    #[test]
    fn test_summarize_uses_first_purchase_and_sale() {
        let dog = Dog {
            id: "dog-1".into(),
            name: "Rex".into(),
            breed: "labrador".into(),
            gender: Gender::Male,
            birth_date: date(2024, 1, 1),
            status: crate::models::DogStatus::Active,
            weight_kg: Some(30.0),
        };
        let purchases = vec![
            PurchaseRecord {
                dog_id: "dog-1".into(),
                amount: 1000.0,
                purchase_date: date(2024, 2, 1),
            },
            PurchaseRecord {
                dog_id: "dog-1".into(),
                amount: 999.0,
                purchase_date: date(2024, 3, 1),
            },
        ];
        let sales = vec![SaleRecord {
            dog_id: "dog-1".into(),
            amount: 1500.0,
            sale_date: date(2026, 1, 1),
            litter_id: None,
        }];
        let expenses = vec![expense("food", 200.0, date(2025, 6, 1))];

        let summary = summarize(&dog, 24, &purchases, &sales, &expenses, &MarketValuer::new());
        assert_eq!(summary.purchase_price, 1000.0);
        assert_eq!(summary.sale_price, 1500.0);
        assert_eq!(summary.total_expenses, 200.0);
        assert_eq!(summary.profit_loss, 300.0);
        assert_eq!(summary.roi_percentage, 30.0);
    }

    #[test]
    fn test_litter_profitability() {
        let mut litter = LitterRecord::new("m".into(), "f".into(), date(2026, 1, 1));
        litter.puppies_count = 4;

        let sales = vec![
            SaleRecord {
                dog_id: "p1".into(),
                amount: 1200.0,
                sale_date: date(2026, 4, 1),
                litter_id: Some(litter.id.clone()),
            },
            SaleRecord {
                dog_id: "p2".into(),
                amount: 800.0,
                sale_date: date(2026, 4, 15),
                litter_id: Some(litter.id.clone()),
            },
        ];
        let expenses = vec![expense("whelping supplies", 400.0, date(2026, 3, 1))];

        let profit = litter_profitability(&litter, &sales, &expenses);
        assert_eq!(profit.total_revenue, 2000.0);
        assert_eq!(profit.total_costs, 400.0);
        assert_eq!(profit.net_profit, 1600.0);
        assert_eq!(profit.cost_per_puppy, 100.0);
        assert_eq!(profit.average_sale_price, 1000.0);
    }

    #[test]
    fn test_litter_profitability_zero_guards() {
        let litter = LitterRecord::new("m".into(), "f".into(), date(2026, 1, 1));
        let profit = litter_profitability(&litter, &[], &[]);
        assert_eq!(profit.cost_per_puppy, 0.0);
        assert_eq!(profit.average_sale_price, 0.0);
        assert_eq!(profit.net_profit, 0.0);
    }

    proptest! {
        #[test]
        fn prop_roi_zero_purchase_never_divides(sale in 0.0f64..1e6, costs in 0.0f64..1e6) {
            prop_assert_eq!(roi(0.0, sale, costs), 0.0);
        }

        #[test]
        fn prop_roi_sign_matches_profit(
            purchase in 1.0f64..1e6,
            sale in 0.0f64..1e6,
            costs in 0.0f64..1e6,
        ) {
            let value = roi(purchase, sale, costs);
            let profit = sale - purchase - costs;
            prop_assert_eq!(value > 0.0, profit > 0.0);
            prop_assert_eq!(value < 0.0, profit < 0.0);
        }
    }
}
