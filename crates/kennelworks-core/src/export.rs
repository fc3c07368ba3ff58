//! Financial report export for accounting handoff.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{FinancialAnalysis, FinancialSummary};

/// Exportable financial report over one aggregation snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialExport {
    /// Export timestamp
    pub exported_at: String,
    /// Snapshot date the figures were computed against
    pub generated_on: NaiveDate,
    /// Per-animal summaries
    pub summaries: Vec<FinancialSummary>,
    /// Sum over all raw sale rows
    pub total_revenue: f64,
    /// Sum over all raw expense rows
    pub total_expenses: f64,
}

impl FinancialExport {
    /// Create an export from a computed financial analysis.
    pub fn from_analysis(analysis: &FinancialAnalysis, generated_on: NaiveDate) -> Self {
        Self {
            exported_at: chrono::Utc::now().to_rfc3339(),
            generated_on,
            summaries: analysis.dog_summaries.clone(),
            total_revenue: analysis.total_revenue,
            total_expenses: analysis.total_expenses,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str(
            "dog_id,name,purchase_price,sale_price,estimated_market_value,total_expenses,profit_loss,roi_percentage\n",
        );

        // Lines
        for summary in &self.summaries {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                escape_csv(&summary.dog_id),
                escape_csv(&summary.name),
                summary.purchase_price,
                summary.sale_price,
                summary.estimated_market_value,
                summary.total_expenses,
                summary.profit_loss,
                summary.roi_percentage,
            ));
        }

        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
