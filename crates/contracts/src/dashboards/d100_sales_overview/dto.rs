use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Totals over one set of records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Percent, 0.0 when total_sales is zero
    pub profit_margin: f64,
    /// Number of records the summary was computed over
    pub record_count: usize,
}

/// Which way the margin delta should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaDirection {
    /// Selection margin at or above baseline
    Normal,
    /// Selection margin below baseline, highlight as regression
    Inverse,
}

/// Response for the metrics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResponse {
    /// Totals over the current filtered view
    pub selection: MetricsSummary,
    /// Totals over the whole dataset
    pub baseline: MetricsSummary,
    /// selection margin minus baseline margin, percentage points
    pub margin_delta: f64,
    pub delta_direction: DeltaDirection,
}

/// One row of a grouped sum table; the grouping key stays an explicit column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: String,
    pub sales: f64,
    pub profit: f64,
}

/// One point of the ungrouped per-record category series.
///
/// Duplicate `category` values are expected; the chart renderer draws them
/// as separate thin marks instead of a single solid bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySalesPoint {
    pub category: String,
    pub sales: f64,
}

/// Summed sales for one calendar month, `month` in format "YYYY-MM"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySalesRow {
    pub month: String,
    pub sales: f64,
}

/// Summed sales for one order date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySalesRow {
    pub date: NaiveDate,
    pub sales: f64,
}
