//! Sales overview dashboard: metrics and response assembly.
//!
//! The service is a pure function of the loaded dataset and the current
//! selection; nothing is cached between requests.

use contracts::dashboards::d100_sales_overview::dto::{
    AggregateRow, CategorySalesPoint, DailySalesRow, DeltaDirection, MetricsResponse,
    MetricsSummary, MonthlySalesRow,
};
use contracts::projections::p100_sales_records::dto::SalesRecordDto;
use std::collections::HashSet;

use super::repository;
use crate::data_schemes::ds01_superstore_sales::{DatasetStore, SalesRecord};

/// Totals over a set of records.
///
/// Margin is profit as a percent of sales, defined as 0 when there are no
/// sales — an empty selection is not an error.
pub fn summarize<'a>(records: impl IntoIterator<Item = &'a SalesRecord>) -> MetricsSummary {
    let mut total_sales = 0.0;
    let mut total_profit = 0.0;
    let mut record_count = 0;

    for record in records {
        total_sales += record.sales;
        total_profit += record.profit;
        record_count += 1;
    }

    let profit_margin = if total_sales > 0.0 {
        total_profit / total_sales * 100.0
    } else {
        0.0
    };

    MetricsSummary {
        total_sales,
        total_profit,
        profit_margin,
        record_count,
    }
}

/// Selection totals, whole-dataset baseline and the margin delta between them
pub fn get_metrics(
    store: &DatasetStore,
    category: Option<&str>,
    sub_categories: &HashSet<String>,
) -> MetricsResponse {
    let records = store.dataset.records();
    let view = repository::filter_by_selection(records, category, sub_categories);

    let selection = summarize(view.iter().copied());
    let baseline = summarize(records.iter());

    let margin_delta = selection.profit_margin - baseline.profit_margin;
    let delta_direction = if selection.profit_margin < baseline.profit_margin {
        DeltaDirection::Inverse
    } else {
        DeltaDirection::Normal
    };

    MetricsResponse {
        selection,
        baseline,
        margin_delta,
        delta_direction,
    }
}

fn to_dto(record: &SalesRecord) -> SalesRecordDto {
    SalesRecordDto {
        category: record.category.clone(),
        sub_category: record.sub_category.clone(),
        order_date: record.order_date,
        sales: record.sales,
        profit: record.profit,
    }
}

/// Records matching the selection; no selection returns the whole dataset
pub fn get_records(
    store: &DatasetStore,
    category: Option<&str>,
    sub_categories: &HashSet<String>,
) -> Vec<SalesRecordDto> {
    repository::filter_by_selection(store.dataset.records(), category, sub_categories)
        .into_iter()
        .map(to_dto)
        .collect()
}

/// Options for the category selector
pub fn get_categories(store: &DatasetStore) -> Vec<String> {
    repository::distinct_categories(store.dataset.records())
}

/// Options for the sub-category selector, dependent on the chosen category
pub fn get_sub_categories(store: &DatasetStore, category: &str) -> Vec<String> {
    repository::distinct_sub_categories(store.dataset.records(), category)
}

/// Per-sub-category sum table over the filtered view
pub fn get_by_sub_category(
    store: &DatasetStore,
    category: Option<&str>,
    sub_categories: &HashSet<String>,
) -> Vec<AggregateRow> {
    let view =
        repository::filter_by_selection(store.dataset.records(), category, sub_categories);
    repository::sum_by_sub_category(&view)
}

/// Per-category sum table over the whole dataset
pub fn get_by_category(store: &DatasetStore) -> Vec<AggregateRow> {
    repository::sum_by_category(store.dataset.records())
}

/// The raw per-record category series (the ungrouped chart path)
pub fn get_category_sales_detail(store: &DatasetStore) -> Vec<CategorySalesPoint> {
    repository::category_sales_detail(store.dataset.records())
}

/// Monthly sales over the whole dataset, chronological
pub fn get_monthly_sales(store: &DatasetStore) -> Vec<MonthlySalesRow> {
    repository::monthly_sales(store.dataset.records(), &store.by_date)
}

/// Daily sales over the filtered view, chronological
pub fn get_daily_sales(
    store: &DatasetStore,
    category: Option<&str>,
    sub_categories: &HashSet<String>,
) -> Vec<DailySalesRow> {
    let view =
        repository::filter_by_selection(store.dataset.records(), category, sub_categories);
    repository::daily_sales(&view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_schemes::ds01_superstore_sales::SalesDataset;
    use chrono::NaiveDate;

    fn record(
        category: &str,
        sub_category: &str,
        date: (i32, u32, u32),
        sales: f64,
        profit: f64,
    ) -> SalesRecord {
        SalesRecord {
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            sales,
            profit,
        }
    }

    /// Two Furniture rows: Chairs (100 / 20) and Tables (50 / -10)
    fn furniture_store() -> DatasetStore {
        DatasetStore::from_dataset(SalesDataset::new(vec![
            record("Furniture", "Chairs", (2015, 1, 3), 100.0, 20.0),
            record("Furniture", "Tables", (2015, 1, 5), 50.0, -10.0),
        ]))
    }

    fn subs(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_category_selection_without_sub_filter() {
        // Selecting "Furniture" with no sub-categories chosen
        let store = furniture_store();
        let metrics = get_metrics(&store, Some("Furniture"), &HashSet::new());

        assert_eq!(metrics.selection.total_sales, 150.0);
        assert_eq!(metrics.selection.total_profit, 10.0);
        assert!((metrics.selection.profit_margin - 6.666666666666667).abs() < 1e-9);
        assert_eq!(metrics.selection.record_count, 2);
    }

    #[test]
    fn test_sub_category_selection_and_delta() {
        // Selecting only Chairs: 20% margin vs the whole-dataset baseline
        let store = furniture_store();
        let metrics = get_metrics(&store, Some("Furniture"), &subs(&["Chairs"]));

        assert_eq!(metrics.selection.total_sales, 100.0);
        assert_eq!(metrics.selection.total_profit, 20.0);
        assert_eq!(metrics.selection.profit_margin, 20.0);

        let baseline_margin = 10.0 / 150.0 * 100.0;
        assert_eq!(metrics.baseline.profit_margin, baseline_margin);
        assert_eq!(metrics.margin_delta, 20.0 - baseline_margin);
        assert_eq!(metrics.delta_direction, DeltaDirection::Normal);
    }

    #[test]
    fn test_margin_is_zero_without_sales() {
        // No matching rows: margin resolves to 0, no division failure
        let store = furniture_store();
        let metrics = get_metrics(&store, Some("Office Supplies"), &HashSet::new());

        assert_eq!(metrics.selection.total_sales, 0.0);
        assert_eq!(metrics.selection.profit_margin, 0.0);
        assert_eq!(metrics.selection.record_count, 0);
        assert_eq!(metrics.delta_direction, DeltaDirection::Inverse);
    }

    #[test]
    fn test_margin_is_zero_even_with_negative_profit() {
        let summary = summarize(&[record("A", "X", (2015, 1, 1), 0.0, -5.0)]);
        assert_eq!(summary.total_profit, -5.0);
        assert_eq!(summary.profit_margin, 0.0);
    }

    #[test]
    fn test_delta_direction_inverse_below_baseline() {
        let store = furniture_store();
        let metrics = get_metrics(&store, Some("Furniture"), &subs(&["Tables"]));

        // Tables runs at a loss, baseline is positive
        assert!(metrics.selection.profit_margin < metrics.baseline.profit_margin);
        assert_eq!(metrics.delta_direction, DeltaDirection::Inverse);
    }

    #[test]
    fn test_no_selection_matches_baseline() {
        let store = furniture_store();
        let metrics = get_metrics(&store, None, &HashSet::new());

        assert_eq!(metrics.margin_delta, 0.0);
        assert_eq!(metrics.delta_direction, DeltaDirection::Normal);
    }

    #[test]
    fn test_records_dto_serializes_date_as_plain_day() {
        let store = furniture_store();
        let records = get_records(&store, None, &HashSet::new());
        assert_eq!(records.len(), 2);

        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(json["order_date"], "2015-01-03");
    }

    #[test]
    fn test_monthly_rows_match_distinct_months() {
        let store = DatasetStore::from_dataset(SalesDataset::new(vec![
            record("Furniture", "Chairs", (2015, 1, 3), 100.0, 20.0),
            record("Furniture", "Chairs", (2015, 2, 7), 40.0, 8.0),
        ]));

        let rows = get_monthly_sales(&store);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sales, 100.0);
        assert_eq!(rows[1].sales, 40.0);
        assert_eq!(rows.len(), store.by_date.month_count());
    }

    #[test]
    fn test_sub_category_options_depend_on_category() {
        let store = DatasetStore::from_dataset(SalesDataset::new(vec![
            record("Furniture", "Chairs", (2015, 1, 1), 1.0, 0.0),
            record("Technology", "Phones", (2015, 1, 2), 1.0, 0.0),
        ]));

        assert_eq!(get_categories(&store), vec!["Furniture", "Technology"]);
        assert_eq!(get_sub_categories(&store, "Furniture"), vec!["Chairs"]);
        assert_eq!(get_sub_categories(&store, "Technology"), vec!["Phones"]);
    }
}
