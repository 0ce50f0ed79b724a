//! In-memory scans and sum-reductions over the sales dataset.
//!
//! Every function here is a pure, single-pass read of the loaded records;
//! the dataset itself is never modified. Grouped outputs keep the grouping
//! key as an explicit column and preserve first-appearance order, except the
//! time groupings which follow the chronological date index.

use chrono::Datelike;
use contracts::dashboards::d100_sales_overview::dto::{
    AggregateRow, CategorySalesPoint, DailySalesRow, MonthlySalesRow,
};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::data_schemes::ds01_superstore_sales::{SalesByDate, SalesRecord};

/// Narrow the dataset to the current selection.
///
/// Exact, case-sensitive match on category; then, when the sub-category set
/// is non-empty, membership in that set. An empty set keeps every
/// sub-category of the chosen category.
pub fn filter_by_selection<'a>(
    records: &'a [SalesRecord],
    category: Option<&str>,
    sub_categories: &HashSet<String>,
) -> Vec<&'a SalesRecord> {
    let mut view: Vec<&SalesRecord> = match category {
        Some(category) => records.iter().filter(|r| r.category == category).collect(),
        None => records.iter().collect(),
    };

    if !sub_categories.is_empty() {
        view.retain(|r| sub_categories.contains(r.sub_category.as_str()));
    }

    view
}

/// Distinct categories, first-appearance order
pub fn distinct_categories(records: &[SalesRecord]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for record in records {
        if !categories.contains(&record.category) {
            categories.push(record.category.clone());
        }
    }
    categories
}

/// Distinct sub-categories of one category, first-appearance order.
///
/// The option set of the sub-category selector: it must be recomputed from
/// the rows of the currently chosen category whenever that choice changes.
pub fn distinct_sub_categories(records: &[SalesRecord], category: &str) -> Vec<String> {
    let mut sub_categories: Vec<String> = Vec::new();
    for record in records.iter().filter(|r| r.category == category) {
        if !sub_categories.contains(&record.sub_category) {
            sub_categories.push(record.sub_category.clone());
        }
    }
    sub_categories
}

/// Sum sales/profit per key, keys in first-appearance order
fn sum_grouped<'a>(items: impl Iterator<Item = (&'a str, f64, f64)>) -> Vec<AggregateRow> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, (f64, f64)> = HashMap::new();

    for (key, sales, profit) in items {
        if !sums.contains_key(key) {
            order.push(key.to_string());
        }
        let entry = sums.entry(key.to_string()).or_insert((0.0, 0.0));
        entry.0 += sales;
        entry.1 += profit;
    }

    order
        .into_iter()
        .map(|key| {
            let (sales, profit) = sums[&key];
            AggregateRow { key, sales, profit }
        })
        .collect()
}

/// Per-sub-category sums over the filtered view
pub fn sum_by_sub_category(view: &[&SalesRecord]) -> Vec<AggregateRow> {
    sum_grouped(
        view.iter()
            .map(|r| (r.sub_category.as_str(), r.sales, r.profit)),
    )
}

/// Per-category sums over the whole dataset
pub fn sum_by_category(records: &[SalesRecord]) -> Vec<AggregateRow> {
    sum_grouped(records.iter().map(|r| (r.category.as_str(), r.sales, r.profit)))
}

/// The ungrouped per-record category series.
///
/// Deliberately NOT a sum table: each record becomes its own point, so a
/// category occurs as many times as it has rows. Kept separate from
/// `sum_by_category` — the chart renderer treats the two differently.
pub fn category_sales_detail(records: &[SalesRecord]) -> Vec<CategorySalesPoint> {
    records
        .iter()
        .map(|r| CategorySalesPoint {
            category: r.category.clone(),
            sales: r.sales,
        })
        .collect()
}

/// Sales summed per calendar month over the whole dataset.
///
/// Walks the chronological date index, so months come out in order; months
/// with no transactions simply do not appear.
pub fn monthly_sales(records: &[SalesRecord], by_date: &SalesByDate) -> Vec<MonthlySalesRow> {
    let mut rows: Vec<MonthlySalesRow> = Vec::new();
    let mut current: Option<(i32, u32)> = None;

    for (date, indices) in by_date.iter() {
        let month = (date.year(), date.month());
        let day_sales: f64 = indices.iter().map(|&i| records[i].sales).sum();

        if current == Some(month) {
            if let Some(row) = rows.last_mut() {
                row.sales += day_sales;
            }
        } else {
            rows.push(MonthlySalesRow {
                month: format!("{:04}-{:02}", month.0, month.1),
                sales: day_sales,
            });
            current = Some(month);
        }
    }

    rows
}

/// Sales summed per order date over the filtered view, chronological
pub fn daily_sales(view: &[&SalesRecord]) -> Vec<DailySalesRow> {
    let mut sums: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
    for record in view {
        *sums.entry(record.order_date).or_insert(0.0) += record.sales;
    }

    sums.into_iter()
        .map(|(date, sales)| DailySalesRow { date, sales })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn furniture_dataset() -> Vec<SalesRecord> {
        vec![
            record("Furniture", "Chairs", (2015, 1, 3), 100.0, 20.0),
            record("Furniture", "Tables", (2015, 1, 5), 50.0, -10.0),
        ]
    }

    fn subs(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_by_category_only() {
        let records = vec![
            record("Furniture", "Chairs", (2015, 1, 3), 100.0, 20.0),
            record("Technology", "Phones", (2015, 1, 4), 300.0, 60.0),
            record("Furniture", "Tables", (2015, 1, 5), 50.0, -10.0),
        ];

        let view = filter_by_selection(&records, Some("Furniture"), &HashSet::new());
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.category == "Furniture"));
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let records = furniture_dataset();
        let view = filter_by_selection(&records, Some("furniture"), &HashSet::new());
        assert!(view.is_empty());
    }

    #[test]
    fn test_filter_by_sub_category_set() {
        let records = furniture_dataset();
        let view = filter_by_selection(&records, Some("Furniture"), &subs(&["Chairs"]));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].sub_category, "Chairs");
    }

    #[test]
    fn test_empty_sub_category_set_keeps_all() {
        let records = furniture_dataset();
        let view = filter_by_selection(&records, Some("Furniture"), &HashSet::new());
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_distinct_categories_first_appearance_order() {
        let records = vec![
            record("Technology", "Phones", (2015, 1, 1), 1.0, 0.0),
            record("Furniture", "Chairs", (2015, 1, 2), 1.0, 0.0),
            record("Technology", "Machines", (2015, 1, 3), 1.0, 0.0),
        ];
        assert_eq!(distinct_categories(&records), vec!["Technology", "Furniture"]);
    }

    #[test]
    fn test_distinct_sub_categories_restricted_to_category() {
        let records = vec![
            record("Furniture", "Chairs", (2015, 1, 1), 1.0, 0.0),
            record("Technology", "Phones", (2015, 1, 2), 1.0, 0.0),
            record("Furniture", "Tables", (2015, 1, 3), 1.0, 0.0),
            record("Furniture", "Chairs", (2015, 1, 4), 1.0, 0.0),
        ];
        assert_eq!(
            distinct_sub_categories(&records, "Furniture"),
            vec!["Chairs", "Tables"]
        );
    }

    #[test]
    fn test_sum_by_category_covers_whole_dataset() {
        let records = vec![
            record("Furniture", "Chairs", (2015, 1, 1), 100.0, 20.0),
            record("Technology", "Phones", (2015, 1, 2), 300.0, 60.0),
            record("Furniture", "Tables", (2015, 1, 3), 50.0, -10.0),
        ];

        let rows = sum_by_category(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "Furniture");
        assert_eq!(rows[0].sales, 150.0);
        assert_eq!(rows[0].profit, 10.0);

        // Per-group sales must add up to the dataset total
        let grouped_total: f64 = rows.iter().map(|r| r.sales).sum();
        let dataset_total: f64 = records.iter().map(|r| r.sales).sum();
        assert_eq!(grouped_total, dataset_total);
    }

    #[test]
    fn test_sum_by_sub_category_keeps_key_column() {
        let records = furniture_dataset();
        let view = filter_by_selection(&records, Some("Furniture"), &HashSet::new());
        let rows = sum_by_sub_category(&view);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "Chairs");
        assert_eq!(rows[1].key, "Tables");
        assert_eq!(rows[1].profit, -10.0);
    }

    #[test]
    fn test_category_sales_detail_keeps_duplicates() {
        let records = vec![
            record("Furniture", "Chairs", (2015, 1, 1), 100.0, 20.0),
            record("Furniture", "Tables", (2015, 1, 2), 50.0, -10.0),
        ];
        let points = category_sales_detail(&records);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].category, "Furniture");
        assert_eq!(points[1].category, "Furniture");
    }

    #[test]
    fn test_monthly_sales_one_row_per_present_month() {
        // Two months with data, one gap month in between: no zero row for it
        let records = vec![
            record("Furniture", "Chairs", (2015, 1, 3), 100.0, 20.0),
            record("Furniture", "Chairs", (2015, 1, 20), 25.0, 5.0),
            record("Technology", "Phones", (2015, 3, 1), 300.0, 60.0),
        ];
        let dataset = crate::data_schemes::ds01_superstore_sales::SalesDataset::new(records);
        let rows = monthly_sales(dataset.records(), &dataset.index_by_date());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, "2015-01");
        assert_eq!(rows[0].sales, 125.0);
        assert_eq!(rows[1].month, "2015-03");
        assert_eq!(rows[1].sales, 300.0);
    }

    #[test]
    fn test_monthly_sales_sums_across_categories() {
        let records = vec![
            record("Furniture", "Chairs", (2015, 1, 3), 100.0, 20.0),
            record("Technology", "Phones", (2015, 1, 9), 300.0, 60.0),
        ];
        let dataset = crate::data_schemes::ds01_superstore_sales::SalesDataset::new(records);
        let rows = monthly_sales(dataset.records(), &dataset.index_by_date());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sales, 400.0);
    }

    #[test]
    fn test_daily_sales_chronological() {
        let records = vec![
            record("Furniture", "Chairs", (2015, 2, 10), 30.0, 1.0),
            record("Furniture", "Chairs", (2015, 1, 3), 100.0, 20.0),
            record("Furniture", "Chairs", (2015, 1, 3), 10.0, 2.0),
        ];
        let view: Vec<&SalesRecord> = records.iter().collect();
        let rows = daily_sales(&view);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2015, 1, 3).unwrap());
        assert_eq!(rows[0].sales, 110.0);
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2015, 2, 10).unwrap());
    }
}
