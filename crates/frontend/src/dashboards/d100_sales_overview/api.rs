use contracts::dashboards::d100_sales_overview::dto::{
    AggregateRow, CategorySalesPoint, DailySalesRow, MetricsResponse, MonthlySalesRow,
};
use contracts::projections::p100_sales_records::dto::SalesRecordDto;
use gloo_net::http::Request;
use std::collections::HashSet;

use crate::shared::api_utils::api_url;

async fn get_json<T: serde::de::DeserializeOwned>(
    path: &str,
    query: &[(&str, String)],
) -> Result<T, String> {
    let response = Request::get(&api_url(path))
        .query(query.iter().map(|(k, v)| (*k, v.as_str())))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Selection query parameters; the sub-category set travels comma-joined
fn selection_query(category: &str, sub_categories: &HashSet<String>) -> Vec<(&'static str, String)> {
    let mut query = vec![("category", category.to_string())];
    if !sub_categories.is_empty() {
        let mut subs: Vec<&str> = sub_categories.iter().map(|s| s.as_str()).collect();
        subs.sort_unstable();
        query.push(("sub_categories", subs.join(",")));
    }
    query
}

/// Category selector options
pub async fn get_categories() -> Result<Vec<String>, String> {
    get_json("/api/d100/categories", &[]).await
}

/// Sub-category selector options for one category
pub async fn get_sub_categories(category: &str) -> Result<Vec<String>, String> {
    get_json("/api/d100/sub_categories", &[("category", category.to_string())]).await
}

/// All records of the dataset
pub async fn get_all_records() -> Result<Vec<SalesRecordDto>, String> {
    get_json("/api/d100/records", &[]).await
}

/// Records matching the current selection
pub async fn get_filtered_records(
    category: &str,
    sub_categories: &HashSet<String>,
) -> Result<Vec<SalesRecordDto>, String> {
    get_json("/api/d100/records", &selection_query(category, sub_categories)).await
}

/// Selection metrics with the whole-dataset baseline
pub async fn get_metrics(
    category: &str,
    sub_categories: &HashSet<String>,
) -> Result<MetricsResponse, String> {
    get_json("/api/d100/metrics", &selection_query(category, sub_categories)).await
}

/// Per-sub-category sums over the current selection
pub async fn get_by_sub_category(
    category: &str,
    sub_categories: &HashSet<String>,
) -> Result<Vec<AggregateRow>, String> {
    get_json(
        "/api/d100/by_sub_category",
        &selection_query(category, sub_categories),
    )
    .await
}

/// Per-category sums over the whole dataset
pub async fn get_by_category() -> Result<Vec<AggregateRow>, String> {
    get_json("/api/d100/by_category", &[]).await
}

/// The ungrouped per-record category series
pub async fn get_category_sales_detail() -> Result<Vec<CategorySalesPoint>, String> {
    get_json("/api/d100/category_sales_detail", &[]).await
}

/// Monthly sales over the whole dataset
pub async fn get_monthly_sales() -> Result<Vec<MonthlySalesRow>, String> {
    get_json("/api/d100/monthly_sales", &[]).await
}

/// Daily sales over the current selection
pub async fn get_daily_sales(
    category: &str,
    sub_categories: &HashSet<String>,
) -> Result<Vec<DailySalesRow>, String> {
    get_json("/api/d100/daily_sales", &selection_query(category, sub_categories)).await
}
