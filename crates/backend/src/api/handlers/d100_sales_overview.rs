use axum::{extract::Query, http::StatusCode, Json};
use serde::Deserialize;
use std::collections::HashSet;

use contracts::dashboards::d100_sales_overview::dto::{
    AggregateRow, CategorySalesPoint, DailySalesRow, MetricsResponse, MonthlySalesRow,
};
use contracts::projections::p100_sales_records::dto::SalesRecordDto;

use crate::dashboards::d100_sales_overview::service;
use crate::data_schemes::ds01_superstore_sales::get_dataset;

/// Query parameters shared by the selection-scoped endpoints.
///
/// `sub_categories` is a comma-separated list; absent or empty means no
/// sub-category filter.
#[derive(Debug, Deserialize)]
pub struct SelectionParams {
    pub category: Option<String>,
    pub sub_categories: Option<String>,
}

impl SelectionParams {
    fn sub_category_set(&self) -> HashSet<String> {
        self.sub_categories
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct SubCategoryParams {
    pub category: String,
}

/// GET /api/d100/records?category=Furniture&sub_categories=Chairs,Tables
pub async fn list_records(
    Query(params): Query<SelectionParams>,
) -> Result<Json<Vec<SalesRecordDto>>, StatusCode> {
    let records = service::get_records(
        get_dataset(),
        params.category.as_deref(),
        &params.sub_category_set(),
    );
    tracing::info!(
        "D100 records: category={:?}, {} rows returned",
        params.category,
        records.len()
    );
    Ok(Json(records))
}

/// GET /api/d100/categories
pub async fn list_categories() -> Result<Json<Vec<String>>, StatusCode> {
    let categories = service::get_categories(get_dataset());
    tracing::info!("D100 categories: {} options", categories.len());
    Ok(Json(categories))
}

/// GET /api/d100/sub_categories?category=Furniture
pub async fn list_sub_categories(
    Query(params): Query<SubCategoryParams>,
) -> Result<Json<Vec<String>>, StatusCode> {
    let sub_categories = service::get_sub_categories(get_dataset(), &params.category);
    tracing::info!(
        "D100 sub-categories for {}: {} options",
        params.category,
        sub_categories.len()
    );
    Ok(Json(sub_categories))
}

/// GET /api/d100/metrics?category=Furniture&sub_categories=Chairs
pub async fn get_metrics(
    Query(params): Query<SelectionParams>,
) -> Result<Json<MetricsResponse>, StatusCode> {
    let metrics = service::get_metrics(
        get_dataset(),
        params.category.as_deref(),
        &params.sub_category_set(),
    );
    tracing::info!(
        "D100 metrics: category={:?}, selection of {} rows, margin {:.2}%",
        params.category,
        metrics.selection.record_count,
        metrics.selection.profit_margin
    );
    Ok(Json(metrics))
}

/// GET /api/d100/by_sub_category?category=Furniture&sub_categories=Chairs
pub async fn get_by_sub_category(
    Query(params): Query<SelectionParams>,
) -> Result<Json<Vec<AggregateRow>>, StatusCode> {
    let rows = service::get_by_sub_category(
        get_dataset(),
        params.category.as_deref(),
        &params.sub_category_set(),
    );
    Ok(Json(rows))
}

/// GET /api/d100/by_category
pub async fn get_by_category() -> Result<Json<Vec<AggregateRow>>, StatusCode> {
    Ok(Json(service::get_by_category(get_dataset())))
}

/// GET /api/d100/category_sales_detail
pub async fn get_category_sales_detail() -> Result<Json<Vec<CategorySalesPoint>>, StatusCode> {
    Ok(Json(service::get_category_sales_detail(get_dataset())))
}

/// GET /api/d100/monthly_sales
pub async fn get_monthly_sales() -> Result<Json<Vec<MonthlySalesRow>>, StatusCode> {
    let rows = service::get_monthly_sales(get_dataset());
    tracing::info!("D100 monthly sales: {} months", rows.len());
    Ok(Json(rows))
}

/// GET /api/d100/daily_sales?category=Furniture&sub_categories=Chairs
pub async fn get_daily_sales(
    Query(params): Query<SelectionParams>,
) -> Result<Json<Vec<DailySalesRow>>, StatusCode> {
    let rows = service::get_daily_sales(
        get_dataset(),
        params.category.as_deref(),
        &params.sub_category_set(),
    );
    Ok(Json(rows))
}
