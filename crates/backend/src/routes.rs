use axum::{routing::get, Router};

use crate::api::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D100 SALES OVERVIEW DASHBOARD
        // ========================================
        .route(
            "/api/d100/records",
            get(handlers::d100_sales_overview::list_records),
        )
        .route(
            "/api/d100/categories",
            get(handlers::d100_sales_overview::list_categories),
        )
        .route(
            "/api/d100/sub_categories",
            get(handlers::d100_sales_overview::list_sub_categories),
        )
        .route(
            "/api/d100/metrics",
            get(handlers::d100_sales_overview::get_metrics),
        )
        .route(
            "/api/d100/by_sub_category",
            get(handlers::d100_sales_overview::get_by_sub_category),
        )
        .route(
            "/api/d100/by_category",
            get(handlers::d100_sales_overview::get_by_category),
        )
        .route(
            "/api/d100/category_sales_detail",
            get(handlers::d100_sales_overview::get_category_sales_detail),
        )
        .route(
            "/api/d100/monthly_sales",
            get(handlers::d100_sales_overview::get_monthly_sales),
        )
        .route(
            "/api/d100/daily_sales",
            get(handlers::d100_sales_overview::get_daily_sales),
        )
}
