use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One sales transaction as served to the frontend.
///
/// `order_date` crosses the boundary as "YYYY-MM-DD".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecordDto {
    pub category: String,
    pub sub_category: String,
    pub order_date: NaiveDate,
    pub sales: f64,
    pub profit: f64,
}
