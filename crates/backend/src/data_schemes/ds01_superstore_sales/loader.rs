//! Superstore sales CSV ingestion.
//!
//! The file is read exactly once at process start. Required columns:
//! `Category`, `Sub-Category`, `Order_Date`, `Sales`, `Profit`; any other
//! columns are ignored. A missing file, a missing column or an unparseable
//! date fails the load, and with it the whole startup.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset row: {0}")]
    Csv(#[from] csv::Error),
    #[error("unrecognized Order_Date value: {0:?}")]
    Date(String),
}

/// One sales transaction
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub category: String,
    pub sub_category: String,
    pub order_date: NaiveDate,
    pub sales: f64,
    pub profit: f64,
}

/// The loaded dataset, immutable after `load_dataset` returns
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
}

impl SalesDataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build the chronological order_date index.
    ///
    /// This replaces the usual "promote the date column to the table index"
    /// step: instead of mutating the dataset, the ordering is produced once
    /// as a separate value and handed to the time-based aggregations.
    pub fn index_by_date(&self) -> SalesByDate {
        let mut by_date: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for (idx, record) in self.records.iter().enumerate() {
            by_date.entry(record.order_date).or_default().push(idx);
        }
        SalesByDate { by_date }
    }
}

/// Chronological date → row index mapping over a `SalesDataset`
#[derive(Debug, Clone, Default)]
pub struct SalesByDate {
    by_date: BTreeMap<NaiveDate, Vec<usize>>,
}

impl SalesByDate {
    /// Dates in ascending order, each with the indices of its rows
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &[usize])> {
        self.by_date.iter().map(|(date, rows)| (date, rows.as_slice()))
    }

    /// Number of distinct calendar months present
    pub fn month_count(&self) -> usize {
        let mut count = 0;
        let mut last: Option<(i32, u32)> = None;
        for date in self.by_date.keys() {
            let month = (date.year(), date.month());
            if last != Some(month) {
                count += 1;
                last = Some(month);
            }
        }
        count
    }
}

/// Column-mapped raw CSV row; the date stays a string until validated
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Sub-Category")]
    sub_category: String,
    #[serde(rename = "Order_Date")]
    order_date: String,
    #[serde(rename = "Sales")]
    sales: f64,
    #[serde(rename = "Profit")]
    profit: f64,
}

/// Date formats seen in Superstore exports
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];

fn parse_order_date(value: &str) -> Result<NaiveDate, DatasetError> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value.trim(), format) {
            return Ok(date);
        }
    }
    Err(DatasetError::Date(value.to_string()))
}

/// Load the dataset from a CSV file
pub fn load_dataset(path: &Path) -> Result<SalesDataset, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_dataset_from_reader(file)
}

/// Load the dataset from any CSV byte stream (header row required)
pub fn load_dataset_from_reader<R: Read>(reader: R) -> Result<SalesDataset, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<RawRow>() {
        let row = row?;
        records.push(SalesRecord {
            order_date: parse_order_date(&row.order_date)?,
            category: row.category,
            sub_category: row.sub_category,
            sales: row.sales,
            profit: row.profit,
        });
    }

    Ok(SalesDataset::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Row_ID,Category,Sub-Category,Order_Date,Sales,Profit
1,Furniture,Chairs,2015-01-03,100.0,20.0
2,Furniture,Tables,2015-02-10,50.0,-10.0
3,Technology,Phones,2015-02-21,300.5,60.1
";

    #[test]
    fn test_load_from_reader() {
        let dataset = load_dataset_from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);

        let first = &dataset.records()[0];
        assert_eq!(first.category, "Furniture");
        assert_eq!(first.sub_category, "Chairs");
        assert_eq!(first.order_date, NaiveDate::from_ymd_opt(2015, 1, 3).unwrap());
        assert_eq!(first.sales, 100.0);
        assert_eq!(first.profit, 20.0);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        // Row_ID above is not part of the schema and must not break the load
        let dataset = load_dataset_from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv = "Category,Sub-Category,Sales,Profit\nFurniture,Chairs,100.0,20.0\n";
        let err = load_dataset_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Csv(_)));
    }

    #[test]
    fn test_us_date_format() {
        let csv = "Category,Sub-Category,Order_Date,Sales,Profit\n\
                   Furniture,Chairs,1/3/2015,100.0,20.0\n";
        let dataset = load_dataset_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            dataset.records()[0].order_date,
            NaiveDate::from_ymd_opt(2015, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_malformed_date_is_fatal() {
        let csv = "Category,Sub-Category,Order_Date,Sales,Profit\n\
                   Furniture,Chairs,not-a-date,100.0,20.0\n";
        let err = load_dataset_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Date(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset(Path::new("no/such/file.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_index_by_date_is_chronological() {
        let csv = "Category,Sub-Category,Order_Date,Sales,Profit\n\
                   A,X,2015-03-01,1.0,0.0\n\
                   A,X,2015-01-15,2.0,0.0\n\
                   A,X,2015-01-15,3.0,0.0\n";
        let dataset = load_dataset_from_reader(csv.as_bytes()).unwrap();
        let by_date = dataset.index_by_date();

        let dates: Vec<_> = by_date.iter().map(|(d, _)| *d).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2015, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2015, 3, 1).unwrap(),
            ]
        );

        // Both January rows share one index entry
        let (_, rows) = by_date.iter().next().unwrap();
        assert_eq!(rows, &[1, 2][..]);
        assert_eq!(by_date.month_count(), 2);
    }
}
