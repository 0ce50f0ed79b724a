//! Process-wide dataset store.
//!
//! The dataset is loaded once during startup and read-only afterwards, so a
//! `OnceCell` is enough; handlers borrow it for the lifetime of the process.

use once_cell::sync::OnceCell;
use std::path::Path;

use super::loader::{self, SalesByDate, SalesDataset};

static DATASET: OnceCell<DatasetStore> = OnceCell::new();

/// The loaded dataset together with its chronological index
#[derive(Debug)]
pub struct DatasetStore {
    pub dataset: SalesDataset,
    pub by_date: SalesByDate,
}

impl DatasetStore {
    pub fn from_dataset(dataset: SalesDataset) -> Self {
        let by_date = dataset.index_by_date();
        Self { dataset, by_date }
    }
}

/// Load the CSV file and publish the dataset. Called once from `main`.
pub fn initialize_dataset(path: &Path) -> anyhow::Result<()> {
    let store = DatasetStore::from_dataset(loader::load_dataset(path)?);
    tracing::info!(
        "Loaded {} sales records from {} ({} distinct order dates)",
        store.dataset.len(),
        path.display(),
        store.by_date.iter().count()
    );

    DATASET
        .set(store)
        .map_err(|_| anyhow::anyhow!("dataset already initialized"))?;
    Ok(())
}

pub fn get_dataset() -> &'static DatasetStore {
    DATASET.get().expect("Dataset not initialized")
}
