pub mod loader;
pub mod store;

pub use loader::{DatasetError, SalesByDate, SalesDataset, SalesRecord};
pub use store::{get_dataset, initialize_dataset, DatasetStore};
