mod persistence;
mod store;

pub use persistence::{load_conversions_csv, load_dataset, load_rules, save_plan, Dataset};
pub use store::CatalogStore;
