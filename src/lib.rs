pub mod config;
pub mod extractor;
pub mod harvest;
pub mod models;
pub mod parsers;
pub mod utils;

pub use extractor::{extract, extract_with_report, Extraction, ItemCardExtractor};
pub use models::{Action, Catalog, Category, ItemRecord, Rarity};
