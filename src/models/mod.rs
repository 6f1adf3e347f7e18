pub mod catalog;
pub mod item;

pub use catalog::*;
pub use item::*;

/// Currency suffix appended to item values
pub const CURRENCY_SUFFIX: &str = "CR";
