//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;

pub use cleaner::numeric_values;
pub use loader::{borough_records, DataLoader};

use serde::Serialize;

pub const COL_BOROUGH: &str = "Boroughs";
pub const COL_RENT: &str = "Average Monthly Rent (£)";
pub const COL_RENT_COUNT: &str = "Counts of Rents";
pub const COL_PRICE: &str = "Average Price (£)";
pub const COL_SALES_VOLUME: &str = "Average Sales Volume";
pub const COL_YIELD: &str = "Gross Yield (%)";

/// Every column the analysis depends on; absence of any one is a schema error.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_BOROUGH,
    COL_RENT,
    COL_RENT_COUNT,
    COL_PRICE,
    COL_SALES_VOLUME,
    COL_YIELD,
];

/// One row of the housing dataset: a single London borough.
#[derive(Debug, Clone, Serialize)]
pub struct BoroughRecord {
    pub name: String,
    pub monthly_rent: f64,
    pub sale_price: f64,
    pub rent_count: f64,
    pub sales_volume: f64,
    pub gross_yield_pct: f64,
}
