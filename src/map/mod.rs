//! Map module - interactive choropleth generation

mod choropleth;
mod geojson;

pub use choropleth::{build_page, render};
pub use geojson::{detect_name_key, fetch_remote, load_local, DEFAULT_GEOJSON_URL};
