//! Borough Boundary Source
//! Loads the London borough GeoJSON, remote or local, and works out which
//! feature property names each borough.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Public boundary dataset also used by the source analysis.
pub const DEFAULT_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/radoi90/housequest-data/master/london_boroughs.geojson";

pub fn fetch_remote() -> Result<Value> {
    let response = reqwest::blocking::get(DEFAULT_GEOJSON_URL)
        .context("failed to download borough boundaries")?;
    let value = response
        .error_for_status()
        .context("borough boundary server returned an error")?
        .json::<Value>()
        .context("borough boundary response is not valid JSON")?;
    Ok(value)
}

pub fn load_local(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read GeoJSON '{}'", path.display()))?;
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("'{}' is not valid GeoJSON", path.display()))?;
    Ok(value)
}

/// Property key holding the borough name: `name`, `NAME`, or the first
/// property of the first feature.
pub fn detect_name_key(geojson: &Value) -> Result<String> {
    let properties = geojson
        .get("features")
        .and_then(|features| features.get(0))
        .and_then(|feature| feature.get("properties"))
        .and_then(Value::as_object)
        .context("GeoJSON has no features with properties")?;

    for candidate in ["name", "NAME"] {
        if properties.contains_key(candidate) {
            return Ok(candidate.to_string());
        }
    }
    properties
        .keys()
        .next()
        .cloned()
        .context("GeoJSON feature has no properties")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_lowercase_name_key() {
        let geo = json!({
            "features": [{"properties": {"id": 1, "name": "Camden"}}]
        });
        assert_eq!(detect_name_key(&geo).unwrap(), "name");
    }

    #[test]
    fn falls_back_to_uppercase_then_first_key() {
        let upper = json!({"features": [{"properties": {"NAME": "Camden"}}]});
        assert_eq!(detect_name_key(&upper).unwrap(), "NAME");

        let other = json!({"features": [{"properties": {"BOROUGH": "Camden"}}]});
        assert_eq!(detect_name_key(&other).unwrap(), "BOROUGH");
    }

    #[test]
    fn featureless_geojson_is_an_error() {
        assert!(detect_name_key(&json!({"features": []})).is_err());
    }
}
