//! Choropleth Heat Map
//! Renders the gross-yield map as a self-contained Leaflet page.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::charts::colormap::{ColorRamp, YL_OR_RD};
use crate::data::BoroughRecord;
use crate::stats;

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8"/>
<title>London Boroughs - Gross Yield Heat Map</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
  html, body { margin: 0; height: 100%; }
  #map { height: 100%; }
  .map-title {
    position: fixed; top: 10px; left: 50px; z-index: 9999;
    background: white; border: 2px solid grey; padding: 10px;
    font: bold 16px Arial, sans-serif;
  }
  .map-legend {
    position: fixed; bottom: 30px; right: 20px; z-index: 9999;
    background: white; border: 1px solid grey; padding: 8px 10px;
    font: 12px Arial, sans-serif;
  }
  .map-legend .bar {
    width: 180px; height: 12px; margin: 4px 0;
    background: linear-gradient(to right, __GRADIENT__);
  }
  .map-legend .bounds { display: flex; justify-content: space-between; }
  .leaflet-tooltip { font: 12px Arial, sans-serif; }
</style>
</head>
<body>
<div class="map-title">London Boroughs - Gross Yield Heat Map</div>
<div class="map-legend">
  <div>Gross Yield (%)</div>
  <div class="bar"></div>
  <div class="bounds"><span>__MIN__</span><span>__MAX__</span></div>
</div>
<div id="map"></div>
<script>
const records = __RECORDS__;
const colors = __COLORS__;
const boundaries = __GEOJSON__;
const nameKey = "__NAME_KEY__";
const byName = new Map(records.map(r => [r.name, r]));

const map = L.map('map').setView([51.5074, -0.1278], 10);
L.tileLayer('https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png', {
  attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors &copy; <a href="https://carto.com/attributions">CARTO</a>'
}).addTo(map);

L.geoJSON(boundaries, {
  style: feature => {
    const rec = byName.get(feature.properties[nameKey]);
    return {
      fillColor: rec ? colors[rec.name] : '#d3d3d3',
      fillOpacity: 0.8,
      color: 'white',
      weight: 1,
      opacity: 0.5,
    };
  },
  onEachFeature: (feature, layer) => {
    const rec = byName.get(feature.properties[nameKey]);
    if (rec) {
      layer.bindTooltip(
        `<b>${rec.name}</b><br/>` +
        `Gross Yield: ${rec.gross_yield_pct.toFixed(2)}%<br/>` +
        `Avg Monthly Rent: £${Math.round(rec.monthly_rent).toLocaleString()}<br/>` +
        `Avg House Price: £${Math.round(rec.sale_price).toLocaleString()}`,
        { sticky: true }
      );
    }
    layer.on('mouseover', () => layer.setStyle({ fillOpacity: 0.95, weight: 2 }));
    layer.on('mouseout', () => layer.setStyle({ fillOpacity: 0.8, weight: 1 }));
  },
}).addTo(map);
</script>
</body>
</html>
"##;

/// Assemble the map page: records and per-borough fill colors embedded as
/// JSON, boundaries inlined, legend gradient from the ramp stops.
pub fn build_page(
    records: &[BoroughRecord],
    boundaries: &Value,
    name_key: &str,
) -> Result<String> {
    let yields: Vec<f64> = records.iter().map(|r| r.gross_yield_pct).collect();
    let summary = stats::SeriesSummary::compute(&yields)?;

    let mut colors = serde_json::Map::new();
    for r in records {
        let t = ColorRamp::normalize(r.gross_yield_pct, summary.min, summary.max);
        colors.insert(r.name.clone(), Value::String(YL_OR_RD.hex(t)));
    }

    let page = PAGE_TEMPLATE
        .replace("__GRADIENT__", &YL_OR_RD.hex_stops().join(", "))
        .replace("__MIN__", &format!("{:.2}", summary.min))
        .replace("__MAX__", &format!("{:.2}", summary.max))
        .replace("__RECORDS__", &serde_json::to_string(records)?)
        .replace("__COLORS__", &serde_json::to_string(&colors)?)
        .replace("__GEOJSON__", &serde_json::to_string(boundaries)?)
        .replace("__NAME_KEY__", name_key);
    Ok(page)
}

/// Build the page and write it under `out_dir`.
pub fn render(
    records: &[BoroughRecord],
    boundaries: &Value,
    name_key: &str,
    out_dir: &Path,
) -> Result<PathBuf> {
    let page = build_page(records, boundaries, name_key)?;
    let path = out_dir.join("london_gross_yield_heatmap.html");
    fs::write(&path, page).with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str, yield_pct: f64) -> BoroughRecord {
        BoroughRecord {
            name: name.to_string(),
            monthly_rent: 1500.0,
            sale_price: 450_000.0,
            rent_count: 1200.0,
            sales_volume: 180.0,
            gross_yield_pct: yield_pct,
        }
    }

    #[test]
    fn page_embeds_every_borough() {
        let records = vec![record("Camden", 3.21), record("Sutton", 3.79)];
        let geo = json!({"features": [{"properties": {"name": "Camden"}, "geometry": null}]});
        let page = build_page(&records, &geo, "name").unwrap();

        assert!(page.contains("Camden"));
        assert!(page.contains("Sutton"));
        assert!(page.contains("leaflet"));
    }

    #[test]
    fn every_template_token_is_expanded() {
        let records = vec![record("Camden", 3.21), record("Sutton", 3.79)];
        let geo = json!({"features": []});
        let page = build_page(&records, &geo, "name").unwrap();
        assert!(!page.contains("__"), "unexpanded token in page");
    }

    #[test]
    fn extreme_yields_get_the_ramp_endpoints() {
        let records = vec![record("Low", 2.6), record("High", 5.0)];
        let geo = json!({"features": []});
        let page = build_page(&records, &geo, "name").unwrap();

        // Lowest yield maps to the first stop, highest to the last.
        assert!(page.contains("#ffffcc"));
        assert!(page.contains("#800026"));
    }
}
