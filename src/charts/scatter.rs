//! Rent vs Price Scatter
//! Monthly rent against sale price, one labeled point per borough.

use std::path::{Path, PathBuf};

use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::charts::padded_range;
use crate::data::BoroughRecord;

const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);

pub fn render(records: &[BoroughRecord], out_dir: &Path) -> Result<PathBuf> {
    let rents: Vec<f64> = records.iter().map(|r| r.monthly_rent).collect();
    let prices: Vec<f64> = records.iter().map(|r| r.sale_price).collect();

    let (x_lo, x_hi) = padded_range(&rents, 0.06);
    let (y_lo, y_hi) = padded_range(&prices, 0.06);

    let path = out_dir.join("rent_vs_price_scatter.png");
    let backend_path = path.clone();
    let root = BitMapBackend::new(&backend_path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Average Monthly Rent vs Average House Price, London Boroughs",
            ("sans-serif", 24),
        )
        .margin(15)
        .x_label_area_size(55)
        .y_label_area_size(90)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Average Monthly Rent (£)")
        .y_desc("Average Price (£)")
        .y_label_formatter(&|v| format!("{:.1}M", v / 1_000_000.0))
        .draw()?;

    chart.draw_series(
        records
            .iter()
            .map(|r| Circle::new((r.monthly_rent, r.sale_price), 6, STEEL_BLUE.mix(0.6).filled())),
    )?;
    chart.draw_series(
        records
            .iter()
            .map(|r| Circle::new((r.monthly_rent, r.sale_price), 6, BLACK.stroke_width(1))),
    )?;

    // Borough names, right-aligned beside each point.
    let label_style = ("sans-serif", 13)
        .into_font()
        .color(&BLACK.mix(0.7))
        .pos(Pos::new(HPos::Right, VPos::Center));
    for r in records {
        chart.plotting_area().draw(&Text::new(
            r.name.clone(),
            (r.monthly_rent - (x_hi - x_lo) * 0.008, r.sale_price),
            label_style.clone(),
        ))?;
    }

    root.present()?;
    Ok(path)
}
