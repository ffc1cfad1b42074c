//! Yield Ranking Bar Chart
//! Horizontal bars of gross yield per borough, highest at the top.

use std::path::{Path, PathBuf};

use anyhow::Result;
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::prelude::*;

use crate::data::BoroughRecord;

const BAR_BLUE: RGBColor = RGBColor(76, 114, 176);

pub fn render(records: &[BoroughRecord], out_dir: &Path) -> Result<PathBuf> {
    let mut ranked: Vec<(String, f64)> = records
        .iter()
        .map(|r| (r.name.clone(), r.gross_yield_pct))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let n = ranked.len();
    let x_max = ranked.first().map(|&(_, v)| v).unwrap_or(1.0) * 1.15;
    let names: Vec<String> = ranked.iter().map(|(name, _)| name.clone()).collect();

    let path = out_dir.join("gross_yield_ranking.png");
    let backend_path = path.clone();
    let root = BitMapBackend::new(&backend_path, (900, 1100)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Gross Rental Yield Ranking Across London Boroughs",
            ("sans-serif", 22),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(180)
        .build_cartesian_2d(0.0..x_max, (0..n).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                // Row 0 sits at the bottom of the axis; rank 0 belongs at the top.
                n.checked_sub(*i + 1)
                    .and_then(|rank| names.get(rank))
                    .cloned()
                    .unwrap_or_default()
            }
            _ => String::new(),
        })
        .x_desc("Gross Rental Yield (%)")
        .draw()?;

    chart.draw_series(ranked.iter().enumerate().map(|(rank, &(_, value))| {
        let row = n - 1 - rank;
        let mut bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(row)),
                (value, SegmentValue::Exact(row + 1)),
            ],
            BAR_BLUE.mix(0.8).filled(),
        );
        bar.set_margin(3, 3, 0, 0);
        bar
    }))?;

    // Annotate each bar with its value, just past the bar end.
    let label_font = ("sans-serif", 13).into_font();
    for (rank, &(_, value)) in ranked.iter().enumerate() {
        let row = n - 1 - rank;
        chart.plotting_area().draw(&Text::new(
            format!("{value:.2}%"),
            (value + x_max * 0.01, SegmentValue::CenterOf(row)),
            label_font.clone(),
        ))?;
    }

    root.present()?;
    Ok(path)
}
