//! Yield Distribution Histogram
//! 12-bin histogram of gross yield with a KDE overlay and median marker.

use std::path::{Path, PathBuf};

use anyhow::Result;
use plotters::prelude::*;

use crate::data::BoroughRecord;
use crate::stats;

const BINS: usize = 12;
const KDE_POINTS: usize = 200;
const BAR_BLUE: RGBColor = RGBColor(76, 114, 176);
const KDE_RED: RGBColor = RGBColor(196, 78, 82);

pub fn render(records: &[BoroughRecord], out_dir: &Path) -> Result<PathBuf> {
    let yields: Vec<f64> = records.iter().map(|r| r.gross_yield_pct).collect();
    let summary = stats::SeriesSummary::compute(&yields)?;

    // Bin counts over the data range.
    let bin_width = (summary.max - summary.min) / BINS as f64;
    let mut counts = [0usize; BINS];
    for &v in &yields {
        let idx = (((v - summary.min) / bin_width) as usize).min(BINS - 1);
        counts[idx] += 1;
    }

    // Density curve rescaled from unit mass to count units, so it overlays
    // the frequency bars.
    let count_scale = yields.len() as f64 * (summary.max - summary.min) / BINS as f64;
    let curve: Vec<(f64, f64)> = stats::kernel_density(&yields, KDE_POINTS)?
        .into_iter()
        .map(|(x, d)| (x, d * count_scale))
        .collect();

    let max_count = counts.iter().copied().max().unwrap_or(1) as f64;
    let max_curve = curve.iter().map(|&(_, y)| y).fold(0.0, f64::max);
    let y_max = max_count.max(max_curve) * 1.1;
    let x_lo = summary.min * 0.95;
    let x_hi = summary.max * 1.05;

    let path = out_dir.join("gross_yield_distribution.png");
    let backend_path = path.clone();
    let root = BitMapBackend::new(&backend_path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Distribution of Gross Rental Yield Across London Boroughs",
            ("sans-serif", 24),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Gross Rental Yield (%)")
        .y_desc("Frequency")
        .draw()?;

    chart
        .draw_series((0..BINS).map(|i| {
            let x0 = summary.min + bin_width * i as f64;
            let x1 = x0 + bin_width;
            Rectangle::new([(x0, 0.0), (x1, counts[i] as f64)], BAR_BLUE.mix(0.65).filled())
        }))?
        .label("Histogram")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], BAR_BLUE.mix(0.65).filled()));

    chart
        .draw_series(LineSeries::new(curve, KDE_RED.stroke_width(2)))?
        .label("KDE")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], KDE_RED.stroke_width(2)));

    chart
        .draw_series(DashedLineSeries::new(
            vec![(summary.median, 0.0), (summary.median, y_max)],
            8,
            5,
            BLACK.stroke_width(2),
        ))?
        .label(format!("Median = {:.2}%", summary.median))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], BLACK.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(path)
}
