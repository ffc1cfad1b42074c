//! Price Elasticity Scatter Set
//! Three market-structure scatters: rent vs sales volume, price vs rent
//! count, price vs sales volume. Points are colored by a third measure and
//! quadrant guide lines split the plane at the medians.

use std::path::{Path, PathBuf};

use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::charts::colormap::{ColorRamp, RD_YL_GN, YL_OR_RD};
use crate::charts::padded_range;
use crate::data::BoroughRecord;
use crate::stats;

// Callout thresholds from the source analysis.
const RENT_CALLOUT: f64 = 2500.0;
const VOLUME_CALLOUT: f64 = 350.0;
const RENT_COUNT_CALLOUT: f64 = 3500.0;
const PRICE_CALLOUT: f64 = 1_200_000.0;

struct ScatterSpec {
    file_name: &'static str,
    title: &'static str,
    x_desc: &'static str,
    y_desc: &'static str,
    x: Vec<f64>,
    y: Vec<f64>,
    color_by: Vec<f64>,
    ramp: &'static ColorRamp,
    trend_line: bool,
    /// Corner labels: top-left, top-right, bottom-right, bottom-left.
    corners: [&'static str; 4],
    /// Boroughs prominent enough to deserve a name callout.
    callouts: Vec<bool>,
    /// Format the x axis in millions of pounds.
    price_axis: bool,
}

pub fn render_all(records: &[BoroughRecord], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let rents: Vec<f64> = records.iter().map(|r| r.monthly_rent).collect();
    let prices: Vec<f64> = records.iter().map(|r| r.sale_price).collect();
    let volumes: Vec<f64> = records.iter().map(|r| r.sales_volume).collect();
    let rent_counts: Vec<f64> = records.iter().map(|r| r.rent_count).collect();
    let yields: Vec<f64> = records.iter().map(|r| r.gross_yield_pct).collect();

    let specs = vec![
        ScatterSpec {
            file_name: "elasticity_rent_vs_volume.png",
            title: "Rental Market Strength: Rent vs Sales Volume",
            x_desc: "Average Monthly Rent (£)",
            y_desc: "Average Sales Volume",
            x: rents.clone(),
            y: volumes.clone(),
            color_by: yields.clone(),
            ramp: &RD_YL_GN,
            trend_line: false,
            corners: [
                "Affordable Market (Low Rent, High Sales)",
                "High Rent, High Sales",
                "Strong Rental Market (High Rent, Low Sales)",
                "Low Rent, Low Sales",
            ],
            callouts: records
                .iter()
                .map(|r| r.monthly_rent > RENT_CALLOUT || r.sales_volume > VOLUME_CALLOUT)
                .collect(),
            price_axis: false,
        },
        ScatterSpec {
            file_name: "elasticity_price_vs_renters.png",
            title: "Affordability vs Rental Demand: Renters vs Average Price",
            x_desc: "Average House Price (£)",
            y_desc: "Count of Renters",
            x: prices.clone(),
            y: rent_counts,
            color_by: rents,
            ramp: &YL_OR_RD,
            trend_line: true,
            corners: [
                "Affordable & Renter-Heavy",
                "Expensive & Renter-Heavy",
                "Expensive & Owner-Heavy",
                "Affordable & Owner-Heavy",
            ],
            callouts: records
                .iter()
                .map(|r| r.rent_count > RENT_COUNT_CALLOUT || r.sale_price > PRICE_CALLOUT)
                .collect(),
            price_axis: true,
        },
        ScatterSpec {
            file_name: "elasticity_price_vs_volume.png",
            title: "Market Activity vs Property Values: Sales Volume vs House Price",
            x_desc: "Average House Price (£)",
            y_desc: "Average Sales Volume",
            x: prices,
            y: volumes,
            color_by: yields,
            ramp: &RD_YL_GN,
            trend_line: true,
            corners: [
                "Affordable & High Activity",
                "Expensive & High Activity",
                "Expensive & Low Activity",
                "Affordable & Low Activity",
            ],
            callouts: records
                .iter()
                .map(|r| r.sales_volume > VOLUME_CALLOUT || r.sale_price > PRICE_CALLOUT)
                .collect(),
            price_axis: false,
        },
    ];

    specs
        .into_iter()
        .map(|spec| render_spec(records, spec, out_dir))
        .collect()
}

fn render_spec(records: &[BoroughRecord], spec: ScatterSpec, out_dir: &Path) -> Result<PathBuf> {
    let (x_lo, x_hi) = padded_range(&spec.x, 0.06);
    let (y_lo, y_hi) = padded_range(&spec.y, 0.08);
    let x_span = x_hi - x_lo;
    let y_span = y_hi - y_lo;

    let path = out_dir.join(spec.file_name);
    let backend_path = path.clone();
    let root = BitMapBackend::new(&backend_path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(55)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    let price_fmt = |v: &f64| format!("{:.1}M", v / 1_000_000.0);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(spec.x_desc).y_desc(spec.y_desc);
    if spec.price_axis {
        mesh.x_label_formatter(&price_fmt);
    }
    mesh.draw()?;

    // Quadrant guides at the medians.
    let x_med = stats::median(&spec.x)?;
    let y_med = stats::median(&spec.y)?;
    chart.draw_series(LineSeries::new(
        vec![(x_med, y_lo), (x_med, y_hi)],
        BLACK.mix(0.3),
    ))?;
    chart.draw_series(LineSeries::new(
        vec![(x_lo, y_med), (x_hi, y_med)],
        BLACK.mix(0.3),
    ))?;

    let mut has_legend = false;
    if spec.trend_line {
        let fit = stats::linear_fit(&spec.x, &spec.y)?;
        let x0 = spec.x.iter().copied().fold(f64::INFINITY, f64::min);
        let x1 = spec.x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        chart
            .draw_series(LineSeries::new(
                vec![(x0, fit.predict(x0)), (x1, fit.predict(x1))],
                RED.mix(0.6).stroke_width(2),
            ))?
            .label(format!("Trend (r = {:.2})", fit.pearson_r))
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 14, y)], RED.mix(0.6).stroke_width(2))
            });
        has_legend = true;
    }

    // Points colored by the third measure.
    let c_min = spec.color_by.iter().copied().fold(f64::INFINITY, f64::min);
    let c_max = spec
        .color_by
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    chart.draw_series(
        spec.x
            .iter()
            .zip(&spec.y)
            .zip(&spec.color_by)
            .map(|((&x, &y), &c)| {
                let t = ColorRamp::normalize(c, c_min, c_max);
                Circle::new((x, y), 7, spec.ramp.rgb(t).mix(0.85).filled())
            }),
    )?;
    chart.draw_series(
        spec.x
            .iter()
            .zip(&spec.y)
            .map(|(&x, &y)| Circle::new((x, y), 7, BLACK.stroke_width(1))),
    )?;

    if has_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK.mix(0.4))
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    // Market-type labels in the quadrant corners.
    let corners = [
        (x_lo + 0.02 * x_span, y_hi - 0.04 * y_span, HPos::Left, spec.corners[0]),
        (x_hi - 0.02 * x_span, y_hi - 0.04 * y_span, HPos::Right, spec.corners[1]),
        (x_hi - 0.02 * x_span, y_lo + 0.04 * y_span, HPos::Right, spec.corners[2]),
        (x_lo + 0.02 * x_span, y_lo + 0.04 * y_span, HPos::Left, spec.corners[3]),
    ];
    for (x, y, h_pos, label) in corners {
        let style = ("sans-serif", 14)
            .into_font()
            .color(&BLACK.mix(0.55))
            .pos(Pos::new(h_pos, VPos::Center));
        chart.plotting_area().draw(&Text::new(label, (x, y), style))?;
    }

    // Name callouts for prominent boroughs.
    let callout_style = ("sans-serif", 12).into_font().color(&BLACK.mix(0.8));
    for (i, r) in records.iter().enumerate() {
        if spec.callouts[i] {
            chart.plotting_area().draw(&Text::new(
                r.name.clone(),
                (spec.x[i] + 0.008 * x_span, spec.y[i] + 0.015 * y_span),
                callout_style.clone(),
            ))?;
        }
    }

    root.present()?;
    Ok(path)
}
