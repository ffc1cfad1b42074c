//! rentyield - London borough housing market analysis
//!
//! One subcommand per artifact: static charts, an interactive heat map, and
//! a console summary, all computed over the same borough dataset.

mod charts;
mod data;
mod error;
mod map;
mod stats;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use data::{BoroughRecord, DataLoader};
use stats::Quadrant;

#[derive(Parser)]
#[command(
    name = "rentyield",
    version,
    about = "London borough housing market analysis & chart generator"
)]
struct Cli {
    /// Path to the housing dataset
    #[arg(long, default_value = "data/Housing_Rent_Price_Volume.csv")]
    data: PathBuf,

    /// Directory for generated artifacts
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Histogram of gross yield with a KDE overlay
    Histogram,
    /// Horizontal bar ranking of boroughs by gross yield
    Ranking,
    /// Monthly rent vs sale price scatter
    Scatter,
    /// Price elasticity scatter set (three charts)
    Elasticity,
    /// Interactive gross-yield choropleth (HTML)
    Heatmap {
        /// Use a local GeoJSON file instead of downloading boundaries
        #[arg(long)]
        geojson: Option<PathBuf>,
        /// Open the generated map in the system browser
        #[arg(long)]
        open: bool,
    },
    /// Print summary statistics to the console
    Summary,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut loader = DataLoader::new();
    let records = loader.load_records(&cli.data)?;
    info!(boroughs = records.len(), data = %cli.data.display(), "dataset loaded");

    if !matches!(cli.command, Command::Summary) {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("failed to create '{}'", cli.out_dir.display()))?;
    }

    match cli.command {
        Command::Histogram => {
            let path = charts::histogram::render(&records, &cli.out_dir)?;
            info!(path = %path.display(), "histogram written");
        }
        Command::Ranking => {
            let path = charts::ranking::render(&records, &cli.out_dir)?;
            info!(path = %path.display(), "ranking chart written");
        }
        Command::Scatter => {
            let path = charts::scatter::render(&records, &cli.out_dir)?;
            info!(path = %path.display(), "scatter chart written");
        }
        Command::Elasticity => {
            for path in charts::elasticity::render_all(&records, &cli.out_dir)? {
                info!(path = %path.display(), "elasticity chart written");
            }
        }
        Command::Heatmap { geojson, open } => {
            let boundaries = match geojson {
                Some(path) => map::load_local(&path)?,
                None => {
                    info!(url = map::DEFAULT_GEOJSON_URL, "downloading borough boundaries");
                    map::fetch_remote()?
                }
            };
            let name_key = map::detect_name_key(&boundaries)?;
            let path = map::render(&records, &boundaries, &name_key, &cli.out_dir)?;
            info!(path = %path.display(), "heat map written");
            if open {
                open::that(&path)
                    .with_context(|| format!("failed to open '{}'", path.display()))?;
            }
        }
        Command::Summary => print_summary(&records)?,
    }

    Ok(())
}

fn print_summary(records: &[BoroughRecord]) -> Result<()> {
    let rents: Vec<f64> = records.iter().map(|r| r.monthly_rent).collect();
    let prices: Vec<f64> = records.iter().map(|r| r.sale_price).collect();
    let rent_counts: Vec<f64> = records.iter().map(|r| r.rent_count).collect();
    let volumes: Vec<f64> = records.iter().map(|r| r.sales_volume).collect();
    let yields: Vec<f64> = records.iter().map(|r| r.gross_yield_pct).collect();

    println!("{} London boroughs\n", records.len());
    println!(
        "{:<24} {:>5} {:>12} {:>12} {:>12} {:>12} {:>10}",
        "Column", "N", "Min", "Median", "Mean", "Max", "Std"
    );
    let columns: [(&str, &[f64]); 5] = [
        ("Monthly rent (£)", &rents),
        ("Sale price (£)", &prices),
        ("Rent count", &rent_counts),
        ("Sales volume", &volumes),
        ("Gross yield (%)", &yields),
    ];
    for (label, values) in columns {
        let s = stats::SeriesSummary::compute(values)?;
        println!(
            "{label:<24} {:>5} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>10.2}",
            s.count, s.min, s.median, s.mean, s.max, s.std_dev
        );
    }

    let fit = stats::linear_fit(&rents, &prices)?;
    println!(
        "\nRent vs price: slope = {:.1}, intercept = {:.0}, r = {:.3}, R² = {:.3}, p = {:.4}",
        fit.slope, fit.intercept, fit.pearson_r, fit.r_squared, fit.p_value
    );

    // Market quadrants on rent vs sales volume, split at the medians.
    let median_rent = stats::median(&rents)?;
    let median_volume = stats::median(&volumes)?;
    let quadrants = stats::quadrant_classify(&rents, &volumes, median_rent, median_volume);
    let count = |q: Quadrant| quadrants.iter().filter(|&&label| label == q).count();
    println!(
        "\nMarket quadrants (rent vs sales volume, median split at £{median_rent:.0} / {median_volume:.0}):"
    );
    println!(
        "  affordable market (low rent, high sales):    {:>2}",
        count(Quadrant::LowXHighY)
    );
    println!(
        "  high rent, high sales:                       {:>2}",
        count(Quadrant::HighXHighY)
    );
    println!(
        "  strong rental market (high rent, low sales): {:>2}",
        count(Quadrant::HighXLowY)
    );
    println!(
        "  low rent, low sales:                         {:>2}",
        count(Quadrant::LowXLowY)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    //! Pipeline checks over the shipped borough dataset.

    use super::*;
    use std::path::Path;

    fn dataset() -> Vec<BoroughRecord> {
        let mut loader = DataLoader::new();
        loader
            .load_records(Path::new("data/Housing_Rent_Price_Volume.csv"))
            .expect("shipped dataset loads")
    }

    #[test]
    fn dataset_has_all_33_boroughs() {
        let records = dataset();
        assert_eq!(records.len(), 33);

        let mut names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 33, "borough names must be unique");
        assert!(names.contains(&"City of London"));
    }

    #[test]
    fn cleaned_values_are_positive_and_in_range() {
        for r in dataset() {
            assert!(r.monthly_rent > 0.0, "{}: rent", r.name);
            assert!(r.sale_price > 0.0, "{}: price", r.name);
            assert!(r.rent_count >= 0.0, "{}: rent count", r.name);
            assert!(r.sales_volume >= 0.0, "{}: sales volume", r.name);
            assert!(
                r.gross_yield_pct > 1.0 && r.gross_yield_pct <= 10.0,
                "{}: yield {} out of range",
                r.name,
                r.gross_yield_pct
            );
            // Plausible 2018 London bounds.
            assert!(r.monthly_rent >= 500.0 && r.monthly_rent <= 5000.0);
            assert!(r.sale_price >= 100_000.0 && r.sale_price <= 2_000_000.0);
        }
    }

    #[test]
    fn median_yield_lies_strictly_inside_the_range() {
        let yields: Vec<f64> = dataset().iter().map(|r| r.gross_yield_pct).collect();
        let summary = stats::SeriesSummary::compute(&yields).unwrap();
        assert!(summary.median > summary.min);
        assert!(summary.median < summary.max);
    }

    #[test]
    fn every_trend_pair_fits_finitely() {
        let records = dataset();
        let rents: Vec<f64> = records.iter().map(|r| r.monthly_rent).collect();
        let prices: Vec<f64> = records.iter().map(|r| r.sale_price).collect();
        let rent_counts: Vec<f64> = records.iter().map(|r| r.rent_count).collect();
        let volumes: Vec<f64> = records.iter().map(|r| r.sales_volume).collect();

        for (x, y) in [
            (&rents, &volumes),
            (&prices, &rent_counts),
            (&prices, &volumes),
            (&rents, &rent_counts),
        ] {
            let fit = stats::linear_fit(x, y).unwrap();
            assert!(fit.slope.is_finite());
            assert!(fit.intercept.is_finite());
        }
    }

    #[test]
    fn rent_and_price_correlate_positively() {
        let records = dataset();
        let rents: Vec<f64> = records.iter().map(|r| r.monthly_rent).collect();
        let prices: Vec<f64> = records.iter().map(|r| r.sale_price).collect();
        let fit = stats::linear_fit(&rents, &prices).unwrap();
        assert!(fit.slope > 0.0);
        assert!(fit.pearson_r > 0.7);
    }

    #[test]
    fn quadrants_cover_the_whole_dataset() {
        let records = dataset();
        let rents: Vec<f64> = records.iter().map(|r| r.monthly_rent).collect();
        let volumes: Vec<f64> = records.iter().map(|r| r.sales_volume).collect();
        let median_rent = stats::median(&rents).unwrap();
        let median_volume = stats::median(&volumes).unwrap();

        let quadrants = stats::quadrant_classify(&rents, &volumes, median_rent, median_volume);
        assert_eq!(quadrants.len(), records.len());

        let count = |q: Quadrant| quadrants.iter().filter(|&&label| label == q).count();
        let total = count(Quadrant::LowXLowY)
            + count(Quadrant::LowXHighY)
            + count(Quadrant::HighXLowY)
            + count(Quadrant::HighXHighY);
        assert_eq!(total, records.len());
    }

    #[test]
    fn yield_kde_spans_the_dataset() {
        let yields: Vec<f64> = dataset().iter().map(|r| r.gross_yield_pct).collect();
        let summary = stats::SeriesSummary::compute(&yields).unwrap();
        let curve = stats::kernel_density(&yields, 200).unwrap();

        assert_eq!(curve.len(), 200);
        assert!(curve[0].0 < summary.min);
        assert!(curve[curve.len() - 1].0 > summary.max);
        assert!(curve.iter().all(|&(_, d)| d.is_finite() && d >= 0.0));
    }
}
