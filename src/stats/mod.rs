//! Statistics module - descriptive stats, fitting, and density estimation

mod calculator;
mod kde;

pub use calculator::{
    linear_fit, median, quadrant_classify, LinearFit, Quadrant, SeriesSummary, MIN_FIT_POINTS,
};
pub use kde::kernel_density;
