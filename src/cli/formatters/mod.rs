//! Output formatters for command results.

pub mod recommendations;

pub use recommendations::RecommendationReport;
