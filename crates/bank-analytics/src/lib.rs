//! Core library for the bank client analytics engine: feature aggregation,
//! scoring models, population segmentation, and loan recommendations, plus
//! the HTTP router and runtime scaffolding shared by the binaries.

pub mod analytics;
pub mod config;
pub mod error;
pub mod telemetry;

pub use error::AppError;
