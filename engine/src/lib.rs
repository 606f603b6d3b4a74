// Engine library root: CSV ingestion, aggregation, metrics and the report.

pub mod aggregation;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod report;
