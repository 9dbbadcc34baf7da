//! Statistics for archiver activity

pub mod metrics;

pub use metrics::{ArchiverStats, StatsSnapshot};
