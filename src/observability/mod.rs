pub mod metrics;

pub use metrics::UnitMetrics;
