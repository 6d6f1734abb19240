pub mod buffers;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod observability;
pub mod registry;

pub use config::{FlushScope, UnitConfig};
pub use engine::{Processed, ProcessingUnit};
pub use error::WorkerError;
