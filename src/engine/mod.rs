pub mod executor;
pub mod state;
pub mod unit;

pub use executor::{spawn_all, spawn_worker};
pub use state::UnitState;
pub use unit::{capacity_hint, Processed, ProcessingUnit};
