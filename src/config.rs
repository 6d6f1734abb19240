use crate::error::{Result, WorkerError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_IDENTITY: &str = "DefaultWorker";
pub const DEFAULT_CAPACITY_FLOOR: usize = 100;

/// Which sequences a flush empties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushScope {
    /// Every sequence in the store, whichever identity triggered the flush.
    #[default]
    AllWorkers,
    /// Only the triggering unit's own sequence.
    OwnIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    pub identity: String,
    pub capacity_floor: usize,
    pub flush_scope: FlushScope,
}

impl UnitConfig {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON object such as
    /// `{"identity": "ingest", "capacity_floor": 100, "flush_scope": "own_identity"}`.
    /// Missing fields take their defaults.
    pub fn from_json(config: Value) -> Result<Self> {
        let config: Self = serde_json::from_value(config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity_floor == 0 {
            return Err(WorkerError::Config("capacity_floor must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            identity: DEFAULT_IDENTITY.to_string(),
            capacity_floor: DEFAULT_CAPACITY_FLOOR,
            flush_scope: FlushScope::AllWorkers,
        }
    }
}
