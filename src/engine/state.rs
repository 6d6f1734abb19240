use serde::{Deserialize, Serialize};

/// Processing unit states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitState {
    Idle,
    Processing,
    Failed { error_msg: String },
}

impl UnitState {
    /// Check if transition from current state to target state is valid
    pub fn can_transition_to(&self, target: &UnitState) -> bool {
        use UnitState::*;

        matches!(
            (self, target),
            (Idle, Processing) |
            (Processing, Idle) |

            // Only the run boundary fails a unit, and it may do so from either state
            (Idle, Failed { .. }) |
            (Processing, Failed { .. }) |

            // A failed unit keeps accepting items
            (Failed { .. }, Processing) |
            (Failed { .. }, Idle)
        )
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Processing => "Processing",
            Self::Failed { .. } => "Failed",
        }
    }
}

impl Default for UnitState {
    fn default() -> Self {
        Self::Idle
    }
}
