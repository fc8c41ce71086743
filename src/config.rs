//! Farm configuration
//!
//! Capacity is injected rather than read from a global so both algorithms see
//! the same value deterministically and tests can override it.

use serde::{Deserialize, Serialize};

use crate::error::{FarmError, FarmResult};

/// Environment variable overriding the default barn capacity
pub const BARN_CAPACITY_ENV: &str = "FARMYARD_BARN_CAPACITY";

/// Default number of animals a barn can hold
pub const DEFAULT_BARN_CAPACITY: usize = 20;

/// Global farm configuration shared by the organizer and the service layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmConfig {
    /// Maximum animals per barn, shared by every barn on the farm
    pub barn_capacity: usize,
}

impl FarmConfig {
    /// Create a configuration, failing fast on a zero capacity
    pub fn new(barn_capacity: usize) -> FarmResult<Self> {
        if barn_capacity == 0 {
            return Err(FarmError::InvalidCapacity {
                capacity: barn_capacity,
            });
        }
        Ok(Self { barn_capacity })
    }

    /// Build from the environment, falling back to the default capacity
    ///
    /// Unparseable values are rejected the same way a zero capacity is.
    pub fn from_env() -> FarmResult<Self> {
        match std::env::var(BARN_CAPACITY_ENV) {
            Ok(raw) => {
                let capacity = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| FarmError::InvalidCapacity { capacity: 0 })?;
                Self::new(capacity)
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            barn_capacity: DEFAULT_BARN_CAPACITY,
        }
    }
}
