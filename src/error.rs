//! Farmyard-specific error types

use thiserror::Error;

use crate::types::{AnimalId, BarnId, Color};

#[derive(Error, Debug)]
pub enum FarmError {
    #[error("Barn capacity must be greater than zero, got {capacity}")]
    InvalidCapacity { capacity: usize },

    #[error("Partition mixes favorite colors: expected {expected}, found {found}")]
    MixedColors { expected: Color, found: Color },

    #[error("Animal {animal} has no barn assignment")]
    UnhousedAnimal { animal: AnimalId },

    #[error("Animal not found: {id}")]
    AnimalNotFound { id: AnimalId },

    #[error("Barn not found: {id}")]
    BarnNotFound { id: BarnId },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type FarmResult<T> = Result<T, FarmError>;
