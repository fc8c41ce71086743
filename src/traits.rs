//! Trait definitions with mockall annotations for testing
//!
//! Repository seams for the persistence layer the farm service sits on.
//! The core organizer never touches these; only the service layer does,
//! which keeps the rebalancing logic pure and lets tests assert exactly
//! which records get written.

use crate::error::FarmResult;
use crate::types::{Animal, AnimalId, Barn, BarnId, Color};

/// Animal persistence abstraction
///
/// Saving an animal persists its barn reference; the service saves exactly
/// the animals the organizer reports as moved.
#[mockall::automock]
#[async_trait::async_trait]
pub trait AnimalRepository: Send + Sync {
    /// Load every animal on the farm
    async fn find_all(&self) -> FarmResult<Vec<Animal>>;

    /// Load one color's animals with their current barn references
    async fn find_by_color(&self, color: Color) -> FarmResult<Vec<Animal>>;

    /// Persist a single animal, returning the stored record
    async fn save(&self, animal: Animal) -> FarmResult<Animal>;

    /// Persist barn-reference changes for a batch of animals
    async fn save_all(&self, animals: &[Animal]) -> FarmResult<()>;

    /// Remove an animal, returning the record as last stored
    async fn delete(&self, id: AnimalId) -> FarmResult<Animal>;

    /// Remove every animal on the farm
    async fn delete_all(&self) -> FarmResult<()>;
}

/// Barn lifecycle abstraction
///
/// Barns are created on demand when a color's population outgrows its
/// current capacity and deleted once the rebalance leaves them empty.
#[mockall::automock]
#[async_trait::async_trait]
pub trait BarnRepository: Send + Sync {
    /// Load one color's barns
    async fn find_by_color(&self, color: Color) -> FarmResult<Vec<Barn>>;

    /// Persist a barn, returning the stored record
    async fn save(&self, barn: Barn) -> FarmResult<Barn>;

    /// Remove a barn
    async fn delete(&self, id: BarnId) -> FarmResult<()>;
}
