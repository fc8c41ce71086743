//! Farmyard library for barn allocation and rebalancing
//!
//! Animals declare a favorite color and live in bounded-capacity barns of
//! that color. The core organizer decides how many barns each color needs
//! and keeps their populations within one of each other, moving as few
//! animals as it can on incremental changes; the farm service wraps it
//! with barn lifecycle and persistence.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod services;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{FarmConfig, DEFAULT_BARN_CAPACITY};
pub use self::core::{BarnOrganizer, BarnStalls};
pub use error::{FarmError, FarmResult};
pub use services::{FarmService, InMemoryFarmStore};
pub use traits::{AnimalRepository, BarnRepository};
pub use types::{Animal, AnimalId, Barn, BarnId, Color};
