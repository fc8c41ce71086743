//! Service implementations
//!
//! This module contains the farm service that drives the organizer around
//! repository calls, plus the in-memory store backing the demo binary and
//! the integration tests.

pub mod farm;
pub mod memory;

#[cfg(test)]
mod tests;

// Re-export all service implementations
pub use farm::{BarnCensus, ColorCensus, FarmService};
pub use memory::InMemoryFarmStore;
