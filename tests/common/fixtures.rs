//! Test fixtures and data for farmyard tests

use farmyard::{Animal, Color};

/// Capacity all integration scenarios assume
pub const TEST_CAPACITY: usize = 20;

/// Build a uniformly colored herd with predictable names
pub fn herd(count: usize, color: Color) -> Vec<Animal> {
    (0..count)
        .map(|index| Animal::new(format!("{color}-animal-{index}"), color))
        .collect()
}

/// Build a herd spanning several colors
pub fn mixed_herd(counts: &[(usize, Color)]) -> Vec<Animal> {
    counts
        .iter()
        .flat_map(|(count, color)| herd(*count, *color))
        .collect()
}
