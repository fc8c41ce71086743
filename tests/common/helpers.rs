//! Test helpers for farmyard integration tests

use farmyard::{Color, FarmConfig, FarmService, InMemoryFarmStore};

use super::fixtures::TEST_CAPACITY;

/// Service wired to a shared in-memory store
pub type DemoService = FarmService<InMemoryFarmStore, InMemoryFarmStore>;

/// Create a store and a service over it with the test capacity
pub fn farm() -> (InMemoryFarmStore, DemoService) {
    let store = InMemoryFarmStore::new();
    let service = FarmService::new(
        store.clone(),
        store.clone(),
        FarmConfig::new(TEST_CAPACITY).unwrap(),
    )
    .unwrap();
    (store, service)
}

/// Barn populations for one color, largest first
pub async fn populations(service: &DemoService, color: Color) -> Vec<usize> {
    let census = service.census().await.unwrap();
    let mut populations: Vec<usize> = census
        .iter()
        .filter(|entry| entry.color == color)
        .flat_map(|entry| entry.barns.iter().map(|barn| barn.population))
        .collect();
    populations.sort_unstable();
    populations.reverse();
    populations
}

/// Assert the global distribution invariant for one color's populations
///
/// Barn count is `ceil(n / capacity)`, populations are within one of each
/// other, exactly `n mod c` barns hold the larger count, and nothing
/// exceeds capacity.
pub fn assert_even_distribution(populations: &[usize]) {
    let total: usize = populations.iter().sum();
    if total == 0 {
        assert!(populations.is_empty(), "no animals means no barns");
        return;
    }

    let barn_count = total.div_ceil(TEST_CAPACITY);
    let base = total / barn_count;
    let larger = total - barn_count * base;

    assert_eq!(populations.len(), barn_count, "unexpected barn count");
    assert!(populations.iter().all(|count| *count <= TEST_CAPACITY));
    assert!(populations
        .iter()
        .all(|count| *count == base || *count == base + 1));
    assert_eq!(
        populations.iter().filter(|count| **count == base + 1).count(),
        larger
    );
}
