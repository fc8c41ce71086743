//! Tests for the FarmService orchestration logic
//!
//! In-memory store tests cover the end-to-end add/remove/bulk behavior;
//! mockall tests pin down exactly which records the service persists.

use crate::config::FarmConfig;
use crate::services::farm::FarmService;
use crate::services::memory::InMemoryFarmStore;
use crate::traits::{MockAnimalRepository, MockBarnRepository};
use crate::types::{Animal, AnimalId, Barn, BarnId, Color};

fn herd(count: usize, color: Color) -> Vec<Animal> {
    (0..count)
        .map(|index| Animal::new(format!("animal-{index}"), color))
        .collect()
}

fn service_over(
    store: &InMemoryFarmStore,
) -> FarmService<InMemoryFarmStore, InMemoryFarmStore> {
    FarmService::new(store.clone(), store.clone(), FarmConfig::default()).unwrap()
}

async fn color_populations(
    service: &FarmService<InMemoryFarmStore, InMemoryFarmStore>,
    color: Color,
) -> Vec<usize> {
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

/// The first animal of a color gets a freshly created barn
#[tokio::test]
async fn test_add_creates_first_barn() {
    let store = InMemoryFarmStore::new();
    let service = service_over(&store);

    let housed = service
        .add_to_farm(Animal::new("Clarabelle", Color::Blue))
        .await
        .unwrap();

    assert!(housed.barn.is_some(), "animal should be housed");
    assert_eq!(store.barn_count().await, 1);
    assert_eq!(color_populations(&service, Color::Blue).await, vec![1]);
}

/// Adds fill existing barns before creating new ones
#[tokio::test]
async fn test_add_fills_before_creating() {
    let store = InMemoryFarmStore::new();
    let service = service_over(&store);

    for animal in herd(20, Color::Blue) {
        service.add_to_farm(animal).await.unwrap();
    }
    assert_eq!(store.barn_count().await, 1, "twenty animals fit in one barn");

    // The 21st forces a second barn and an even split
    service
        .add_to_farm(Animal::new("animal-20", Color::Blue))
        .await
        .unwrap();
    assert_eq!(store.barn_count().await, 2);
    assert_eq!(color_populations(&service, Color::Blue).await, vec![11, 10]);
}

/// The returned record reflects where the rebalance finally put the animal
#[tokio::test]
async fn test_add_returns_final_assignment() {
    let store = InMemoryFarmStore::new();
    let service = service_over(&store);

    for animal in herd(20, Color::Gold) {
        service.add_to_farm(animal).await.unwrap();
    }
    let housed = service
        .add_to_farm(Animal::new("latecomer", Color::Gold))
        .await
        .unwrap();

    let stored = service
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .find(|animal| animal.id == housed.id)
        .unwrap();
    assert_eq!(housed.barn, stored.barn);
}

/// Removing enough animals shrinks the barn set
#[tokio::test]
async fn test_remove_deletes_emptied_barn() {
    let store = InMemoryFarmStore::new();
    let service = service_over(&store);

    service.add_all(herd(41, Color::Green)).await.unwrap();
    assert_eq!(store.barn_count().await, 3);
    assert_eq!(
        color_populations(&service, Color::Green).await,
        vec![14, 14, 13]
    );

    // 41 -> 40 drops the target barn count to two
    let victim = service.find_all().await.unwrap()[0].id;
    service.remove_from_farm(victim).await.unwrap();

    assert_eq!(store.barn_count().await, 2);
    assert_eq!(color_populations(&service, Color::Green).await, vec![20, 20]);
}

/// Bulk adds reuse existing barns before creating or deleting any
#[tokio::test]
async fn test_add_all_reuses_existing_barns() {
    let store = InMemoryFarmStore::new();
    let service = service_over(&store);

    service.add_all(herd(44, Color::Gold)).await.unwrap();
    assert_eq!(store.barn_count().await, 3);
    assert_eq!(
        color_populations(&service, Color::Gold).await,
        vec![15, 15, 14]
    );

    // 16 more brings the total to 60: still three barns, now full
    service.add_all(herd(16, Color::Gold)).await.unwrap();
    assert_eq!(store.barn_count().await, 3);
    assert_eq!(
        color_populations(&service, Color::Gold).await,
        vec![20, 20, 20]
    );
}

/// Each color's barns are balanced independently
#[tokio::test]
async fn test_colors_are_independent() {
    let store = InMemoryFarmStore::new();
    let service = service_over(&store);

    let mut animals = herd(25, Color::Blue);
    animals.extend(herd(3, Color::Platinum));
    service.add_all(animals).await.unwrap();

    assert_eq!(color_populations(&service, Color::Blue).await, vec![13, 12]);
    assert_eq!(color_populations(&service, Color::Platinum).await, vec![3]);
    assert_eq!(store.barn_count().await, 3);
}

/// Removing an unknown animal surfaces the repository error
#[tokio::test]
async fn test_remove_unknown_animal_fails() {
    let store = InMemoryFarmStore::new();
    let service = service_over(&store);

    let result = service.remove_from_farm(AnimalId::new()).await;
    assert!(result.is_err());
}

/// The service persists exactly the moved set and deletes the emptied barn
#[tokio::test]
async fn test_remove_persists_only_moved_animals() {
    let barn_a = BarnId::new();
    let barn_b = BarnId::new();
    let barn_c = BarnId::new();

    // Partition as loaded after the delete: 19 + 20 + 1 = 40 animals,
    // so two barns of twenty suffice and barn C's occupant must move
    let mut partition = Vec::new();
    for (barn, count) in [(barn_a, 19usize), (barn_b, 20), (barn_c, 1)] {
        for index in 0..count {
            let mut animal = Animal::new(format!("{barn}-{index}"), Color::Blue);
            animal.barn = Some(barn);
            partition.push(animal);
        }
    }
    let straggler = partition.last().unwrap().id;

    let mut removed = Animal::new("removed", Color::Blue);
    removed.barn = Some(barn_a);
    let removed_id = removed.id;

    let mut animals = MockAnimalRepository::new();
    let mut barns = MockBarnRepository::new();

    let stored_barns: Vec<Barn> = [(barn_a, "barn-a"), (barn_b, "barn-b"), (barn_c, "barn-c")]
        .into_iter()
        .map(|(id, name)| Barn {
            id,
            name: name.into(),
            color: Color::Blue,
        })
        .collect();
    barns
        .expect_find_by_color()
        .times(1)
        .returning(move |_| Ok(stored_barns.clone()));

    animals
        .expect_delete()
        .withf(move |id| *id == removed_id)
        .times(1)
        .returning(move |_| Ok(removed.clone()));
    let loaded = partition.clone();
    animals
        .expect_find_by_color()
        .times(1)
        .returning(move |_| Ok(loaded.clone()));
    animals
        .expect_save_all()
        .withf(move |moved| {
            moved.len() == 1 && moved[0].id == straggler && moved[0].barn == Some(barn_a)
        })
        .times(1)
        .returning(|_| Ok(()));
    barns
        .expect_delete()
        .withf(move |id| *id == barn_c)
        .times(1)
        .returning(|_| Ok(()));

    let service = FarmService::new(animals, barns, FarmConfig::default()).unwrap();
    service.remove_from_farm(removed_id).await.unwrap();
}

/// A balanced partition produces an empty write batch
#[tokio::test]
async fn test_balanced_partition_writes_nothing() {
    let barn = BarnId::new();
    let mut partition = Vec::new();
    for index in 0..11usize {
        let mut animal = Animal::new(format!("animal-{index}"), Color::Green);
        animal.barn = Some(barn);
        partition.push(animal);
    }

    let mut removed = Animal::new("removed", Color::Green);
    removed.barn = Some(barn);
    let removed_id = removed.id;

    let mut animals = MockAnimalRepository::new();
    let mut barns = MockBarnRepository::new();

    let stored_barn = Barn {
        id: barn,
        name: "the-barn".into(),
        color: Color::Green,
    };
    barns
        .expect_find_by_color()
        .times(1)
        .returning(move |_| Ok(vec![stored_barn.clone()]));

    animals
        .expect_delete()
        .times(1)
        .returning(move |_| Ok(removed.clone()));
    let loaded = partition.clone();
    animals
        .expect_find_by_color()
        .times(1)
        .returning(move |_| Ok(loaded.clone()));
    animals
        .expect_save_all()
        .withf(|moved| moved.is_empty())
        .times(1)
        .returning(|_| Ok(()));
    // No barn deletions expected: the single barn keeps its occupants

    let service = FarmService::new(animals, barns, FarmConfig::default()).unwrap();
    service.remove_from_farm(removed_id).await.unwrap();
}

/// Bulk add persists fresh barns for surplus groups
#[tokio::test]
async fn test_add_all_creates_barns_for_new_color() {
    let mut animals = MockAnimalRepository::new();
    let mut barns = MockBarnRepository::new();

    animals
        .expect_find_by_color()
        .times(1)
        .returning(|_| Ok(Vec::new()));
    barns
        .expect_find_by_color()
        .times(1)
        .returning(|_| Ok(Vec::new()));
    // 44 animals at capacity 20 need three barns of {15, 15, 14}
    animals
        .expect_save_all()
        .withf(|group: &[Animal]| group.len() == 15 || group.len() == 14)
        .times(3)
        .returning(|_| Ok(()));
    barns
        .expect_save()
        .times(3)
        .returning(|barn: Barn| Ok(barn));

    let service = FarmService::new(animals, barns, FarmConfig::default()).unwrap();
    service.add_all(herd(44, Color::Red)).await.unwrap();
}
