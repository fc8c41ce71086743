//! Farm service: barn lifecycle around the organizer
//!
//! Owns the create/find/delete side of barns and invokes the core
//! algorithms around repository calls, persisting only what the organizer
//! reports as moved. Repositories are injected so tests can swap in mocks
//! or the in-memory store.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use serde::Serialize;

use crate::config::FarmConfig;
use crate::core::{BarnOrganizer, BarnStalls};
use crate::error::{FarmError, FarmResult};
use crate::traits::{AnimalRepository, BarnRepository};
use crate::types::{Animal, AnimalId, Barn, BarnId, Color};

/// Population snapshot for one barn
#[derive(Debug, Clone, Serialize)]
pub struct BarnCensus {
    pub barn: String,
    pub population: usize,
}

/// Population snapshot for one color's barns
#[derive(Debug, Clone, Serialize)]
pub struct ColorCensus {
    pub color: Color,
    pub barns: Vec<BarnCensus>,
}

/// Coordinates animal placement across barns, one color at a time
pub struct FarmService<A, B>
where
    A: AnimalRepository,
    B: BarnRepository,
{
    animals: A,
    barns: B,
    organizer: BarnOrganizer,
    config: FarmConfig,

    /// Serializes organize+persist sections: two concurrent rebalances over
    /// the same color's barns would race each other's writes
    organize_lock: Arc<Mutex<()>>,
}

impl<A, B> FarmService<A, B>
where
    A: AnimalRepository,
    B: BarnRepository,
{
    /// Create a farm service with injected repositories
    pub fn new(animals: A, barns: B, config: FarmConfig) -> FarmResult<Self> {
        let organizer = BarnOrganizer::new(config)?;
        Ok(Self {
            animals,
            barns,
            organizer,
            config,
            organize_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Load every animal on the farm
    pub async fn find_all(&self) -> FarmResult<Vec<Animal>> {
        self.animals.find_all().await
    }

    /// Remove every animal on the farm
    pub async fn delete_all(&self) -> FarmResult<()> {
        self.animals.delete_all().await
    }

    /// House a new animal, rebalancing its color's barns afterwards
    ///
    /// The animal goes into the first barn with spare capacity (creating
    /// one if every barn is full), then the partition is reorganized and
    /// only the animals that changed barns are written back. Returns the
    /// stored record with its final barn reference.
    pub async fn add_to_farm(&self, animal: Animal) -> FarmResult<Animal> {
        let _guard = self.organize_lock.lock().await;

        let color = animal.favorite_color;
        let mut partition = self.load_partition(color).await?;
        let barn = self.find_or_create_available_barn(&mut partition, color).await?;

        let mut animal = animal;
        animal.barn = Some(barn);
        let animal = self.animals.save(animal).await?;
        partition
            .iter_mut()
            .find(|stalls| stalls.barn == barn)
            .expect("available barn is in the partition")
            .animals
            .push(animal.clone());

        let moved = self.organizer.organize(&mut partition)?;
        self.animals.save_all(&moved).await?;
        debug!(%color, moved = moved.len(), "rebalanced after addition");

        // The newcomer itself may have been swept along in the rebalance
        let housed = partition
            .iter()
            .flat_map(|stalls| stalls.animals.iter())
            .find(|housed| housed.id == animal.id)
            .cloned()
            .unwrap_or(animal);
        Ok(housed)
    }

    /// House a batch of animals, laying their colors out from scratch
    ///
    /// The bulk path: per color, existing and new animals are combined and
    /// redistributed ignoring prior assignments. Existing barns are reused
    /// in load order, surplus groups get fresh barns, and leftover barns
    /// are deleted.
    pub async fn add_all(&self, animals: Vec<Animal>) -> FarmResult<()> {
        let _guard = self.organize_lock.lock().await;

        let mut by_color: Vec<(Color, Vec<Animal>)> = Vec::new();
        for animal in animals {
            match by_color
                .iter()
                .position(|(color, _)| *color == animal.favorite_color)
            {
                Some(index) => by_color[index].1.push(animal),
                None => by_color.push((animal.favorite_color, vec![animal])),
            }
        }

        for (color, newcomers) in by_color {
            let added = newcomers.len();
            let barn_ids: Vec<BarnId> = self
                .barns
                .find_by_color(color)
                .await?
                .into_iter()
                .map(|barn| barn.id)
                .collect();

            let mut herd = self.animals.find_by_color(color).await?;
            herd.extend(newcomers);
            let groups = self.organizer.initialize(herd)?;

            let mut barn_iter = barn_ids.into_iter();
            for mut group in groups {
                let barn = match barn_iter.next() {
                    Some(id) => id,
                    None => self.create_barn(color).await?.id,
                };
                for animal in &mut group {
                    animal.barn = Some(barn);
                }
                self.animals.save_all(&group).await?;
            }
            for leftover in barn_iter {
                self.barns.delete(leftover).await?;
            }
            info!(%color, added, "bulk-housed animals");
        }
        Ok(())
    }

    /// Remove an animal, rebalancing its color's barns afterwards
    ///
    /// Barns left empty by the rebalance are deleted.
    pub async fn remove_from_farm(&self, id: AnimalId) -> FarmResult<()> {
        let _guard = self.organize_lock.lock().await;

        let animal = self.animals.delete(id).await?;
        let color = animal.favorite_color;

        let mut partition = self.load_partition(color).await?;
        let moved = self.organizer.organize(&mut partition)?;
        self.animals.save_all(&moved).await?;
        debug!(%color, moved = moved.len(), "rebalanced after removal");

        self.cleanup_empty_barns(&mut partition).await?;
        Ok(())
    }

    /// Remove a batch of animals one at a time
    pub async fn remove_all(&self, ids: Vec<AnimalId>) -> FarmResult<()> {
        for id in ids {
            self.remove_from_farm(id).await?;
        }
        Ok(())
    }

    /// Per-color barn population snapshot
    pub async fn census(&self) -> FarmResult<Vec<ColorCensus>> {
        let animals = self.animals.find_all().await?;
        let mut report = Vec::new();

        for color in Color::ALL {
            let barns = self.barns.find_by_color(color).await?;
            if barns.is_empty() {
                continue;
            }
            let barns = barns
                .into_iter()
                .map(|barn| BarnCensus {
                    population: animals
                        .iter()
                        .filter(|animal| animal.barn == Some(barn.id))
                        .count(),
                    barn: barn.name,
                })
                .collect();
            report.push(ColorCensus { color, barns });
        }
        Ok(report)
    }

    /// Load one color's barns and group its animals into them
    ///
    /// Barns come from the barn repository, not from animal references, so
    /// a barn whose last occupant just left still shows up (and gets
    /// cleaned up). Barn load order decides which barns survive a shrink.
    async fn load_partition(&self, color: Color) -> FarmResult<Vec<BarnStalls>> {
        let barns = self.barns.find_by_color(color).await?;
        let mut partition: Vec<BarnStalls> = barns
            .into_iter()
            .map(|barn| BarnStalls::new(barn.id, Vec::new()))
            .collect();
        for animal in self.animals.find_by_color(color).await? {
            let barn = animal
                .barn
                .ok_or(FarmError::UnhousedAnimal { animal: animal.id })?;
            match partition.iter_mut().find(|stalls| stalls.barn == barn) {
                Some(stalls) => stalls.animals.push(animal),
                None => return Err(FarmError::BarnNotFound { id: barn }),
            }
        }
        Ok(partition)
    }

    /// First barn with spare capacity, or a freshly persisted one
    async fn find_or_create_available_barn(
        &self,
        partition: &mut Vec<BarnStalls>,
        color: Color,
    ) -> FarmResult<BarnId> {
        if let Some(stalls) = partition
            .iter()
            .find(|stalls| stalls.animals.len() < self.config.barn_capacity)
        {
            return Ok(stalls.barn);
        }
        let barn = self.create_barn(color).await?;
        let id = barn.id;
        partition.push(BarnStalls::new(id, Vec::new()));
        Ok(id)
    }

    async fn create_barn(&self, color: Color) -> FarmResult<Barn> {
        let barn = self.barns.save(Barn::with_generated_name(color)).await?;
        debug!(%color, barn = %barn.name, "created barn");
        Ok(barn)
    }

    /// Delete barns the rebalance left empty
    async fn cleanup_empty_barns(&self, partition: &mut Vec<BarnStalls>) -> FarmResult<()> {
        let mut index = 0;
        while index < partition.len() {
            if partition[index].animals.is_empty() {
                let stalls = partition.remove(index);
                self.barns.delete(stalls.barn).await?;
                debug!(barn = %stalls.barn, "deleted empty barn");
            } else {
                index += 1;
            }
        }
        Ok(())
    }
}
