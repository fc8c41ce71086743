//! In-memory repository implementation
//!
//! Backs the demo binary and the integration tests. Records are kept in
//! insertion order so partition loads are deterministic. Clones share the
//! same store, letting one instance serve as both repositories.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{FarmError, FarmResult};
use crate::traits::{AnimalRepository, BarnRepository};
use crate::types::{Animal, AnimalId, Barn, BarnId, Color};

#[derive(Debug, Default)]
struct StoreInner {
    animals: Vec<Animal>,
    barns: Vec<Barn>,
}

/// Shared in-memory animal and barn store
#[derive(Debug, Clone, Default)]
pub struct InMemoryFarmStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryFarmStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of barns currently stored, across all colors
    pub async fn barn_count(&self) -> usize {
        self.inner.lock().await.barns.len()
    }
}

#[async_trait::async_trait]
impl AnimalRepository for InMemoryFarmStore {
    async fn find_all(&self) -> FarmResult<Vec<Animal>> {
        Ok(self.inner.lock().await.animals.clone())
    }

    async fn find_by_color(&self, color: Color) -> FarmResult<Vec<Animal>> {
        Ok(self
            .inner
            .lock()
            .await
            .animals
            .iter()
            .filter(|animal| animal.favorite_color == color)
            .cloned()
            .collect())
    }

    async fn save(&self, animal: Animal) -> FarmResult<Animal> {
        let mut inner = self.inner.lock().await;
        match inner.animals.iter().position(|stored| stored.id == animal.id) {
            Some(index) => inner.animals[index] = animal.clone(),
            None => inner.animals.push(animal.clone()),
        }
        Ok(animal)
    }

    async fn save_all(&self, animals: &[Animal]) -> FarmResult<()> {
        let mut inner = self.inner.lock().await;
        for animal in animals {
            match inner.animals.iter().position(|stored| stored.id == animal.id) {
                Some(index) => inner.animals[index] = animal.clone(),
                None => inner.animals.push(animal.clone()),
            }
        }
        Ok(())
    }

    async fn delete(&self, id: AnimalId) -> FarmResult<Animal> {
        let mut inner = self.inner.lock().await;
        let index = inner
            .animals
            .iter()
            .position(|animal| animal.id == id)
            .ok_or(FarmError::AnimalNotFound { id })?;
        Ok(inner.animals.remove(index))
    }

    async fn delete_all(&self) -> FarmResult<()> {
        self.inner.lock().await.animals.clear();
        Ok(())
    }
}

#[async_trait::async_trait]
impl BarnRepository for InMemoryFarmStore {
    async fn find_by_color(&self, color: Color) -> FarmResult<Vec<Barn>> {
        Ok(self
            .inner
            .lock()
            .await
            .barns
            .iter()
            .filter(|barn| barn.color == color)
            .cloned()
            .collect())
    }

    async fn save(&self, barn: Barn) -> FarmResult<Barn> {
        let mut inner = self.inner.lock().await;
        match inner.barns.iter().position(|stored| stored.id == barn.id) {
            Some(index) => inner.barns[index] = barn.clone(),
            None => inner.barns.push(barn.clone()),
        }
        Ok(barn)
    }

    async fn delete(&self, id: BarnId) -> FarmResult<()> {
        let mut inner = self.inner.lock().await;
        let index = inner
            .barns
            .iter()
            .position(|barn| barn.id == id)
            .ok_or(FarmError::BarnNotFound { id })?;
        inner.barns.remove(index);
        Ok(())
    }
}
