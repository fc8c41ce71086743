//! Barn distribution and rebalancing
//!
//! Two entry points over one color's partition: `organize` makes the minimal
//! adjustment after an incremental add or remove, `initialize` lays out a
//! fresh even distribution for bulk changes. Both are pure functions over
//! in-memory records; persistence of what they decide is the caller's job.

use std::collections::{HashMap, HashSet};

use crate::config::FarmConfig;
use crate::error::{FarmError, FarmResult};
use crate::types::{Animal, AnimalId, BarnId, Color};

/// One barn's current occupants, in the caller's load order
///
/// Load order matters: when the partition needs fewer barns than it has,
/// the barns past the target count are the ones emptied.
#[derive(Debug, Clone)]
pub struct BarnStalls {
    pub barn: BarnId,
    pub animals: Vec<Animal>,
}

impl BarnStalls {
    pub fn new(barn: BarnId, animals: Vec<Animal>) -> Self {
        Self { barn, animals }
    }
}

/// Target populations for a partition of `total` animals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Targets {
    /// Number of barns the partition needs
    barn_count: usize,
    /// Smaller of the two allowed populations
    base: usize,
    /// How many barns (from the front) hold `base + 1`
    larger: usize,
}

/// Distributes one color's animals evenly across bounded-capacity barns
pub struct BarnOrganizer {
    capacity: usize,
}

impl BarnOrganizer {
    /// Create an organizer, failing fast on a zero capacity
    pub fn new(config: FarmConfig) -> FarmResult<Self> {
        if config.barn_capacity == 0 {
            return Err(FarmError::InvalidCapacity {
                capacity: config.barn_capacity,
            });
        }
        Ok(Self {
            capacity: config.barn_capacity,
        })
    }

    /// Rebalance a partition after an incremental add or remove
    ///
    /// The input already reflects the caller's change, so only the
    /// distribution is wrong. Surplus barns (past the target count) are
    /// emptied in place; overpopulated barns shed their oldest occupants
    /// first, keeping the rest where they are. Returns the animals whose
    /// barn reference actually changed — exactly the set the caller must
    /// persist. Barns left empty are the caller's to delete.
    pub fn organize(&self, barns: &mut [BarnStalls]) -> FarmResult<Vec<Animal>> {
        single_color_of(barns.iter().flat_map(|stalls| stalls.animals.iter()))?;

        let total: usize = barns.iter().map(|stalls| stalls.animals.len()).sum();
        if total == 0 {
            for stalls in barns.iter_mut() {
                stalls.animals.clear();
            }
            return Ok(Vec::new());
        }

        let targets = self.targets_for(total);

        // Pull surplus animals into the overflow pool: everything from barns
        // past the target count, and front-of-stall excess above `base` from
        // the barns that survive.
        let mut overflow: Vec<Animal> = Vec::new();
        for (index, stalls) in barns.iter_mut().enumerate() {
            if index < targets.barn_count {
                let excess = stalls.animals.len().saturating_sub(targets.base);
                if excess > 0 {
                    overflow.extend(stalls.animals.drain(..excess));
                }
            } else {
                overflow.append(&mut stalls.animals);
            }
        }

        distribute(
            barns
                .iter_mut()
                .take(targets.barn_count)
                .map(|stalls| &mut stalls.animals),
            &overflow,
            targets,
        );

        // Every animal now points at the barn it ended up in
        for stalls in barns.iter_mut() {
            for animal in &mut stalls.animals {
                animal.barn = Some(stalls.barn);
            }
        }

        Ok(collect_moved(barns, overflow))
    }

    /// Lay out a fresh even distribution for a bulk change
    ///
    /// Ignores any prior barn assignment and partitions the input into
    /// evenly populated groups, consuming it in order as contiguous blocks.
    /// The caller matches the groups against barns and sets references.
    pub fn initialize(&self, animals: Vec<Animal>) -> FarmResult<Vec<Vec<Animal>>> {
        single_color_of(animals.iter())?;

        if animals.is_empty() {
            return Ok(Vec::new());
        }

        let targets = self.targets_for(animals.len());
        let mut groups: Vec<Vec<Animal>> = (0..targets.barn_count).map(|_| Vec::new()).collect();
        distribute(groups.iter_mut(), &animals, targets);

        Ok(groups)
    }

    /// Target math shared by both algorithms
    ///
    /// With `n` animals: `barn_count = ceil(n / capacity)`, populations are
    /// `n / barn_count` or one more, and the first `n mod barn_count` barns
    /// take the surplus.
    fn targets_for(&self, total: usize) -> Targets {
        let barn_count = total.div_ceil(self.capacity);
        let base = total / barn_count;
        Targets {
            barn_count,
            base,
            larger: total - barn_count * base,
        }
    }
}

/// Top up each group to its target population from the front of the pool
///
/// Group `i` targets `base + 1` while `i < larger`, then `base`. A group is
/// only topped up when the remaining pool can fill it completely in one
/// pass; a short pool defers to a later group it can fully satisfy.
fn distribute<'a, I>(groups: I, pool: &[Animal], targets: Targets)
where
    I: IntoIterator<Item = &'a mut Vec<Animal>>,
{
    let mut start = 0;
    for (index, group) in groups.into_iter().enumerate() {
        let target = if index < targets.larger {
            targets.base + 1
        } else {
            targets.base
        };
        let needed = target.saturating_sub(group.len());
        if needed > 0 && pool.len() >= start + needed {
            group.extend_from_slice(&pool[start..start + needed]);
            start += needed;
        }
    }
}

/// Resolve the overflow pool to the animals whose barn actually changed
///
/// An evicted animal that landed back in its own barn needs no update and
/// is dropped from the report. Each reported animal carries its final barn
/// reference (or none, if it ended up unhoused).
fn collect_moved(barns: &[BarnStalls], overflow: Vec<Animal>) -> Vec<Animal> {
    let evicted: HashSet<AnimalId> = overflow.iter().map(|animal| animal.id).collect();
    let mut placements: HashMap<AnimalId, BarnId> = HashMap::with_capacity(evicted.len());
    for stalls in barns {
        for animal in &stalls.animals {
            if evicted.contains(&animal.id) {
                placements.insert(animal.id, stalls.barn);
            }
        }
    }

    let mut moved = Vec::with_capacity(overflow.len());
    for mut animal in overflow {
        let destination = placements.get(&animal.id).copied();
        if destination != animal.barn {
            animal.barn = destination;
            moved.push(animal);
        }
    }
    moved
}

/// Reject a partition that mixes favorite colors
fn single_color_of<'a, I>(animals: I) -> FarmResult<()>
where
    I: IntoIterator<Item = &'a Animal>,
{
    let mut expected: Option<Color> = None;
    for animal in animals {
        match expected {
            None => expected = Some(animal.favorite_color),
            Some(color) if color != animal.favorite_color => {
                return Err(FarmError::MixedColors {
                    expected: color,
                    found: animal.favorite_color,
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}
