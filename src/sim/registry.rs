//! Entity registry: which entities stand on which cell
//!
//! Covers the pyramid plus a one-cell ring of air around it: x in [-1, N],
//! y in [-1, N - x]. Storage is a dense grid keyed by a bijective
//! (x, y) -> index mapping; per-cell lists are unordered.

use thiserror::Error;

use super::coord::Coord;
use super::entity::{Actor, Entity, EntityId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("entity {id} is not registered at {coord}")]
    NotRegistered { coord: Coord, id: EntityId },
    #[error("coordinate {0} is outside the registry")]
    OutOfRange(Coord),
}

#[derive(Debug, Clone)]
pub struct Registry {
    size: i32,
    /// Row stride covering y in [-1, N + 1]
    stride: usize,
    cells: Vec<Vec<Entity>>,
}

impl Registry {
    pub fn new(size: i32) -> Self {
        let stride = (size + 3) as usize;
        let rows = (size + 2) as usize;
        Self {
            size,
            stride,
            cells: vec![Vec::new(); stride * rows],
        }
    }

    /// Is `coord` an addressable slot (pyramid, spawn edges or far edges)?
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= -1 && coord.x <= self.size && coord.y >= -1 && coord.y <= self.size - coord.x
    }

    fn index(&self, coord: Coord) -> Result<usize, RegistryError> {
        if !self.contains(coord) {
            return Err(RegistryError::OutOfRange(coord));
        }
        Ok((coord.x + 1) as usize * self.stride + (coord.y + 1) as usize)
    }

    pub fn add(&mut self, coord: Coord, entity: Entity) -> Result<(), RegistryError> {
        let i = self.index(coord)?;
        self.cells[i].push(entity);
        Ok(())
    }

    /// Remove and return entity `id` from `coord`.
    ///
    /// Errors if it is not there: the caller's bookkeeping is out of sync.
    pub fn remove(&mut self, coord: Coord, id: EntityId) -> Result<Entity, RegistryError> {
        let i = self.index(coord)?;
        let cell = &mut self.cells[i];
        let pos = cell
            .iter()
            .position(|e| e.id() == id)
            .ok_or(RegistryError::NotRegistered { coord, id })?;
        Ok(cell.swap_remove(pos))
    }

    /// Remove from `from` then add at `to`
    pub fn relocate(&mut self, from: Coord, to: Coord, id: EntityId) -> Result<(), RegistryError> {
        // Validate the destination first so a failure leaves the entity in place
        self.index(to)?;
        let entity = self.remove(from, id)?;
        self.add(to, entity)
    }

    /// Entities standing at `coord` (empty outside the registry)
    pub fn at(&self, coord: Coord) -> &[Entity] {
        match self.index(coord) {
            Ok(i) => &self.cells[i],
            Err(_) => &[],
        }
    }

    pub fn get(&self, coord: Coord, id: EntityId) -> Option<&Entity> {
        self.at(coord).iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, coord: Coord, id: EntityId) -> Option<&mut Entity> {
        let i = self.index(coord).ok()?;
        self.cells[i].iter_mut().find(|e| e.id() == id)
    }

    /// Player or chaser `id` at `coord`
    pub fn actor(&self, coord: Coord, id: EntityId) -> Result<&Actor, RegistryError> {
        self.get(coord, id)
            .and_then(Entity::actor)
            .ok_or(RegistryError::NotRegistered { coord, id })
    }

    pub fn actor_mut(&mut self, coord: Coord, id: EntityId) -> Result<&mut Actor, RegistryError> {
        self.get_mut(coord, id)
            .and_then(Entity::actor_mut)
            .ok_or(RegistryError::NotRegistered { coord, id })
    }

    /// All addressable coordinates: x from -1 to N, then y from -1 to N - x
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (-1..=self.size).flat_map(move |x| (-1..=self.size - x).map(move |y| Coord::new(x, y)))
    }

    /// Visit every cell in scan order, including empty ones
    pub fn for_each(&self, mut f: impl FnMut(Coord, &[Entity])) {
        for coord in self.coords() {
            f(coord, self.at(coord));
        }
    }

    /// Mutable visit of every entity in scan order
    pub fn for_each_entity_mut(&mut self, mut f: impl FnMut(Coord, &mut Entity)) {
        let coords: Vec<Coord> = self.coords().collect();
        for coord in coords {
            if let Ok(i) = self.index(coord) {
                for entity in &mut self.cells[i] {
                    f(coord, entity);
                }
            }
        }
    }

    /// Every (coord, entity) pair in scan order
    pub fn entities(&self) -> impl Iterator<Item = (Coord, &Entity)> + '_ {
        self.coords()
            .flat_map(move |c| self.at(c).iter().map(move |e| (c, e)))
    }

    pub fn find(&self, id: EntityId) -> Option<(Coord, &Entity)> {
        self.entities().find(|(_, e)| e.id() == id)
    }

    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.at(coord).is_empty()
    }

    pub fn count(&self, pred: impl Fn(&Entity) -> bool) -> usize {
        self.entities().filter(|(_, e)| pred(e)).count()
    }
}
