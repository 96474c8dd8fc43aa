//! Utilities for *entities* in ECS.

use slotmap::{new_key_type, SlotMap};

use crate::{Error, Result, Signature};

/// Default capacity of the entity pool.
pub const DEFAULT_MAX_ENTITIES: usize = 5000;

new_key_type! {
    /// Unique identifier of the *entity* of ECS.
    ///
    /// Identifier embeds a generation of its slot,
    /// so handles of destroyed entities never alias new ones.
    ///
    pub struct Entity;
}

/// Issues and recycles entities from the pool of fixed capacity.
///
/// Also tracks current [`Signature`] of each alive entity.
///
pub struct EntityManager {
    signatures: SlotMap<Entity, Signature>,
    capacity: usize,
}

impl EntityManager {
    /// Creates entity manager with [default](DEFAULT_MAX_ENTITIES) capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTITIES)
    }

    /// Creates entity manager which can hold at most `capacity` alive entities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            signatures: SlotMap::with_capacity_and_key(capacity),
            capacity,
        }
    }

    /// Creates new entity with empty signature.
    ///
    /// # Errors
    ///
    /// An error is returned if all entities of the pool are alive.
    ///
    pub fn create(&mut self) -> Result<Entity> {
        if self.signatures.len() >= self.capacity {
            return Err(Error::EntityPoolExhausted {
                capacity: self.capacity,
            });
        }
        let entity = self.signatures.insert(Signature::EMPTY);
        log::trace!("creating entity {:?}, alive {}", entity, self.len());
        Ok(entity)
    }

    /// Returns the entity back into the pool.
    ///
    /// # Errors
    ///
    /// An error is returned if entity was already destroyed.
    ///
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        self.signatures
            .remove(entity)
            .ok_or(Error::StaleEntity(entity))?;
        log::trace!("destroying entity {:?}, alive {}", entity, self.len());
        Ok(())
    }

    /// Current signature of the entity, if it is alive.
    pub fn signature(&self, entity: Entity) -> Option<Signature> {
        self.signatures.get(entity).copied()
    }

    /// Replaces signature of the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if entity is not alive.
    ///
    pub fn set_signature(&mut self, entity: Entity, signature: Signature) -> Result<()> {
        let current = self
            .signatures
            .get_mut(entity)
            .ok_or(Error::StaleEntity(entity))?;
        log::trace!("entity {:?} signature updated to {}", entity, signature);
        *current = signature;
        Ok(())
    }

    /// Returns `true` if entity is alive.
    pub fn contains(&self, entity: Entity) -> bool {
        self.signatures.contains_key(entity)
    }

    /// Count of alive entities.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Returns `true` if there are no alive entities.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Maximal count of alive entities.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns iterator over all alive entities with their signatures.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, Signature)> + '_ {
        self.signatures
            .iter()
            .map(|(entity, signature)| (entity, *signature))
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create() {
        let mut entities = EntityManager::with_capacity(3);
        let a = entities.create().unwrap();
        let b = entities.create().unwrap();

        assert_ne!(a, b);
        assert_eq!(entities.len(), 2);
        assert_eq!(entities.signature(a), Some(Signature::EMPTY));
    }

    #[test]
    fn test_exhaustion() {
        let mut entities = EntityManager::with_capacity(2);
        entities.create().unwrap();
        entities.create().unwrap();

        let error = entities.create().unwrap_err();
        assert!(matches!(error, Error::EntityPoolExhausted { capacity: 2 }));
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn test_recycling() {
        let mut entities = EntityManager::with_capacity(1);
        let first = entities.create().unwrap();
        entities.destroy(first).unwrap();

        let second = entities.create().unwrap();
        assert_ne!(first, second);
        assert!(!entities.contains(first));
        assert!(entities.contains(second));
    }

    #[test]
    fn test_stale_entity() {
        let mut entities = EntityManager::new();
        let entity = entities.create().unwrap();
        entities.destroy(entity).unwrap();

        assert!(matches!(entities.destroy(entity), Err(Error::StaleEntity(e)) if e == entity));
        assert!(entities.set_signature(entity, Signature::EMPTY).is_err());
        assert_eq!(entities.signature(entity), None);
        assert!(entities.is_empty());
    }

    #[test]
    fn test_signature() {
        let mut entities = EntityManager::new();
        let entity = entities.create().unwrap();
        let signature = Signature::from_bits(0b101);

        entities.set_signature(entity, signature).unwrap();
        assert_eq!(entities.signature(entity), Some(signature));
        assert_eq!(entities.iter().collect::<Vec<_>>(), vec![(entity, signature)]);
    }
}
