//! Utilities for *systems* in ECS.

use std::any::type_name;
use std::collections::BTreeSet;

pub use signature::Requirement;

use crate::{Entity, Error, Result, Signature, Tick, World};

mod signature;
mod tests;

/// Objects of this trait represent *system* of ECS.
///
/// Both update methods receive a snapshot of the entities
/// which matched the system signature when the tick started.
///
pub trait System: Send + 'static {
    /// Human readable name of the system used in logs and errors.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Handles general update pass.
    fn update(&mut self, _world: &mut World, _entities: &[Entity], _tick: Tick) -> Result<()> {
        Ok(())
    }

    /// Handles physics update pass.
    fn update_physics(
        &mut self,
        _world: &mut World,
        _entities: &[Entity],
        _tick: Tick,
    ) -> Result<()> {
        Ok(())
    }
}

/// Unique identifier of the *system* inside of [`SystemRegistry`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(usize);

impl SystemId {
    /// Position of the system in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

struct Entry {
    name: &'static str,
    signature: Option<Signature>,
    entities: BTreeSet<Entity>,
    /// Empty while the system is running.
    system: Option<Box<dyn System>>,
}

/// Registry of all systems of ECS.
///
/// Keeps interest set of each system in sync with entity signatures.
///
#[derive(Default)]
pub struct SystemRegistry {
    entries: Vec<Entry>,
}

impl SystemRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers the system with empty interest set and without signature.
    ///
    /// Signature must be [set](Self::set_signature) before any entity change is notified.
    ///
    pub fn register<S>(&mut self, system: S) -> SystemId
    where
        S: System,
    {
        let id = SystemId(self.entries.len());
        let name = system.name();
        log::debug!("system `{}` registered as {:?}", name, id);
        self.entries.push(Entry {
            name,
            signature: None,
            entities: BTreeSet::new(),
            system: Some(Box::new(system)),
        });
        id
    }

    /// Sets required signature of the system.
    ///
    /// # Errors
    ///
    /// An error is returned if system is not registered.
    ///
    pub fn set_signature(&mut self, id: SystemId, signature: Signature) -> Result<()> {
        let entry = self.entry_mut(id)?;
        log::debug!("system `{}` requires signature {}", entry.name, signature);
        entry.signature = Some(signature);
        Ok(())
    }

    /// Required signature of the system, if any.
    pub fn signature(&self, id: SystemId) -> Option<Signature> {
        self.entries.get(id.0)?.signature
    }

    /// Name of the system, if it is registered.
    pub fn name(&self, id: SystemId) -> Option<&'static str> {
        Some(self.entries.get(id.0)?.name)
    }

    /// Adds the entity into or removes it from interest set of each system
    /// depending on whether new signature of the entity matches system signature.
    ///
    /// # Errors
    ///
    /// An error is returned if some system has no signature set.
    /// No interest set is changed in that case.
    ///
    pub fn notify_entity_change(&mut self, entity: Entity, signature: Signature) -> Result<()> {
        if let Some(entry) = self.entries.iter().find(|entry| entry.signature.is_none()) {
            return Err(Error::MissingSystemSignature {
                system: entry.name,
            });
        }

        for entry in &mut self.entries {
            let required = entry.signature.unwrap_or_default();
            if signature.contains(required) {
                if entry.entities.insert(entity) {
                    log::trace!("entity {:?} added to system `{}`", entity, entry.name);
                }
            } else if entry.entities.remove(&entity) {
                log::trace!("entity {:?} removed from system `{}`", entity, entry.name);
            }
        }
        Ok(())
    }

    /// Removes the entity from interest sets of all systems.
    pub fn destroy(&mut self, entity: Entity) {
        for entry in &mut self.entries {
            entry.entities.remove(&entity);
        }
    }

    /// Interest set of the system, if it is registered.
    pub fn entities(&self, id: SystemId) -> Option<&BTreeSet<Entity>> {
        Some(&self.entries.get(id.0)?.entities)
    }

    /// Returns `true` if the entity is in interest set of the system.
    pub fn contains(&self, id: SystemId, entity: Entity) -> bool {
        self.entities(id)
            .map(|entities| entities.contains(&entity))
            .unwrap_or(false)
    }

    /// Returns identifiers of all systems in registration order.
    pub fn ids(&self) -> impl Iterator<Item = SystemId> {
        (0..self.entries.len()).map(SystemId)
    }

    /// Count of registered systems.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no system was registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Takes the system out of the registry along with snapshot of its interest set.
    pub(crate) fn take(&mut self, id: SystemId) -> Result<(Box<dyn System>, Vec<Entity>)> {
        let entry = self.entry_mut(id)?;
        let system = entry.system.take().ok_or(Error::SystemInUse {
            system: entry.name,
        })?;
        let entities = entry.entities.iter().copied().collect();
        Ok((system, entities))
    }

    /// Puts the system taken by [`take`](Self::take) back.
    pub(crate) fn restore(&mut self, id: SystemId, system: Box<dyn System>) {
        if let Some(entry) = self.entries.get_mut(id.0) {
            entry.system = Some(system);
        }
    }

    fn entry_mut(&mut self, id: SystemId) -> Result<&mut Entry> {
        self.entries.get_mut(id.0).ok_or(Error::UnknownSystem(id))
    }
}
