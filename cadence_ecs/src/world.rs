//! Utilities for storage of ECS.

use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use crate::{
    Component, ComponentRegistry, Entity, EntityManager, Error, Requirement, Result, Signature,
    System, SystemId, SystemRegistry, Tick, DEFAULT_MAX_ENTITIES,
};

/// Storage for entities, components and systems of ECS.
///
/// Every mutation keeps entity signatures and system interest sets consistent.
///
pub struct World {
    /// Storage for all entities.
    entities: EntityManager,
    /// Storages of all component types.
    components: ComponentRegistry,
    /// All systems with their interest sets.
    systems: SystemRegistry,
    /// Entities changed since the last [`World::drain_changed`] call.
    changed: BTreeSet<Entity>,
}

#[derive(Copy, Clone)]
enum Pass {
    Update,
    Physics,
}

impl World {
    /// Creates new world with [default](DEFAULT_MAX_ENTITIES) capacity of entities.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTITIES)
    }

    /// Creates new world which can hold at most `capacity` alive entities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: EntityManager::with_capacity(capacity),
            components: ComponentRegistry::with_capacity(capacity),
            systems: SystemRegistry::new(),
            changed: BTreeSet::new(),
        }
    }

    /// Creates new entity and runs `setup` which may attach components to it.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity pool is exhausted
    /// or if `setup` fails. In the latter case created entity is destroyed.
    ///
    pub fn create_entity<F>(&mut self, setup: F) -> Result<Entity>
    where
        F: FnOnce(&mut EntityBuilder) -> Result<()>,
    {
        let entity = self.entities.create()?;
        // Systems without requirements are interested in componentless entities too.
        if let Err(error) = self.systems.notify_entity_change(entity, Signature::EMPTY) {
            self.entities.destroy(entity)?;
            return Err(error);
        }

        let mut builder = EntityBuilder {
            world: self,
            entity,
        };
        if let Err(error) = setup(&mut builder) {
            if self.entities.contains(entity) {
                if let Err(rollback) = self.destroy_entity(entity) {
                    log::warn!("cannot roll back entity {:?}: {}", entity, rollback);
                }
            }
            return Err(error);
        }
        Ok(entity)
    }

    /// Destroys the entity with all its components.
    ///
    /// Entity is removed from all interest sets before it is returned into the pool.
    ///
    /// # Errors
    ///
    /// An error is returned if entity was already destroyed.
    ///
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<()> {
        if !self.entities.contains(entity) {
            return Err(Error::StaleEntity(entity));
        }
        self.systems.destroy(entity);
        self.components.destroy(entity);
        self.changed.remove(&entity);
        self.entities.destroy(entity)
    }

    /// Returns `true` if the entity is alive.
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    /// Count of alive entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Current signature of the entity, if it is alive.
    pub fn signature(&self, entity: Entity) -> Option<Signature> {
        self.entities.signature(entity)
    }

    /// Registers component type `T`.
    ///
    /// Returns signature of `T`, existing one if `T` is already registered.
    ///
    /// # Errors
    ///
    /// An error is returned if there are no more signature bits available.
    ///
    pub fn register_component<T>(&mut self) -> Result<Signature>
    where
        T: Component,
    {
        self.components.register::<T>()
    }

    /// Attaches component to the entity and notifies all systems.
    /// If component was already attached, it will be replaced by value.
    ///
    /// Returns previously attached component, if any.
    ///
    /// # Errors
    ///
    /// An error is returned if entity is not alive
    /// or if `T` could not be registered.
    ///
    pub fn add_component<T>(&mut self, entity: Entity, component: T) -> Result<Option<T>>
    where
        T: Component,
    {
        let current = self
            .entities
            .signature(entity)
            .ok_or(Error::StaleEntity(entity))?;
        let bit = self.components.register::<T>()?;
        let previous = self.components.insert(entity, component)?;

        let signature = current.with(bit);
        self.entities.set_signature(entity, signature)?;
        self.changed.insert(entity);
        self.systems.notify_entity_change(entity, signature)?;
        Ok(previous)
    }

    /// Detaches component from the entity and notifies all systems.
    ///
    /// Returns component that was previously attached to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if entity is not alive.
    ///
    pub fn remove_component<T>(&mut self, entity: Entity) -> Result<Option<T>>
    where
        T: Component,
    {
        let current = self
            .entities
            .signature(entity)
            .ok_or(Error::StaleEntity(entity))?;
        let removed = self.components.remove::<T>(entity);

        let signature = match self.components.signature::<T>() {
            Some(bit) => current.without(bit),
            None => current,
        };
        self.entities.set_signature(entity, signature)?;
        self.systems.notify_entity_change(entity, signature)?;
        Ok(removed)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn component<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        self.components.get(entity)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn component_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        self.components.get_mut(entity)
    }

    /// Returns `true` if component of type `T` is attached to the entity.
    pub fn has_component<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        self.components.attached::<T>(entity)
    }

    /// Registry of all component storages.
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Registers the system which requires all component types of `R`.
    ///
    /// Component types of `R` are registered if needed.
    /// Entities which are already alive are notified to the new system immediately.
    ///
    /// # Errors
    ///
    /// An error is returned if some component type of `R` could not be registered.
    ///
    pub fn register_system<R, S>(&mut self, system: S) -> Result<SystemId>
    where
        R: Requirement,
        S: System,
    {
        let signature = R::signature(&mut self.components)?;
        let id = self.systems.register(system);
        self.systems.set_signature(id, signature)?;

        let alive: Vec<_> = self.entities.iter().collect();
        for (entity, signature) in alive {
            self.systems.notify_entity_change(entity, signature)?;
        }
        Ok(id)
    }

    /// Registry of all systems.
    pub fn systems(&self) -> &SystemRegistry {
        &self.systems
    }

    /// Returns iterator over interest set of the system.
    ///
    /// Iterator is empty if the system is not registered.
    ///
    pub fn interest(&self, id: SystemId) -> impl Iterator<Item = Entity> + '_ {
        self.systems.entities(id).into_iter().flatten().copied()
    }

    /// Marks the entity as changed for presentation layer.
    pub fn mark_changed(&mut self, entity: Entity) {
        if self.entities.contains(entity) {
            self.changed.insert(entity);
        }
    }

    /// Returns all entities changed since the previous call.
    pub fn drain_changed(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.changed).into_iter().collect()
    }

    /// Runs general update of all systems in registration order.
    ///
    /// # Errors
    ///
    /// The first error of any system is returned, the rest systems are not updated then.
    ///
    pub fn update(&mut self, tick: Tick) -> Result<()> {
        self.run(Pass::Update, tick)
    }

    /// Runs physics update of all systems in registration order.
    ///
    /// # Errors
    ///
    /// The first error of any system is returned, the rest systems are not updated then.
    ///
    pub fn update_physics(&mut self, tick: Tick) -> Result<()> {
        self.run(Pass::Physics, tick)
    }

    fn run(&mut self, pass: Pass, tick: Tick) -> Result<()> {
        let ids: Vec<_> = self.systems.ids().collect();
        for id in ids {
            let (mut system, entities) = self.systems.take(id)?;
            let result = panic::catch_unwind(AssertUnwindSafe(|| match pass {
                Pass::Update => system.update(self, &entities, tick),
                Pass::Physics => system.update_physics(self, &entities, tick),
            }));
            // The system goes back even if it panicked.
            self.systems.restore(id, system);
            match result {
                Ok(result) => result?,
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Scope of the entity being created by [`World::create_entity`].
pub struct EntityBuilder<'a> {
    world: &'a mut World,
    entity: Entity,
}

impl EntityBuilder<'_> {
    /// Entity being created.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Attaches component to the entity being created.
    ///
    /// # Errors
    ///
    /// See [`World::add_component`].
    ///
    pub fn add<T>(&mut self, component: T) -> Result<&mut Self>
    where
        T: Component,
    {
        self.world.add_component(self.entity, component)?;
        Ok(self)
    }

    /// World which owns the entity being created.
    pub fn world(&mut self) -> &mut World {
        self.world
    }
}
