//! Dense storage for **components** of ECS.

use std::any::Any;
use std::ops::{Index, IndexMut};

use slotmap::SecondaryMap;

use super::{super::Entity, Component};

/// Storage for statically typed components of ECS.
///
/// Components are packed into contiguous array without holes:
/// removal moves the last component into the freed slot,
/// so order of components is not stable across removals.
///
pub struct ComponentStorage<T>
where
    T: Component,
{
    /// Components are actually stored here.
    components: Vec<T>,
    index_to_entity: Vec<Entity>,
    entity_to_index: SecondaryMap<Entity, usize>,
}

impl<T> ComponentStorage<T>
where
    T: Component,
{
    /// Creates an empty component storage.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            index_to_entity: Vec::new(),
            entity_to_index: SecondaryMap::new(),
        }
    }

    /// Creates an empty component storage with space for `capacity` components.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            components: Vec::with_capacity(capacity),
            index_to_entity: Vec::with_capacity(capacity),
            entity_to_index: SecondaryMap::with_capacity(capacity),
        }
    }

    /// Inserts component and attaches it to the entity.
    /// If component was already attached, it will be replaced by value.
    ///
    /// Returns previously attached component, if any.
    ///
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        if let Some(current) = self.get_mut(entity) {
            return Some(std::mem::replace(current, component));
        }
        let index = self.components.len();
        self.components.push(component);
        self.index_to_entity.push(entity);
        self.entity_to_index.insert(entity, index);
        None
    }

    /// Removes component and detaches it from the entity.
    ///
    /// Returns component that was previously attached to the entity.
    ///
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = self.entity_to_index.remove(entity)?;
        let component = self.components.swap_remove(index);
        self.index_to_entity.swap_remove(index);

        // The last component was moved into the freed slot.
        if let Some(&moved) = self.index_to_entity.get(index) {
            self.entity_to_index[moved] = index;
        }
        Some(component)
    }

    /// Returns `true` if component was already attached to the entity.
    pub fn attached(&self, entity: Entity) -> bool {
        self.entity_to_index.contains_key(entity)
    }

    /// Retrieves an immutable reference to component attached to the entity.
    pub fn get(&self, entity: Entity) -> Option<&T> {
        let index = *self.entity_to_index.get(entity)?;
        self.components.get(index)
    }

    /// Retrieves a mutable reference to component attached to the entity.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let index = *self.entity_to_index.get(entity)?;
        self.components.get_mut(index)
    }

    /// Count of components in this storage.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if there are no components in this storage.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns immutable iterator over all components with their entities.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.index_to_entity
            .iter()
            .copied()
            .zip(self.components.iter())
    }

    /// Returns mutable iterator over all components with their entities.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.index_to_entity
            .iter()
            .copied()
            .zip(self.components.iter_mut())
    }

    /// Returns all entities which have component of this type.
    ///
    /// Entity at some index owns component at the same index of [`components`](Self::components).
    ///
    pub fn entities(&self) -> &[Entity] {
        &self.index_to_entity
    }

    /// Returns all components packed together.
    pub fn components(&self) -> &[T] {
        &self.components
    }

    /// Returns all components packed together.
    pub fn components_mut(&mut self) -> &mut [T] {
        &mut self.components
    }
}

impl<T> Default for ComponentStorage<T>
where
    T: Component,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Entity> for ComponentStorage<T>
where
    T: Component,
{
    type Output = T;

    fn index(&self, entity: Entity) -> &Self::Output {
        self.get(entity)
            .expect("there is no component attached to the entity")
    }
}

impl<T> IndexMut<Entity> for ComponentStorage<T>
where
    T: Component,
{
    fn index_mut(&mut self, entity: Entity) -> &mut Self::Output {
        self.get_mut(entity)
            .expect("there is no component attached to the entity")
    }
}

/// Type-erased view of [`ComponentStorage`] used by the registry.
pub(crate) trait AnyStorage: Send + Sync {
    /// Removes component of the entity, if any.
    fn remove_entity(&mut self, entity: Entity) -> bool;

    fn len(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> AnyStorage for ComponentStorage<T>
where
    T: Component,
{
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn len(&self) -> usize {
        self.components.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
