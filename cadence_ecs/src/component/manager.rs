//! Utilities for managing component storages.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use super::{storage::AnyStorage, super::Entity, Component, ComponentStorage};
use crate::{Result, Signature, SignatureAllocator, DEFAULT_MAX_ENTITIES};

struct Registration {
    name: &'static str,
    signature: Signature,
    storage: Box<dyn AnyStorage>,
}

/// Registry of all components of ECS.
///
/// Owns one storage per registered component type
/// and assigns each type its own [`Signature`] bit.
///
pub struct ComponentRegistry {
    registrations: HashMap<TypeId, Registration>,
    allocator: SignatureAllocator,
    capacity: usize,
}

impl ComponentRegistry {
    /// Creates new registry, each storage of which is sized for
    /// [default](DEFAULT_MAX_ENTITIES) count of entities.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTITIES)
    }

    /// Creates new registry, each storage of which is sized for `capacity` entities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            registrations: HashMap::new(),
            allocator: SignatureAllocator::new(),
            capacity,
        }
    }

    /// Registers component type `T`, creating its storage and signature.
    ///
    /// Returns existing signature if `T` is already registered.
    ///
    /// # Errors
    ///
    /// An error is returned if there are no more signature bits available.
    ///
    pub fn register<T>(&mut self) -> Result<Signature>
    where
        T: Component,
    {
        let type_id = TypeId::of::<T>();
        if let Some(registration) = self.registrations.get(&type_id) {
            return Ok(registration.signature);
        }

        let signature = self.allocator.next()?;
        let name = type_name::<T>();
        log::debug!("component `{}` registered with signature {}", name, signature);
        let registration = Registration {
            name,
            signature,
            storage: Box::new(ComponentStorage::<T>::with_capacity(self.capacity)),
        };
        self.registrations.insert(type_id, registration);
        Ok(signature)
    }

    /// Signature of component type `T`, if it was registered.
    pub fn signature<T>(&self) -> Option<Signature>
    where
        T: Component,
    {
        let registration = self.registrations.get(&TypeId::of::<T>())?;
        Some(registration.signature)
    }

    /// Inserts component of type `T` and attaches it to the entity,
    /// registering `T` if needed.
    /// If component was already attached, it will be replaced by value.
    ///
    /// Returns previously attached component, if any.
    ///
    /// # Errors
    ///
    /// An error is returned if `T` could not be registered.
    ///
    pub fn insert<T>(&mut self, entity: Entity, component: T) -> Result<Option<T>>
    where
        T: Component,
    {
        self.register::<T>()?;
        let storage = self
            .storage_mut::<T>()
            .expect("storage must exist after registration");
        Ok(storage.insert(entity, component))
    }

    /// Removes component of type `T` and detaches it from the entity.
    ///
    /// Returns component that was previously attached to the entity.
    ///
    pub fn remove<T>(&mut self, entity: Entity) -> Option<T>
    where
        T: Component,
    {
        let storage = self.storage_mut::<T>()?;
        storage.remove(entity)
    }

    /// Returns `true` if component of type `T` was already attached to the entity.
    pub fn attached<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        self.storage::<T>()
            .map(|storage| storage.attached(entity))
            .unwrap_or(false)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        let storage = self.storage::<T>()?;
        storage.get(entity)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn get_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        let storage = self.storage_mut::<T>()?;
        storage.get_mut(entity)
    }

    /// Removes all components attached to the entity.
    ///
    /// Returns count of removed components.
    ///
    pub fn destroy(&mut self, entity: Entity) -> usize {
        let mut removed = 0;
        for registration in self.registrations.values_mut() {
            if registration.storage.remove_entity(entity) {
                removed += 1;
            }
        }
        removed
    }

    /// Storage of component type `T`, if it was registered.
    pub fn storage<T>(&self) -> Option<&ComponentStorage<T>>
    where
        T: Component,
    {
        let registration = self.registrations.get(&TypeId::of::<T>())?;
        let storage = registration.storage.as_any().downcast_ref();
        Some(storage.expect("downcast error"))
    }

    /// Mutable storage of component type `T`, if it was registered.
    pub fn storage_mut<T>(&mut self) -> Option<&mut ComponentStorage<T>>
    where
        T: Component,
    {
        let registration = self.registrations.get_mut(&TypeId::of::<T>())?;
        let storage = registration.storage.as_any_mut().downcast_mut();
        Some(storage.expect("downcast error"))
    }

    /// Count of registered component types.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns `true` if no component type was registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Returns iterator over names, signatures and sizes of all registered component types.
    pub fn registrations(&self) -> impl Iterator<Item = (&'static str, Signature, usize)> + '_ {
        self.registrations.values().map(|registration| {
            let Registration {
                name,
                signature,
                storage,
            } = registration;
            (*name, *signature, storage.len())
        })
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
