#![cfg(test)]

use super::{super::EntityManager, *};
use crate::{Entity, Error};

/// Checks that index tables of the storage are mutual inverses
/// and every entity owns the expected value.
fn assert_dense<T>(storage: &ComponentStorage<T>, expected: &[(Entity, T)])
where
    T: Component + PartialEq + std::fmt::Debug,
{
    assert_eq!(storage.len(), expected.len());
    assert_eq!(storage.entities().len(), storage.components().len());
    for (entity, value) in expected {
        assert!(storage.attached(*entity));
        assert_eq!(storage.get(*entity), Some(value));
    }
    for (index, entity) in storage.entities().iter().enumerate() {
        assert_eq!(&storage.components()[index], &storage[*entity]);
    }
}

#[test]
fn test_insertion() {
    let mut entities = EntityManager::new();
    let mut storage = ComponentStorage::new();

    let entity = entities.create().unwrap();
    let component = "foo";

    storage.insert(entity, component);
    assert!(storage.attached(entity));
    assert_eq!(storage[entity], "foo");

    storage.remove(entity);
    assert!(!storage.attached(entity));
    assert_eq!(storage.get(entity), None);
    assert!(storage.is_empty());
}

#[test]
fn test_insertion_replaces() {
    let mut entities = EntityManager::new();
    let mut storage = ComponentStorage::new();

    let entity = entities.create().unwrap();
    assert_eq!(storage.insert(entity, 123), None);
    assert_eq!(storage.insert(entity, 456), Some(123));
    assert_eq!(storage.len(), 1);
    assert_eq!(storage.remove(entity), Some(456));
    assert_eq!(storage.remove(entity), None);
}

#[test]
fn test_swap_remove() {
    let mut entities = EntityManager::new();
    let mut storage = ComponentStorage::with_capacity(8);

    let a = entities.create().unwrap();
    let b = entities.create().unwrap();
    let c = entities.create().unwrap();
    let d = entities.create().unwrap();
    storage.insert(a, 'a');
    storage.insert(b, 'b');
    storage.insert(c, 'c');
    storage.insert(d, 'd');

    // Removing from the middle moves the last one into the hole.
    assert_eq!(storage.remove(b), Some('b'));
    assert_eq!(storage.entities(), &[a, d, c]);
    assert_dense(&storage, &[(a, 'a'), (c, 'c'), (d, 'd')]);

    // Removing the last one moves nothing.
    assert_eq!(storage.remove(c), Some('c'));
    assert_dense(&storage, &[(a, 'a'), (d, 'd')]);

    assert_eq!(storage.remove(a), Some('a'));
    assert_eq!(storage.remove(d), Some('d'));
    assert_dense(&storage, &[]);
}

#[test]
fn test_remove_missing() {
    let mut entities = EntityManager::new();
    let mut storage = ComponentStorage::new();

    let a = entities.create().unwrap();
    let b = entities.create().unwrap();
    storage.insert(a, 1u8);

    assert_eq!(storage.remove(b), None);
    assert_dense(&storage, &[(a, 1)]);
}

#[test]
fn test_dense_sequence() {
    let mut entities = EntityManager::new();
    let mut storage = ComponentStorage::new();
    let mut expected: Vec<(Entity, u32)> = Vec::new();

    let pool: Vec<_> = (0..16).map(|_| entities.create().unwrap()).collect();
    for step in 0..200u32 {
        let entity = pool[(step * 7 % 16) as usize];
        if step % 3 == 0 {
            storage.remove(entity);
            expected.retain(|(e, _)| *e != entity);
        } else {
            storage.insert(entity, step);
            match expected.iter_mut().find(|(e, _)| *e == entity) {
                Some((_, value)) => *value = step,
                None => expected.push((entity, step)),
            }
        }
        assert_dense(&storage, &expected);
    }
}

#[test]
#[should_panic]
fn test_index() {
    let mut entities = EntityManager::new();
    let mut storage = ComponentStorage::new();

    let entity = entities.create().unwrap();
    storage.insert(entity, 0);
    storage[entity] = 1;
    assert_eq!(storage[entity], 1);

    let entity = entities.create().unwrap();
    let _component = storage[entity];
}

#[test]
fn test_iterator() {
    let mut entities = EntityManager::new();
    let mut storage = ComponentStorage::new();

    let _entities: Vec<_> = (0..100)
        .map(|int| {
            let entity = entities.create().unwrap();
            storage.insert(entity, int);
            entity
        })
        .collect();

    for (_, component) in storage.iter_mut() {
        *component += 10;
    }
    for ((_, component), value) in storage.iter().zip(10..110) {
        assert_eq!(*component, value);
    }
}

#[test]
fn test_stale_entity_lookup() {
    let mut entities = EntityManager::with_capacity(1);
    let mut storage = ComponentStorage::new();

    let old = entities.create().unwrap();
    storage.insert(old, "old");
    storage.remove(old);
    entities.destroy(old).unwrap();

    let new = entities.create().unwrap();
    storage.insert(new, "new");
    assert_eq!(storage.get(old), None);
    assert_eq!(storage.get(new), Some(&"new"));
}

#[test]
fn test_registry_idempotent() {
    let mut registry = ComponentRegistry::with_capacity(16);

    let first = registry.register::<u32>().unwrap();
    let second = registry.register::<u32>().unwrap();
    let other = registry.register::<f32>().unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.signature::<u32>(), Some(first));
    assert_eq!(registry.signature::<u8>(), None);
}

#[test]
fn test_registry_access() {
    let mut entities = EntityManager::new();
    let mut registry = ComponentRegistry::new();

    let entity = entities.create().unwrap();
    assert_eq!(registry.insert(entity, 5u32).unwrap(), None);
    assert!(registry.attached::<u32>(entity));
    assert!(!registry.attached::<i64>(entity));

    *registry.get_mut::<u32>(entity).unwrap() += 1;
    assert_eq!(registry.get::<u32>(entity), Some(&6));
    assert_eq!(registry.get::<i64>(entity), None);

    assert_eq!(registry.remove::<u32>(entity), Some(6));
    assert_eq!(registry.remove::<i64>(entity), None);
    assert_eq!(registry.storage::<u32>().map(ComponentStorage::len), Some(0));
}

#[test]
fn test_registry_destroy() {
    let mut entities = EntityManager::new();
    let mut registry = ComponentRegistry::new();

    let a = entities.create().unwrap();
    let b = entities.create().unwrap();
    registry.insert(a, 1u8).unwrap();
    registry.insert(a, 2u16).unwrap();
    registry.insert(a, 3u32).unwrap();
    registry.insert(b, 4u32).unwrap();

    assert_eq!(registry.destroy(a), 3);
    assert!(!registry.attached::<u8>(a));
    assert!(!registry.attached::<u16>(a));
    assert!(!registry.attached::<u32>(a));
    assert_eq!(registry.get::<u32>(b), Some(&4));
    assert_eq!(registry.destroy(a), 0);
}

macro_rules! register_arrays {
    ($registry:ident; $($len:literal)*) => {
        $( $registry.register::<[u8; $len]>().unwrap(); )*
    };
}

#[test]
fn test_registry_exhaustion() {
    let mut registry = ComponentRegistry::with_capacity(1);
    register_arrays!(registry;
        0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15
        16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31
    );
    assert_eq!(registry.len(), 32);

    // Already registered types are still fine.
    assert!(registry.register::<[u8; 0]>().is_ok());

    let error = registry.register::<[u8; 32]>().unwrap_err();
    assert!(matches!(error, Error::SignaturePoolExhausted { .. }));
    assert_eq!(registry.len(), 32);
}
