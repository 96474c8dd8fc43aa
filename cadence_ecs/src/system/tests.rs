#![cfg(test)]

use super::*;
use crate::{ComponentRegistry, EntityManager};

struct Movement;

impl System for Movement {}

struct Render;

impl System for Render {
    fn name(&self) -> &'static str {
        "render"
    }
}

#[test]
fn test_notify() {
    let mut entities = EntityManager::new();
    let mut systems = SystemRegistry::new();
    let position = Signature::bit(0).unwrap();
    let velocity = Signature::bit(1).unwrap();

    let movement = systems.register(Movement);
    systems.set_signature(movement, position | velocity).unwrap();
    let entity = entities.create().unwrap();

    systems.notify_entity_change(entity, position).unwrap();
    assert!(!systems.contains(movement, entity));

    systems.notify_entity_change(entity, position | velocity).unwrap();
    assert!(systems.contains(movement, entity));

    // Repeated notification is idempotent.
    systems.notify_entity_change(entity, position | velocity).unwrap();
    assert_eq!(systems.entities(movement).unwrap().len(), 1);

    systems.notify_entity_change(entity, velocity).unwrap();
    assert!(!systems.contains(movement, entity));
}

#[test]
fn test_registration_without_backfill() {
    let mut entities = EntityManager::new();
    let mut systems = SystemRegistry::new();
    let entity = entities.create().unwrap();

    let render = systems.register(Render);
    systems.set_signature(render, Signature::EMPTY).unwrap();

    assert!(systems.entities(render).unwrap().is_empty());
    assert_eq!(systems.name(render), Some("render"));
    assert_eq!(systems.signature(render), Some(Signature::EMPTY));

    systems.notify_entity_change(entity, Signature::EMPTY).unwrap();
    assert!(systems.contains(render, entity));
}

#[test]
fn test_missing_signature() {
    let mut entities = EntityManager::new();
    let mut systems = SystemRegistry::new();
    let entity = entities.create().unwrap();

    let movement = systems.register(Movement);
    systems.set_signature(movement, Signature::EMPTY).unwrap();
    systems.register(Render);

    let error = systems
        .notify_entity_change(entity, Signature::EMPTY)
        .unwrap_err();
    assert!(matches!(error, Error::MissingSystemSignature { system: "render" }));
    assert!(!systems.contains(movement, entity));
}

#[test]
fn test_destroy() {
    let mut entities = EntityManager::new();
    let mut systems = SystemRegistry::new();
    let a = entities.create().unwrap();
    let b = entities.create().unwrap();

    let movement = systems.register(Movement);
    let render = systems.register(Render);
    systems.set_signature(movement, Signature::EMPTY).unwrap();
    systems.set_signature(render, Signature::EMPTY).unwrap();
    systems.notify_entity_change(a, Signature::EMPTY).unwrap();
    systems.notify_entity_change(b, Signature::EMPTY).unwrap();

    systems.destroy(a);
    for id in systems.ids() {
        assert!(!systems.contains(id, a));
        assert!(systems.contains(id, b));
    }
}

#[test]
fn test_unknown_system() {
    let mut systems = SystemRegistry::new();
    let mut other = SystemRegistry::new();
    other.register(Movement);
    let id = other.register(Render);

    assert!(matches!(
        systems.set_signature(id, Signature::EMPTY),
        Err(Error::UnknownSystem(_)),
    ));
    assert_eq!(systems.entities(id), None);
    assert!(systems.is_empty());
}

#[test]
fn test_take_restore() {
    let mut systems = SystemRegistry::new();
    let render = systems.register(Render);

    let (system, entities) = systems.take(render).unwrap();
    assert!(entities.is_empty());
    assert!(matches!(
        systems.take(render),
        Err(Error::SystemInUse { system: "render" }),
    ));

    systems.restore(render, system);
    assert!(systems.take(render).is_ok());
}

#[test]
fn test_requirement() {
    let mut components = ComponentRegistry::new();

    let empty = <()>::signature(&mut components).unwrap();
    assert_eq!(empty, Signature::EMPTY);

    let pair = <(u8, u16)>::signature(&mut components).unwrap();
    let triple = <(u16, u8, u32)>::signature(&mut components).unwrap();
    assert_eq!(pair.len(), 2);
    assert_eq!(triple.len(), 3);
    assert!(triple.contains(pair));
    assert_eq!(components.len(), 3);
}
