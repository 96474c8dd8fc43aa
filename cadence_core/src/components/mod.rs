//! Standard components of game engine.

use std::fmt;
use std::sync::Arc;

use ultraviolet::Vec2;

use cadence_ecs::{Entity, World};

/// Placement of the entity in 2D space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Transform {
    /// Creates transform placed at `position` without rotation and scaling.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            rotation: 0.0,
            scale: Vec2::one(),
        }
    }
}

/// Motion state of the entity handled by physics system.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec2,
    /// Angular velocity in degrees per second.
    pub angular_velocity: f32,
    pub acceleration: Vec2,
}

impl RigidBody {
    /// Creates rigid body which moves with constant `velocity`.
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::default()
        }
    }
}

/// External force applied to the entity after its position was integrated.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Gravity {
    pub force: Vec2,
}

impl Gravity {
    pub const fn new(force: Vec2) -> Self {
        Self { force }
    }
}

/// Presentation side of the entity.
///
/// Implementors translate component data of the entity into visual output.
///
pub trait Draw: Send + Sync {
    fn draw(&self, entity: Entity, world: &World);
}

impl<F> Draw for F
where
    F: Fn(Entity, &World) + Send + Sync,
{
    fn draw(&self, entity: Entity, world: &World) {
        self(entity, world)
    }
}

/// Component which makes the entity visible to render system.
#[derive(Clone)]
pub struct Renderable(Arc<dyn Draw>);

impl Renderable {
    pub fn new<D>(draw: D) -> Self
    where
        D: Draw + 'static,
    {
        Self(Arc::new(draw))
    }

    /// Invokes draw callback for the entity.
    pub fn draw(&self, entity: Entity, world: &World) {
        self.0.draw(entity, world)
    }
}

impl fmt::Debug for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Renderable").finish()
    }
}
