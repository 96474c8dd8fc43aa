//! Utilities for game creation and execution.

use std::fmt;

use cadence_ecs::{Entity, SystemId, Tick, World, DEFAULT_MAX_ENTITIES};

use crate::{
    components::{Gravity, Renderable, RigidBody, Transform},
    config::Config,
    error::Result,
    system::{GraveyardSystem, PhysicsSystem, RenderSystem},
    window::{Size, Window},
};

pub use scheduler::{GameLoop, PassClock};

mod scheduler;

/// One of two independently clocked update passes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Pass {
    Physics,
    Update,
}

impl Pass {
    /// Count of passes.
    pub const COUNT: usize = 2;

    /// All passes in order of their start.
    pub const ALL: [Pass; 2] = [Pass::Physics, Pass::Update];

    pub const fn index(self) -> usize {
        match self {
            Pass::Physics => 0,
            Pass::Update => 1,
        }
    }

    /// Name of the pass, also used as name of its thread.
    pub const fn name(self) -> &'static str {
        match self {
            Pass::Physics => "physics",
            Pass::Update => "update",
        }
    }

    /// Runs the pass of the game for one tick.
    pub fn run<G>(self, game: &mut G, tick: Tick) -> Result<()>
    where
        G: Game + ?Sized,
    {
        match self {
            Pass::Physics => game.update_physics(tick),
            Pass::Update => game.update(tick),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Game which can be driven by [`GameLoop`].
pub trait Game: Send + 'static {
    /// Handles one tick of general update pass.
    fn update(&mut self, tick: Tick) -> Result<()>;

    /// Handles one tick of physics pass.
    fn update_physics(&mut self, tick: Tick) -> Result<()>;
}

/// State passed into user update hooks of [`GameWorld`].
pub struct UpdateContext<'a> {
    pub world: &'a mut World,
    /// Root entity which holds [`Window`] component.
    pub root: Entity,
    pub tick: Tick,
}

impl UpdateContext<'_> {
    /// Current size of the window.
    pub fn window_size(&self) -> Size {
        window_size(self.world, self.root)
    }
}

/// User update hook of [`GameWorld`].
pub type UpdateHook = Box<dyn FnMut(&mut UpdateContext) -> Result<()> + Send>;

/// Game built on top of [`World`] with standard systems registered.
///
/// Both passes run systems of the world in registration order:
/// render, physics and graveyard systems, then user hook of the pass.
///
pub struct GameWorld {
    world: World,
    root: Entity,
    render: SystemId,
    on_update: Option<UpdateHook>,
    on_update_physics: Option<UpdateHook>,
}

impl GameWorld {
    /// Creates game world without user hooks.
    ///
    /// # Errors
    ///
    /// See [`GameWorldBuilder::build`].
    ///
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> GameWorldBuilder {
        GameWorldBuilder::new()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Root entity which holds [`Window`] component.
    pub fn root(&self) -> Entity {
        self.root
    }

    /// Identifier of render system.
    pub fn render_system(&self) -> SystemId {
        self.render
    }

    /// Current size of the window.
    pub fn window_size(&self) -> Size {
        window_size(&self.world, self.root)
    }

    /// Stores new size of the host window.
    ///
    /// # Errors
    ///
    /// An error is returned if root entity was destroyed.
    ///
    pub fn resize<S>(&mut self, size: S) -> Result<()>
    where
        S: Into<Size>,
    {
        let size = size.into();
        log::debug!("window resized to {}x{}", size.width, size.height);
        match self.world.component_mut::<Window>(self.root) {
            Some(window) => window.size = size,
            None => {
                self.world.add_component(self.root, Window::new(size))?;
            }
        }
        self.world.mark_changed(self.root);
        Ok(())
    }

    /// Invokes draw callback of each [renderable](Renderable) entity.
    ///
    /// Returns count of drawn entities.
    ///
    pub fn draw(&self) -> usize {
        RenderSystem::draw(&self.world, self.render)
    }

    fn run_hook(&mut self, pass: Pass, tick: Tick) -> Result<()> {
        let hook = match pass {
            Pass::Physics => &mut self.on_update_physics,
            Pass::Update => &mut self.on_update,
        };
        match hook {
            Some(hook) => hook(&mut UpdateContext {
                world: &mut self.world,
                root: self.root,
                tick,
            }),
            None => Ok(()),
        }
    }
}

impl Game for GameWorld {
    fn update(&mut self, tick: Tick) -> Result<()> {
        self.world.update(tick)?;
        self.run_hook(Pass::Update, tick)
    }

    fn update_physics(&mut self, tick: Tick) -> Result<()> {
        self.world.update_physics(tick)?;
        self.run_hook(Pass::Physics, tick)
    }
}

/// Builder of [`GameWorld`].
pub struct GameWorldBuilder {
    max_entities: usize,
    on_update: Option<UpdateHook>,
    on_update_physics: Option<UpdateHook>,
}

impl GameWorldBuilder {
    pub fn new() -> Self {
        Self {
            max_entities: DEFAULT_MAX_ENTITIES,
            on_update: None,
            on_update_physics: None,
        }
    }

    /// Applies engine configuration.
    pub fn config(self, config: &Config) -> Self {
        self.max_entities(config.max_entities())
    }

    /// Sets maximal count of alive entities, including the root one.
    pub fn max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Sets hook which runs after all systems in general update pass.
    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut UpdateContext) -> Result<()> + Send + 'static,
    {
        self.on_update = Some(Box::new(hook));
        self
    }

    /// Sets hook which runs after all systems in physics pass.
    pub fn on_update_physics<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut UpdateContext) -> Result<()> + Send + 'static,
    {
        self.on_update_physics = Some(Box::new(hook));
        self
    }

    /// Creates the world, its root entity and standard systems.
    ///
    /// # Errors
    ///
    /// An error is returned if root entity or some component type could not be created.
    ///
    pub fn build(self) -> Result<GameWorld> {
        let mut world = World::with_capacity(self.max_entities);
        let render = world.register_system::<(Renderable,), _>(RenderSystem)?;
        world.register_system::<(Transform, RigidBody, Gravity), _>(PhysicsSystem)?;

        let root = world.create_entity(|builder| builder.add(Window::default()).map(drop))?;
        world.register_system::<(Transform,), _>(GraveyardSystem::new(root))?;
        log::info!("game world created with root entity {:?}", root);

        Ok(GameWorld {
            world,
            root,
            render,
            on_update: self.on_update,
            on_update_physics: self.on_update_physics,
        })
    }
}

impl Default for GameWorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn window_size(world: &World, root: Entity) -> Size {
    world
        .component::<Window>(root)
        .map(|window| window.size)
        .unwrap_or_default()
}
