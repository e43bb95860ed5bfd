use crate::api::error::InitError;
use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::assets::loader::HostLoader;
use crate::assets::registry::TextureRegistry;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::RenderBuffer;
use crate::systems::lighting::LightState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Initial viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Maximum number of mesh instances (default: 64).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 8).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 16).
    pub max_events: usize,
    /// Maximum number of point lights (default: 4).
    pub max_lights: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            aspect: 16.0 / 9.0,
            max_instances: 64,
            max_sounds: 8,
            max_events: 16,
            max_lights: 4,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the initial scene. An error aborts startup; the runner never
    /// ticks a game whose init failed.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), InitError>;

    /// One frame tick. Called exactly once per rendered frame.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub textures: TextureRegistry,
    pub loader: HostLoader,
    pub lights: LightState,
    pub camera: Camera3D,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_instances),
            textures: TextureRegistry::new(),
            loader: HostLoader::new(),
            lights: LightState::with_capacity(config.max_lights),
            camera: Camera3D::top_down(200.0, config.aspect),
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        self.scene.next_id()
    }

    /// Emit a sound event to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events, published load requests).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
        self.loader.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::loader::{AssetLoader, LoadRequest};

    #[test]
    fn clear_frame_data_drops_transients_only() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.scene.spawn(crate::Entity::new(id));
        ctx.emit_sound(SoundEvent(1));
        ctx.emit_event(GameEvent { kind: 1.0, ..Default::default() });
        ctx.loader.load(LoadRequest {
            slot: 0,
            material_path: "a.mtl".into(),
            geometry_path: "a.obj".into(),
        });

        ctx.clear_frame_data();

        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
        assert!(ctx.loader.pending().is_empty());
        assert_eq!(ctx.loader.issued(), 1);
        assert_eq!(ctx.scene.len(), 1);
    }

    #[test]
    fn camera_uses_configured_aspect() {
        let config = GameConfig { aspect: 2.0, ..GameConfig::default() };
        let ctx = EngineContext::from_config(&config);
        assert_eq!(ctx.camera.aspect, 2.0);
    }
}
