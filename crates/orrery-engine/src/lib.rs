pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::error::InitError;
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, TextureId, ModelHandle, SoundEvent, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, Shape, Material, Color};
pub use crate::core::scene::Scene;
pub use crate::core::time::FrameClock;
pub use renderer::instance::{MeshInstance, RenderBuffer};
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::traits::{FrameData, RenderSurface};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{AssetManifest, ManifestError, ModelDescriptor, SoundDescriptor};
pub use assets::registry::TextureRegistry;
pub use assets::loader::{AssetLoader, DetailedObject, HostLoader, LoadOutcome, LoadRequest};
#[cfg(not(target_arch = "wasm32"))]
pub use assets::loader::ThreadedLoader;
pub use bridge::protocol::{ProtocolLayout, LIGHT_FLOATS};
pub use systems::lighting::{PointLight, LightState};
pub use systems::render::build_render_buffer;
