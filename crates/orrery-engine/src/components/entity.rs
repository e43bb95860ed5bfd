use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity over ECS purity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Hidden entities are neither drawn nor animated.
    pub visible: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Self-rotation about the world Y axis, in radians.
    pub spin: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Primary mesh (entities without one are invisible markers).
    pub mesh: Option<MeshComponent>,
    /// Meshes drawn with this entity's transform and hidden with it.
    pub attachments: Vec<MeshComponent>,
}

impl Entity {
    /// Create a new visible entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            pos: Vec3::ZERO,
            spin: 0.0,
            scale: 1.0,
            mesh: None,
            attachments: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_attachment(mut self, mesh: MeshComponent) -> Self {
        self.attachments.push(mesh);
        self
    }
}
