use bytemuck::{Pod, Zeroable};

/// Per-mesh render data written to SharedArrayBuffer for the host renderer.
/// Must match the host protocol: 20 floats = 80 bytes stride.
///
/// `texture` and `model` hold `-1.0` when absent. `p0..p2` depend on `kind`:
/// sphere = (radius, segments, 0), ring = (inner, outer, segments), model = unused.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Self-rotation about Y in radians.
    pub spin: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Shape discriminant (0 sphere, 1 ring, 2 model).
    pub kind: f32,
    pub texture: f32,
    pub model: f32,
    /// Material flag bits.
    pub flags: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub emissive_r: f32,
    pub emissive_g: f32,
    pub emissive_b: f32,
    pub emissive_intensity: f32,
    pub p0: f32,
    pub p1: f32,
    pub p2: f32,
    pub _pad: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing every visible mesh for the frame.
pub struct RenderBuffer {
    pub instances: Vec<MeshInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
