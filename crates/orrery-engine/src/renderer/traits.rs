//! Render surface trait for native GPU backends.
//!
//! In the browser the host reads the shared buffers directly and draws with
//! its own 3D library. Native front-ends implement [`RenderSurface`] and
//! receive the same data as a [`FrameData`].

use super::camera::CameraUniform;
use super::instance::MeshInstance;
use crate::api::types::TextureId;
use crate::systems::lighting::PointLight;

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Visible meshes, attachments included.
    pub instances: &'a [MeshInstance],
    /// Star-field texture behind the scene.
    pub background: Option<TextureId>,
    pub camera: CameraUniform,
    pub lights: &'a [PointLight],
    pub ambient: [f32; 3],
}

/// Something that can draw a frame: a GPU backend, a software rasterizer,
/// or a recorder in tests.
///
/// Failures inside the surface (context loss, etc.) are the surface's
/// business; the engine does not observe them.
pub trait RenderSurface {
    /// Backend identifier (e.g., "webgl", "wgpu").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData);

    /// Handle viewport resize.
    fn resize(&mut self, width: u32, height: u32);
}
