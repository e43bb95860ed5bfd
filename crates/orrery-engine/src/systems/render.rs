use crate::components::entity::Entity;
use crate::components::mesh::{MeshComponent, Shape};
use crate::renderer::instance::{MeshInstance, RenderBuffer};

fn mesh_instance(entity: &Entity, mesh: &MeshComponent) -> MeshInstance {
    let (kind, model, p0, p1, p2) = match mesh.shape {
        Shape::Sphere { radius, segments } => (0.0, -1.0, radius, segments as f32, 0.0),
        Shape::Ring { inner, outer, segments } => (1.0, -1.0, inner, outer, segments as f32),
        Shape::Model { handle } => (2.0, handle.0 as f32, 0.0, 0.0, 0.0),
    };
    let material = &mesh.material;
    MeshInstance {
        x: entity.pos.x,
        y: entity.pos.y,
        z: entity.pos.z,
        spin: entity.spin,
        scale: entity.scale,
        kind,
        texture: material.texture.map_or(-1.0, |t| t.0 as f32),
        model,
        flags: material.flags() as f32,
        r: material.color.r,
        g: material.color.g,
        b: material.color.b,
        emissive_r: material.emissive.r,
        emissive_g: material.emissive.g,
        emissive_b: material.emissive.b,
        emissive_intensity: material.emissive_intensity,
        p0,
        p1,
        p2,
        _pad: 0.0,
    }
}

/// Build the render buffer from a set of entities.
/// Hidden entities and their attachments are skipped; attachments follow
/// their owner's instance.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();
    for entity in entities {
        if !entity.visible {
            continue;
        }
        if let Some(mesh) = &entity.mesh {
            buffer.push(mesh_instance(entity, mesh));
        }
        for attachment in &entity.attachments {
            buffer.push(mesh_instance(entity, attachment));
        }
    }
}
