/// Both body roles, primitive and detailed, under one index space.

use glam::Vec3;
use orrery_engine::{Entity, EntityId, MeshComponent, Scene, TextureId};

use crate::bodies::{
    check_len, BodySpec, BodyTable, ConfigError, RING_INNER, RING_OUTER, SPHERE_SEGMENTS,
};

/// Ring placement: which body carries it and its texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSkin {
    pub body: usize,
    pub texture: TextureId,
}

/// Primitive bodies exist from startup. The detailed collection stays empty
/// until every detailed object has arrived, then holds exactly one per body.
/// Neither collection ever shrinks.
#[derive(Debug)]
pub struct BodyRegistry {
    specs: Vec<BodySpec>,
    primitives: Vec<EntityId>,
    detailed: Vec<EntityId>,
}

impl BodyRegistry {
    /// Spawn one textured sphere per body, at its angle-zero orbit position.
    /// Validates every input before touching the scene.
    pub fn spawn_primitives(
        table: &BodyTable,
        scene: &mut Scene,
        skins: &[TextureId],
        ring: Option<RingSkin>,
    ) -> Result<Self, ConfigError> {
        check_len("texture", table.len(), skins.len())?;
        if let Some(ring) = ring {
            table.get(ring.body)?;
        }

        let mut primitives = Vec::with_capacity(table.len());
        for (spec, &skin) in table.iter().zip(skins) {
            let (x, z) = spec.orbit.position(0.0);
            let mut entity = Entity::new(scene.next_id())
                .with_tag(spec.name.clone())
                .with_pos(Vec3::new(x as f32, 0.0, z as f32))
                .with_mesh(
                    MeshComponent::sphere(spec.size as f32, SPHERE_SEGMENTS).with_texture(skin),
                );

            if let Some(ring) = ring.filter(|r| r.body == spec.index) {
                let inner = (spec.size * RING_INNER) as f32;
                let outer = (spec.size * RING_OUTER) as f32;
                entity = entity.with_attachment(
                    MeshComponent::ring(inner, outer, SPHERE_SEGMENTS)
                        .with_texture(ring.texture)
                        .unlit()
                        .double_sided()
                        .transparent(),
                );
            }
            primitives.push(scene.spawn(entity));
        }

        Ok(Self {
            specs: table.iter().cloned().collect(),
            primitives,
            detailed: Vec::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn spec(&self, index: usize) -> Option<&BodySpec> {
        self.specs.get(index)
    }

    pub fn primitive(&self, index: usize) -> Option<EntityId> {
        self.primitives.get(index).copied()
    }

    pub fn primitives(&self) -> &[EntityId] {
        &self.primitives
    }

    pub fn detailed(&self) -> &[EntityId] {
        &self.detailed
    }

    pub fn has_detailed(&self) -> bool {
        !self.detailed.is_empty()
    }

    /// Install the full detailed collection. Refused (returns `false`) when
    /// one is already installed or the count does not match the body count.
    pub fn commit_detailed(&mut self, ids: Vec<EntityId>) -> bool {
        if self.has_detailed() || ids.len() != self.len() {
            return false;
        }
        self.detailed = ids;
        true
    }

    /// Every entity in either role, with its body index.
    pub fn members(&self) -> impl Iterator<Item = (usize, EntityId)> + '_ {
        let primitives = self.primitives.iter().copied().enumerate();
        let detailed = self.detailed.iter().copied().enumerate();
        primitives.chain(detailed)
    }

    /// Hide every primitive and show every detailed body. No-op until the
    /// detailed collection exists.
    pub fn show_detailed(&self, scene: &mut Scene) {
        if !self.has_detailed() {
            return;
        }
        set_all(scene, &self.primitives, false);
        set_all(scene, &self.detailed, true);
    }

    /// Show every primitive and hide every detailed body.
    pub fn show_primitives(&self, scene: &mut Scene) {
        set_all(scene, &self.primitives, true);
        set_all(scene, &self.detailed, false);
    }
}

fn set_all(scene: &mut Scene, ids: &[EntityId], visible: bool) {
    for &id in ids {
        scene.set_visible(id, visible);
    }
}
