use crate::api::types::{EntityId, TextureId};
use crate::components::entity::Entity;

/// Simple entity storage using a flat Vec.
/// Designed for small entity counts (a sun, a few bodies and their stand-ins).
pub struct Scene {
    entities: Vec<Entity>,
    next_id: u32,
    /// Star-field texture drawn behind everything.
    pub background: Option<TextureId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            next_id: 1,
            background: None,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Visibility of an entity; unknown IDs read as hidden.
    pub fn is_visible(&self, id: EntityId) -> bool {
        self.get(id).map_or(false, |e| e.visible)
    }

    /// Show or hide an entity. Returns false if the ID is unknown.
    pub fn set_visible(&mut self, id: EntityId, visible: bool) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = scene.next_id();
        scene.spawn(Entity::new(id).with_pos(Vec3::new(10.0, 0.0, 20.0)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.pos, Vec3::new(10.0, 0.0, 20.0));
    }

    #[test]
    fn ids_are_unique() {
        let mut scene = Scene::new();
        let a = scene.next_id();
        let b = scene.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn set_visible_toggles_and_reports_unknown() {
        let mut scene = Scene::new();
        let id = scene.next_id();
        scene.spawn(Entity::new(id));
        assert!(scene.is_visible(id));
        assert!(scene.set_visible(id, false));
        assert!(!scene.is_visible(id));
        assert!(!scene.set_visible(EntityId(999), true));
        assert!(!scene.is_visible(EntityId(999)));
    }

    #[test]
    fn find_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("sun"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("earth"));
        assert_eq!(scene.find_by_tag("earth").unwrap().id, EntityId(2));
    }
}
