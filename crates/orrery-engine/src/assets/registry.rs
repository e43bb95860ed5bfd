use std::collections::HashMap;
use crate::api::types::TextureId;

/// Registry of texture paths requested by the game.
///
/// `load` is synchronous-looking: it hands back a handle immediately and the
/// host fetches the image in the background, the same way a browser texture
/// loader returns a texture object before its pixels arrive.
pub struct TextureRegistry {
    paths: Vec<String>,
    ids: HashMap<String, TextureId>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            ids: HashMap::new(),
        }
    }

    /// Register a texture path. Loading the same path twice yields the same handle.
    pub fn load(&mut self, path: &str) -> TextureId {
        if let Some(&id) = self.ids.get(path) {
            return id;
        }
        let id = TextureId(self.paths.len() as u32);
        self.paths.push(path.to_string());
        self.ids.insert(path.to_string(), id);
        log::debug!("texture {} -> {}", id.0, path);
        id
    }

    /// Path registered for a handle.
    pub fn path(&self, id: TextureId) -> Option<&str> {
        self.paths.get(id.0 as usize).map(String::as_str)
    }

    /// Number of distinct textures.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
