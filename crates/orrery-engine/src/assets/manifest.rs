use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Manifest lookup or parse failure. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("malformed manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no texture named `{0}`")]
    MissingTexture(String),
    #[error("no model named `{0}`")]
    MissingModel(String),
    #[error("no sound named `{0}`")]
    MissingSound(String),
}

/// Asset manifest describing every file a scene references.
/// Loaded from JSON; the host reads the same file to know what to fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Named textures: name → relative image path.
    #[serde(default)]
    pub textures: HashMap<String, String>,
    /// Named detailed models (material + geometry pairs).
    #[serde(default)]
    pub models: HashMap<String, ModelDescriptor>,
    /// Named audio assets.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// A detailed object made of a material library and a geometry file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Relative path to the material file (e.g. `.mtl`).
    pub material: String,
    /// Relative path to the geometry file (e.g. `.obj`).
    pub geometry: String,
}

/// Describes an audio asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Sound event ID that starts (or resumes) playback.
    #[serde(default)]
    pub event_id: Option<u32>,
    /// Sound event ID that pauses playback.
    #[serde(default)]
    pub pause_event_id: Option<u32>,
    #[serde(default)]
    pub looped: bool,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default)]
    pub autoplay: bool,
}

fn default_volume() -> f32 {
    1.0
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn texture(&self, name: &str) -> Result<&str, ManifestError> {
        self.textures
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ManifestError::MissingTexture(name.to_string()))
    }

    pub fn model(&self, name: &str) -> Result<&ModelDescriptor, ManifestError> {
        self.models
            .get(name)
            .ok_or_else(|| ManifestError::MissingModel(name.to_string()))
    }

    pub fn sound(&self, name: &str) -> Result<&SoundDescriptor, ManifestError> {
        self.sounds
            .get(name)
            .ok_or_else(|| ManifestError::MissingSound(name.to_string()))
    }
}
