use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Locations of the model and music files.
pub struct AssetOptions {
    /// glTF model (`.glb` or `.gltf`).
    pub model: String,
    /// Background music clip.
    pub audio: String,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            model: "asset/model/astro_core.glb".into(),
            audio: "asset/musik/backsound.mp3".into(),
        }
    }
}
