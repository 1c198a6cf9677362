//! Background music clip.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ViewerError;

/// An encoded audio file held in memory.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Where the clip was read from.
    pub path: PathBuf,
    /// Encoded file contents.
    pub bytes: Arc<[u8]>,
}

/// Read the clip at `path` and check that it decodes.
pub fn load_audio(path: &Path) -> Result<AudioClip, ViewerError> {
    let bytes = std::fs::read(path).map_err(|e| {
        ViewerError::AudioLoad(format!("{}: {e}", path.display()))
    })?;
    if bytes.is_empty() {
        return Err(ViewerError::AudioLoad(format!(
            "{}: file is empty",
            path.display()
        )));
    }
    let clip = AudioClip {
        path: path.to_path_buf(),
        bytes: Arc::from(bytes),
    };

    #[cfg(feature = "audio")]
    {
        let _ = rodio::Decoder::new(std::io::Cursor::new(clip.bytes.clone()))
            .map_err(|e| {
                ViewerError::AudioLoad(format!("{}: {e}", path.display()))
            })?;
    }

    log::info!(
        "loaded audio {} ({} bytes)",
        clip.path.display(),
        clip.bytes.len()
    );
    Ok(clip)
}
