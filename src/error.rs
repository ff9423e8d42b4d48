use std::path::PathBuf;

use thiserror::Error;

/// The food image could not be opened or decoded
#[derive(Debug, Error)]
#[error("Unable to load food image from path: {}", path.display())]
pub struct AssetLoadError {
    pub path: PathBuf,
    #[source]
    pub source: image::ImageError,
}

impl AssetLoadError {
    /// Check if the asset file itself is missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            &self.source,
            image::ImageError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound
        )
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Font has no glyph for text {text:?}")]
    MissingGlyph { text: String },

    #[error("Text rendering failed: {0}")]
    Text(String),
}
