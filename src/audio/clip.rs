//! Encoded audio ready for transcription.

use std::path::Path;

use super::recorder::RecordingError;

/// One encoded audio file plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Read an existing recording from disk.
    ///
    /// # Errors
    /// [`RecordingError::UnsupportedFormat`] when the extension is not a
    /// known audio type, [`RecordingError::Io`] when the file cannot be read,
    /// and [`RecordingError::Empty`] for a zero-length file.
    pub fn from_file(path: &Path) -> Result<Self, RecordingError> {
        let mime_type = mime_for_path(path)
            .ok_or_else(|| RecordingError::UnsupportedFormat(path.display().to_string()))?;
        let bytes = std::fs::read(path)?;
        if bytes.is_empty() {
            return Err(RecordingError::Empty);
        }
        log::debug!(
            "audio clip: loaded {} bytes ({mime_type}) from {}",
            bytes.len(),
            path.display()
        );
        Ok(Self::new(bytes, mime_type))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// MIME type for an audio file, by extension (case-insensitive).
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "wav" => "audio/wav",
        "webm" => "audio/webm",
        "ogg" | "oga" => "audio/ogg",
        "mp3" => "audio/mp3",
        "flac" => "audio/flac",
        "m4a" | "aac" => "audio/aac",
        _ => return None,
    };
    Some(mime)
}
