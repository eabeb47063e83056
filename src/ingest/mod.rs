//! File ingestion for Les.
//!
//! Classifies uploaded material by extension and persists raw bytes to a
//! uniquely named temporary file that lives as long as the session.

use crate::error::{LesError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Supported PDF extension.
const PDF_EXTENSIONS: &[&str] = &["pdf"];

/// Supported video file extensions (audio will be extracted and transcribed).
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv"];

/// Kind of ingested material, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// A PDF document; text is extracted page by page.
    Pdf,
    /// A video file; the audio track is transcribed.
    Video,
}

impl MaterialKind {
    /// Classify a file name by its extension.
    ///
    /// Only `pdf`, `mp4`, and `mkv` are accepted. The file contents are not
    /// validated against the extension; a mismatch surfaces as an
    /// extraction error later.
    pub fn from_name(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| {
                LesError::InvalidInput(format!("File has no extension: {}", name))
            })?;

        if PDF_EXTENSIONS.contains(&ext.as_str()) {
            Ok(MaterialKind::Pdf)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Ok(MaterialKind::Video)
        } else {
            Err(LesError::InvalidInput(format!(
                "Unsupported file type '.{}'. Supported: pdf, mp4, mkv",
                ext
            )))
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialKind::Pdf => write!(f, "pdf"),
            MaterialKind::Video => write!(f, "video"),
        }
    }
}

/// An ingested file ready for extraction.
///
/// When the material was uploaded as raw bytes, the backing temp file is
/// owned here and removed on drop.
pub struct IngestedFile {
    path: PathBuf,
    kind: MaterialKind,
    // Held for its Drop impl; the temp file is deleted with the session.
    _temp: Option<NamedTempFile>,
}

impl IngestedFile {
    /// Path of the file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Classified material kind.
    pub fn kind(&self) -> MaterialKind {
        self.kind
    }
}

impl std::fmt::Debug for IngestedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestedFile")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Ingest an existing file on disk without copying it.
pub fn ingest_path(path: &Path) -> Result<IngestedFile> {
    if !path.exists() {
        return Err(LesError::Ingest(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LesError::InvalidInput(format!("Invalid file name: {}", path.display())))?;
    let kind = MaterialKind::from_name(name)?;

    debug!("Ingested local file {} as {}", path.display(), kind);

    Ok(IngestedFile {
        path: path.to_path_buf(),
        kind,
        _temp: None,
    })
}

/// Ingest raw uploaded bytes, writing them to a uniquely named temp file
/// that preserves the original extension.
pub fn ingest_bytes(name: &str, bytes: &[u8], temp_dir: &Path) -> Result<IngestedFile> {
    let kind = MaterialKind::from_name(name)?;

    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin")
        .to_lowercase();

    std::fs::create_dir_all(temp_dir)?;

    let mut temp = tempfile::Builder::new()
        .prefix("les-upload-")
        .suffix(&format!(".{}", ext))
        .tempfile_in(temp_dir)
        .map_err(|e| LesError::Ingest(format!("Failed to create temp file: {}", e)))?;

    temp.write_all(bytes)?;
    temp.flush()?;

    let path = temp.path().to_path_buf();
    debug!("Ingested {} bytes from '{}' to {}", bytes.len(), name, path.display());

    Ok(IngestedFile {
        path,
        kind,
        _temp: Some(temp),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_kind_from_name() {
        assert_eq!(MaterialKind::from_name("doc.pdf").unwrap(), MaterialKind::Pdf);
        assert_eq!(MaterialKind::from_name("doc.PDF").unwrap(), MaterialKind::Pdf);
        assert_eq!(MaterialKind::from_name("clip.mp4").unwrap(), MaterialKind::Video);
        assert_eq!(MaterialKind::from_name("clip.MKV").unwrap(), MaterialKind::Video);
    }

    #[test]
    fn test_material_kind_rejects_unsupported() {
        assert!(MaterialKind::from_name("audio.mp3").is_err());
        assert!(MaterialKind::from_name("notes.txt").is_err());
        assert!(MaterialKind::from_name("no_extension").is_err());
    }

    #[test]
    fn test_ingest_bytes_preserves_extension() {
        let dir = tempfile::tempdir().unwrap();
        let ingested = ingest_bytes("handbook.pdf", b"%PDF-1.4", dir.path()).unwrap();

        assert_eq!(ingested.kind(), MaterialKind::Pdf);
        assert!(ingested.path().exists());
        assert_eq!(
            ingested.path().extension().and_then(|e| e.to_str()),
            Some("pdf")
        );
        assert_eq!(std::fs::read(ingested.path()).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_ingest_bytes_cleans_up_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let ingested = ingest_bytes("clip.mp4", &[0u8; 16], dir.path()).unwrap();
            ingested.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_ingest_path_missing_file() {
        assert!(ingest_path(Path::new("/nonexistent/material.pdf")).is_err());
    }
}
