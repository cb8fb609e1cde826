use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::{mint_filename, MintArtifact};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("image payload is not an inline data: URI")]
    NotInlineData,
    #[error("image payload is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), SaveError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| SaveError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(SaveError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| SaveError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| SaveError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes the image payload of `artifact` to `{dir}/{edition}_{rarity}.png`.
pub fn save_image(dir: &Path, artifact: &MintArtifact) -> Result<PathBuf, SaveError> {
    let bytes = decode_data_uri(&artifact.image)?;
    let filename = mint_filename(&artifact.edition, &artifact.rarity);
    AtomicImageWriter::new(dir.to_path_buf()).write(&filename, &bytes)
}

/// Decodes the base64 payload of an inline `data:` URI. A plain URL
/// payload cannot be saved locally and is rejected.
fn decode_data_uri(image: &str) -> Result<Vec<u8>, SaveError> {
    let rest = image.strip_prefix("data:").ok_or(SaveError::NotInlineData)?;
    let (meta, payload) = rest.split_once(',').ok_or(SaveError::NotInlineData)?;
    if !meta.ends_with(";base64") {
        return Err(SaveError::NotInlineData);
    }
    STANDARD
        .decode(payload)
        .map_err(|err| SaveError::InvalidBase64(err.to_string()))
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file
/// then renaming.
pub struct AtomicImageWriter {
    dir: PathBuf,
}

impl AtomicImageWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, SaveError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace existing file if present to keep determinism.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| SaveError::Io(e.error))?;
        Ok(target)
    }
}
