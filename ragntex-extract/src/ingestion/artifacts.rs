//! Output layout for one processed document.
//!
//! ```text
//! <out_dir>/
//!   ragntex.txt            concatenated page text
//!   ragntex/               raster artifacts
//!     page0_img0_hash1a2b3c4d.png
//!     page2_fig1_hash9f8e7d6c.png
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::StorageConfig;
use crate::error::{ExtractionError, ExtractionResult};

/// Writes the artifacts of a single document.
#[derive(Debug, Clone)]
pub struct DocumentOutput {
    root: PathBuf,
    images_dir: PathBuf,
    text_path: PathBuf,
}

impl DocumentOutput {
    /// Create the output directories for a document under `out_dir`.
    pub fn create(out_dir: &Path, storage: &StorageConfig) -> ExtractionResult<Self> {
        let images_dir = out_dir.join(&storage.images_dir);
        std::fs::create_dir_all(&images_dir).map_err(ExtractionError::Io)?;

        Ok(Self {
            root: out_dir.to_path_buf(),
            images_dir,
            text_path: out_dir.join(&storage.text_file),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn text_path(&self) -> &Path {
        &self.text_path
    }

    /// Write a raster artifact named `name` into the images directory.
    pub fn write_raster(&self, name: &str, bytes: &[u8]) -> ExtractionResult<PathBuf> {
        let path = self.images_dir.join(name);
        write_atomically(&path, bytes)?;
        debug!(path = %path.display(), size = bytes.len(), "Wrote raster artifact");
        Ok(path)
    }

    /// Write the document text file.
    pub fn write_text(&self, text: &str) -> ExtractionResult<PathBuf> {
        write_atomically(&self.text_path, text.as_bytes())?;
        debug!(path = %self.text_path.display(), size = text.len(), "Wrote document text");
        Ok(self.text_path.clone())
    }
}

/// Write through a temporary file in the target directory, then rename.
///
/// A failed write never leaves a truncated file under the final name.
fn write_atomically(path: &Path, bytes: &[u8]) -> ExtractionResult<()> {
    let to_write_error = |source: std::io::Error| ExtractionError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(to_write_error)?;
    file.write_all(bytes).map_err(to_write_error)?;
    file.flush().map_err(to_write_error)?;
    file.persist(path).map_err(|e| to_write_error(e.error))?;
    Ok(())
}
