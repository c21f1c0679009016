//! PDF document processing.
//!
//! This module handles PDF extraction including:
//! - Plain page text, concatenated per document
//! - Embedded raster images, copied out as decoded
//! - Vector-graphics figures, reconstructed from drawing paths and rendered

pub mod extract;
pub mod figures;
pub mod images;
pub mod pdfium_source;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;
use tracing::info;

use crate::config::{ExtractConfig, PdfiumConfig};
use crate::error::{ExtractionError, ExtractionResult};

use super::artifacts::DocumentOutput;

// Re-export commonly used items
pub use extract::{DocumentSummary, PageTextAccumulator, extract_page, extract_pages};
pub use pdfium_source::PdfiumPage;
pub use source::PageSource;

/// Create a new Pdfium instance (dynamically linked).
///
/// Searches for libpdfium in:
/// 1. The configured `pdfium.library_path`, when set
/// 2. Current directory (./libpdfium.so)
/// 3. vendor/pdfium/lib/
/// 4. System library paths
pub fn create_pdfium(config: &PdfiumConfig) -> ExtractionResult<Pdfium> {
    let mut search_dirs: Vec<PathBuf> = config.library_path.iter().cloned().collect();
    search_dirs.push(PathBuf::from("./"));
    search_dirs.push(PathBuf::from("./vendor/pdfium/lib/"));

    let bindings = search_dirs
        .iter()
        .find_map(|dir| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)).ok()
        })
        .map(Ok)
        .unwrap_or_else(Pdfium::bind_to_system_library)
        .map_err(|e| ExtractionError::Config {
            message: format!(
                "Failed to load PDFium library. Set pdfium.library_path or install libpdfium: {:?}",
                e
            ),
        })?;

    Ok(Pdfium::new(bindings))
}

/// Extract text, images and figures of the PDF at `pdf_path` into `out_dir`.
pub fn extract_document(
    pdfium: &Pdfium,
    pdf_path: &Path,
    out_dir: &Path,
    config: &ExtractConfig,
) -> ExtractionResult<DocumentSummary> {
    let document =
        pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| ExtractionError::DocumentLoad {
                path: pdf_path.to_path_buf(),
                source: Box::new(std::io::Error::other(format!("{:?}", e))),
            })?;

    info!(
        path = %pdf_path.display(),
        pages = document.pages().len(),
        "Extracting PDF"
    );

    let output = DocumentOutput::create(out_dir, &config.storage)?;
    let pages = document
        .pages()
        .iter()
        .enumerate()
        .map(|(index, page)| PdfiumPage::new(page, index));

    extract_pages(pages, &output, &config.figures)
}
