//! Page extraction orchestrator.
//!
//! Pages are processed strictly in document order. Within a page, embedded
//! images are written before vector figures. The page text is collected in a
//! [`PageTextAccumulator`] owned by one document run and written once at the
//! end.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::FigureExtractionConfig;
use crate::error::ExtractionResult;
use crate::ingestion::artifacts::DocumentOutput;

use super::figures::{ExtractedFigure, extract_figures};
use super::images::{ExtractedImage, extract_embedded_images};
use super::source::PageSource;

/// Separator placed between the text of consecutive pages
pub const PAGE_TEXT_SEPARATOR: &str = " ";

/// Collects page text for one document, in page order.
#[derive(Debug, Default)]
pub struct PageTextAccumulator {
    text: String,
    pages: usize,
}

impl PageTextAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page's text, trimmed, after a single separator.
    pub fn push_page(&mut self, page_text: &str) {
        if self.pages > 0 {
            self.text.push_str(PAGE_TEXT_SEPARATOR);
        }
        self.text.push_str(page_text.trim());
        self.pages += 1;
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Artifacts produced for one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageArtifacts {
    pub images: Vec<ExtractedImage>,
    pub figures: Vec<ExtractedFigure>,
}

/// Outcome of processing one document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSummary {
    pub pages: usize,
    pub images: Vec<ExtractedImage>,
    pub figures: Vec<ExtractedFigure>,
    pub text_path: PathBuf,
}

/// Extract images, figures and text from one page.
///
/// Unreadable page text is logged and contributes an empty page.
pub fn extract_page<P: PageSource + ?Sized>(
    page: &P,
    output: &DocumentOutput,
    config: &FigureExtractionConfig,
    text: &mut PageTextAccumulator,
) -> ExtractionResult<PageArtifacts> {
    match page.text() {
        Ok(page_text) => text.push_page(&page_text),
        Err(e) => {
            warn!(page = page.index(), error = %e, "Failed to extract page text");
            text.push_page("");
        }
    }

    let images = extract_embedded_images(page, output)?;
    let figures = extract_figures(page, output, config)?;

    Ok(PageArtifacts { images, figures })
}

/// Run every page through [`extract_page`], then write the document text.
///
/// Artifact write failures abort the document; everything written up to
/// that point stays intact.
pub fn extract_pages<I, P>(
    pages: I,
    output: &DocumentOutput,
    config: &FigureExtractionConfig,
) -> ExtractionResult<DocumentSummary>
where
    I: IntoIterator<Item = P>,
    P: PageSource,
{
    let mut text = PageTextAccumulator::new();
    let mut images = Vec::new();
    let mut figures = Vec::new();

    for page in pages {
        let artifacts = extract_page(&page, output, config, &mut text)?;
        images.extend(artifacts.images);
        figures.extend(artifacts.figures);
    }

    let pages = text.page_count();
    let text_path = output.write_text(text.as_str())?;

    info!(
        output = %output.root().display(),
        pages,
        images = images.len(),
        figures = figures.len(),
        "Document extraction complete"
    );

    Ok(DocumentSummary {
        pages,
        images,
        figures,
        text_path,
    })
}
