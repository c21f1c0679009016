//! Per-page view of a decoded PDF.
//!
//! The extraction pipeline only talks to a document through [`PageSource`],
//! so the figure engine can be driven by pdfium (see `pdfium_source`) or by
//! in-memory pages in tests.

use crate::error::ProcessingError;

use super::figures::Rectangle;

/// Page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

impl PageDimensions {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// One vector drawing path, as reported by the decoder.
///
/// `bbox` is `[left, top, right, bottom]` in page space and may be
/// malformed; such drawings are excluded from grouping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawing {
    pub bbox: [f64; 4],
}

impl Drawing {
    pub fn bounds(&self) -> Option<Rectangle> {
        Rectangle::from_bbox(self.bbox)
    }
}

/// What a layout block holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Text,
    /// Placeholder for an embedded image
    Image,
}

/// Contiguous layout block on a page
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub bbox: [f64; 4],
    pub kind: BlockKind,
}

impl TextBlock {
    pub fn bounds(&self) -> Option<Rectangle> {
        Rectangle::from_bbox(self.bbox)
    }

    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }
}

/// Decoded embedded raster image
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    /// Decoder-specific identifier of the image stream
    pub stream_id: usize,
    /// Raster bytes, written out verbatim
    pub bytes: Vec<u8>,
}

/// Everything the extraction pipeline needs from one page.
pub trait PageSource {
    /// Zero-based page index in the document
    fn index(&self) -> usize;

    fn dimensions(&self) -> PageDimensions;

    /// Plain text of the page
    fn text(&self) -> Result<String, ProcessingError>;

    /// Embedded raster images, in enumeration order.
    ///
    /// An entry that fails to decode is reported in place so sequence
    /// numbers of the remaining images stay stable.
    fn embedded_images(
        &self,
    ) -> Result<Vec<Result<EmbeddedImage, ProcessingError>>, ProcessingError>;

    /// Bounding boxes of vector drawing paths
    fn drawings(&self) -> Result<Vec<Drawing>, ProcessingError>;

    /// Layout blocks with their kind
    fn text_blocks(&self) -> Result<Vec<TextBlock>, ProcessingError>;

    /// Rasterize `region` at `zoom` pixels per point, clipped exactly to the
    /// region, returning encoded PNG bytes.
    fn render(&self, region: &Rectangle, zoom: f64) -> Result<Vec<u8>, ProcessingError>;
}

/// Keep the well-formed drawing rectangles.
pub fn drawing_bounds(drawings: &[Drawing]) -> Vec<Rectangle> {
    drawings.iter().filter_map(Drawing::bounds).collect()
}

/// Keep the well-formed rectangles of text-kind blocks.
pub fn text_block_bounds(blocks: &[TextBlock]) -> Vec<Rectangle> {
    blocks
        .iter()
        .filter(|block| block.is_text())
        .filter_map(TextBlock::bounds)
        .collect()
}
