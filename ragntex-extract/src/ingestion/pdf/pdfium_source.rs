//! [`PageSource`] backed by pdfium-render.
//!
//! pdfium reports geometry in PDF user space (origin bottom-left, y up);
//! everything handed to the pipeline is converted to top-left page space.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use pdfium_render::prelude::*;
use tracing::{debug, trace};

use crate::error::ProcessingError;

use super::figures::Rectangle;
use super::source::{BlockKind, Drawing, EmbeddedImage, PageDimensions, PageSource, TextBlock};

/// One pdfium page plus its position in the document
pub struct PdfiumPage<'a> {
    page: PdfPage<'a>,
    index: usize,
    width: f64,
    height: f64,
}

impl<'a> PdfiumPage<'a> {
    pub fn new(page: PdfPage<'a>, index: usize) -> Self {
        let width = page.width().value as f64;
        let height = page.height().value as f64;
        Self {
            page,
            index,
            width,
            height,
        }
    }

    fn page_bounds(&self) -> Option<Rectangle> {
        Rectangle::new(0.0, 0.0, self.width, self.height)
    }

    /// Every page object, descending into form XObjects.
    ///
    /// Objects come out depth-first in content-stream order: a form is
    /// followed by its own children before the next top-level object.
    fn all_objects(&self) -> Vec<PdfPageObject<'_>> {
        flatten_depth_first(self.page.objects().iter().collect(), |object| match object {
            PdfPageObject::XObjectForm(form) => {
                (0..form.len()).filter_map(|index| form.get(index).ok()).collect()
            }
            _ => Vec::new(),
        })
    }

    fn enumeration_error(&self, what: &'static str, e: PdfiumError) -> ProcessingError {
        ProcessingError::Enumeration {
            page: self.index,
            what,
            source: Box::new(std::io::Error::other(format!("{:?}", e))),
        }
    }

    fn render_error(&self, message: String) -> ProcessingError {
        ProcessingError::Render {
            page: self.index,
            source: Box::new(std::io::Error::other(message)),
        }
    }
}

/// Pre-order flattening of a tree of nodes with an explicit stack.
fn flatten_depth_first<T, F>(roots: Vec<T>, children: F) -> Vec<T>
where
    F: Fn(&T) -> Vec<T>,
{
    let mut stack: Vec<T> = roots.into_iter().rev().collect();
    let mut flat = Vec::new();

    while let Some(node) = stack.pop() {
        let nested = children(&node);
        flat.push(node);
        stack.extend(nested.into_iter().rev());
    }

    flat
}

/// Convert a pdfium rect to a top-down `[left, top, right, bottom]` box.
fn pdf_rect_to_bbox(page_height: f64, rect: &PdfRect) -> [f64; 4] {
    [
        rect.left().value as f64,
        page_height - rect.top().value as f64,
        rect.right().value as f64,
        page_height - rect.bottom().value as f64,
    ]
}

/// Why a drawing never reaches grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawingExclusion {
    Malformed,
    OffPage,
}

/// Clip a top-down drawing box to the page.
fn visible_drawing(bbox: [f64; 4], page_bounds: &Rectangle) -> Result<Drawing, DrawingExclusion> {
    let bounds = Rectangle::from_bbox(bbox).ok_or(DrawingExclusion::Malformed)?;
    let visible = bounds
        .intersection(page_bounds)
        .ok_or(DrawingExclusion::OffPage)?;

    Ok(Drawing {
        bbox: [
            visible.left(),
            visible.top(),
            visible.right(),
            visible.bottom(),
        ],
    })
}

/// Pixel crop `(x, y, width, height)` of `region` in a page rendered at
/// `zoom` to `full_width` x `full_height` pixels.
///
/// The window is clamped to the rendered page and is never smaller than
/// one pixel in either direction.
fn crop_window(
    region: &Rectangle,
    zoom: f64,
    full_width: f64,
    full_height: f64,
) -> (u32, u32, u32, u32) {
    let left = (region.left() * zoom).floor().clamp(0.0, full_width - 1.0);
    let top = (region.top() * zoom).floor().clamp(0.0, full_height - 1.0);
    let right = (region.right() * zoom).ceil().clamp(left + 1.0, full_width);
    let bottom = (region.bottom() * zoom).ceil().clamp(top + 1.0, full_height);

    (
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    )
}

/// Encode a decoded raster as PNG bytes.
fn encode_png(image: &DynamicImage, page: usize) -> Result<Vec<u8>, ProcessingError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ProcessingError::Encode {
            page,
            source: Box::new(e),
        })?;
    Ok(bytes)
}

impl PageSource for PdfiumPage<'_> {
    fn index(&self) -> usize {
        self.index
    }

    fn dimensions(&self) -> PageDimensions {
        PageDimensions {
            width: self.width,
            height: self.height,
        }
    }

    fn text(&self) -> Result<String, ProcessingError> {
        let text = self
            .page
            .text()
            .map_err(|e| self.enumeration_error("text", e))?;
        Ok(text.all())
    }

    /// Images nested in form XObjects are included. The stream identifier
    /// is the position in the depth-first object walk.
    fn embedded_images(
        &self,
    ) -> Result<Vec<Result<EmbeddedImage, ProcessingError>>, ProcessingError> {
        let mut images = Vec::new();

        for (object_index, object) in self.all_objects().iter().enumerate() {
            let PdfPageObject::Image(image_obj) = object else {
                continue;
            };

            let image = image_obj
                .get_raw_image()
                .map_err(|e| self.enumeration_error("image data", e))
                .and_then(|raw| encode_png(&raw, self.index))
                .map(|bytes| EmbeddedImage {
                    stream_id: object_index,
                    bytes,
                });
            images.push(image);
        }

        Ok(images)
    }

    /// Path objects contribute their own bounds. Form XObjects contribute
    /// their overall page-space bounds; their children's bounds are in form
    /// space. Everything is clipped to the page box, so content of a
    /// two-page spread only counts where it is visible.
    fn drawings(&self) -> Result<Vec<Drawing>, ProcessingError> {
        let Some(page_bounds) = self.page_bounds() else {
            return Ok(Vec::new());
        };

        let mut drawings = Vec::new();
        let mut unbounded = 0usize;
        let mut malformed = 0usize;
        let mut off_page = 0usize;

        for object in self.page.objects().iter() {
            let is_drawing = matches!(
                object,
                PdfPageObject::Path(_) | PdfPageObject::XObjectForm(_)
            );
            if !is_drawing {
                continue;
            }

            let Ok(quad_points) = object.bounds() else {
                unbounded += 1;
                continue;
            };
            let bbox = pdf_rect_to_bbox(self.height, &quad_points.to_rect());
            match visible_drawing(bbox, &page_bounds) {
                Ok(drawing) => drawings.push(drawing),
                Err(DrawingExclusion::Malformed) => malformed += 1,
                Err(DrawingExclusion::OffPage) => off_page += 1,
            }
        }

        if unbounded + malformed + off_page > 0 {
            debug!(
                page = self.index,
                unbounded,
                malformed,
                off_page,
                "Excluded drawings before grouping"
            );
        }
        trace!(page = self.index, drawings = drawings.len(), "Extracted drawing bounds");
        Ok(drawings)
    }

    /// Text segments become text blocks; top-level image objects become
    /// image placeholder blocks. Images inside form XObjects report
    /// form-space bounds and are left out.
    fn text_blocks(&self) -> Result<Vec<TextBlock>, ProcessingError> {
        let text = self
            .page
            .text()
            .map_err(|e| self.enumeration_error("text blocks", e))?;

        let mut blocks: Vec<TextBlock> = text
            .segments()
            .iter()
            .filter(|segment| !segment.text().trim().is_empty())
            .map(|segment| TextBlock {
                bbox: pdf_rect_to_bbox(self.height, &segment.bounds()),
                kind: BlockKind::Text,
            })
            .collect();

        for object in self.page.objects().iter() {
            if let PdfPageObject::Image(image_obj) = &object
                && let Ok(quad_points) = image_obj.bounds()
            {
                blocks.push(TextBlock {
                    bbox: pdf_rect_to_bbox(self.height, &quad_points.to_rect()),
                    kind: BlockKind::Image,
                });
            }
        }

        trace!(page = self.index, blocks = blocks.len(), "Extracted layout blocks");
        Ok(blocks)
    }

    /// Renders the full page at `zoom` pixels per point and crops the region.
    fn render(&self, region: &Rectangle, zoom: f64) -> Result<Vec<u8>, ProcessingError> {
        let full_width = (self.width * zoom).ceil().max(1.0);
        let full_height = (self.height * zoom).ceil().max(1.0);
        let (x, y, width, height) = crop_window(region, zoom, full_width, full_height);

        trace!(
            page = self.index,
            region_pts = %region,
            region_px = format!("({},{}) {}x{}", x, y, width, height),
            zoom = zoom,
            full_page_size = format!("{}x{}", full_width, full_height),
            "Rendering page region"
        );

        let config = PdfRenderConfig::new()
            .set_target_width(full_width as i32)
            .set_target_height(full_height as i32);

        let bitmap = self
            .page
            .render_with_config(&config)
            .map_err(|e| self.render_error(format!("Failed to render page: {:?}", e)))?;

        // pdfium-render's conversion handles the bitmap color format
        let full_image: DynamicImage = bitmap.as_image();
        let cropped = full_image.crop_imm(x, y, width, height);

        encode_png(&cropped, self.index)
    }
}
