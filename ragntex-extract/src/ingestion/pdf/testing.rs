//! In-memory [`PageSource`] for exercising the pipeline without pdfium.

use std::cell::RefCell;

use crate::error::ProcessingError;

use super::figures::Rectangle;
use super::source::{BlockKind, Drawing, EmbeddedImage, PageDimensions, PageSource, TextBlock};

#[derive(Debug, Default)]
pub(crate) struct FakePage {
    pub index: usize,
    pub width: f64,
    pub height: f64,
    pub text: Option<String>,
    /// `None` entries fail to decode
    pub images: Vec<Option<Vec<u8>>>,
    pub drawings: Option<Vec<Drawing>>,
    pub text_blocks: Vec<TextBlock>,
    /// Renders of regions intersecting this rectangle fail
    pub fail_render_near: Option<Rectangle>,
    pub renders: RefCell<Vec<(Rectangle, f64)>>,
}

impl FakePage {
    pub fn new(index: usize, width: f64, height: f64) -> Self {
        Self {
            index,
            width,
            height,
            text: Some(String::new()),
            drawings: Some(Vec::new()),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_drawings(mut self, boxes: &[[f64; 4]]) -> Self {
        self.drawings = Some(boxes.iter().map(|&bbox| Drawing { bbox }).collect());
        self
    }

    pub fn with_text_block(mut self, bbox: [f64; 4], kind: BlockKind) -> Self {
        self.text_blocks.push(TextBlock { bbox, kind });
        self
    }

    pub fn with_image(mut self, bytes: Option<&[u8]>) -> Self {
        self.images.push(bytes.map(<[u8]>::to_vec));
        self
    }
}

fn failure(page: usize, what: &'static str) -> ProcessingError {
    ProcessingError::Enumeration {
        page,
        what,
        source: Box::new(std::io::Error::other("fake failure")),
    }
}

impl PageSource for FakePage {
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
        self.text.clone().ok_or_else(|| failure(self.index, "text"))
    }

    fn embedded_images(
        &self,
    ) -> Result<Vec<Result<EmbeddedImage, ProcessingError>>, ProcessingError> {
        Ok(self
            .images
            .iter()
            .enumerate()
            .map(|(stream_id, bytes)| match bytes {
                Some(bytes) => Ok(EmbeddedImage {
                    stream_id,
                    bytes: bytes.clone(),
                }),
                None => Err(ProcessingError::Encode {
                    page: self.index,
                    source: Box::new(std::io::Error::other("undecodable image")),
                }),
            })
            .collect())
    }

    fn drawings(&self) -> Result<Vec<Drawing>, ProcessingError> {
        self.drawings.clone().ok_or_else(|| failure(self.index, "drawings"))
    }

    fn text_blocks(&self) -> Result<Vec<TextBlock>, ProcessingError> {
        Ok(self.text_blocks.clone())
    }

    fn render(&self, region: &Rectangle, zoom: f64) -> Result<Vec<u8>, ProcessingError> {
        if let Some(bad) = &self.fail_render_near
            && bad.intersects(region)
        {
            return Err(ProcessingError::Render {
                page: self.index,
                source: Box::new(std::io::Error::other("render failed")),
            });
        }
        self.renders.borrow_mut().push((*region, zoom));
        Ok(format!("png:{}:{}@{}", self.index, region, zoom).into_bytes())
    }
}
