//! Embedded raster image extraction.
//!
//! Images are copied out as decoded, one artifact per image stream, with no
//! grouping or filtering.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::ExtractionResult;
use crate::ingestion::artifacts::DocumentOutput;
use crate::ingestion::hash::{ArtifactKind, artifact_name};

use super::source::PageSource;

/// An embedded image written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedImage {
    pub page_index: usize,
    /// Enumeration index of the image on its page
    pub index: usize,
    pub stream_id: usize,
    pub name: String,
    pub path: PathBuf,
}

/// Write every decodable embedded image of `page`.
///
/// Images that fail to decode are skipped without shifting the sequence
/// numbers of the others.
pub fn extract_embedded_images<P: PageSource + ?Sized>(
    page: &P,
    output: &DocumentOutput,
) -> ExtractionResult<Vec<ExtractedImage>> {
    let page_index = page.index();

    let images = match page.embedded_images() {
        Ok(images) => images,
        Err(e) => {
            warn!(page = page_index, error = %e, "Skipping embedded images: enumeration failed");
            return Ok(Vec::new());
        }
    };

    let mut extracted = Vec::with_capacity(images.len());
    for (index, image) in images.into_iter().enumerate() {
        let image = match image {
            Ok(image) => image,
            Err(e) => {
                warn!(
                    page = e.page(),
                    image_index = index,
                    error = %e,
                    "Skipping undecodable image"
                );
                continue;
            }
        };

        let name = artifact_name(page_index, ArtifactKind::Image, index, &image.bytes);
        let path = output.write_raster(&name, &image.bytes)?;

        debug!(
            page = page_index,
            image_index = index,
            stream_id = image.stream_id,
            size = image.bytes.len(),
            "Extracted embedded image"
        );

        extracted.push(ExtractedImage {
            page_index,
            index,
            stream_id: image.stream_id,
            name,
            path,
        });
    }

    Ok(extracted)
}
