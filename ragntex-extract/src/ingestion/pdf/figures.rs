//! Vector-graphics figure reconstruction.
//!
//! Plots and diagrams arrive as hundreds to thousands of small drawing
//! paths. This module rebuilds them into figure regions:
//!
//! 1. group spatially adjacent drawings (proximity graph + connected
//!    components, chunked on dense pages)
//! 2. widen each group by nearby text labels
//! 3. keep groups whose area is plausible for a figure
//! 4. render the survivors and write them as content-addressed PNGs

mod chunking;
mod components;
mod filter;
mod geometry;
mod proximity;
mod render;
mod text_association;

use std::path::PathBuf;

use tracing::{debug, trace, warn};

use crate::config::FigureExtractionConfig;
use crate::error::ExtractionResult;
use crate::ingestion::artifacts::DocumentOutput;

use super::source::{PageSource, drawing_bounds, text_block_bounds};

pub use chunking::group_in_chunks;
pub use components::{Component, connected_components, group_rectangles};
pub use filter::AreaFilter;
pub use geometry::{Rectangle, merge_all};
pub use proximity::{ProximityGraph, build_proximity_graph};
pub use render::{RenderedFigure, render_figure};
pub use text_association::absorb_nearby_text;

/// A grouped region that may become a figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureCandidate {
    /// Position of the group in the page's grouping output
    pub index: usize,
    /// Union of the grouped drawings
    pub drawing_bounds: Rectangle,
    /// `drawing_bounds` widened by nearby text blocks
    pub bounds: Rectangle,
}

/// A figure written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFigure {
    pub page_index: usize,
    pub index: usize,
    pub name: String,
    pub digest: String,
    pub path: PathBuf,
}

/// Group drawings into candidates and widen each by nearby text.
pub fn find_figure_candidates(
    drawings: &[Rectangle],
    text_blocks: &[Rectangle],
    config: &FigureExtractionConfig,
) -> Vec<FigureCandidate> {
    let threshold = config.proximity_threshold;

    group_in_chunks(drawings, threshold, config.max_chunk_size)
        .into_iter()
        .enumerate()
        .map(|(index, group)| FigureCandidate {
            index,
            drawing_bounds: group,
            bounds: absorb_nearby_text(group, text_blocks, threshold),
        })
        .collect()
}

/// Keep the candidates accepted by `filter`, preserving their indices.
pub fn select_figures(
    candidates: Vec<FigureCandidate>,
    filter: &AreaFilter,
) -> Vec<FigureCandidate> {
    candidates
        .into_iter()
        .filter(|candidate| {
            let accepted = filter.accepts(&candidate.bounds);
            debug!(
                figure_index = candidate.index,
                region = %candidate.bounds,
                area = candidate.bounds.area(),
                min_area = filter.min_area(),
                max_area = filter.max_area(),
                accepted,
                "Filtered figure candidate"
            );
            accepted
        })
        .collect()
}

/// Detect, render and write the vector figures of one page.
///
/// Enumeration and render failures are logged and skipped; only artifact
/// write failures propagate.
pub fn extract_figures<P: PageSource + ?Sized>(
    page: &P,
    output: &DocumentOutput,
    config: &FigureExtractionConfig,
) -> ExtractionResult<Vec<ExtractedFigure>> {
    let page_index = page.index();

    let drawings = match page.drawings() {
        Ok(drawings) => drawings,
        Err(e) => {
            warn!(page = page_index, error = %e, "Skipping vector figures: drawings unavailable");
            return Ok(Vec::new());
        }
    };
    let drawing_rects = drawing_bounds(&drawings);
    if drawing_rects.len() < drawings.len() {
        debug!(
            page = page_index,
            excluded = drawings.len() - drawing_rects.len(),
            "Excluded malformed drawing bounds"
        );
    }
    if drawing_rects.is_empty() {
        return Ok(Vec::new());
    }

    let text_rects = match page.text_blocks() {
        Ok(blocks) => text_block_bounds(&blocks),
        Err(e) => {
            warn!(
                page = page_index,
                error = %e,
                "Text blocks unavailable, figures keep drawing bounds"
            );
            Vec::new()
        }
    };

    let candidates = find_figure_candidates(&drawing_rects, &text_rects, config);
    let candidate_count = candidates.len();
    let filter = AreaFilter::from_config(page.dimensions().area(), config);
    let accepted = select_figures(candidates, &filter);

    trace!(
        page = page_index,
        drawings = drawing_rects.len(),
        text_blocks = text_rects.len(),
        candidates = candidate_count,
        accepted = accepted.len(),
        "Grouped drawings into figure candidates"
    );

    let mut figures = Vec::with_capacity(accepted.len());
    for candidate in &accepted {
        let rendered = match render_figure(page, candidate, config.render_zoom) {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!(
                    page = page_index,
                    figure_index = candidate.index,
                    region = %candidate.bounds,
                    error = %e,
                    "Failed to render figure, skipping"
                );
                continue;
            }
        };

        let path = output.write_raster(&rendered.name, &rendered.bytes)?;
        figures.push(ExtractedFigure {
            page_index,
            index: rendered.index,
            name: rendered.name,
            digest: rendered.digest,
            path,
        });
    }

    Ok(figures)
}
