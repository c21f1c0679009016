//! Chunked grouping for pages with very many drawings.
//!
//! Pages of dense plots or hatching can carry thousands of paths. Above
//! `max_chunk_size` the drawings are split into contiguous chunks in
//! enumeration order, each chunk is grouped on its own, and the chunk-level
//! regions are grouped once more to stitch figures cut at chunk boundaries.
//!
//! The stitching pass runs exactly once. A figure spread over many chunks in
//! a pathological layout can come out slightly over-segmented; iterating to a
//! fixed point would bring the unbounded cost back.

use tracing::debug;

use super::components::group_rectangles;
use super::geometry::Rectangle;

/// Group `rects` into figure regions, chunking when the set is large.
///
/// A `max_chunk_size` of zero is treated as one.
pub fn group_in_chunks(
    rects: &[Rectangle],
    threshold: f64,
    max_chunk_size: usize,
) -> Vec<Rectangle> {
    let max_chunk_size = max_chunk_size.max(1);

    if rects.len() < max_chunk_size {
        return group_rectangles(rects, threshold);
    }

    let chunk_regions: Vec<Rectangle> = rects
        .chunks(max_chunk_size)
        .flat_map(|chunk| group_rectangles(chunk, threshold))
        .collect();

    debug!(
        drawings = rects.len(),
        chunks = rects.len().div_ceil(max_chunk_size),
        chunk_regions = chunk_regions.len(),
        "Stitching chunked drawing groups"
    );

    group_rectangles(&chunk_regions, threshold)
}
