//! Fold nearby text labels (axis titles, tick labels, legends) into a figure.

use super::geometry::Rectangle;

/// Widen `candidate` by every text block within `threshold` of it.
///
/// A block qualifies when its rectangle intersects the candidate expanded by
/// `threshold`, the same closeness rule used for grouping drawings. The
/// candidate is returned unchanged when nothing qualifies. Blocks are
/// matched against the original candidate only, so widening never chains
/// from one label to the next.
pub fn absorb_nearby_text(
    candidate: Rectangle,
    text_blocks: &[Rectangle],
    threshold: f64,
) -> Rectangle {
    let search_area = candidate.expand(threshold);

    text_blocks
        .iter()
        .filter(|block| search_area.intersects(block))
        .fold(candidate, |merged, block| merged.union(block))
}
