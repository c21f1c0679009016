//! Proximity graph over drawing bounding boxes.
//!
//! Two rectangles are adjacent when their threshold-expanded forms intersect.
//! Candidate pairs come from an R-tree over the expanded extents, so only
//! nearby rectangles are ever compared.

use rstar::{AABB, RTree, RTreeObject};

use super::geometry::Rectangle;

/// Adjacency list keyed by index into the grouped rectangle slice.
///
/// Edges are stored in both directions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProximityGraph {
    adjacency: Vec<Vec<usize>>,
}

impl ProximityGraph {
    /// Number of vertices (input rectangles).
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Indices adjacent to `index`.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// Whether an edge connects `a` and `b`.
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].contains(&b)
    }

    /// Total number of directed edge entries.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

/// R-tree entry: an expanded extent tagged with its source index
#[derive(Debug, Clone, Copy)]
struct ExpandedExtent {
    envelope: AABB<[f64; 2]>,
    index: usize,
}

impl RTreeObject for ExpandedExtent {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn expanded_envelope(rect: &Rectangle, threshold: f64) -> AABB<[f64; 2]> {
    let expanded = rect.expand(threshold);
    AABB::from_corners(expanded.min_corner(), expanded.max_corner())
}

/// Build the proximity graph for `rects` under distance `threshold`.
///
/// Insert and query both use the expanded extent, so the relation is
/// symmetric by construction. Empty input yields an empty graph.
pub fn build_proximity_graph(rects: &[Rectangle], threshold: f64) -> ProximityGraph {
    let extents: Vec<ExpandedExtent> = rects
        .iter()
        .enumerate()
        .map(|(index, rect)| ExpandedExtent {
            envelope: expanded_envelope(rect, threshold),
            index,
        })
        .collect();

    let mut adjacency = vec![Vec::new(); extents.len()];
    let tree = RTree::bulk_load(extents.clone());

    for extent in &extents {
        let neighbors = &mut adjacency[extent.index];
        for hit in tree.locate_in_envelope_intersecting(&extent.envelope) {
            if hit.index != extent.index {
                neighbors.push(hit.index);
            }
        }
        // R-tree iteration order is unspecified; keep traversal deterministic
        neighbors.sort_unstable();
    }

    ProximityGraph { adjacency }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(l: f64, t: f64, r: f64, b: f64) -> Rectangle {
        Rectangle::new(l, t, r, b).unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_graph() {
        let graph = build_proximity_graph(&[], 5.0);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_adjacency_within_threshold() {
        let rects = [
            rect(0.0, 0.0, 10.0, 10.0),
            // 8 point gap: expanded extents overlap with threshold 5
            rect(18.0, 0.0, 28.0, 10.0),
            // far away
            rect(100.0, 100.0, 110.0, 110.0),
        ];
        let graph = build_proximity_graph(&rects, 5.0);

        assert!(graph.are_adjacent(0, 1));
        assert!(graph.are_adjacent(1, 0));
        assert!(!graph.are_adjacent(0, 2));
        assert!(graph.neighbors(2).is_empty());
    }

    #[test]
    fn test_no_self_edges() {
        let rects = [rect(0.0, 0.0, 1.0, 1.0), rect(0.0, 0.0, 1.0, 1.0)];
        let graph = build_proximity_graph(&rects, 0.0);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0]);
    }

    #[test]
    fn test_zero_threshold_connects_touching_rectangles() {
        let rects = [rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 0.0, 2.0, 1.0)];
        let graph = build_proximity_graph(&rects, 0.0);
        assert!(graph.are_adjacent(0, 1));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let rects: Vec<Rectangle> = (0..40)
            .map(|i| {
                let x = (i * 7 % 53) as f64 * 3.0;
                let y = (i * 11 % 29) as f64 * 4.0;
                rect(x, y, x + 2.0 + (i % 3) as f64, y + 1.0)
            })
            .collect();
        let graph = build_proximity_graph(&rects, 2.5);

        for a in 0..graph.len() {
            for &b in graph.neighbors(a) {
                assert!(graph.are_adjacent(b, a), "edge {a}->{b} has no reverse");
            }
        }
    }

    #[test]
    fn test_matches_pairwise_expanded_intersection() {
        let rects: Vec<Rectangle> = (0..30)
            .map(|i| {
                let x = (i * 13 % 41) as f64 * 5.0;
                let y = (i * 17 % 23) as f64 * 6.0;
                rect(x, y, x + 4.0, y + 3.0)
            })
            .collect();
        let threshold = 3.0;
        let graph = build_proximity_graph(&rects, threshold);

        for i in 0..rects.len() {
            for j in 0..rects.len() {
                if i == j {
                    continue;
                }
                let expected = rects[i]
                    .expand(threshold)
                    .intersects(&rects[j].expand(threshold));
                assert_eq!(graph.are_adjacent(i, j), expected, "pair ({i}, {j})");
            }
        }
    }
}
