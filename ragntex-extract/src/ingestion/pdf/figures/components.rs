//! Connected components of the proximity graph.

use super::geometry::{Rectangle, merge_all};
use super::proximity::{ProximityGraph, build_proximity_graph};

/// One connected component: member indices and their merged bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Indices into the grouped slice, in traversal order
    pub members: Vec<usize>,
    /// Union of every member rectangle
    pub bounds: Rectangle,
}

/// Partition `rects` into connected components of `graph`.
///
/// Components come out in discovery order (seeded by the lowest unvisited
/// index). Traversal uses an explicit stack: long chains of hatching
/// strokes must not grow the call stack.
pub fn connected_components(rects: &[Rectangle], graph: &ProximityGraph) -> Vec<Component> {
    debug_assert_eq!(rects.len(), graph.len());

    let mut visited = vec![false; rects.len()];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for seed in 0..rects.len() {
        if visited[seed] {
            continue;
        }

        visited[seed] = true;
        stack.push(seed);
        let mut members = Vec::new();

        while let Some(node) = stack.pop() {
            members.push(node);

            for &neighbor in graph.neighbors(node) {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }

        let bounds = merge_all(members.iter().map(|&member| &rects[member])).unwrap_or(rects[seed]);
        components.push(Component { members, bounds });
    }

    components
}

/// Group rectangles into merged regions: proximity graph plus components.
pub fn group_rectangles(rects: &[Rectangle], threshold: f64) -> Vec<Rectangle> {
    let graph = build_proximity_graph(rects, threshold);
    connected_components(rects, &graph)
        .into_iter()
        .map(|component| component.bounds)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(l: f64, t: f64, r: f64, b: f64) -> Rectangle {
        Rectangle::new(l, t, r, b).unwrap()
    }

    fn unit_squares() -> Vec<Rectangle> {
        vec![
            rect(0.0, 0.0, 1.0, 1.0),
            rect(1.0, 0.0, 2.0, 1.0),
            rect(0.0, 1.0, 1.0, 2.0),
            rect(10.0, 10.0, 11.0, 11.0),
        ]
    }

    #[test]
    fn test_unit_square_scenario() {
        let grouped = group_rectangles(&unit_squares(), 1.0);
        assert_eq!(
            grouped,
            vec![rect(0.0, 0.0, 2.0, 2.0), rect(10.0, 10.0, 11.0, 11.0)]
        );
    }

    #[test]
    fn test_components_partition_input() {
        let rects: Vec<Rectangle> = (0..60)
            .map(|i| {
                let x = (i * 19 % 37) as f64 * 4.0;
                let y = (i * 23 % 31) as f64 * 4.0;
                rect(x, y, x + 2.0, y + 2.0)
            })
            .collect();
        let graph = build_proximity_graph(&rects, 1.5);
        let components = connected_components(&rects, &graph);

        let mut seen: Vec<usize> = components
            .iter()
            .flat_map(|c| c.members.iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..rects.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_component_bounds_contain_members() {
        let rects = unit_squares();
        let graph = build_proximity_graph(&rects, 1.0);

        for component in connected_components(&rects, &graph) {
            for &member in &component.members {
                assert!(component.bounds.contains(&rects[member]));
            }
        }
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        // Nearly-collinear hatching strokes forming one long chain
        let rects: Vec<Rectangle> = (0..50_000)
            .map(|i| {
                let x = i as f64 * 2.0;
                rect(x, 0.0, x + 1.0, 1.0)
            })
            .collect();
        let grouped = group_rectangles(&rects, 0.5);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0], rect(0.0, 0.0, 99_999.0, 1.0));
    }

    #[test]
    fn test_singletons_are_components() {
        let rects = [rect(0.0, 0.0, 1.0, 1.0), rect(50.0, 50.0, 51.0, 51.0)];
        let graph = build_proximity_graph(&rects, 1.0);
        let components = connected_components(&rects, &graph);

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].members, vec![0]);
        assert_eq!(components[1].members, vec![1]);
    }

    #[test]
    fn test_increasing_threshold_never_splits() {
        let rects: Vec<Rectangle> = (0..80)
            .map(|i| {
                let x = (i * 29 % 43) as f64 * 3.0;
                let y = (i * 7 % 19) as f64 * 5.0;
                rect(x, y, x + 1.0, y + 1.5)
            })
            .collect();

        let label_of = |threshold: f64| -> Vec<usize> {
            let graph = build_proximity_graph(&rects, threshold);
            let mut labels = vec![0; rects.len()];
            for (label, component) in connected_components(&rects, &graph).iter().enumerate() {
                for &member in &component.members {
                    labels[member] = label;
                }
            }
            labels
        };

        let thresholds = [0.0, 0.5, 1.0, 2.0, 4.0];
        for pair in thresholds.windows(2) {
            let small = label_of(pair[0]);
            let large = label_of(pair[1]);
            for i in 0..rects.len() {
                for j in 0..rects.len() {
                    if small[i] == small[j] {
                        assert_eq!(large[i], large[j], "threshold {} split ({i}, {j})", pair[1]);
                    }
                }
            }
        }
    }
}
