//! Page-relative size filter for figure candidates.

use crate::config::FigureExtractionConfig;

use super::geometry::Rectangle;

/// Accepts candidates whose area lies strictly between two page-area bounds.
///
/// The lower bound drops decorative marks and rules; the upper bound drops
/// full-page backgrounds and scanned-page-sized artifacts. Exact boundary
/// values are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaFilter {
    min_area: f64,
    max_area: f64,
}

impl AreaFilter {
    pub fn new(page_area: f64, min_fraction: f64, max_fraction: f64) -> Self {
        Self {
            min_area: min_fraction * page_area,
            max_area: max_fraction * page_area,
        }
    }

    pub fn from_config(page_area: f64, config: &FigureExtractionConfig) -> Self {
        Self::new(page_area, config.min_area_fraction, config.max_area_fraction)
    }

    pub fn min_area(&self) -> f64 {
        self.min_area
    }

    pub fn max_area(&self) -> f64 {
        self.max_area
    }

    pub fn accepts_area(&self, area: f64) -> bool {
        self.min_area < area && area < self.max_area
    }

    pub fn accepts(&self, candidate: &Rectangle) -> bool {
        self.accepts_area(candidate.area())
    }
}
