//! Extraction configuration.
//!
//! Loaded once at startup from an optional TOML file layered with
//! `RAGNTEX__`-prefixed environment variables (see [`loader`]).

mod loader;

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{ExtractionError, ExtractionResult};

pub use loader::load_config;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractConfig {
    #[serde(default)]
    pub figures: FigureExtractionConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub pdfium: PdfiumConfig,
}

impl ExtractConfig {
    pub fn validate(&self) -> ExtractionResult<()> {
        self.figures.validate()
    }
}

/// Vector figure detection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FigureExtractionConfig {
    /// Distance in page points below which drawings (and text labels) are
    /// considered part of the same figure. Larger values merge more aggressively.
    #[serde(default = "default_proximity_threshold")]
    pub proximity_threshold: f64,

    /// Maximum number of drawings grouped in one proximity graph before
    /// the page is split into chunks.
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// Figures must cover more than this fraction of the page area.
    #[serde(default = "default_min_area_fraction")]
    pub min_area_fraction: f64,

    /// Figures must cover less than this fraction of the page area.
    #[serde(default = "default_max_area_fraction")]
    pub max_area_fraction: f64,

    /// Output pixels per page point for rendered figures.
    #[serde(default = "default_render_zoom")]
    pub render_zoom: f64,
}

impl Default for FigureExtractionConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: default_proximity_threshold(),
            max_chunk_size: default_max_chunk_size(),
            min_area_fraction: default_min_area_fraction(),
            max_area_fraction: default_max_area_fraction(),
            render_zoom: default_render_zoom(),
        }
    }
}

impl FigureExtractionConfig {
    pub fn validate(&self) -> ExtractionResult<()> {
        if !self.proximity_threshold.is_finite() || self.proximity_threshold < 0.0 {
            return Err(config_error(format!(
                "figures.proximity_threshold must be a finite value >= 0 (got {})",
                self.proximity_threshold
            )));
        }
        if self.max_chunk_size == 0 {
            return Err(config_error("figures.max_chunk_size must be at least 1"));
        }
        let fractions_ok = self.min_area_fraction.is_finite()
            && self.max_area_fraction.is_finite()
            && self.min_area_fraction >= 0.0
            && self.min_area_fraction < self.max_area_fraction
            && self.max_area_fraction <= 1.0;
        if !fractions_ok {
            return Err(config_error(format!(
                "figures area fractions must satisfy 0 <= min < max <= 1 (got min={}, max={})",
                self.min_area_fraction, self.max_area_fraction
            )));
        }
        if !self.render_zoom.is_finite() || self.render_zoom <= 0.0 {
            return Err(config_error(format!(
                "figures.render_zoom must be a finite value > 0 (got {})",
                self.render_zoom
            )));
        }
        Ok(())
    }
}

/// Input and output layout
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one subdirectory per paper
    #[serde(default = "default_papers_dir")]
    pub papers_dir: PathBuf,

    /// Directory receiving one output subdirectory per paper
    #[serde(default = "default_dataset_dir")]
    pub dataset_dir: PathBuf,

    /// File name of the PDF inside each paper directory
    #[serde(default = "default_article_file")]
    pub article_file: String,

    /// File name of the concatenated page text inside each output directory
    #[serde(default = "default_text_file")]
    pub text_file: String,

    /// Subdirectory of each output directory receiving raster artifacts
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            papers_dir: default_papers_dir(),
            dataset_dir: default_dataset_dir(),
            article_file: default_article_file(),
            text_file: default_text_file(),
            images_dir: default_images_dir(),
        }
    }
}

/// PDFium library location
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PdfiumConfig {
    /// Directory containing libpdfium. Falls back to the local and system
    /// search paths when unset.
    #[serde(default)]
    pub library_path: Option<PathBuf>,
}

fn config_error(message: impl Into<String>) -> ExtractionError {
    ExtractionError::Config {
        message: message.into(),
    }
}

// ==================== Default Value Functions ====================

fn default_proximity_threshold() -> f64 {
    5.0
}

fn default_max_chunk_size() -> usize {
    1000
}

fn default_min_area_fraction() -> f64 {
    0.05
}

fn default_max_area_fraction() -> f64 {
    0.30
}

fn default_render_zoom() -> f64 {
    4.0
}

fn default_papers_dir() -> PathBuf {
    PathBuf::from("papers")
}

fn default_dataset_dir() -> PathBuf {
    PathBuf::from("dataset")
}

fn default_article_file() -> String {
    "article.pdf".to_string()
}

fn default_text_file() -> String {
    "ragntex.txt".to_string()
}

fn default_images_dir() -> String {
    "ragntex".to_string()
}
