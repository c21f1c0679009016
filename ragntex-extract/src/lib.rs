//! Figure, image and text extraction from scientific PDFs.
//!
//! Every page of a document yields its plain text, its embedded raster
//! images, and its vector figures. Figures are reconstructed by grouping
//! nearby drawing paths, absorbing adjacent text labels, filtering by area,
//! and rendering the resulting region.

pub mod config;
pub mod error;
pub mod ingestion;

pub use config::{ExtractConfig, FigureExtractionConfig, StorageConfig, load_config};
pub use error::{ExtractionError, ExtractionResult, ProcessingError};
pub use ingestion::{BatchSummary, run_batch};
pub use ingestion::pdf::{DocumentSummary, create_pdfium, extract_document};
