use std::path::PathBuf;

use thiserror::Error;

/// Main extraction error type.
///
/// Anything surfacing as an `ExtractionError` halts the current document.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to load PDF: {}", path.display())]
    DocumentLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to write artifact: {}", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error")]
    Io(#[source] std::io::Error),
}

/// Per-page and per-candidate failures.
///
/// These are recovered locally: the orchestrator logs them and skips the
/// offending enumeration or candidate.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Failed to enumerate {what} on page {page}")]
    Enumeration {
        page: usize,
        what: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to render region on page {page}")]
    Render {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to encode raster on page {page}")]
    Encode {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ProcessingError {
    /// Page index the failure belongs to.
    pub fn page(&self) -> usize {
        match self {
            ProcessingError::Enumeration { page, .. }
            | ProcessingError::Render { page, .. }
            | ProcessingError::Encode { page, .. } => *page,
        }
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_error_page() {
        let err = ProcessingError::Render {
            page: 3,
            source: Box::new(std::io::Error::other("boom")),
        };
        assert_eq!(err.page(), 3);
        assert_eq!(err.to_string(), "Failed to render region on page 3");
    }

    #[test]
    fn test_artifact_write_message_names_path() {
        let err = ExtractionError::ArtifactWrite {
            path: PathBuf::from("out/page0_fig1_hashdeadbeef.png"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write artifact: out/page0_fig1_hashdeadbeef.png"
        );
    }
}
