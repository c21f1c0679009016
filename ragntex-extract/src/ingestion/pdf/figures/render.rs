//! Rasterize accepted figure candidates into content-addressed artifacts.

use tracing::debug;

use crate::error::ProcessingError;
use crate::ingestion::hash::{ArtifactKind, artifact_name, compute_content_hash};

use super::super::source::PageSource;
use super::FigureCandidate;

/// A rendered figure ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFigure {
    pub page_index: usize,
    /// Component index of the candidate on its page
    pub index: usize,
    pub name: String,
    /// Full MD5 hex digest of `bytes`
    pub digest: String,
    pub bytes: Vec<u8>,
}

/// Render `candidate` at `zoom`, clipped to its bounds, and name the result.
pub fn render_figure<P: PageSource + ?Sized>(
    page: &P,
    candidate: &FigureCandidate,
    zoom: f64,
) -> Result<RenderedFigure, ProcessingError> {
    let bytes = page.render(&candidate.bounds, zoom)?;
    let digest = compute_content_hash(&bytes);
    let name = artifact_name(page.index(), ArtifactKind::Figure, candidate.index, &bytes);

    debug!(
        page = page.index(),
        figure_index = candidate.index,
        region = %candidate.bounds,
        zoom = zoom,
        size = bytes.len(),
        name = %name,
        "Rendered figure"
    );

    Ok(RenderedFigure {
        page_index: page.index(),
        index: candidate.index,
        name,
        digest,
        bytes,
    })
}
