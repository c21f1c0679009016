//! Content digests and content-addressed artifact names.

use std::fmt;

/// Number of hex digest characters kept in artifact names
const NAME_DIGEST_LEN: usize = 8;

/// Compute the MD5 digest of a byte slice, returning a lowercase hex string.
pub fn compute_content_hash(content: &[u8]) -> String {
    format!("{:x}", md5::compute(content))
}

/// Kind of raster artifact, reflected in its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Embedded raster image copied out of the document
    Image,
    /// Rendered vector-graphics figure
    Figure,
}

impl ArtifactKind {
    fn tag(self) -> &'static str {
        match self {
            ArtifactKind::Image => "img",
            ArtifactKind::Figure => "fig",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Build `page<N>_<kind><I>_hash<H>.png`.
///
/// `page_index` and `sequence` are zero-based; `H` is the first eight hex
/// characters of the MD5 digest of `content`, so unchanged input always
/// yields the same name.
pub fn artifact_name(
    page_index: usize,
    kind: ArtifactKind,
    sequence: usize,
    content: &[u8],
) -> String {
    let digest = compute_content_hash(content);
    format!(
        "page{}_{}{}_hash{}.png",
        page_index,
        kind,
        sequence,
        &digest[..NAME_DIGEST_LEN]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_content_hash() {
        let hash = compute_content_hash(b"hello world");
        // MD5 of "hello world"
        assert_eq!(hash, "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn test_artifact_names() {
        assert_eq!(
            artifact_name(0, ArtifactKind::Image, 2, b"hello world"),
            "page0_img2_hash5eb63bbb.png"
        );
        assert_eq!(
            artifact_name(7, ArtifactKind::Figure, 0, b"hello world"),
            "page7_fig0_hash5eb63bbb.png"
        );
    }

    #[test]
    fn test_names_are_content_addressed() {
        let a = artifact_name(1, ArtifactKind::Figure, 3, b"plot A");
        let b = artifact_name(1, ArtifactKind::Figure, 3, b"plot B");
        assert_ne!(a, b);
        assert_eq!(a, artifact_name(1, ArtifactKind::Figure, 3, b"plot A"));
    }
}
