//! Batch extraction over a directory of papers.
//!
//! Each subdirectory of the papers directory holds one article PDF. Its
//! artifacts land in a same-named subdirectory of the dataset directory.
//! Articles are processed one at a time in sorted order; a failing article
//! is recorded and the batch moves on.

pub mod artifacts;
pub mod hash;
pub mod pdf;

use std::path::{Path, PathBuf};

use pdfium_render::prelude::Pdfium;
use tracing::{debug, error, info};

use crate::config::ExtractConfig;
use crate::error::{ExtractionError, ExtractionResult};

use pdf::DocumentSummary;

/// One article scheduled for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Name of the article directory, used as the document identifier
    pub name: String,
    pub pdf_path: PathBuf,
    pub out_dir: PathBuf,
}

/// An article that could not be extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFailure {
    pub article: String,
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: Vec<(String, DocumentSummary)>,
    pub failed: Vec<ArticleFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// List article directories under `papers_dir`, sorted by name.
pub fn collect_articles(
    papers_dir: &Path,
    dataset_dir: &Path,
    article_file: &str,
) -> ExtractionResult<Vec<Article>> {
    let entries = std::fs::read_dir(papers_dir).map_err(ExtractionError::Io)?;

    let mut articles = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            debug!(path = %path.display(), "Skipping directory with non UTF-8 name");
            continue;
        };

        articles.push(Article {
            name: name.to_string(),
            pdf_path: path.join(article_file),
            out_dir: dataset_dir.join(name),
        });
    }

    // Sort by name for deterministic ordering
    articles.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(articles)
}

/// Run `extract` over every article, collecting successes and failures.
pub fn process_articles<F>(articles: &[Article], mut extract: F) -> BatchSummary
where
    F: FnMut(&Article) -> ExtractionResult<DocumentSummary>,
{
    let mut summary = BatchSummary::default();

    for article in articles {
        if !article.pdf_path.is_file() {
            error!(
                article = %article.name,
                path = %article.pdf_path.display(),
                "Article PDF not found"
            );
            summary.failed.push(ArticleFailure {
                article: article.name.clone(),
                error: format!("missing {}", article.pdf_path.display()),
            });
            continue;
        }

        match extract(article) {
            Ok(document) => {
                info!(
                    article = %article.name,
                    images = document.images.len(),
                    figures = document.figures.len(),
                    "Article extracted"
                );
                summary.processed.push((article.name.clone(), document));
            }
            Err(e) => {
                error!(article = %article.name, error = %e, "Article extraction failed");
                summary.failed.push(ArticleFailure {
                    article: article.name.clone(),
                    error: error_chain(&e),
                });
            }
        }
    }

    summary
}

/// Extract every article under the configured papers directory.
pub fn run_batch(pdfium: &Pdfium, config: &ExtractConfig) -> ExtractionResult<BatchSummary> {
    let storage = &config.storage;
    let articles = collect_articles(
        &storage.papers_dir,
        &storage.dataset_dir,
        &storage.article_file,
    )?;

    info!(
        papers_dir = %storage.papers_dir.display(),
        dataset_dir = %storage.dataset_dir.display(),
        articles = articles.len(),
        "Starting batch extraction"
    );

    let summary = process_articles(&articles, |article| {
        pdf::extract_document(pdfium, &article.pdf_path, &article.out_dir, config)
    });

    info!(
        processed = summary.processed.len(),
        failed = summary.failed.len(),
        "Batch extraction finished"
    );

    Ok(summary)
}

/// Render an error with its sources, outermost first.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
