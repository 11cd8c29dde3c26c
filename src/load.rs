//! Document loading stage.
//!
//! Fetches every JSON document the site is built from and assembles the
//! application state ([`Site`]). Reading goes through the [`DocumentSource`]
//! trait so tests can serve documents from memory.
//!
//! ## Fan-out
//!
//! The master document and the three page documents are fetched alongside
//! the level documents with `rayon::join`; level documents fan out over the
//! rayon pool. Every fetch is isolated:
//!
//! | Document | On failure |
//! |----------|------------|
//! | master (`database.json`) | fatal: [`LoadError::Merge`] |
//! | level file | skipped, contributes no level |
//! | page document | empty document |
//!
//! Failures are logged with `tracing::warn!` and recorded in the
//! [`LoadReport`]. There are no retries.

use crate::config::{self, ConfigError, SiteConfig};
use crate::merge::{self, MergeError};
use crate::naming;
use crate::pages::{PageDocument, PageSet};
use crate::types::{ContentTree, Level, MasterDocument};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// A single document could not be fetched or parsed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("IO error reading {name}: {source}")]
    Io {
        name: String,
        source: std::io::Error,
    },
    #[error("invalid JSON in {name}: {source}")]
    Json {
        name: String,
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error("cannot list documents: {0}")]
    Fetch(#[from] FetchError),
}

/// Where JSON documents come from.
pub trait DocumentSource: Sync {
    /// Raw text of the document called `name`.
    fn read(&self, name: &str) -> Result<String, FetchError>;

    /// Names of all available documents.
    fn list(&self) -> Result<Vec<String>, FetchError>;
}

/// Documents stored as files directly under a content root directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentSource for FsSource {
    fn read(&self, name: &str) -> Result<String, FetchError> {
        let path = self.root.join(name);
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound(name.to_string())
            } else {
                FetchError::Io {
                    name: name.to_string(),
                    source,
                }
            }
        })
    }

    fn list(&self) -> Result<Vec<String>, FetchError> {
        let io_err = |source| FetchError::Io {
            name: self.root.display().to_string(),
            source,
        };
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if entry.path().is_file()
                && let Some(name) = entry.file_name().to_str()
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Fetch and deserialize one document.
pub fn fetch_json<T: DeserializeOwned>(
    source: &impl DocumentSource,
    name: &str,
) -> Result<T, FetchError> {
    let text = source.read(name)?;
    serde_json::from_str(&text).map_err(|source| FetchError::Json {
        name: name.to_string(),
        source,
    })
}

/// Application state: the merged tree, page documents, and config.
#[derive(Debug, Clone)]
pub struct Site {
    pub tree: ContentTree,
    pub pages: PageSet,
    pub config: SiteConfig,
}

/// Outcome of one fetched document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStatus {
    Loaded,
    /// Fetch or parse failed; the message is the error's display text.
    Failed(String),
}

impl DocumentStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, DocumentStatus::Loaded)
    }
}

/// Per-document fetch results, in fetch order.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub master: Option<DocumentStatus>,
    pub levels: Vec<(String, DocumentStatus)>,
    pub pages: Vec<(String, DocumentStatus)>,
}

impl LoadReport {
    pub fn failures(&self) -> usize {
        self.master
            .iter()
            .chain(self.levels.iter().map(|(_, s)| s))
            .chain(self.pages.iter().map(|(_, s)| s))
            .filter(|s| !s.is_loaded())
            .count()
    }
}

/// Load the site from a content root directory, reading `config.toml` there.
pub fn load(root: &Path) -> Result<(Site, LoadReport), LoadError> {
    let config = config::load_config(root)?;
    load_with_source(&FsSource::new(root), config)
}

/// Load the site from any document source.
pub fn load_with_source(
    source: &impl DocumentSource,
    config: SiteConfig,
) -> Result<(Site, LoadReport), LoadError> {
    let level_files = level_file_names(source, &config)?;
    info!(count = level_files.len(), "fetching level documents");

    let ((master, pages), levels) = rayon::join(
        || {
            rayon::join(
                || fetch_logged::<MasterDocument>(source, &config.sources.master),
                || fetch_pages(source, &config),
            )
        },
        || {
            level_files
                .par_iter()
                .map(|name| (name.clone(), fetch_logged::<Level>(source, name)))
                .collect::<Vec<_>>()
        },
    );

    let mut report = LoadReport {
        master: Some(status_of(&master)),
        ..LoadReport::default()
    };
    let (pages, page_report) = pages;
    report.pages = page_report;

    let mut fetched = Vec::with_capacity(levels.len());
    for (name, result) in levels {
        report.levels.push((name.clone(), status_of(&result)));
        fetched.push((name, result.ok()));
    }

    let tree = merge::merge(master.ok(), fetched)?;
    debug!(subjects = tree.subjects.len(), "content tree merged");

    Ok((Site { tree, pages, config }, report))
}

/// Configured level files, or every `<subject>-<level>.json` in the source.
fn level_file_names(
    source: &impl DocumentSource,
    config: &SiteConfig,
) -> Result<Vec<String>, FetchError> {
    if !config.sources.level_files.is_empty() {
        return Ok(config.sources.level_files.clone());
    }
    let reserved = config.sources.reserved();
    Ok(source
        .list()?
        .into_iter()
        .filter(|name| naming::is_level_file(name) && !reserved.contains(&name.as_str()))
        .collect())
}

fn fetch_pages(
    source: &impl DocumentSource,
    config: &SiteConfig,
) -> (PageSet, Vec<(String, DocumentStatus)>) {
    let names = [
        &config.sources.home,
        &config.sources.about,
        &config.sources.privacy,
    ];
    let mut report = Vec::with_capacity(names.len());
    let [home, about, privacy] = names.map(|name| {
        let result = fetch_logged::<PageDocument>(source, name);
        report.push((name.clone(), status_of(&result)));
        result.unwrap_or_default()
    });
    let set = PageSet {
        home,
        about,
        privacy,
    };
    (set, report)
}

fn fetch_logged<T: DeserializeOwned>(
    source: &impl DocumentSource,
    name: &str,
) -> Result<T, FetchError> {
    let result = fetch_json(source, name);
    if let Err(e) = &result {
        warn!(document = name, error = %e, "could not fetch document");
    }
    result
}

fn status_of<T>(result: &Result<T, FetchError>) -> DocumentStatus {
    match result {
        Ok(_) => DocumentStatus::Loaded,
        Err(e) => DocumentStatus::Failed(e.to_string()),
    }
}
