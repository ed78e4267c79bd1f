//! Error types shared across the pipeline.
//!
//! None of these abort a corpus run. Source errors degrade to empty sets,
//! document errors are attached to the failing document in the report.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a line-oriented word source (lexicon or stopword file).
///
/// Decoding never fails on its own: bytes that are not UTF-8 are read as
/// Latin-1, which maps every byte to a character.
#[derive(Error, Debug)]
#[error("cannot read {path}: {source}")]
pub struct SourceError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Failure to download a document.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("HTTP {0}")]
    Status(u16),
}

/// Failure to obtain the text of a single document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
}
