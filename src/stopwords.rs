//! Stopword aggregation and removal.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::SourceError;
use crate::lexicon::read_source;

/// Union of whitespace-delimited tokens from one or more stopword sources.
///
/// Tokens keep the case they were loaded with. Lookups lower-case the
/// candidate token only, so an upper-case entry never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

/// Result of aggregating a stopword directory.
#[derive(Debug, Default)]
pub struct StopwordAggregation {
    pub stopwords: StopwordSet,
    /// Sources that were read successfully, in file name order.
    pub loaded: Vec<PathBuf>,
    /// Sources that could not be read. Aggregation continued without them.
    pub failures: Vec<SourceError>,
}

impl StopwordSet {
    /// Build a set from the whitespace-delimited tokens of `content`.
    pub fn parse(content: &str) -> Self {
        let mut set = Self::default();
        set.extend_from(content);
        set
    }

    fn extend_from(&mut self, content: &str) {
        self.words
            .extend(content.split_whitespace().map(str::to_string));
    }

    /// Aggregate every `*.txt` file directly inside `dir`.
    ///
    /// A source that cannot be read is recorded in `failures` and skipped.
    pub fn aggregate_dir<P: AsRef<Path>>(dir: P) -> Result<StopwordAggregation, SourceError> {
        let dir = dir.as_ref();
        let mut sources = Vec::new();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()));
        for entry in walker {
            let entry = entry.map_err(|e| SourceError {
                path: e.path().unwrap_or(dir).to_path_buf(),
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            })?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|e| e == "txt") {
                sources.push(path.to_path_buf());
            }
        }

        let mut aggregation = StopwordAggregation::default();
        for path in sources {
            match read_source(&path) {
                Ok(content) => {
                    aggregation.stopwords.extend_from(&content);
                    aggregation.loaded.push(path);
                }
                Err(e) => {
                    log::warn!("skipping stopword source: {}", e);
                    aggregation.failures.push(e);
                }
            }
        }

        log::info!(
            "loaded {} stopwords from {} sources",
            aggregation.stopwords.len(),
            aggregation.loaded.len()
        );
        Ok(aggregation)
    }

    /// Whether a token is a stopword, comparing its lower-cased form.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drop stopword tokens from `text`.
    ///
    /// Tokens are whitespace-delimited and keep attached punctuation. The
    /// survivors are joined with single spaces, so line breaks and runs of
    /// whitespace collapse.
    pub fn remove_from(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|token| !self.is_stopword(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
