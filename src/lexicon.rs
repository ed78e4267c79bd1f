//! Sentiment word lists.
//!
//! A lexicon source is plain text with one word per line. Lines starting
//! with `;` are comments (the header of the Hu & Liu opinion lexicon uses
//! them) and blank lines are ignored.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::SourceError;

/// Immutable set of lower-cased words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    /// Parse a lexicon from line-oriented text.
    pub fn parse(content: &str) -> Self {
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(';'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// Load a lexicon from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let content = read_source(path.as_ref())?;
        Ok(Self::parse(&content))
    }

    /// Load a lexicon, falling back to an empty one when the file is unreadable.
    ///
    /// Analysis then proceeds with zero matches for this lexicon.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path) {
            Ok(lexicon) => lexicon,
            Err(e) => {
                log::warn!("{}; continuing with an empty lexicon", e);
                Self::default()
            }
        }
    }

    /// Whether `word` (already lower-cased) is in the lexicon.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Lexicon {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }
}

/// Read a text source as UTF-8, retrying as Latin-1 if it is not valid UTF-8.
pub(crate) fn read_source(path: &Path) -> Result<String, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            log::debug!("{} is not UTF-8, decoding as Latin-1", path.display());
            Ok(e.into_bytes().into_iter().map(char::from).collect())
        }
    }
}
