//! Syllable estimation.
//!
//! Words found in a pronunciation dictionary are counted by their stressed
//! phonemes. Everything else goes through a vowel-run heuristic.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::SourceError;
use crate::lexicon::read_source;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Pronunciations keyed by lower-cased word.
///
/// Each word maps to one or more transcriptions in dictionary order; each
/// transcription is a sequence of ARPAbet phonemes where vowels carry a
/// trailing stress digit (`AH0`, `EY1`).
#[derive(Debug, Clone, Default)]
pub struct PronunciationDict {
    entries: HashMap<String, Vec<Vec<String>>>,
}

impl PronunciationDict {
    /// Parse CMU Pronouncing Dictionary text.
    ///
    /// Accepts the distribution layout (`WORD  PH PH ...`, variants written
    /// `WORD(1)`, comments starting with `;;;`) as well as the layout with a
    /// variant number in the second column (`word 1 PH PH ...`).
    pub fn parse(content: &str) -> Self {
        let mut entries: HashMap<String, Vec<Vec<String>>> = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut fields = line.split_whitespace().peekable();
            let Some(head) = fields.next() else { continue };
            if fields
                .peek()
                .is_some_and(|f| f.chars().all(|c| c.is_ascii_digit()))
            {
                fields.next();
            }

            let phonemes: Vec<String> = fields
                .take_while(|f| *f != "#")
                .map(str::to_string)
                .collect();
            if phonemes.is_empty() {
                continue;
            }

            entries
                .entry(strip_variant(head).to_lowercase())
                .or_default()
                .push(phonemes);
        }

        Self { entries }
    }

    /// Load a dictionary file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let content = read_source(path.as_ref())?;
        let dict = Self::parse(&content);
        log::info!(
            "loaded {} pronunciations from {}",
            dict.len(),
            path.as_ref().display()
        );
        Ok(dict)
    }

    /// Transcriptions for a lower-cased word.
    pub fn get(&self, word: &str) -> Option<&[Vec<String>]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `WORD(2)` -> `WORD`
fn strip_variant(word: &str) -> &str {
    match word.find('(') {
        Some(idx) if word.ends_with(')') && idx > 0 => &word[..idx],
        _ => word,
    }
}

/// Maps words to syllable counts.
///
/// The dictionary is optional and shared read-only between threads; without
/// one every word uses the heuristic.
#[derive(Debug, Clone, Default)]
pub struct SyllableEstimator {
    dict: Option<Arc<PronunciationDict>>,
}

impl SyllableEstimator {
    /// An estimator that only uses the heuristic.
    pub fn heuristic() -> Self {
        Self { dict: None }
    }

    /// An estimator backed by a pronunciation dictionary.
    pub fn with_dictionary(dict: Arc<PronunciationDict>) -> Self {
        Self { dict: Some(dict) }
    }

    /// Load the dictionary at `path`, or fall back to the heuristic alone.
    pub fn load_or_heuristic<P: AsRef<Path>>(path: Option<P>) -> Self {
        let Some(path) = path else {
            return Self::heuristic();
        };
        match PronunciationDict::from_file(path) {
            Ok(dict) => Self::with_dictionary(Arc::new(dict)),
            Err(e) => {
                log::warn!("{}; syllables will be estimated heuristically", e);
                Self::heuristic()
            }
        }
    }

    pub fn has_dictionary(&self) -> bool {
        self.dict.is_some()
    }

    /// Syllable count for `word`, always at least 1.
    pub fn count(&self, word: &str) -> usize {
        let word = word.to_lowercase();

        let from_dict = self
            .dict
            .as_deref()
            .and_then(|dict| dict.get(&word))
            .and_then(|variants| variants.first())
            .map(|phonemes| count_stressed(phonemes));

        from_dict.unwrap_or_else(|| count_vowel_runs(&word)).max(1)
    }
}

/// Number of phonemes ending in a stress digit.
fn count_stressed(phonemes: &[String]) -> usize {
    phonemes
        .iter()
        .filter(|p| p.chars().last().is_some_and(|c| c.is_ascii_digit()))
        .count()
}

/// Number of maximal runs of vowel characters.
fn count_vowel_runs(word: &str) -> usize {
    let mut count = 0;
    let mut prev_was_vowel = false;

    for c in word.chars() {
        let is_vowel = VOWELS.contains(&c);
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    count
}
