//! Readability and sentiment metrics for a single document.
//!
//! The analysis is a pure function of the text, the two sentiment lexicons
//! and the syllable estimator. It runs on the stopword-filtered text.
//!
//! Reported reals are rounded to 3 decimal places, ties to even on the exact
//! binary value, so `0.0625` becomes `0.062` and `0.1875` becomes `0.188`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::syllables::SyllableEstimator;
use crate::tokenize::tokenize;

/// Words with more syllables than this are complex.
pub const COMPLEX_SYLLABLE_THRESHOLD: usize = 2;

/// Fog index weight applied to the sum of sentence length and complex percentage.
pub const FOG_WEIGHT: f64 = 0.4;

lazy_static! {
    /// First-person pronouns, matched on word boundaries in any case.
    static ref PERSONAL_PRONOUNS: Regex = Regex::new(r"(?i)\b(?:I|we|my|ours|us)\b").unwrap();
}

/// Metrics computed for one document.
///
/// Field names serialize to the report column names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    #[serde(rename = "POSITIVE SCORE")]
    pub positive_score: usize,
    #[serde(rename = "NEGATIVE SCORE")]
    pub negative_score: usize,
    #[serde(rename = "POLARITY SCORE")]
    pub polarity: f64,
    #[serde(rename = "SUBJECTIVITY SCORE")]
    pub subjectivity: f64,
    #[serde(rename = "AVG SENTENCE LENGTH")]
    pub avg_sentence_length: f64,
    #[serde(rename = "PERCENTAGE OF COMPLEX WORDS")]
    pub percentage_complex: f64,
    #[serde(rename = "FOG INDEX")]
    pub fog_index: f64,
    #[serde(rename = "AVG NUMBER OF WORDS PER SENTENCE")]
    pub avg_words_per_sentence: f64,
    #[serde(rename = "COMPLEX WORD COUNT")]
    pub complex_word_count: usize,
    #[serde(rename = "WORD COUNT")]
    pub word_count: usize,
    #[serde(rename = "SYLLABLE PER WORD")]
    pub syllables_per_word: f64,
    #[serde(rename = "PERSONAL PRONOUNS")]
    pub personal_pronouns: usize,
    #[serde(rename = "AVG WORD LENGTH")]
    pub avg_word_length: f64,
}

/// A metric value as it appears in a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(usize),
    Real(f64),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{}", n),
            MetricValue::Real(x) => write!(f, "{:.3}", x),
        }
    }
}

impl MetricRecord {
    /// Report column names, in report order.
    pub const FIELD_NAMES: [&'static str; 13] = [
        "POSITIVE SCORE",
        "NEGATIVE SCORE",
        "POLARITY SCORE",
        "SUBJECTIVITY SCORE",
        "AVG SENTENCE LENGTH",
        "PERCENTAGE OF COMPLEX WORDS",
        "FOG INDEX",
        "AVG NUMBER OF WORDS PER SENTENCE",
        "COMPLEX WORD COUNT",
        "WORD COUNT",
        "SYLLABLE PER WORD",
        "PERSONAL PRONOUNS",
        "AVG WORD LENGTH",
    ];

    /// `(name, value)` pairs in report order.
    pub fn fields(&self) -> [(&'static str, MetricValue); 13] {
        use MetricValue::{Count, Real};
        let values = [
            Count(self.positive_score),
            Count(self.negative_score),
            Real(self.polarity),
            Real(self.subjectivity),
            Real(self.avg_sentence_length),
            Real(self.percentage_complex),
            Real(self.fog_index),
            Real(self.avg_words_per_sentence),
            Count(self.complex_word_count),
            Count(self.word_count),
            Real(self.syllables_per_word),
            Count(self.personal_pronouns),
            Real(self.avg_word_length),
        ];
        std::array::from_fn(|i| (Self::FIELD_NAMES[i], values[i]))
    }
}

/// Computes [`MetricRecord`]s against a fixed set of lexicons.
///
/// Holds only shared read-only state, so one analyzer can serve any number
/// of threads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    positive: Lexicon,
    negative: Lexicon,
    syllables: SyllableEstimator,
}

impl Analyzer {
    pub fn new(positive: Lexicon, negative: Lexicon, syllables: SyllableEstimator) -> Self {
        Self {
            positive,
            negative,
            syllables,
        }
    }

    pub fn positive(&self) -> &Lexicon {
        &self.positive
    }

    pub fn negative(&self) -> &Lexicon {
        &self.negative
    }

    pub fn syllables(&self) -> &SyllableEstimator {
        &self.syllables
    }

    /// Analyze one document.
    ///
    /// Returns `None` when the text has no sentences or no alphabetic words,
    /// which marks the document as having insufficient content.
    pub fn analyze(&self, text: &str) -> Option<MetricRecord> {
        analyze(text, &self.positive, &self.negative, &self.syllables)
    }
}

/// Analyze `text` with the given lexicons and estimator.
///
/// Returns `None` when the text has no sentences or no alphabetic words.
pub fn analyze(
    text: &str,
    positive: &Lexicon,
    negative: &Lexicon,
    syllables: &SyllableEstimator,
) -> Option<MetricRecord> {
    let tokenized = tokenize(text);
    let clean_words = tokenized.clean_words();

    let word_count = clean_words.len();
    let sentence_count = tokenized.sentences.len();
    if word_count == 0 || sentence_count == 0 {
        return None;
    }

    let mut positive_score = 0;
    let mut negative_score = 0;
    let mut total_syllables = 0;
    let mut complex_word_count = 0;
    let mut total_chars = 0;

    for word in &clean_words {
        let lower = word.to_lowercase();
        if positive.contains(&lower) {
            positive_score += 1;
        }
        if negative.contains(&lower) {
            negative_score += 1;
        }

        let word_syllables = syllables.count(word);
        total_syllables += word_syllables;
        if word_syllables > COMPLEX_SYLLABLE_THRESHOLD {
            complex_word_count += 1;
        }

        total_chars += word.chars().count();
    }

    let words = word_count as f64;
    let sentiment_words = positive_score + negative_score;
    let (polarity, subjectivity) = if sentiment_words > 0 {
        let total = sentiment_words as f64;
        (
            (positive_score as f64 - negative_score as f64) / total,
            total / words,
        )
    } else {
        (0.0, 0.0)
    };

    let avg_sentence_length = words / sentence_count as f64;
    let percentage_complex = complex_word_count as f64 / words * 100.0;
    let fog_index = FOG_WEIGHT * (avg_sentence_length + percentage_complex);

    Some(MetricRecord {
        positive_score,
        negative_score,
        polarity: round3(polarity),
        subjectivity: round3(subjectivity),
        avg_sentence_length: round3(avg_sentence_length),
        percentage_complex: round3(percentage_complex),
        fog_index: round3(fog_index),
        avg_words_per_sentence: round3(avg_sentence_length),
        complex_word_count,
        word_count,
        syllables_per_word: round3(total_syllables as f64 / words),
        personal_pronouns: count_personal_pronouns(text),
        avg_word_length: round3(total_chars as f64 / words),
    })
}

/// Count `I`, `we`, `my`, `ours` and `us` as whole words anywhere in `text`.
pub fn count_personal_pronouns(text: &str) -> usize {
    PERSONAL_PRONOUNS.find_iter(text).count()
}

/// Round to 3 decimal places, ties to even.
///
/// Float formatting is correctly rounded on the exact binary value, so a
/// literal such as `1.0005` that is stored slightly below the tie rounds down.
pub fn round3(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.3}", value).parse().unwrap_or(value)
}
