//! Textgauge - readability and sentiment metrics for text corpora.
//!
//! Each document is stripped of stopwords, split into sentences and word
//! tokens, and scored against positive and negative lexicons. The result is
//! a fixed record of 13 metrics: sentiment counts, polarity, subjectivity,
//! sentence length, complex-word share, Fog index, syllables per word,
//! personal pronoun count and average word length.
//!
//! # Architecture
//!
//! - `lexicon`, `stopwords`, `syllables`: read-only word data
//! - `tokenize`: sentence and word segmentation
//! - `metrics`: the analysis itself, a pure function of text and word data
//! - `corpus`: document sources and the parallel pipeline
//! - `fetch`: HTTP fetching and caching for URL documents
//! - `config`: YAML config schema
//! - `report`: Output formatting (pretty, JSON)

pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod fetch;
pub mod lexicon;
pub mod metrics;
pub mod report;
pub mod stopwords;
pub mod syllables;
pub mod tokenize;

pub use config::Config;
pub use corpus::{Document, DocumentOutcome, DocumentResult, DocumentSource, Pipeline};
pub use error::{DocumentError, FetchError, SourceError};
pub use lexicon::Lexicon;
pub use metrics::{analyze, Analyzer, MetricRecord};
pub use stopwords::StopwordSet;
pub use syllables::{PronunciationDict, SyllableEstimator};
pub use tokenize::{tokenize, Tokenized};
