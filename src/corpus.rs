//! Corpus pipeline: gather documents, obtain their text, analyze in parallel.

use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{DocumentEntry, FetchConfig};
use crate::error::DocumentError;
use crate::fetch::Fetcher;
use crate::metrics::{Analyzer, MetricRecord};
use crate::stopwords::StopwordSet;

/// Where a document's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Path(PathBuf),
    Url(String),
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Path(path) => write!(f, "{}", path.display()),
            DocumentSource::Url(url) => f.write_str(url),
        }
    }
}

/// A document to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub source: DocumentSource,
    /// Prepended to the body as `title + "\n\n" + body`
    pub title: Option<String>,
}

impl Document {
    /// A local document identified by its file stem.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            id,
            source: DocumentSource::Path(path.to_path_buf()),
            title: None,
        }
    }
}

/// Result of analyzing one document.
#[derive(Debug)]
pub enum DocumentOutcome {
    Analyzed(MetricRecord),
    /// No sentences or no clean words remained after stopword removal.
    InsufficientContent,
    Failed(DocumentError),
}

impl DocumentOutcome {
    /// Short status label used in reports.
    pub fn status(&self) -> &'static str {
        match self {
            DocumentOutcome::Analyzed(_) => "analyzed",
            DocumentOutcome::InsufficientContent => "insufficient_content",
            DocumentOutcome::Failed(_) => "failed",
        }
    }

    pub fn metrics(&self) -> Option<&MetricRecord> {
        match self {
            DocumentOutcome::Analyzed(record) => Some(record),
            _ => None,
        }
    }
}

/// A document paired with its outcome.
#[derive(Debug)]
pub struct DocumentResult {
    pub id: String,
    pub source: DocumentSource,
    pub outcome: DocumentOutcome,
}

/// Expand paths into documents.
///
/// Directories contribute their `*.txt` files (not recursive, sorted by file
/// name); files are taken as given.
pub fn collect_documents(paths: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_dir() {
            let walker = WalkDir::new(path)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .sort_by(|a, b| a.file_name().cmp(b.file_name()));
            for entry in walker {
                let entry = entry.map_err(|e| {
                    anyhow::anyhow!("cannot list {}: {}", path.display(), e)
                })?;
                let file = entry.path();
                if entry.file_type().is_file() && file.extension().is_some_and(|ext| ext == "txt") {
                    documents.push(Document::from_path(file));
                }
            }
        } else if path.is_file() {
            documents.push(Document::from_path(path));
        } else {
            anyhow::bail!("no such file or directory: {}", path.display());
        }
    }

    Ok(documents)
}

/// Turn config entries into documents.
///
/// URL entries without an id are numbered by their 1-based position in the list.
pub fn documents_from_config(entries: &[DocumentEntry]) -> Vec<Document> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let mut doc = match (&entry.url, &entry.path) {
                (Some(url), _) => Document {
                    id: (i + 1).to_string(),
                    source: DocumentSource::Url(url.clone()),
                    title: None,
                },
                (None, Some(path)) => Document::from_path(path),
                (None, None) => return None,
            };
            if let Some(id) = &entry.id {
                doc.id = id.clone();
            }
            doc.title = entry.title.clone();
            Some(doc)
        })
        .collect()
}

/// Runs the analysis over a corpus.
pub struct Pipeline {
    analyzer: Analyzer,
    stopwords: StopwordSet,
    fetch: FetchConfig,
    fetcher: Option<Fetcher>,
}

impl Pipeline {
    pub fn new(analyzer: Analyzer, stopwords: StopwordSet) -> Self {
        Self {
            analyzer,
            stopwords,
            fetch: FetchConfig::default(),
            fetcher: None,
        }
    }

    /// Set the fetch settings used when the corpus has URL documents.
    pub fn fetch_config(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Use a preconfigured fetcher instead of building one on demand.
    pub fn fetcher(mut self, fetcher: Fetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Remove stopwords from `text` and analyze what remains.
    pub fn analyze_text(&self, text: &str) -> DocumentOutcome {
        let cleaned = self.stopwords.remove_from(text);
        match self.analyzer.analyze(&cleaned) {
            Some(record) => DocumentOutcome::Analyzed(record),
            None => DocumentOutcome::InsufficientContent,
        }
    }

    /// Analyze every document, returning results in input order.
    ///
    /// Per-document failures are reported in the results. Only a failure to
    /// set up the HTTP client or runtime is returned as an error.
    pub fn run(&self, documents: &[Document]) -> anyhow::Result<Vec<DocumentResult>> {
        let texts = self.load_texts(documents)?;
        log::info!("analyzing {} documents", documents.len());

        let results = documents
            .par_iter()
            .zip(texts.into_par_iter())
            .map(|(doc, text)| {
                let outcome = match text {
                    Ok(body) => {
                        let full = match &doc.title {
                            Some(title) => format!("{}\n\n{}", title, body),
                            None => body,
                        };
                        self.analyze_text(&full)
                    }
                    Err(e) => {
                        log::warn!("document {}: {}", doc.id, e);
                        DocumentOutcome::Failed(e)
                    }
                };
                if matches!(outcome, DocumentOutcome::InsufficientContent) {
                    log::warn!("document {}: insufficient content", doc.id);
                }
                DocumentResult {
                    id: doc.id.clone(),
                    source: doc.source.clone(),
                    outcome,
                }
            })
            .collect();

        Ok(results)
    }

    fn load_texts(&self, documents: &[Document]) -> anyhow::Result<Vec<Result<String, DocumentError>>> {
        let mut texts: Vec<Option<Result<String, DocumentError>>> = documents
            .iter()
            .map(|doc| match &doc.source {
                DocumentSource::Path(path) => Some(read_document(path)),
                DocumentSource::Url(_) => None,
            })
            .collect();

        let (slots, urls): (Vec<usize>, Vec<String>) = documents
            .iter()
            .enumerate()
            .filter_map(|(i, doc)| match &doc.source {
                DocumentSource::Url(url) => Some((i, url.clone())),
                DocumentSource::Path(_) => None,
            })
            .unzip();

        if !urls.is_empty() {
            let built;
            let fetcher = match &self.fetcher {
                Some(fetcher) => fetcher,
                None => {
                    built = Fetcher::new(&self.fetch)?;
                    &built
                }
            };
            log::info!("fetching {} documents", urls.len());
            let fetched = fetcher.fetch_all_blocking(&urls)?;

            for ((slot, url), result) in slots.into_iter().zip(urls).zip(fetched) {
                texts[slot] = Some(result.map_err(|source| DocumentError::Fetch { url, source }));
            }
        }

        // Every slot is filled: fetch_all yields one result per URL
        Ok(texts.into_iter().flatten().collect())
    }
}

/// Read a local document; invalid UTF-8 is replaced rather than rejected.
fn read_document(path: &Path) -> Result<String, DocumentError> {
    let bytes = fs::read(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
