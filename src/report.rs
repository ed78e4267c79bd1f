//! Output formatting for corpus results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output, one block of metrics per document
//! - JSON: structured output keyed by the report column names

use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::corpus::{DocumentOutcome, DocumentResult};
use crate::metrics::MetricRecord;

/// Counts of document outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub analyzed: usize,
    pub insufficient_content: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_results(results: &[DocumentResult]) -> Self {
        let mut summary = Summary {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            match result.outcome {
                DocumentOutcome::Analyzed(_) => summary.analyzed += 1,
                DocumentOutcome::InsufficientContent => summary.insufficient_content += 1,
                DocumentOutcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Whether every document produced metrics.
    pub fn all_analyzed(&self) -> bool {
        self.analyzed == self.total
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub documents: Vec<JsonDocument>,
    pub summary: Summary,
}

/// One document in the JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonDocument {
    pub id: String,
    pub source: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JsonReport {
    pub fn from_results(results: &[DocumentResult]) -> Self {
        let documents = results
            .iter()
            .map(|r| JsonDocument {
                id: r.id.clone(),
                source: r.source.to_string(),
                status: r.outcome.status().to_string(),
                metrics: r.outcome.metrics().copied(),
                error: match &r.outcome {
                    DocumentOutcome::Failed(e) => Some(e.to_string()),
                    _ => None,
                },
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            documents,
            summary: Summary::from_results(results),
        }
    }
}

/// Write results in JSON format.
pub fn write_json<W: Write>(out: &mut W, results: &[DocumentResult]) -> anyhow::Result<()> {
    let report = JsonReport::from_results(results);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty<W: Write>(out: &mut W, results: &[DocumentResult]) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {} v{}", "textgauge".cyan().bold(), env!("CARGO_PKG_VERSION"))?;
    writeln!(out)?;

    for result in results {
        write_document(out, result)?;
        writeln!(out)?;
    }

    write_summary(out, &Summary::from_results(results))
}

fn write_document<W: Write>(out: &mut W, result: &DocumentResult) -> std::io::Result<()> {
    write!(out, "  {}  ", result.id.bold())?;
    write!(out, "{}  ", result.source.to_string().blue())?;
    write_status_tag(out, &result.outcome)?;
    writeln!(out)?;

    match &result.outcome {
        DocumentOutcome::Analyzed(record) => {
            for (name, value) in record.fields() {
                writeln!(out, "    {:<34}{:>10}", name, value.to_string())?;
            }
        }
        DocumentOutcome::InsufficientContent => {
            writeln!(
                out,
                "    {}",
                "no sentences or words left after stopword removal".dimmed()
            )?;
        }
        DocumentOutcome::Failed(e) => {
            writeln!(out, "    {}", e)?;
        }
    }
    Ok(())
}

fn write_status_tag<W: Write>(out: &mut W, outcome: &DocumentOutcome) -> std::io::Result<()> {
    match outcome {
        DocumentOutcome::Analyzed(_) => write!(out, "{}", "OK".green()),
        DocumentOutcome::InsufficientContent => write!(out, "{}", "EMPTY".yellow()),
        DocumentOutcome::Failed(_) => write!(out, "{}", "FAILED".red()),
    }
}

fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> std::io::Result<()> {
    let plural = if summary.total != 1 { "s" } else { "" };
    write!(out, "  {} document{}: ", summary.total, plural)?;
    write!(out, "{} analyzed", summary.analyzed.to_string().green())?;
    if summary.insufficient_content > 0 {
        write!(
            out,
            ", {} insufficient",
            summary.insufficient_content.to_string().yellow()
        )?;
    }
    if summary.failed > 0 {
        write!(out, ", {} failed", summary.failed.to_string().red())?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::DocumentSource;
    use crate::error::DocumentError;
    use std::path::PathBuf;

    fn record() -> MetricRecord {
        MetricRecord {
            positive_score: 2,
            negative_score: 1,
            polarity: 0.333,
            subjectivity: 0.3,
            avg_sentence_length: 5.0,
            percentage_complex: 30.0,
            fog_index: 14.0,
            avg_words_per_sentence: 5.0,
            complex_word_count: 3,
            word_count: 10,
            syllables_per_word: 1.9,
            personal_pronouns: 1,
            avg_word_length: 5.2,
        }
    }

    fn results() -> Vec<DocumentResult> {
        vec![
            DocumentResult {
                id: "a".to_string(),
                source: DocumentSource::Path(PathBuf::from("docs/a.txt")),
                outcome: DocumentOutcome::Analyzed(record()),
            },
            DocumentResult {
                id: "b".to_string(),
                source: DocumentSource::Url("https://example.com/b".to_string()),
                outcome: DocumentOutcome::InsufficientContent,
            },
            DocumentResult {
                id: "c".to_string(),
                source: DocumentSource::Path(PathBuf::from("docs/c.txt")),
                outcome: DocumentOutcome::Failed(DocumentError::Read {
                    path: PathBuf::from("docs/c.txt"),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                }),
            },
        ]
    }

    #[test]
    fn test_summary_counts() {
        let summary = Summary::from_results(&results());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.analyzed, 1);
        assert_eq!(summary.insufficient_content, 1);
        assert_eq!(summary.failed, 1);
        assert!(!summary.all_analyzed());
        assert!(Summary::default().all_analyzed());
    }

    #[test]
    fn test_json_report_shape() {
        let mut buf = Vec::new();
        write_json(&mut buf, &results()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        let docs = value["documents"].as_array().unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0]["status"], "analyzed");
        assert_eq!(docs[0]["metrics"]["WORD COUNT"], 10);
        assert_eq!(docs[0]["metrics"]["FOG INDEX"], 14.0);
        assert!(docs[0].get("error").is_none());
        assert!(docs[1].get("metrics").is_none());
        assert_eq!(docs[1]["source"], "https://example.com/b");
        assert!(docs[2]["error"].as_str().unwrap().contains("docs/c.txt"));
        assert_eq!(value["summary"]["failed"], 1);
    }

    #[test]
    fn test_json_metric_key_order() {
        let mut buf = Vec::new();
        write_json(&mut buf, &results()[..1]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let positions: Vec<usize> = MetricRecord::FIELD_NAMES
            .iter()
            .map(|name| text.find(&format!("\"{}\"", name)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_pretty_lists_fields_with_three_decimals() {
        let mut buf = Vec::new();
        write_pretty(&mut buf, &results()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("AVG NUMBER OF WORDS PER SENTENCE"));
        assert!(text.contains("5.000"));
        assert!(text.contains("0.333"));
        assert!(text.contains("stopword removal"));
        assert!(text.contains("not found"));
        assert!(text.contains("3 documents"));
    }
}
