//! Command-line interface for textgauge.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{self, Config, DEFAULT_CONFIG_NAMES};
use crate::corpus::{collect_documents, documents_from_config, DocumentResult, Pipeline};
use crate::lexicon::Lexicon;
use crate::metrics::Analyzer;
use crate::report::{self, Summary};
use crate::stopwords::StopwordSet;
use crate::syllables::SyllableEstimator;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Readability and sentiment metrics for a corpus of plain-text documents.
///
/// Textgauge removes stopwords, splits each document into sentences and
/// words, and reports sentiment scores, Fog index, complex-word share,
/// syllable and word-length averages, and personal pronoun counts.
#[derive(Parser)]
#[command(name = "textgauge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute metrics for documents
    Analyze(AnalyzeArgs),
    /// Create a new textgauge config from a template
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Document files or directories of `*.txt` files
    pub paths: Vec<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Positive word list (overrides config)
    #[arg(long)]
    pub positive: Option<PathBuf>,

    /// Negative word list (overrides config)
    #[arg(long)]
    pub negative: Option<PathBuf>,

    /// Directory of stopword files (overrides config)
    #[arg(long)]
    pub stopwords: Option<PathBuf>,

    /// CMU pronunciation dictionary (overrides config)
    #[arg(long)]
    pub pronunciations: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit non-zero if any document failed or had insufficient content
    #[arg(long)]
    pub strict: bool,

    /// Do not read or write the fetched document cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "textgauge.yaml")]
    pub output: PathBuf,

    /// Template to use
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// List available templates
    #[arg(short, long)]
    pub list: bool,
}

/// Available config templates.
struct Template {
    name: &'static str,
    description: &'static str,
    content: &'static str,
}

static TEMPLATES: &[Template] = &[
    Template {
        name: "local",
        description: "Lexicons and stopwords for a directory of text files",
        content: include_str!("templates/local.yaml"),
    },
    Template {
        name: "urls",
        description: "Documents fetched from a list of URLs",
        content: include_str!("templates/urls.yaml"),
    },
];

/// Load the config named on the command line, or discover one in the working directory.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => config::discover(Path::new(".")),
    };

    let config = match path {
        Some(path) => {
            log::info!("using config {}", path.display());
            Config::parse_file(&path)
                .map_err(|e| anyhow::anyhow!("cannot parse config {}: {}", path.display(), e))?
        }
        None => {
            log::debug!("no config found (looked for {})", DEFAULT_CONFIG_NAMES.join(", "));
            Config::default()
        }
    };

    config::validate(&config)?;
    Ok(config)
}

/// Command-line paths take precedence over the config file.
fn apply_overrides(config: &mut Config, args: &AnalyzeArgs) {
    if let Some(p) = &args.positive {
        config.lexicons.positive = Some(p.clone());
    }
    if let Some(p) = &args.negative {
        config.lexicons.negative = Some(p.clone());
    }
    if let Some(p) = &args.stopwords {
        config.stopwords = Some(p.clone());
    }
    if let Some(p) = &args.pronunciations {
        config.pronunciations = Some(p.clone());
    }
    if args.no_cache {
        config.fetch.cache_ttl_hours = 0;
    }
}

fn load_lexicon(path: Option<&Path>, kind: &str) -> Lexicon {
    match path {
        Some(path) => Lexicon::load_or_empty(path),
        None => {
            log::warn!("no {} lexicon configured; {} score will be 0", kind, kind);
            Lexicon::default()
        }
    }
}

fn load_stopwords(dir: Option<&Path>) -> StopwordSet {
    let Some(dir) = dir else {
        log::info!("no stopword directory configured");
        return StopwordSet::default();
    };

    match StopwordSet::aggregate_dir(dir) {
        Ok(aggregation) => aggregation.stopwords,
        Err(e) => {
            log::warn!("{}; continuing without stopwords", e);
            StopwordSet::default()
        }
    }
}

/// Build the pipeline from a resolved config.
pub fn build_pipeline(config: &Config) -> Pipeline {
    let analyzer = Analyzer::new(
        load_lexicon(config.lexicons.positive.as_deref(), "positive"),
        load_lexicon(config.lexicons.negative.as_deref(), "negative"),
        SyllableEstimator::load_or_heuristic(config.pronunciations.as_deref()),
    );
    let stopwords = load_stopwords(config.stopwords.as_deref());
    Pipeline::new(analyzer, stopwords).fetch_config(config.fetch.clone())
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    apply_overrides(&mut config, args);

    // Collect documents from paths, then the config list
    let mut documents = match collect_documents(&args.paths) {
        Ok(docs) => docs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    documents.extend(documents_from_config(&config.documents));

    if documents.is_empty() {
        eprintln!("Error: no documents to analyze");
        eprintln!("Pass files or directories, or list documents in the config file");
        return Ok(EXIT_ERROR);
    }

    let pipeline = build_pipeline(&config);
    let results = pipeline.run(&documents)?;

    match &args.output {
        Some(path) => {
            colored::control::set_override(false);
            let mut out = BufWriter::new(File::create(path)?);
            write_report(&mut out, &args.format, &results)?;
            out.flush()?;
            log::info!("wrote report to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_report(&mut out, &args.format, &results)?;
        }
    }

    // Return appropriate exit code
    let summary = Summary::from_results(&results);
    if args.strict && !summary.all_analyzed() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn write_report<W: Write>(out: &mut W, format: &str, results: &[DocumentResult]) -> anyhow::Result<()> {
    match format {
        "json" => report::write_json(out, results)?,
        _ => report::write_pretty(out, results)?,
    }
    Ok(())
}

/// Template written by `init` when none is named.
const DEFAULT_TEMPLATE: &str = "local";

fn find_template(name: &str) -> anyhow::Result<&'static Template> {
    TEMPLATES.iter().find(|t| t.name == name).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown template {:?} (run 'textgauge init --list' to see available templates)",
            name
        )
    })
}

/// Write `content` to a new file at `path`, creating parent directories.
///
/// Fails if `path` already exists; an existing config is never replaced.
fn write_new_config(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory {}", parent.display()))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => anyhow::bail!(
            "{} already exists; remove it or pass --output",
            path.display()
        ),
        Err(e) => return Err(e).with_context(|| format!("cannot create {}", path.display())),
    };
    file.write_all(content.as_bytes())
        .with_context(|| format!("cannot write {}", path.display()))
}

fn write_template_list<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Available templates:")?;
    writeln!(out)?;
    for template in TEMPLATES {
        let marker = if template.name == DEFAULT_TEMPLATE { " (default)" } else { "" };
        let label = format!("{}{}", template.name, marker);
        writeln!(out, "  {:<20} {}", label, template.description)?;
    }
    writeln!(out)?;
    writeln!(out, "Usage:")?;
    writeln!(out, "  textgauge init --template <name>")
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.list {
        write_template_list(&mut io::stdout().lock())?;
        return Ok(EXIT_SUCCESS);
    }

    let written = find_template(&args.template)
        .and_then(|template| write_new_config(&args.output, template.content).map(|_| template));
    let template = match written {
        Ok(template) => template,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let config = args.output.display();
    println!("Created {} from template '{}'", config, template.name);
    println!();
    println!("Next steps:");
    println!("  1. Point the lexicon and stopword paths at your word lists");
    println!("  2. Run: textgauge analyze --config {}", config);

    Ok(EXIT_SUCCESS)
}
