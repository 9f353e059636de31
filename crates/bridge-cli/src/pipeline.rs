//! Build orchestration: ingest, harmonize, write.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use bridge_core::{SourceTables, build_report, harmonize};
use bridge_ingest::{digest_source, load_concordance, load_metadata, load_question_texts};
use bridge_model::{BridgeOptions, RunReport, SourceDigest, SourceIssue, SourceKind};
use bridge_output::{write_bridge_csv, write_report_json};

/// Inputs and outputs of one bridge build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub metadata: PathBuf,
    pub questions: Option<PathBuf>,
    pub concordance: Option<PathBuf>,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub options: BridgeOptions,
    /// Harmonize and summarize without writing any file.
    pub dry_run: bool,
}

impl BuildConfig {
    pub fn new(metadata: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            metadata: metadata.into(),
            questions: None,
            concordance: None,
            output: output.into(),
            report: None,
            options: BridgeOptions::default(),
            dry_run: false,
        }
    }
}

#[derive(Debug)]
pub struct BuildResult {
    pub report: RunReport,
    /// Written bridge table, `None` on a dry run.
    pub output: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

/// Everything read from disk for one run.
#[derive(Debug)]
pub struct IngestResult {
    pub tables: SourceTables,
    pub issues: Vec<SourceIssue>,
    pub sources: Vec<SourceDigest>,
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Load all sources. Only a missing base metadata source is an error.
pub fn ingest(config: &BuildConfig) -> Result<IngestResult> {
    let years = &config.options.years;
    let mut issues = Vec::new();
    let mut sources = digest_source(SourceKind::Metadata, &config.metadata);

    let metadata = load_metadata(&config.metadata, years).context("load base metadata")?;
    issues.extend(metadata.issues);

    let questions = match &config.questions {
        Some(path) => {
            sources.extend(digest_source(SourceKind::QuestionText, path));
            let loaded = load_question_texts(path, years);
            issues.extend(loaded.issues);
            loaded.data
        }
        None => {
            info!("no question text source configured");
            Default::default()
        }
    };

    let concordance = match &config.concordance {
        Some(path) => {
            sources.extend(digest_source(SourceKind::Concordance, path));
            let loaded = load_concordance(path, years);
            issues.extend(loaded.issues);
            loaded.data
        }
        None => {
            info!("no concordance source configured");
            Vec::new()
        }
    };

    Ok(IngestResult {
        tables: SourceTables {
            metadata: metadata.data,
            questions,
            concordance,
        },
        issues,
        sources,
    })
}

/// Run a full build.
pub fn run_build(config: &BuildConfig) -> Result<BuildResult> {
    let build_span = info_span!("build", metadata = %config.metadata.display());
    let _build_guard = build_span.enter();

    let ingested = info_span!("ingest").in_scope(|| {
        let start = Instant::now();
        let ingested = ingest(config)?;
        info!(
            metadata_rows = ingested.tables.metadata.len(),
            question_years = ingested.tables.questions.len(),
            concordance_entries = ingested.tables.concordance.len(),
            issues = ingested.issues.len(),
            duration_ms = start.elapsed().as_millis(),
            "ingest complete"
        );
        anyhow::Ok(ingested)
    })?;

    // ========================================================================
    // Stage 2: Harmonize
    // ========================================================================
    let IngestResult {
        tables,
        issues,
        sources,
    } = ingested;
    let harmonized = harmonize(tables, &config.options).context("harmonize variables")?;
    let report = build_report(&harmonized, &config.options, issues, sources);

    // ========================================================================
    // Stage 3: Output
    // ========================================================================
    if config.dry_run {
        info!("dry run: no files written");
        return Ok(BuildResult {
            report,
            output: None,
            report_path: None,
        });
    }
    write_bridge_csv(&config.output, &harmonized.records)
        .with_context(|| format!("write bridge table {}", config.output.display()))?;
    if let Some(path) = &config.report {
        write_report_json(path, &report)
            .with_context(|| format!("write run report {}", path.display()))?;
    }

    Ok(BuildResult {
        report,
        output: Some(config.output.clone()),
        report_path: config.report.clone(),
    })
}
