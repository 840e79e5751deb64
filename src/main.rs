//! Audit Opinion Predictor - Entry Point
//!
//! Reads a statement sheet, derives the 32 financial ratios, predicts
//! an audit opinion per entity and writes the annotated sheet.
//!
//! Wiring sequence:
//! 1. Parse CLI, load config.toml (defaults if absent) + apply overrides
//! 2. Init tracing (pretty or JSON structured logging)
//! 3. Create sheet reader, model source and result writer
//! 4. Run the analysis use case
//! 5. Write the run report, map failures to distinct exit codes

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use audit_opinion_predictor::adapters::model::JsonModelSource;
use audit_opinion_predictor::adapters::persistence::RunReport;
use audit_opinion_predictor::adapters::sheet::{CsvResultWriter, CsvSheetReader};
use audit_opinion_predictor::config::{self, AppConfig, AppSection, LogFormat, Orientation};
use audit_opinion_predictor::domain::AnalysisError;
use audit_opinion_predictor::usecases::analysis::{OpinionAnalyzer, run_analysis};

/// Exit code for configuration, I/O and other non-analysis failures.
const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Parser)]
#[command(name = "audit-opinion-predictor")]
#[command(about = "Predict audit opinion types from firm financial statement sheets", long_about = None)]
struct Cli {
    /// Statement sheet (CSV) to analyse
    input: PathBuf,

    /// Configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Model artifact (overrides model.artifact_path)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Output directory (overrides output.dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Sheet layout (overrides input.orientation)
    #[arg(long, value_enum)]
    orientation: Option<Orientation>,

    /// Log level (overrides app.log_level)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── 1. Load configuration + CLI overrides ───────────────
    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    // ── 2. Initialize logging ───────────────────────────────
    init_tracing(&config.app);

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        input = %cli.input.display(),
        "Starting analysis"
    );

    // ── 3–5. Run and report ─────────────────────────────────
    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    }
}

fn load(cli: &Cli) -> Result<AppConfig> {
    let mut config = config::loader::load_or_default(&cli.config)?;

    if let Some(model) = &cli.model {
        config.model.artifact_path.clone_from(model);
    }
    if let Some(dir) = &cli.output_dir {
        config.output.dir.clone_from(dir);
    }
    if let Some(orientation) = cli.orientation {
        config.input.orientation = orientation;
    }
    if let Some(level) = &cli.log_level {
        config.app.log_level.clone_from(level);
    }

    config::loader::validate_config(&config).context("Invalid configuration after CLI overrides")?;
    Ok(config)
}

fn init_tracing(app: &AppSection) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app.log_level));

    match app.log_format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    let reader = CsvSheetReader::new(&cli.input, config.input.orientation, config.input.delimiter)?;
    let writer = CsvResultWriter::new(
        config.output.predictions_path(),
        config.output.features_path(),
        config.input.delimiter,
    )?;
    let analyzer = OpinionAnalyzer::new(
        JsonModelSource::new(&config.model.artifact_path),
        config.output.prediction_column.as_str(),
    );

    let outcome = run_analysis(&reader, &analyzer, &writer)?;

    if config.output.write_report {
        RunReport::from_results(&cli.input, &outcome.annotated, &outcome.selection)
            .save(&config.output.report_path())?;
    }

    info!(
        predicted = outcome.annotated.len(),
        skipped = outcome.selection.skipped_rows(),
        labels = ?outcome.annotated.label_counts(),
        output = %config.output.predictions_path().display(),
        "Analysis complete"
    );
    Ok(())
}

/// Log a failure with a message specific to its kind and pick the exit code.
fn report_failure(err: &anyhow::Error) -> ExitCode {
    let Some(analysis) = err.downcast_ref::<AnalysisError>() else {
        error!("Analysis failed: {err:#}");
        return ExitCode::from(EXIT_FAILURE);
    };

    let headline = match analysis {
        AnalysisError::MissingFields { .. } => "The sheet is missing required financial fields",
        AnalysisError::NoAnalyzableRows { .. } => "No analyzable rows remain after removing incomplete ratios",
        AnalysisError::ModelUnavailable { .. } => "The model artifact could not be loaded",
        AnalysisError::FeatureVocabularyMismatch { .. } => "The model expects a different feature set",
        AnalysisError::PredictionCountMismatch { .. } | AnalysisError::UnknownClass { .. } => {
            "The model returned an unusable prediction"
        }
        AnalysisError::TableMismatch { .. } => "Predictions could not be joined back onto the sheet",
        AnalysisError::Inference(_) => "The model failed while scoring",
    };

    error!(error = %analysis, "{headline}");
    ExitCode::from(analysis.exit_code())
}
