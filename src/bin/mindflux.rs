//! Mindflux CLI - Command-line interface for Mindflux
//!
//! Commands:
//! - assess: Score one submission into an insight payload
//! - run: Score streaming submissions from stdin (streaming mode)
//! - features: Print the engineered feature vector for submissions
//! - validate: Range-check submissions
//! - doctor: Diagnose artifact health and configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mindflux::encoder::{render_text, InsightEncoder, INSIGHT_SCHEMA_VERSION};
use mindflux::features::FeatureBuilder;
use mindflux::models::Predictor;
use mindflux::schema::{RawInput, FIELD_RANGES, SCHEMA_VERSION};
use mindflux::sentiment::{score_triple, SentimentScorer};
use mindflux::types::{FeatureVector, PartialAssessment, SentimentTriple};
use mindflux::{
    ArtifactManifest, InsightEngine, LexiconSentiment, ModelArtifacts, VaderSentiment,
    MINDFLUX_VERSION, PRODUCER_NAME,
};

/// Mindflux - Wellness insights from self-reported signals
#[derive(Parser)]
#[command(name = "mindflux")]
#[command(author = "Mindflux Contributors")]
#[command(version = MINDFLUX_VERSION)]
#[command(about = "Score wellness form submissions with pre-trained models", long_about = None)]
struct Cli {
    /// Directory holding the model artifacts
    #[arg(long, global = true, env = "MINDFLUX_ARTIFACTS", default_value = "artifacts")]
    artifacts: PathBuf,

    /// VADER-format lexicon scored in place of the bundled VADER analyzer
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one submission into an insight payload
    Assess {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        format: OutputFormat,

        /// Report surviving metrics when individual models fail
        #[arg(long)]
        partial: bool,
    },

    /// Score NDJSON submissions from stdin, one payload per line
    Run {
        /// Report surviving metrics when individual models fail
        #[arg(long)]
        partial: bool,

        /// Buffer output instead of flushing after each record
        #[arg(long)]
        no_flush: bool,
    },

    /// Print the engineered feature vector (no models are loaded)
    Features {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,
    },

    /// Range-check submissions
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load the artifacts and report consistency checks
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one submission per line)
    Ndjson,
    /// A JSON object or an array of objects
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Human-readable summary
    Text,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (wellness.raw_input.v1)
    Input,
    /// Output schema (wellness.insight.v1)
    Output,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), MindfluxCliError> {
    let lexicon = cli.lexicon.as_deref();

    match cli.command {
        Commands::Assess {
            input,
            format,
            partial,
        } => cmd_assess(&cli.artifacts, lexicon, &input, format, partial),

        Commands::Run { partial, no_flush } => {
            cmd_run(&cli.artifacts, lexicon, partial, !no_flush)
        }

        Commands::Features {
            input,
            input_format,
        } => cmd_features(lexicon, &input, input_format),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Doctor { json } => cmd_doctor(&cli.artifacts, lexicon, json),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),
    }
}

fn cmd_assess(
    artifacts: &Path,
    lexicon: Option<&Path>,
    input: &Path,
    format: OutputFormat,
    partial: bool,
) -> Result<(), MindfluxCliError> {
    let raw: RawInput = serde_json::from_str(&read_input(input)?)?;
    let engine = load_engine(artifacts, lexicon)?;
    let encoder = InsightEncoder::new();

    let assessment = assess(&engine, &raw, partial)?;
    let output = format_payload(&encoder, &assessment, &format)?;
    print!("{}", output);

    Ok(())
}

fn cmd_run(
    artifacts: &Path,
    lexicon: Option<&Path>,
    partial: bool,
    flush: bool,
) -> Result<(), MindfluxCliError> {
    let engine = load_engine(artifacts, lexicon)?;
    let encoder = InsightEncoder::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut processed = 0usize;

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let raw: RawInput = serde_json::from_str(trimmed).map_err(|e| {
            MindfluxCliError::ParseError(format!("Failed to parse line {}: {}", index + 1, e))
        })?;

        let assessment = assess(&engine, &raw, partial)?;
        let output = format_payload(&encoder, &assessment, &OutputFormat::Json)?;

        write!(stdout, "{}", output)?;
        if flush {
            stdout.flush()?;
        }
        processed += 1;
    }

    stdout.flush()?;
    info!(processed, "Stream finished");

    Ok(())
}

fn cmd_features(
    lexicon: Option<&Path>,
    input: &Path,
    input_format: InputFormat,
) -> Result<(), MindfluxCliError> {
    let inputs = parse_inputs(&read_input(input)?, &input_format)?;
    if inputs.is_empty() {
        return Err(MindfluxCliError::NoInputs);
    }

    let scorer = load_scorer(lexicon)?;
    let mut reports = Vec::with_capacity(inputs.len());

    for raw in &inputs {
        raw.validate()?;
        let sentiment = score_triple(scorer.as_ref(), &raw.posts, &raw.comments, &raw.status);
        reports.push(FeatureReport {
            sentiment,
            features: FeatureBuilder::build(raw, sentiment),
        });
    }

    if reports.len() == 1 {
        println!("{}", serde_json::to_string_pretty(&reports[0])?);
    } else {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

fn cmd_validate(
    input: &Path,
    input_format: InputFormat,
    json: bool,
) -> Result<(), MindfluxCliError> {
    let inputs = parse_inputs(&read_input(input)?, &input_format)?;

    let errors: Vec<ValidationErrorDetail> = inputs
        .iter()
        .enumerate()
        .flat_map(|(index, raw)| {
            raw.validation_errors()
                .into_iter()
                .map(move |e| ValidationErrorDetail {
                    index,
                    error: e.to_string(),
                })
        })
        .collect();

    let mut invalid: Vec<usize> = errors.iter().map(|e| e.index).collect();
    invalid.dedup();

    let report = ValidationReport {
        total_inputs: inputs.len(),
        valid_inputs: inputs.len() - invalid.len(),
        invalid_inputs: invalid.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total inputs:   {}", report.total_inputs);
        println!("Valid inputs:   {}", report.valid_inputs);
        println!("Invalid inputs: {}", report.invalid_inputs);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Input {}: {}", err.index, err.error);
            }
        }
    }

    if report.invalid_inputs > 0 {
        Err(MindfluxCliError::ValidationFailed(report.invalid_inputs))
    } else {
        Ok(())
    }
}

fn cmd_doctor(artifacts: &Path, lexicon: Option<&Path>, json: bool) -> Result<(), MindfluxCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "mindflux_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Mindflux version {}", MINDFLUX_VERSION),
    });

    checks.push(DoctorCheck {
        name: "schema_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Input schema: {}", SCHEMA_VERSION),
    });

    if artifacts.is_dir() {
        match ArtifactManifest::for_dir(artifacts) {
            Ok(manifest) => {
                let missing: Vec<String> = manifest_files(&manifest)
                    .into_iter()
                    .filter(|file| !artifacts.join(file).is_file())
                    .map(|file| file.display().to_string())
                    .collect();
                if missing.is_empty() {
                    checks.push(DoctorCheck {
                        name: "artifact_files".to_string(),
                        status: CheckStatus::Ok,
                        message: format!("All artifact files present in {}", artifacts.display()),
                    });
                } else {
                    checks.push(DoctorCheck {
                        name: "artifact_files".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Missing artifact files: {}", missing.join(", ")),
                    });
                }
            }
            Err(e) => checks.push(DoctorCheck {
                name: "artifact_files".to_string(),
                status: CheckStatus::Error,
                message: format!("Invalid manifest: {}", e),
            }),
        }

        match ModelArtifacts::load_dir(artifacts) {
            Ok(loaded) => {
                checks.push(DoctorCheck {
                    name: "artifacts".to_string(),
                    status: CheckStatus::Ok,
                    message: format!(
                        "Artifacts consistent ({} scaled columns, {} model features)",
                        loaded.scaled_columns().len(),
                        loaded.model_feature_columns().len()
                    ),
                });
                checks.push(DoctorCheck {
                    name: "models".to_string(),
                    status: CheckStatus::Ok,
                    message: format!(
                        "anxiety_regressor={}, depression_regressor={}, anxiety_classifier={}, depression_classifier={}, stress_classifier={}",
                        loaded.anxiety_regressor().kind(),
                        loaded.depression_regressor().kind(),
                        loaded.anxiety_classifier().kind(),
                        loaded.depression_classifier().kind(),
                        loaded.stress_classifier().kind()
                    ),
                });

                let unnamed = [
                    loaded.anxiety_regressor().feature_names().is_none(),
                    loaded.depression_regressor().feature_names().is_none(),
                    loaded.anxiety_classifier().feature_names().is_none(),
                    loaded.depression_classifier().feature_names().is_none(),
                    loaded.stress_classifier().feature_names().is_none(),
                ]
                .iter()
                .filter(|&&missing| missing)
                .count();
                if unnamed > 0 {
                    checks.push(DoctorCheck {
                        name: "feature_names".to_string(),
                        status: CheckStatus::Warning,
                        message: format!(
                            "{} models carry no feature names; only their width was checked",
                            unnamed
                        ),
                    });
                }
            }
            Err(e) => checks.push(DoctorCheck {
                name: "artifacts".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            }),
        }
    } else {
        checks.push(DoctorCheck {
            name: "artifacts".to_string(),
            status: CheckStatus::Error,
            message: format!("Artifact directory {} does not exist", artifacts.display()),
        });
    }

    if let Some(path) = lexicon {
        checks.push(match LexiconSentiment::from_lexicon_file(path) {
            Ok(scorer) => DoctorCheck {
                name: "lexicon".to_string(),
                status: CheckStatus::Ok,
                message: format!("Lexicon loaded ({} entries)", scorer.len()),
            },
            Err(e) => DoctorCheck {
                name: "lexicon".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            },
        });
    }

    // Check stdin is available (for streaming mode)
    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: MINDFLUX_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Mindflux Doctor Report");
        println!("======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(MindfluxCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), MindfluxCliError> {
    match schema_type {
        SchemaType::Input => {
            if json_schema {
                println!("{}", get_input_json_schema());
            } else {
                println!("Input Schema: {}", SCHEMA_VERSION);
                println!();
                println!("One form submission. Missing fields take the form defaults.");
                println!();
                println!("Numeric fields (inclusive ranges):");
                for range in FIELD_RANGES {
                    println!("  - {}: {} to {}", range.field, range.min, range.max);
                }
                println!();
                println!("Free-text fields (scored for sentiment, may be empty):");
                println!("  - posts, comments, status");
            }
        }
        SchemaType::Output => {
            if json_schema {
                println!("{}", get_output_json_schema());
            } else {
                println!("Output Schema: {}", INSIGHT_SCHEMA_VERSION);
                println!();
                println!("- schema_version: Payload schema version");
                println!("- producer: {{ name, version, instance_id }}");
                println!("- computed_at_utc: RFC 3339 timestamp");
                println!("- sentiment: {{ post, comment, status }} compound scores in [-1, 1]");
                println!("- insights:");
                println!("  - anxiety_score, depression_score: regressor outputs");
                println!("  - anxiety_score_display, depression_score_display: \"NN.NN / 100\"");
                println!("  - high_stress, high_stress_display: stress flag and \"Yes\" / \"No\"");
                println!("  - anxiety_level, depression_level: decoded class labels");
                println!("- failures: [{{ metric, message }}] metrics unavailable in partial mode");
            }
        }
    }

    Ok(())
}

// Helper functions

fn read_input(input: &Path) -> Result<String, MindfluxCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_inputs(data: &str, format: &InputFormat) -> Result<Vec<RawInput>, MindfluxCliError> {
    match format {
        InputFormat::Ndjson => data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).map_err(MindfluxCliError::from))
            .collect(),
        InputFormat::Json => match serde_json::from_str::<serde_json::Value>(data)? {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(MindfluxCliError::from))
                .collect(),
            value => Ok(vec![serde_json::from_value(value)?]),
        },
    }
}

fn load_scorer(
    lexicon: Option<&Path>,
) -> Result<Box<dyn SentimentScorer + Send + Sync>, MindfluxCliError> {
    match lexicon {
        Some(path) => Ok(Box::new(LexiconSentiment::from_lexicon_file(path)?)),
        None => Ok(Box::new(VaderSentiment::new())),
    }
}

fn load_engine(artifacts: &Path, lexicon: Option<&Path>) -> Result<InsightEngine, MindfluxCliError> {
    let loaded = ModelArtifacts::load_dir(artifacts)?;
    Ok(InsightEngine::with_scorer(loaded, load_scorer(lexicon)?))
}

fn assess(
    engine: &InsightEngine,
    raw: &RawInput,
    partial: bool,
) -> Result<PartialAssessment, MindfluxCliError> {
    if partial {
        Ok(engine.assess_partial(raw)?)
    } else {
        Ok(engine.assess(raw)?.into())
    }
}

fn format_payload(
    encoder: &InsightEncoder,
    assessment: &PartialAssessment,
    format: &OutputFormat,
) -> Result<String, MindfluxCliError> {
    let payload = encoder.encode(assessment);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&payload)? + "\n"),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(&payload)? + "\n"),
        OutputFormat::Text => Ok(render_text(&payload)),
    }
}

fn manifest_files(manifest: &ArtifactManifest) -> Vec<&Path> {
    vec![
        manifest.anxiety_classifier.as_path(),
        manifest.depression_classifier.as_path(),
        manifest.anxiety_regressor.as_path(),
        manifest.depression_regressor.as_path(),
        manifest.stress_classifier.as_path(),
        manifest.anxiety_encoder.as_path(),
        manifest.depression_encoder.as_path(),
        manifest.scaler.as_path(),
        manifest.scaled_columns.as_path(),
        manifest.model_feature_columns.as_path(),
    ]
}

fn get_input_json_schema() -> String {
    let mut properties = serde_json::Map::new();
    for range in FIELD_RANGES {
        properties.insert(
            range.field.to_string(),
            serde_json::json!({
                "type": "number",
                "minimum": range.min,
                "maximum": range.max
            }),
        );
    }
    for field in ["posts", "comments", "status"] {
        properties.insert(field.to_string(), serde_json::json!({ "type": "string" }));
    }

    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": SCHEMA_VERSION,
        "description": "Mindflux wellness form submission",
        "type": "object",
        "properties": properties
    })
    .to_string()
}

fn get_output_json_schema() -> String {
    let optional_number = serde_json::json!({ "type": ["number", "null"] });
    let optional_string = serde_json::json!({ "type": ["string", "null"] });

    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": INSIGHT_SCHEMA_VERSION,
        "description": "Mindflux insight payload",
        "type": "object",
        "required": ["schema_version", "producer", "computed_at_utc", "sentiment", "insights", "failures"],
        "properties": {
            "schema_version": { "type": "string" },
            "producer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" },
                    "instance_id": { "type": "string" }
                }
            },
            "computed_at_utc": { "type": "string", "format": "date-time" },
            "sentiment": {
                "type": "object",
                "properties": {
                    "post": { "type": "number" },
                    "comment": { "type": "number" },
                    "status": { "type": "number" }
                }
            },
            "insights": {
                "type": "object",
                "properties": {
                    "anxiety_score": optional_number,
                    "anxiety_score_display": optional_string,
                    "depression_score": optional_number,
                    "depression_score_display": optional_string,
                    "high_stress": { "type": ["boolean", "null"] },
                    "high_stress_display": optional_string,
                    "anxiety_level": optional_string,
                    "depression_level": optional_string
                }
            },
            "failures": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "metric": { "type": "string" },
                        "message": { "type": "string" }
                    }
                }
            }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum MindfluxCliError {
    Io(io::Error),
    Compute(mindflux::ComputeError),
    Json(serde_json::Error),
    Validation(mindflux::ValidationError),
    NoInputs,
    ValidationFailed(usize),
    DoctorFailed,
    ParseError(String),
}

impl From<io::Error> for MindfluxCliError {
    fn from(e: io::Error) -> Self {
        MindfluxCliError::Io(e)
    }
}

impl From<mindflux::ComputeError> for MindfluxCliError {
    fn from(e: mindflux::ComputeError) -> Self {
        match e {
            mindflux::ComputeError::InvalidInput(v) => MindfluxCliError::Validation(v),
            other => MindfluxCliError::Compute(other),
        }
    }
}

impl From<serde_json::Error> for MindfluxCliError {
    fn from(e: serde_json::Error) -> Self {
        MindfluxCliError::Json(e)
    }
}

impl From<mindflux::ValidationError> for MindfluxCliError {
    fn from(e: mindflux::ValidationError) -> Self {
        MindfluxCliError::Validation(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<MindfluxCliError> for CliError {
    fn from(e: MindfluxCliError) -> Self {
        match e {
            MindfluxCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            MindfluxCliError::Compute(e) => CliError {
                code: "COMPUTE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'mindflux doctor' to check the artifacts".to_string()),
            },
            MindfluxCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            MindfluxCliError::Validation(e) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'mindflux validate' for details".to_string()),
            },
            MindfluxCliError::NoInputs => CliError {
                code: "NO_INPUTS".to_string(),
                message: "No submissions found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            MindfluxCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} inputs failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            MindfluxCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
            MindfluxCliError::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check input format".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct FeatureReport {
    sentiment: SentimentTriple,
    features: FeatureVector,
}

#[derive(serde::Serialize)]
struct ValidationReport {
    total_inputs: usize,
    valid_inputs: usize,
    invalid_inputs: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_flushes_unless_disabled() {
        let cli = Cli::try_parse_from(["mindflux", "run"]).unwrap();
        assert!(matches!(cli.command, Commands::Run { no_flush: false, .. }));

        let cli = Cli::try_parse_from(["mindflux", "run", "--no-flush"]).unwrap();
        assert!(matches!(cli.command, Commands::Run { no_flush: true, .. }));
    }
}
