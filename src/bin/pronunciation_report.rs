use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pronunciation_rs::{
    sample_sentence, AssessmentRequest, AssessorConfig, PronunciationAssessorBuilder,
};
use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[path = "pronunciation_report/json_report_formatter.rs"]
mod json_report_formatter;

use json_report_formatter::{BatchReport, CaseReport, Meta};

#[derive(Debug, Parser)]
#[command(name = "pronunciation_report")]
#[command(about = "Score learner transcripts against Japanese reference sentences")]
struct Args {
    /// JSON array of assessment requests, each with an optional `id`.
    #[arg(long, env = "PRONUNCIATION_REPORT_REQUESTS")]
    requests: Option<PathBuf>,
    #[arg(long, env = "PRONUNCIATION_REPORT_SAMPLE_ID", conflicts_with = "requests")]
    sample_id: Option<String>,
    #[arg(long, env = "PRONUNCIATION_REPORT_TRANSCRIPT", requires = "sample_id")]
    transcript: Option<String>,
    #[arg(long, env = "PRONUNCIATION_REPORT_CONFIG")]
    config: Option<PathBuf>,
    /// Overrides `lexicon_path` from the config file.
    #[arg(long, env = "PRONUNCIATION_REPORT_LEXICON")]
    lexicon: Option<PathBuf>,
    #[arg(long, env = "PRONUNCIATION_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "PRONUNCIATION_REPORT_VERBOSE", default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct Case {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    request: AssessmentRequest,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| format!("Failed to install log subscriber: {err}"))?;

    let mut config = match args.config.as_ref() {
        Some(path) => AssessorConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => AssessorConfig::default(),
    };
    if let Some(lexicon) = args.lexicon.as_ref() {
        config.lexicon_path = Some(lexicon.to_string_lossy().into_owned());
    }
    let lexicon_path = config.lexicon_path.clone();

    let cases = load_cases(&args)?;
    if cases.is_empty() {
        return Err("No assessment requests selected.".to_string());
    }

    let assessor = PronunciationAssessorBuilder::new(config)
        .build()
        .map_err(|err| format!("Failed to build assessor: {err}"))?;

    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(cases.len());
    for (index, case) in cases.into_iter().enumerate() {
        let id = case.id.unwrap_or_else(|| format!("case-{index}"));
        progress.set_message(id.clone());
        let report = assessor.assess(&case.request);
        results.push(CaseReport {
            id,
            reference_text: case.request.reference_text,
            report,
        });
        progress.inc(1);
    }
    progress.finish_and_clear();

    let mean_score = results.iter().map(|r| r.report.score as f64).sum::<f64>() / results.len() as f64;
    let batch = BatchReport {
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            lexicon_path,
            case_count: results.len(),
            mean_score,
        },
        results,
    };

    match args.out.as_ref() {
        Some(path) => {
            json_report_formatter::write_report(path, &batch)?;
            println!("{}", path.display());
        }
        None => println!("{}", json_report_formatter::render_report(&batch)?),
    }
    Ok(())
}

fn load_cases(args: &Args) -> Result<Vec<Case>, String> {
    if let Some(sample_id) = args.sample_id.as_deref() {
        let sentence = sample_sentence(sample_id)
            .ok_or_else(|| format!("Unknown sample id '{sample_id}'."))?;
        return Ok(vec![Case {
            id: Some(sample_id.to_string()),
            request: AssessmentRequest {
                reference_text: sentence.to_string(),
                transcript: args.transcript.clone(),
                acoustics: Default::default(),
            },
        }]);
    }

    let path = args
        .requests
        .as_ref()
        .ok_or_else(|| "Either --requests or --sample-id is required.".to_string())?;
    read_cases(path)
}

fn read_cases(path: &Path) -> Result<Vec<Case>, String> {
    let data = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read requests '{}': {err}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|err| format!("Failed to parse requests '{}': {err}", path.display()))
}
