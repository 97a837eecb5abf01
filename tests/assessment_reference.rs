use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use libtest_mimic::{Arguments, Failed, Trial};
use pronunciation_rs::{
    AssessmentReport, AssessmentRequest, AssessorConfig, PhonemeErrorKind, PronunciationAssessor,
    PronunciationAssessorBuilder,
};
use serde::Deserialize;

const SUITE_NAME: &str = "assessment_reference_matches_fixture";

#[derive(Debug, Deserialize)]
struct AssessmentFixture {
    id: String,
    request: AssessmentRequest,
    expected: ExpectedReport,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedReport {
    score: u8,
    text_score: u8,
    intonation_score: u8,
    clarity_score: u8,
    feedback: String,
    #[serde(default)]
    intonation: Option<String>,
    #[serde(default)]
    clarity: Option<String>,
    words: Vec<ExpectedWord>,
    phoneme_error_kinds: Vec<String>,
    #[serde(default)]
    personalized_feedback: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedWord {
    text: String,
    is_correct: bool,
    #[serde(default)]
    suggestion: Option<String>,
}

fn main() {
    let args = Arguments::from_args();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let fixtures = match load_fixtures(&repo_root.join("test-data/assessments")) {
        Ok(fixtures) => fixtures,
        Err(err) => {
            run_setup_failure(&args, err);
            return;
        }
    };
    if fixtures.is_empty() {
        run_setup_failure(
            &args,
            "No assessment fixtures found under test-data/assessments.".to_string(),
        );
        return;
    }

    let tests = fixtures
        .into_iter()
        .map(|fixture| {
            let test_name = format!("{SUITE_NAME}::{}", fixture.id);
            Trial::test(test_name, move || run_fixture(&fixture).map_err(Failed::from))
        })
        .collect();

    libtest_mimic::run(&args, tests).exit();
}

fn run_setup_failure(args: &Arguments, message: String) {
    let test = Trial::test(format!("{SUITE_NAME}::setup"), move || {
        Err(Failed::from(message))
    });
    libtest_mimic::run(args, vec![test]).exit();
}

fn assessor() -> Result<&'static PronunciationAssessor, String> {
    static ASSESSOR: OnceLock<Result<PronunciationAssessor, String>> = OnceLock::new();
    ASSESSOR
        .get_or_init(|| {
            PronunciationAssessorBuilder::new(AssessorConfig::default())
                .build()
                .map_err(|err| format!("Failed to build assessor: {err}"))
        })
        .as_ref()
        .map_err(|err| err.clone())
}

fn run_fixture(fixture: &AssessmentFixture) -> Result<(), String> {
    let report = assessor()?.assess(&fixture.request);
    compare_report(&fixture.id, &report, &fixture.expected)
}

fn compare_report(id: &str, report: &AssessmentReport, expected: &ExpectedReport) -> Result<(), String> {
    let scores = [
        ("score", report.score, expected.score),
        ("textScore", report.text_score, expected.text_score),
        ("intonationScore", report.intonation_score, expected.intonation_score),
        ("clarityScore", report.clarity_score, expected.clarity_score),
    ];
    for (name, observed, wanted) in scores {
        if observed != wanted {
            return Err(format!("{id}: {name} mismatch (expected {wanted}, got {observed})"));
        }
    }

    expect_text(id, "feedback", &report.feedback, Some(&expected.feedback))?;
    expect_text(id, "intonation", &report.intonation, expected.intonation.as_ref())?;
    expect_text(id, "clarity", &report.clarity, expected.clarity.as_ref())?;
    expect_text(
        id,
        "personalizedFeedback",
        &report.personalized_feedback,
        expected.personalized_feedback.as_ref(),
    )?;

    if report.words.len() != expected.words.len() {
        return Err(format!(
            "{id}: word count mismatch (expected {}, got {}): {:?}",
            expected.words.len(),
            report.words.len(),
            report.words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>()
        ));
    }
    for (idx, (observed, wanted)) in report.words.iter().zip(&expected.words).enumerate() {
        if observed.text != wanted.text || observed.is_correct != wanted.is_correct {
            return Err(format!(
                "{id}: word mismatch at index {idx} (expected '{}' correct={}, got '{}' correct={})",
                wanted.text, wanted.is_correct, observed.text, observed.is_correct
            ));
        }
        if wanted.suggestion.is_some() && observed.suggestion != wanted.suggestion {
            return Err(format!(
                "{id}: suggestion mismatch at index {idx} (expected {:?}, got {:?})",
                wanted.suggestion, observed.suggestion
            ));
        }
    }

    let kinds: Vec<&str> = report
        .phoneme_errors
        .iter()
        .map(|e| kind_name(e.kind))
        .collect();
    if kinds != expected.phoneme_error_kinds {
        return Err(format!(
            "{id}: phoneme error kinds mismatch (expected {:?}, got {:?})",
            expected.phoneme_error_kinds, kinds
        ));
    }

    Ok(())
}

fn expect_text(id: &str, field: &str, observed: &str, expected: Option<&String>) -> Result<(), String> {
    match expected {
        Some(wanted) if wanted != observed => Err(format!(
            "{id}: {field} mismatch (expected '{wanted}', got '{observed}')"
        )),
        _ => Ok(()),
    }
}

fn kind_name(kind: PhonemeErrorKind) -> &'static str {
    match kind {
        PhonemeErrorKind::Addition => "addition",
        PhonemeErrorKind::Omission => "omission",
        PhonemeErrorKind::Substitution => "substitution",
    }
}

fn load_fixtures(dir: &Path) -> Result<Vec<AssessmentFixture>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|err| format!("Failed to list fixtures in '{}': {err}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("Failed to read fixture entry in '{}': {err}", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(|path| load_fixture(path)).collect()
}

fn load_fixture(path: &Path) -> Result<AssessmentFixture, String> {
    let file = File::open(path)
        .map_err(|err| format!("Failed to open fixture '{}': {err}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|err| format!("Failed to parse fixture '{}': {err}", path.display()))
}
