use std::fs;
use std::path::Path;

use pronunciation_rs::AssessmentReport;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub lexicon_path: Option<String>,
    pub case_count: usize,
    pub mean_score: f64,
}

#[derive(Debug, Serialize)]
pub struct CaseReport {
    pub id: String,
    pub reference_text: String,
    pub report: AssessmentReport,
}

#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub meta: Meta,
    pub results: Vec<CaseReport>,
}

pub fn render_report(report: &BatchReport) -> Result<String, String> {
    serde_json::to_string_pretty(report)
        .map_err(|err| format!("Could not encode assessment report: {err}"))
}

/// Writes the rendered report, creating missing parent directories.
pub fn write_report(path: &Path, report: &BatchReport) -> Result<(), String> {
    let mut rendered = render_report(report)?;
    rendered.push('\n');

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|err| {
            format!("Could not prepare report directory {}: {err}", dir.display())
        })?;
    }
    fs::write(path, rendered).map_err(|err| {
        format!("Could not save assessment report to {}: {err}", path.display())
    })
}
