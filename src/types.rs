use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// One normalized kana character and the source word it was read from.
/// `word_index` is `None` for units produced by the character fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneticUnit {
    pub unit: char,
    pub word_index: Option<usize>,
}

/// One step of a reference/hypothesis edit script. Indices point into the
/// reference (first) and hypothesis (second) sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Match(usize, usize),
    Substitution(usize, usize),
    Omission(usize),
    Addition(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhonemeErrorKind {
    Addition,
    Omission,
    Substitution,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonemeError {
    /// Index of the offending op in the edit script.
    pub position: usize,
    /// Reference reading index the error belongs to. Additions take the index
    /// of the next reference unit, clamped to the last one.
    pub reading_index: usize,
    pub expected_unit: Option<char>,
    pub actual_unit: Option<char>,
    pub kind: PhonemeErrorKind,
    pub explanation: Option<String>,
}

/// One segment returned by a reading converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingToken {
    pub source: String,
    pub reading: String,
}

/// A tokenized word together with its hiragana reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadWord {
    pub text: String,
    pub reading: String,
}

impl ReadWord {
    pub fn new(text: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reading: reading.into(),
        }
    }

    pub fn reading_len(&self) -> usize {
        self.reading.chars().count()
    }
}

/// Reading interval is [reading_start, reading_end).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    pub word: String,
    pub reading_start: usize,
    pub reading_end: usize,
}

impl WordSpan {
    pub fn contains(&self, reading_index: usize) -> bool {
        self.reading_start <= reading_index && reading_index < self.reading_end
    }
}

/// Where an assessed word came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOrigin {
    /// Position in the reference word list.
    Reference(usize),
    /// Position in the transcribed word list of a word with no reference
    /// counterpart.
    Unnecessary(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordAssessment {
    pub text: String,
    pub is_correct: bool,
    pub suggestion: Option<String>,
    #[serde(skip)]
    pub origin: WordOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub text_score: u8,
    pub intonation_score: u8,
    pub clarity_score: u8,
    pub final_score: u8,
    pub feedback: String,
}

/// Output of the auxiliary/incorrect word classifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordClassification {
    pub auxiliary_words: HashSet<String>,
    pub incorrect_word_suggestions: HashMap<String, String>,
    pub personalized_feedback: Option<String>,
}

/// Pitch (F0) and first-formant tracks in Hz, already extracted from audio.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcousticFeatures {
    pub user_pitch_hz: Vec<f32>,
    pub reference_pitch_hz: Option<Vec<f32>>,
    pub user_f1_hz: Vec<f32>,
    pub reference_f1_hz: Option<Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub reference_text: String,
    /// `None` when transcription was unavailable.
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub acoustics: AcousticFeatures,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub score: u8,
    pub feedback: String,
    pub text_score: u8,
    pub intonation_score: u8,
    pub clarity_score: u8,
    pub intonation: String,
    pub clarity: String,
    pub transcription: String,
    pub words: Vec<WordAssessment>,
    pub phoneme_errors: Vec<PhonemeError>,
    pub personalized_feedback: String,
}
