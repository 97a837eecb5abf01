pub mod acoustic;
pub mod feedback;

use crate::alignment::normalization::clean_text;
use crate::types::ScoreBreakdown;

/// Weights in percent: text, intonation, clarity.
const TEXT_WEIGHT: u32 = 70;
const INTONATION_WEIGHT: u32 = 15;
const CLARITY_WEIGHT: u32 = 15;
const BONUS_THRESHOLD: u8 = 95;
const BONUS_FACTOR: f64 = 1.05;

/// Position-by-position character agreement between the cleaned texts,
/// penalized by their length difference. Returns 0..=100.
pub fn text_similarity_score(reference: &str, transcript: &str) -> u8 {
    if transcript.trim().is_empty() {
        return 0;
    }
    let reference: Vec<char> = clean_text(reference).chars().collect();
    let transcript: Vec<char> = clean_text(transcript).chars().collect();
    if reference.is_empty() || transcript.is_empty() {
        return 0;
    }

    let matches = reference
        .iter()
        .zip(transcript.iter())
        .filter(|(a, b)| a == b)
        .count();
    let max_len = reference.len().max(transcript.len()) as f64;
    let len_diff = reference.len().abs_diff(transcript.len()) as f64;
    let similarity = (matches as f64 / max_len) * (1.0 - 0.5 * len_diff / max_len);
    (similarity * 100.0).clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTier {
    Unassessable,
    Retry,
    NeedsMuchWork,
    Average,
    FairlyGood,
    Good,
    VeryGood,
    Excellent,
}

impl FeedbackTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Self::Unassessable,
            1..=9 => Self::Retry,
            10..=29 => Self::NeedsMuchWork,
            30..=49 => Self::Average,
            50..=69 => Self::FairlyGood,
            70..=84 => Self::Good,
            85..=94 => Self::VeryGood,
            _ => Self::Excellent,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Unassessable => {
                "Cannot assess: no text matching the reference sentence was recognized."
            }
            Self::Retry => "Try reading the reference sentence aloud and record again.",
            Self::NeedsMuchWork => "Your pronunciation needs a lot more work.",
            Self::Average => "Average pronunciation; several areas need improvement.",
            Self::FairlyGood => "Fairly good pronunciation; a few details need work.",
            Self::Good => "Good pronunciation!",
            Self::VeryGood => "Very good pronunciation!",
            Self::Excellent => "Excellent pronunciation!",
        }
    }
}

/// Combine the sub-scores into the final score.
///
/// A zero text score zeroes everything. Otherwise the weighted sum is used,
/// scaled by `min(1, sum/300 * 1.05)` when every sub-score is at least 95,
/// then truncated.
pub fn compose_scores(text_score: u8, intonation_score: u8, clarity_score: u8) -> ScoreBreakdown {
    if text_score == 0 {
        return ScoreBreakdown {
            text_score: 0,
            intonation_score: 0,
            clarity_score: 0,
            final_score: 0,
            feedback: FeedbackTier::Unassessable.message().to_string(),
        };
    }

    let (t, i, c) = (
        text_score.min(100) as u32,
        intonation_score.min(100) as u32,
        clarity_score.min(100) as u32,
    );
    let weighted =
        (TEXT_WEIGHT * t + INTONATION_WEIGHT * i + CLARITY_WEIGHT * c) as f64 / 100.0;
    let scaled = if t >= BONUS_THRESHOLD as u32
        && i >= BONUS_THRESHOLD as u32
        && c >= BONUS_THRESHOLD as u32
    {
        let bonus = ((t + i + c) as f64 / 300.0 * BONUS_FACTOR).min(1.0);
        weighted * bonus
    } else {
        weighted
    };
    let final_score = scaled.clamp(0.0, 100.0) as u8;

    tracing::debug!(
        text_score = t,
        intonation_score = i,
        clarity_score = c,
        final_score,
        "composed pronunciation score"
    );

    ScoreBreakdown {
        text_score: t as u8,
        intonation_score: i as u8,
        clarity_score: c as u8,
        final_score,
        feedback: FeedbackTier::from_score(final_score).message().to_string(),
    }
}
