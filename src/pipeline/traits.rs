use crate::error::AssessmentError;
use crate::types::{
    EditOp, PhonemeError, PhoneticUnit, ReadWord, ReadingToken, WordAssessment,
    WordClassification,
};

/// Surface text to kana readings, one token per word.
pub trait ReadingConverter: Send + Sync {
    fn to_reading(&self, text: &str) -> Result<Vec<ReadingToken>, AssessmentError>;
}

pub trait SequenceAligner: Send + Sync {
    fn align(&self, reference: &[PhoneticUnit], hypothesis: &[PhoneticUnit]) -> Vec<EditOp>;
}

pub trait WordMatcher: Send + Sync {
    fn match_words(
        &self,
        reference: &[ReadWord],
        transcribed: &[ReadWord],
        classification: &WordClassification,
    ) -> Vec<WordAssessment>;
}

/// Labels auxiliary words and suggests fixes for incorrect ones.
pub trait WordClassifier: Send + Sync {
    fn classify(
        &self,
        reference: &str,
        transcript: &str,
        phoneme_errors: &[PhonemeError],
    ) -> Result<WordClassification, AssessmentError>;
}

/// Speech-to-text over the raw bytes of an uploaded recording.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &[u8]) -> Result<String, AssessmentError>;
}

pub trait AcousticFeatureExtractor: Send + Sync {
    /// F0 track in Hz; unvoiced frames are left out.
    fn pitch_contour(&self, samples: &[f32], sample_rate_hz: u32) -> Vec<f32>;
    /// First-formant track in Hz.
    fn first_formant(&self, samples: &[f32], sample_rate_hz: u32) -> Vec<f32>;
}

/// Single-turn text completion used by [`crate::pipeline::defaults::ChatCompletionClassifier`].
pub trait ChatClient: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, AssessmentError>;
}
