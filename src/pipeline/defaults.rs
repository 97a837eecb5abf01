use std::collections::HashSet;

use serde::Deserialize;

use crate::alignment::mapping::describe_error;
use crate::alignment::phoneme::align_phonemes;
use crate::alignment::words::align_words;
use crate::config::AssessorConfig;
use crate::error::AssessmentError;
use crate::pipeline::traits::{ChatClient, SequenceAligner, WordClassifier, WordMatcher};
use crate::types::{
    EditOp, PhonemeError, PhonemeErrorKind, PhoneticUnit, ReadWord, WordAssessment,
    WordClassification,
};

pub struct LcsSequenceAligner;

impl SequenceAligner for LcsSequenceAligner {
    fn align(&self, reference: &[PhoneticUnit], hypothesis: &[PhoneticUnit]) -> Vec<EditOp> {
        align_phonemes(reference, hypothesis)
    }
}

pub struct GreedyWordMatcher;

impl WordMatcher for GreedyWordMatcher {
    fn match_words(
        &self,
        reference: &[ReadWord],
        transcribed: &[ReadWord],
        classification: &WordClassification,
    ) -> Vec<WordAssessment> {
        align_words(reference, transcribed, classification)
    }
}

/// Fixed particle set, no suggestions and no feedback.
#[derive(Debug, Clone)]
pub struct StaticParticleClassifier {
    auxiliary_words: HashSet<String>,
}

impl StaticParticleClassifier {
    pub fn new<I, S>(auxiliary_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            auxiliary_words: auxiliary_words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classification(&self) -> WordClassification {
        WordClassification {
            auxiliary_words: self.auxiliary_words.clone(),
            ..WordClassification::default()
        }
    }
}

impl Default for StaticParticleClassifier {
    fn default() -> Self {
        Self::new(AssessorConfig::DEFAULT_AUXILIARY_WORDS)
    }
}

impl WordClassifier for StaticParticleClassifier {
    fn classify(
        &self,
        _reference: &str,
        _transcript: &str,
        _phoneme_errors: &[PhonemeError],
    ) -> Result<WordClassification, AssessmentError> {
        Ok(self.classification())
    }
}

/// Asks a chat model to classify words and returns its JSON answer.
pub struct ChatCompletionClassifier<C: ChatClient> {
    client: C,
}

#[derive(Debug, Deserialize)]
struct ClassifierResponse {
    #[serde(default)]
    incorrect_words: Vec<IncorrectWord>,
    #[serde(default)]
    auxiliary_words: Vec<String>,
    #[serde(default)]
    personalized_feedback: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IncorrectWord {
    word: String,
    #[serde(default)]
    suggestion: String,
}

impl<C: ChatClient> ChatCompletionClassifier<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: ChatClient> WordClassifier for ChatCompletionClassifier<C> {
    fn classify(
        &self,
        reference: &str,
        transcript: &str,
        phoneme_errors: &[PhonemeError],
    ) -> Result<WordClassification, AssessmentError> {
        let prompt = build_prompt(reference, transcript, phoneme_errors);
        let content = self.client.complete(&prompt)?;
        let classification = parse_classification(&content)?;
        tracing::debug!(
            auxiliary = classification.auxiliary_words.len(),
            incorrect = classification.incorrect_word_suggestions.len(),
            "word classifier answered"
        );
        Ok(classification)
    }
}

pub(crate) fn build_prompt(
    reference: &str,
    transcript: &str,
    phoneme_errors: &[PhonemeError],
) -> String {
    let mut phoneme_info = String::new();
    if !phoneme_errors.is_empty() {
        phoneme_info.push_str("Phoneme errors:\n");
        for error in phoneme_errors {
            let kind = match error.kind {
                PhonemeErrorKind::Substitution => "substitution",
                PhonemeErrorKind::Omission => "omission",
                PhonemeErrorKind::Addition => "addition",
            };
            phoneme_info.push_str(&format!("- {} (type: {kind})\n", describe_error(error)));
        }
    }

    format!(
        "\nAnalyze these two Japanese sentences:\n\
         - Original: '{reference}'\n\
         - Transcription: '{transcript}'\n\
         \n\
         {phoneme_info}\n\
         Identify:\n\
         1. Words that are incorrect or different\n\
         2. Auxiliary words/particles (like ね, よ) that don't affect the core meaning\n\
         3. Brief pronunciation suggestions, incorporating phoneme error details when relevant\n\
         \n\
         Return ONLY a JSON object with this structure:\n\
         {{\n  \"incorrect_words\": [\n    {{\"word\": \"original_word\", \"transcription_word\": \"spoken_word\", \"suggestion\": \"pronunciation_tip\"}}\n  ],\n  \"auxiliary_words\": [\"word1\", \"word2\"],\n  \"personalized_feedback\": \"brief_encouraging_feedback\"\n}}\n"
    )
}

/// Parses the outermost `{...}` span of a model answer.
pub(crate) fn parse_classification(content: &str) -> Result<WordClassification, AssessmentError> {
    let (start, end) = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start <= end => (start, end),
        _ => {
            return Err(AssessmentError::service(
                "word classifier",
                "answer contains no JSON object",
            ))
        }
    };

    let response: ClassifierResponse = serde_json::from_str(&content[start..=end])
        .map_err(|e| AssessmentError::json("word classifier answer", e))?;
    Ok(WordClassification {
        auxiliary_words: response.auxiliary_words.into_iter().collect(),
        incorrect_word_suggestions: response
            .incorrect_words
            .into_iter()
            .map(|w| (w.word, w.suggestion))
            .collect(),
        personalized_feedback: response
            .personalized_feedback
            .filter(|f| !f.trim().is_empty()),
    })
}
