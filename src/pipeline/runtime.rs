use crate::alignment::mapping::{attach_phoneme_errors, word_spans};
use crate::alignment::normalization::{NormalizedText, PhoneticNormalizer};
use crate::alignment::phoneme::phoneme_errors;
use crate::audio::{AudioSource, SpeechSamples};
use crate::config::AssessorConfig;
use crate::error::AssessmentError;
use crate::pipeline::defaults::StaticParticleClassifier;
use crate::pipeline::traits::{
    AcousticFeatureExtractor, SequenceAligner, Transcriber, WordClassifier, WordMatcher,
};
use crate::scoring::acoustic::{clarity_score, intonation_score};
use crate::scoring::feedback::personalized_feedback;
use crate::scoring::{compose_scores, text_similarity_score};
use crate::types::{
    AcousticFeatures, AssessmentReport, AssessmentRequest, EditOp, PhonemeError,
    WordAssessment, WordClassification, WordOrigin,
};

const UNANALYZABLE_STATUS: &str = "cannot analyze (text did not match)";

pub struct PronunciationAssessor {
    min_audio_bytes: usize,
    normalizer: PhoneticNormalizer,
    sequence_aligner: Box<dyn SequenceAligner>,
    word_matcher: Box<dyn WordMatcher>,
    word_classifier: Option<Box<dyn WordClassifier>>,
    fallback_classifier: StaticParticleClassifier,
    transcriber: Option<Box<dyn Transcriber>>,
    feature_extractor: Option<Box<dyn AcousticFeatureExtractor>>,
}

pub(crate) struct PronunciationAssessorParts {
    pub config: AssessorConfig,
    pub normalizer: PhoneticNormalizer,
    pub sequence_aligner: Box<dyn SequenceAligner>,
    pub word_matcher: Box<dyn WordMatcher>,
    pub word_classifier: Option<Box<dyn WordClassifier>>,
    pub transcriber: Option<Box<dyn Transcriber>>,
    pub feature_extractor: Option<Box<dyn AcousticFeatureExtractor>>,
}

impl PronunciationAssessor {
    pub(crate) fn from_parts(parts: PronunciationAssessorParts) -> Self {
        Self {
            min_audio_bytes: parts.config.min_audio_bytes,
            fallback_classifier: StaticParticleClassifier::new(
                parts.config.fallback_auxiliary_words,
            ),
            normalizer: parts.normalizer,
            sequence_aligner: parts.sequence_aligner,
            word_matcher: parts.word_matcher,
            word_classifier: parts.word_classifier,
            transcriber: parts.transcriber,
            feature_extractor: parts.feature_extractor,
        }
    }

    /// Scores a transcript against its reference sentence. Degraded inputs
    /// produce zeroed scores and explanatory text, never an error.
    pub fn assess(&self, request: &AssessmentRequest) -> AssessmentReport {
        let reference_text = request.reference_text.as_str();
        let transcript = request.transcript.as_deref().unwrap_or(reference_text);

        let reference = self.normalizer.analyze(reference_text);
        let hypothesis = self.normalizer.analyze(transcript);
        let script = self
            .sequence_aligner
            .align(&reference.units, &hypothesis.units);
        let errors = phoneme_errors(&script, &reference.units, &hypothesis.units);

        let classification = self.classify(reference_text, transcript, &errors);
        let mut words =
            self.word_matcher
                .match_words(&reference.words, &hypothesis.words, &classification);
        let attachable: Vec<PhonemeError> = errors
            .iter()
            .filter(|e| !is_extra_word_addition(e, &script, &hypothesis, &classification, &words))
            .cloned()
            .collect();
        attach_phoneme_errors(&mut words, &word_spans(&reference.words), &attachable);

        let text_score = text_similarity_score(reference_text, transcript);
        let acoustics = &request.acoustics;
        let intonation = intonation_score(
            &acoustics.user_pitch_hz,
            acoustics.reference_pitch_hz.as_deref(),
        );
        let clarity = clarity_score(&acoustics.user_f1_hz, acoustics.reference_f1_hz.as_deref());
        let breakdown = compose_scores(text_score, intonation.score, clarity.score);
        let (intonation_status, clarity_status) = if breakdown.text_score == 0 {
            (UNANALYZABLE_STATUS.to_string(), UNANALYZABLE_STATUS.to_string())
        } else {
            (intonation.status, clarity.status)
        };

        let personalized = personalized_feedback(&words, &classification);
        tracing::info!(
            score = breakdown.final_score,
            text_score = breakdown.text_score,
            words = words.len(),
            phoneme_errors = errors.len(),
            degraded = reference.degraded || hypothesis.degraded,
            "assessed pronunciation"
        );

        AssessmentReport {
            score: breakdown.final_score,
            feedback: breakdown.feedback,
            text_score: breakdown.text_score,
            intonation_score: breakdown.intonation_score,
            clarity_score: breakdown.clarity_score,
            intonation: intonation_status,
            clarity: clarity_status,
            transcription: transcript.to_string(),
            words,
            phoneme_errors: errors,
            personalized_feedback: personalized,
        }
    }

    /// Transcribes and measures a recording, then assesses it. Only an
    /// undersized or unreadable recording is an error.
    pub fn assess_audio(
        &self,
        reference_text: &str,
        audio: &dyn AudioSource,
        user_speech: &SpeechSamples,
        reference_speech: Option<&SpeechSamples>,
    ) -> Result<AssessmentReport, AssessmentError> {
        if audio.size() < self.min_audio_bytes {
            return Err(AssessmentError::rejected_audio(format!(
                "{} bytes is below the {} byte minimum",
                audio.size(),
                self.min_audio_bytes
            )));
        }

        let transcript = match &self.transcriber {
            Some(transcriber) => {
                let bytes = audio.read_bytes()?;
                match transcriber.transcribe(&bytes) {
                    Ok(text) => Some(text),
                    Err(err) => {
                        tracing::warn!(
                            error = %err,
                            "transcription failed; using the reference text"
                        );
                        None
                    }
                }
            }
            None => None,
        };

        let acoustics = match &self.feature_extractor {
            Some(extractor) => AcousticFeatures {
                user_pitch_hz: extractor
                    .pitch_contour(&user_speech.samples, user_speech.sample_rate_hz),
                reference_pitch_hz: reference_speech
                    .map(|s| extractor.pitch_contour(&s.samples, s.sample_rate_hz)),
                user_f1_hz: extractor
                    .first_formant(&user_speech.samples, user_speech.sample_rate_hz),
                reference_f1_hz: reference_speech
                    .map(|s| extractor.first_formant(&s.samples, s.sample_rate_hz)),
            },
            None => AcousticFeatures::default(),
        };

        Ok(self.assess(&AssessmentRequest {
            reference_text: reference_text.to_string(),
            transcript,
            acoustics,
        }))
    }

    fn classify(
        &self,
        reference_text: &str,
        transcript: &str,
        errors: &[PhonemeError],
    ) -> WordClassification {
        let Some(classifier) = &self.word_classifier else {
            return self.fallback_classifier.classification();
        };
        match classifier.classify(reference_text, transcript, errors) {
            Ok(classification) => classification,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "word classifier unavailable; using the static particle set"
                );
                self.fallback_classifier.classification()
            }
        }
    }
}

/// Extra units spoken as part of an auxiliary word, or of a word already
/// reported as unnecessary, do not count against the neighbouring reference
/// word.
fn is_extra_word_addition(
    error: &PhonemeError,
    script: &[EditOp],
    hypothesis: &NormalizedText,
    classification: &WordClassification,
    words: &[WordAssessment],
) -> bool {
    let Some(EditOp::Addition(h)) = script.get(error.position) else {
        return false;
    };
    let Some(word_index) = hypothesis.units.get(*h).and_then(|unit| unit.word_index) else {
        return false;
    };
    let auxiliary = hypothesis
        .words
        .get(word_index)
        .is_some_and(|word| classification.auxiliary_words.contains(&word.text));
    auxiliary
        || words
            .iter()
            .any(|w| w.origin == WordOrigin::Unnecessary(word_index))
}
