use std::path::Path;

use crate::alignment::lexicon::LexiconReadingConverter;
use crate::alignment::normalization::PhoneticNormalizer;
use crate::config::AssessorConfig;
use crate::error::AssessmentError;
use crate::pipeline::defaults::{GreedyWordMatcher, LcsSequenceAligner};
use crate::pipeline::runtime::{PronunciationAssessor, PronunciationAssessorParts};
use crate::pipeline::traits::{
    AcousticFeatureExtractor, ReadingConverter, SequenceAligner, Transcriber, WordClassifier,
    WordMatcher,
};

pub struct PronunciationAssessorBuilder {
    config: AssessorConfig,
    reading_converter: Option<Box<dyn ReadingConverter>>,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
    word_matcher: Option<Box<dyn WordMatcher>>,
    word_classifier: Option<Box<dyn WordClassifier>>,
    transcriber: Option<Box<dyn Transcriber>>,
    feature_extractor: Option<Box<dyn AcousticFeatureExtractor>>,
}

impl PronunciationAssessorBuilder {
    pub fn new(config: AssessorConfig) -> Self {
        Self {
            config,
            reading_converter: None,
            sequence_aligner: None,
            word_matcher: None,
            word_classifier: None,
            transcriber: None,
            feature_extractor: None,
        }
    }

    pub fn with_reading_converter(mut self, reading_converter: Box<dyn ReadingConverter>) -> Self {
        self.reading_converter = Some(reading_converter);
        self
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    pub fn with_word_matcher(mut self, word_matcher: Box<dyn WordMatcher>) -> Self {
        self.word_matcher = Some(word_matcher);
        self
    }

    pub fn with_word_classifier(mut self, word_classifier: Box<dyn WordClassifier>) -> Self {
        self.word_classifier = Some(word_classifier);
        self
    }

    pub fn with_transcriber(mut self, transcriber: Box<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    pub fn with_feature_extractor(
        mut self,
        feature_extractor: Box<dyn AcousticFeatureExtractor>,
    ) -> Self {
        self.feature_extractor = Some(feature_extractor);
        self
    }

    pub fn build(self) -> Result<PronunciationAssessor, AssessmentError> {
        let reading_converter: Box<dyn ReadingConverter> = match self.reading_converter {
            Some(converter) => converter,
            None => match &self.config.lexicon_path {
                Some(path) => {
                    let lexicon = LexiconReadingConverter::load(Path::new(path))?;
                    tracing::info!(entries = lexicon.len(), path = %path, "loaded lexicon");
                    Box::new(lexicon)
                }
                None => {
                    let lexicon = LexiconReadingConverter::builtin()?;
                    tracing::debug!(entries = lexicon.len(), "using built-in lexicon");
                    Box::new(lexicon)
                }
            },
        };

        Ok(PronunciationAssessor::from_parts(PronunciationAssessorParts {
            config: self.config,
            normalizer: PhoneticNormalizer::new(reading_converter),
            sequence_aligner: self
                .sequence_aligner
                .unwrap_or_else(|| Box::new(LcsSequenceAligner)),
            word_matcher: self
                .word_matcher
                .unwrap_or_else(|| Box::new(GreedyWordMatcher)),
            word_classifier: self.word_classifier,
            transcriber: self.transcriber,
            feature_extractor: self.feature_extractor,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AcousticFeatures, AssessmentRequest, EditOp, PhoneticUnit};

    struct EverythingMissing;

    impl SequenceAligner for EverythingMissing {
        fn align(&self, reference: &[PhoneticUnit], _hypothesis: &[PhoneticUnit]) -> Vec<EditOp> {
            (0..reference.len()).map(EditOp::Omission).collect()
        }
    }

    fn request(reference: &str, transcript: &str) -> AssessmentRequest {
        AssessmentRequest {
            reference_text: reference.to_string(),
            transcript: Some(transcript.to_string()),
            acoustics: AcousticFeatures::default(),
        }
    }

    #[test]
    fn build_with_defaults() {
        let assessor = PronunciationAssessorBuilder::new(AssessorConfig::default())
            .build()
            .expect("build should succeed");
        let report = assessor.assess(&request("本", "本"));
        assert_eq!(report.text_score, 100);
    }

    #[test]
    fn default_build_reads_kanji() {
        let assessor = PronunciationAssessorBuilder::new(AssessorConfig::default())
            .build()
            .expect("build should succeed");
        let report = assessor.assess(&request(
            "図書館で本を借りました",
            "としょかんでほんをかりました",
        ));
        let surfaces: Vec<&str> = report.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(surfaces, ["図書館", "で", "本", "を", "借りました"]);
        assert!(report.words.iter().all(|w| w.is_correct));
        assert!(report.phoneme_errors.is_empty());
    }

    #[test]
    fn build_loads_configured_lexicon() {
        let path = std::env::temp_dir().join("pronunciation_rs_builder_lexicon.json");
        std::fs::write(&path, r#"{"今日": "きょう", "天気": "てんき"}"#).expect("write lexicon");
        let config = AssessorConfig {
            lexicon_path: Some(path.to_string_lossy().to_string()),
            ..AssessorConfig::default()
        };
        let assessor = PronunciationAssessorBuilder::new(config)
            .build()
            .expect("build should succeed");
        let report = assessor.assess(&request("今日", "きょう"));
        assert!(report.words.iter().all(|w| w.is_correct));
        assert!(report.phoneme_errors.is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn build_fails_on_missing_lexicon() {
        let config = AssessorConfig {
            lexicon_path: Some("/nonexistent/lexicon.json".to_string()),
            ..AssessorConfig::default()
        };
        let result = PronunciationAssessorBuilder::new(config).build();
        assert!(matches!(result, Err(AssessmentError::Io { .. })));
    }

    #[test]
    fn custom_sequence_aligner_is_used() {
        let assessor = PronunciationAssessorBuilder::new(AssessorConfig::default())
            .with_sequence_aligner(Box::new(EverythingMissing))
            .build()
            .expect("build should succeed");
        let report = assessor.assess(&request("ほん", "ほん"));
        assert_eq!(report.phoneme_errors.len(), 2);
        assert!(report.words.iter().all(|w| !w.is_correct));
    }
}
