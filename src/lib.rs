pub mod alignment;
pub mod audio;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod samples;
pub mod scoring;
pub mod types;

pub use audio::{AudioSource, FileAudioSource, InMemoryAudioSource, SpeechSamples};
pub use config::AssessorConfig;
pub use error::AssessmentError;
pub use pipeline::builder::PronunciationAssessorBuilder;
pub use pipeline::defaults::{
    ChatCompletionClassifier, GreedyWordMatcher, LcsSequenceAligner, StaticParticleClassifier,
};
pub use pipeline::runtime::PronunciationAssessor;
pub use pipeline::traits::{
    AcousticFeatureExtractor, ChatClient, ReadingConverter, SequenceAligner, Transcriber,
    WordClassifier, WordMatcher,
};
pub use samples::sample_sentence;
pub use types::{
    AcousticFeatures, AssessmentReport, AssessmentRequest, EditOp, PhonemeError,
    PhonemeErrorKind, PhoneticUnit, ReadWord, WordAssessment, WordClassification,
};
