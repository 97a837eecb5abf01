use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessmentError {
    /// A lexicon, config file or recording could not be read.
    #[error("could not {action}: {source}")]
    Io {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {document}: {source}")]
    Json {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// An external collaborator (transcription, classification, reading
    /// conversion) failed.
    #[error("{stage} failed: {message}")]
    Service {
        stage: &'static str,
        message: String,
    },
    #[error("recording rejected: {reason}")]
    RejectedAudio { reason: String },
}

impl AssessmentError {
    pub(crate) fn io(action: &'static str, source: std::io::Error) -> Self {
        Self::Io { action, source }
    }

    pub(crate) fn json(document: &'static str, source: serde_json::Error) -> Self {
        Self::Json { document, source }
    }

    pub fn service(stage: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Service {
            stage,
            message: err.to_string(),
        }
    }

    pub(crate) fn rejected_audio(reason: impl Into<String>) -> Self {
        Self::RejectedAudio {
            reason: reason.into(),
        }
    }
}
