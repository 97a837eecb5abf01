use std::path::Path;

use serde::Deserialize;

use crate::error::AssessmentError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssessorConfig {
    /// Optional JSON lexicon mapping surface forms to kana readings. The
    /// built-in lexicon is used when unset.
    pub lexicon_path: Option<String>,
    /// Recordings smaller than this are rejected before transcription.
    pub min_audio_bytes: usize,
    /// Particles treated as auxiliary when the word classifier is unavailable.
    pub fallback_auxiliary_words: Vec<String>,
}

impl AssessorConfig {
    pub const DEFAULT_MIN_AUDIO_BYTES: usize = 1000;
    pub const DEFAULT_AUXILIARY_WORDS: [&'static str; 5] = ["ね", "よ", "な", "わ", "さ"];

    pub fn load(path: &Path) -> Result<Self, AssessmentError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AssessmentError::io("read assessor config", e))?;
        serde_json::from_str(&data).map_err(|e| AssessmentError::json("assessor config", e))
    }
}

impl Default for AssessorConfig {
    fn default() -> Self {
        Self {
            lexicon_path: None,
            min_audio_bytes: Self::DEFAULT_MIN_AUDIO_BYTES,
            fallback_auxiliary_words: Self::DEFAULT_AUXILIARY_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assessor_config_default() {
        let config = AssessorConfig::default();
        assert!(config.lexicon_path.is_none());
        assert_eq!(config.min_audio_bytes, 1000);
        assert_eq!(config.fallback_auxiliary_words, ["ね", "よ", "な", "わ", "さ"]);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AssessorConfig =
            serde_json::from_str(r#"{"lexicon_path": "lexicon.json"}"#).expect("valid config json");
        assert_eq!(config.lexicon_path.as_deref(), Some("lexicon.json"));
        assert_eq!(config.min_audio_bytes, AssessorConfig::DEFAULT_MIN_AUDIO_BYTES);
        assert_eq!(config.fallback_auxiliary_words.len(), 5);
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join("pronunciation_rs_config_load.json");
        std::fs::write(&path, r#"{"min_audio_bytes": 10, "fallback_auxiliary_words": ["ね"]}"#)
            .expect("write config");
        let config = AssessorConfig::load(&path).expect("config should load");
        assert_eq!(config.min_audio_bytes, 10);
        assert_eq!(config.fallback_auxiliary_words, ["ね"]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_fails_on_missing_file() {
        let result = AssessorConfig::load(Path::new("/nonexistent/assessor.json"));
        assert!(matches!(result, Err(AssessmentError::Io { .. })));
    }
}
