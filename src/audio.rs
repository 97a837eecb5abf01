use std::path::{Path, PathBuf};

use crate::error::AssessmentError;

/// Byte-level access to an uploaded recording.
pub trait AudioSource: Send + Sync {
    fn read_bytes(&self) -> Result<Vec<u8>, AssessmentError>;
    fn size(&self) -> usize;
}

#[derive(Debug, Clone)]
pub struct FileAudioSource {
    path: PathBuf,
    size: usize,
}

impl FileAudioSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AssessmentError> {
        let path = path.as_ref().to_path_buf();
        let metadata =
            std::fs::metadata(&path).map_err(|e| AssessmentError::io("stat audio file", e))?;
        Ok(Self {
            path,
            size: metadata.len() as usize,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AudioSource for FileAudioSource {
    fn read_bytes(&self) -> Result<Vec<u8>, AssessmentError> {
        std::fs::read(&self.path).map_err(|e| AssessmentError::io("read audio file", e))
    }

    fn size(&self) -> usize {
        self.size
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAudioSource {
    bytes: Vec<u8>,
}

impl InMemoryAudioSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl AudioSource for InMemoryAudioSource {
    fn read_bytes(&self) -> Result<Vec<u8>, AssessmentError> {
        Ok(self.bytes.clone())
    }

    fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Decoded mono samples handed to the acoustic feature extractor.
#[derive(Debug, Clone, Default)]
pub struct SpeechSamples {
    pub sample_rate_hz: u32,
    pub samples: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_source_reports_size_and_bytes() {
        let path = std::env::temp_dir().join("pronunciation_rs_audio_source.wav");
        std::fs::write(&path, [1u8, 2, 3, 4]).expect("write audio");
        let source = FileAudioSource::open(&path).expect("open audio");
        assert_eq!(source.size(), 4);
        assert_eq!(source.read_bytes().expect("read audio"), [1, 2, 3, 4]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_fails_to_open() {
        let result = FileAudioSource::open("/nonexistent/recording.wav");
        assert!(matches!(result, Err(AssessmentError::Io { .. })));
    }

    #[test]
    fn in_memory_source() {
        let source = InMemoryAudioSource::new(vec![0u8; 16]);
        assert_eq!(source.size(), 16);
        assert_eq!(source.read_bytes().expect("read").len(), 16);
    }
}
