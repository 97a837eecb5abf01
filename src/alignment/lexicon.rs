use std::collections::HashMap;
use std::path::Path;

use crate::alignment::kana::{katakana_to_hiragana, push_script_tokens};
use crate::error::AssessmentError;
use crate::pipeline::traits::ReadingConverter;
use crate::types::ReadingToken;

const BUILTIN_LEXICON: &str = include_str!("builtin_lexicon.json");

/// Reading converter backed by a surface-form lexicon.
///
/// Segmentation is greedy longest-match; text the lexicon does not cover is
/// split by script like [`KanaReadingConverter`](crate::alignment::kana::KanaReadingConverter).
/// Every reading is also a key, so kana transcripts segment like the kanji
/// they spell.
#[derive(Debug, Clone, Default)]
pub struct LexiconReadingConverter {
    entries: HashMap<String, String>,
    max_key_chars: usize,
}

impl LexiconReadingConverter {
    pub fn new(entries: HashMap<String, String>) -> Self {
        let mut entries: HashMap<String, String> = entries
            .into_iter()
            .filter(|(surface, reading)| !surface.is_empty() && !reading.trim().is_empty())
            .map(|(surface, reading)| (surface, katakana_to_hiragana(reading.trim())))
            .collect();
        let readings: Vec<String> = entries.values().cloned().collect();
        for reading in readings {
            entries.entry(reading.clone()).or_insert(reading);
        }
        let max_key_chars = entries
            .keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);
        Self {
            entries,
            max_key_chars,
        }
    }

    pub fn load(path: &Path) -> Result<Self, AssessmentError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| AssessmentError::io("read lexicon", e))?;
        Self::from_json(&data, "lexicon")
    }

    /// Everyday vocabulary bundled with the crate, covering the sample
    /// sentences.
    pub fn builtin() -> Result<Self, AssessmentError> {
        Self::from_json(BUILTIN_LEXICON, "built-in lexicon")
    }

    fn from_json(data: &str, document: &'static str) -> Result<Self, AssessmentError> {
        let raw: HashMap<String, String> =
            serde_json::from_str(data).map_err(|e| AssessmentError::json(document, e))?;
        Ok(Self::new(raw))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn longest_match(&self, chunk: &str, chars: &[(usize, char)], pos: usize) -> Option<(usize, &str)> {
        let longest = self.max_key_chars.min(chars.len() - pos);
        (1..=longest).rev().find_map(|len| {
            let end = pos + len;
            let byte_end = chars.get(end).map(|&(offset, _)| offset).unwrap_or(chunk.len());
            let key = &chunk[chars[pos].0..byte_end];
            self.entries.get(key).map(|reading| (end, reading.as_str()))
        })
    }

    fn convert_chunk(&self, chunk: &str, out: &mut Vec<ReadingToken>) {
        let chars: Vec<(usize, char)> = chunk.char_indices().collect();
        let mut pos = 0usize;
        let mut pending_start: Option<usize> = None;
        while pos < chars.len() {
            match self.longest_match(chunk, &chars, pos) {
                Some((end, reading)) => {
                    let byte_start = chars[pos].0;
                    if let Some(start) = pending_start.take() {
                        push_script_tokens(&chunk[start..byte_start], out);
                    }
                    let byte_end = chars.get(end).map(|&(offset, _)| offset).unwrap_or(chunk.len());
                    out.push(ReadingToken {
                        source: chunk[byte_start..byte_end].to_string(),
                        reading: reading.to_string(),
                    });
                    pos = end;
                }
                None => {
                    pending_start.get_or_insert(chars[pos].0);
                    pos += 1;
                }
            }
        }
        if let Some(start) = pending_start {
            push_script_tokens(&chunk[start..], out);
        }
    }
}

impl ReadingConverter for LexiconReadingConverter {
    fn to_reading(&self, text: &str) -> Result<Vec<ReadingToken>, AssessmentError> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            self.convert_chunk(chunk, &mut tokens);
        }
        Ok(tokens)
    }
}
