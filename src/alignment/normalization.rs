use crate::pipeline::traits::ReadingConverter;
use crate::types::{PhoneticUnit, ReadWord};

const JAPANESE_PUNCTUATION: &str = "、。！？；：「」『』・〜";

/// Drop ASCII and Japanese punctuation and anything outside kana, kanji,
/// ASCII alphanumerics and whitespace.
pub fn clean_text(text: &str) -> String {
    text.chars().filter(|&c| keep_char(c)).collect()
}

fn keep_char(c: char) -> bool {
    if c.is_ascii_punctuation() || JAPANESE_PUNCTUATION.contains(c) {
        return false;
    }
    matches!(
        c,
        '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FFF}' | '\u{3005}'
    ) || c.is_whitespace()
        || c.is_ascii_alphanumeric()
}

/// Words and phonetic units of one normalized text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedText {
    pub words: Vec<ReadWord>,
    pub units: Vec<PhoneticUnit>,
    /// Set when the reading converter failed and raw characters were used.
    pub degraded: bool,
}

impl NormalizedText {
    pub fn reading(&self) -> String {
        self.units.iter().map(|u| u.unit).collect()
    }
}

pub struct PhoneticNormalizer {
    converter: Box<dyn ReadingConverter>,
}

impl PhoneticNormalizer {
    pub fn new(converter: Box<dyn ReadingConverter>) -> Self {
        Self { converter }
    }

    pub fn normalize(&self, text: &str) -> Vec<PhoneticUnit> {
        self.analyze(text).units
    }

    pub fn analyze(&self, text: &str) -> NormalizedText {
        let cleaned = clean_text(text);
        if cleaned.trim().is_empty() {
            return NormalizedText::default();
        }

        match self.converter.to_reading(&cleaned) {
            Ok(tokens) => {
                let words: Vec<ReadWord> = tokens
                    .into_iter()
                    .filter(|t| !t.source.trim().is_empty())
                    .map(|t| {
                        let reading: String =
                            t.reading.chars().filter(|c| !c.is_whitespace()).collect();
                        ReadWord::new(t.source, reading)
                    })
                    .collect();
                let units = words
                    .iter()
                    .enumerate()
                    .flat_map(|(word_index, word)| {
                        word.reading.chars().map(move |unit| PhoneticUnit {
                            unit,
                            word_index: Some(word_index),
                        })
                    })
                    .collect();
                NormalizedText {
                    words,
                    units,
                    degraded: false,
                }
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    text = %cleaned,
                    "reading conversion failed; falling back to raw characters"
                );
                let words = cleaned
                    .split_whitespace()
                    .map(|w| ReadWord::new(w, w))
                    .collect();
                let units = cleaned
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|unit| PhoneticUnit {
                        unit,
                        word_index: None,
                    })
                    .collect();
                NormalizedText {
                    words,
                    units,
                    degraded: true,
                }
            }
        }
    }
}
