use crate::error::AssessmentError;
use crate::pipeline::traits::ReadingConverter;
use crate::types::ReadingToken;

const KATAKANA_TO_HIRAGANA_OFFSET: u32 = 0x60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Script {
    Hiragana,
    Katakana,
    Kanji,
    Other,
}

pub(crate) fn script_of(c: char) -> Script {
    match c {
        '\u{3041}'..='\u{309F}' => Script::Hiragana,
        // Includes the prolonged sound mark so "コーヒー" stays one run.
        '\u{30A0}'..='\u{30FF}' => Script::Katakana,
        '\u{4E00}'..='\u{9FFF}' | '\u{3005}' => Script::Kanji,
        _ => Script::Other,
    }
}

pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' => {
                char::from_u32(c as u32 - KATAKANA_TO_HIRAGANA_OFFSET).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

/// Split a whitespace-free chunk wherever the script class changes.
pub(crate) fn segment_by_script(chunk: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0usize;
    let mut current: Option<Script> = None;
    for (offset, c) in chunk.char_indices() {
        let script = script_of(c);
        match current {
            Some(prev) if prev != script => {
                segments.push(&chunk[start..offset]);
                start = offset;
            }
            _ => {}
        }
        current = Some(script);
    }
    if start < chunk.len() {
        segments.push(&chunk[start..]);
    }
    segments
}

pub(crate) fn push_script_tokens(segment: &str, out: &mut Vec<ReadingToken>) {
    for piece in segment_by_script(segment) {
        out.push(ReadingToken {
            source: piece.to_string(),
            reading: katakana_to_hiragana(piece),
        });
    }
}

/// Dictionary-free reading converter.
///
/// Kana is folded to hiragana; kanji and latin runs are kept verbatim, so two
/// identical surface forms always share a reading even without a lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct KanaReadingConverter;

impl ReadingConverter for KanaReadingConverter {
    fn to_reading(&self, text: &str) -> Result<Vec<ReadingToken>, AssessmentError> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            push_script_tokens(chunk, &mut tokens);
        }
        Ok(tokens)
    }
}
