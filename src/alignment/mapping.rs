use crate::types::{
    PhonemeError, PhonemeErrorKind, ReadWord, WordAssessment, WordOrigin, WordSpan,
};

/// Prefix-sum reading ranges for a word list. Spans are contiguous and
/// together cover exactly the concatenated readings.
pub fn word_spans(words: &[ReadWord]) -> Vec<WordSpan> {
    let mut start = 0usize;
    words
        .iter()
        .map(|word| {
            let end = start + word.reading_len();
            let span = WordSpan {
                word: word.text.clone(),
                reading_start: start,
                reading_end: end,
            };
            start = end;
            span
        })
        .collect()
}

pub fn describe_error(error: &PhonemeError) -> String {
    let expected = error.expected_unit.map(String::from).unwrap_or_default();
    let actual = error.actual_unit.map(String::from).unwrap_or_default();
    match error.kind {
        PhonemeErrorKind::Substitution => error
            .explanation
            .clone()
            .unwrap_or_else(|| format!("Pronounced '{expected}' as '{actual}'")),
        PhonemeErrorKind::Omission => format!("Missing sound '{expected}'"),
        PhonemeErrorKind::Addition => format!("Extra sound '{actual}'"),
    }
}

/// Attach each phoneme error to the reference word whose reading span
/// contains it, marking that word incorrect. Each error touches at most
/// one word; unmapped errors are dropped.
pub fn attach_phoneme_errors(
    words: &mut [WordAssessment],
    spans: &[WordSpan],
    errors: &[PhonemeError],
) {
    for error in errors {
        let Some(word_index) = spans.iter().position(|s| s.contains(error.reading_index)) else {
            continue;
        };
        let Some(word) = words
            .iter_mut()
            .find(|w| w.origin == WordOrigin::Reference(word_index))
        else {
            continue;
        };

        let details = describe_error(error);
        word.suggestion = Some(match word.suggestion.take() {
            Some(existing) if existing.contains(&details) => existing,
            Some(existing) => format!("{details}. {existing}"),
            None => format!(
                "{details}. Practice pronouncing '{}' more accurately.",
                word.text
            ),
        });
        word.is_correct = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_word(index: usize, text: &str, suggestion: Option<&str>) -> WordAssessment {
        WordAssessment {
            text: text.to_string(),
            is_correct: suggestion.is_none(),
            suggestion: suggestion.map(str::to_string),
            origin: WordOrigin::Reference(index),
        }
    }

    fn omission(reading_index: usize, expected: char) -> PhonemeError {
        PhonemeError {
            position: reading_index,
            reading_index,
            expected_unit: Some(expected),
            actual_unit: None,
            kind: PhonemeErrorKind::Omission,
            explanation: None,
        }
    }

    #[test]
    fn spans_partition_the_reading() {
        let words = [
            ReadWord::new("今日", "きょう"),
            ReadWord::new("は", "は"),
            ReadWord::new("晴れ", "はれ"),
        ];
        let spans = word_spans(&words);
        let bounds: Vec<(usize, usize)> = spans
            .iter()
            .map(|s| (s.reading_start, s.reading_end))
            .collect();
        assert_eq!(bounds, [(0, 3), (3, 4), (4, 6)]);
        assert!(spans.windows(2).all(|w| w[0].reading_end == w[1].reading_start));
    }

    #[test]
    fn error_marks_owning_word() {
        let words_read = [ReadWord::new("今日", "きょう"), ReadWord::new("晴れ", "はれ")];
        let spans = word_spans(&words_read);
        let mut words = vec![reference_word(0, "今日", None), reference_word(1, "晴れ", None)];
        attach_phoneme_errors(&mut words, &spans, &[omission(4, 'れ')]);
        assert!(words[0].is_correct);
        assert!(!words[1].is_correct);
        assert_eq!(
            words[1].suggestion.as_deref(),
            Some("Missing sound 'れ'. Practice pronouncing '晴れ' more accurately.")
        );
    }

    #[test]
    fn existing_suggestion_is_prefixed_once() {
        let spans = word_spans(&[ReadWord::new("晴れ", "はれ")]);
        let mut words = vec![reference_word(0, "晴れ", Some("Pronounce '晴れ' more clearly."))];
        let error = omission(1, 'れ');
        attach_phoneme_errors(&mut words, &spans, &[error.clone()]);
        attach_phoneme_errors(&mut words, &spans, &[error]);
        assert_eq!(
            words[0].suggestion.as_deref(),
            Some("Missing sound 'れ'. Pronounce '晴れ' more clearly.")
        );
    }

    #[test]
    fn unnecessary_entries_are_not_targets() {
        let spans = word_spans(&[ReadWord::new("はい", "はい")]);
        let mut words = vec![
            WordAssessment {
                text: "はい".to_string(),
                is_correct: false,
                suggestion: Some("The word 'はい' is not needed in the sentence.".to_string()),
                origin: WordOrigin::Unnecessary(0),
            },
            reference_word(0, "はい", None),
        ];
        attach_phoneme_errors(&mut words, &spans, &[omission(0, 'は')]);
        assert_eq!(
            words[0].suggestion.as_deref(),
            Some("The word 'はい' is not needed in the sentence.")
        );
        assert!(!words[1].is_correct);
    }

    #[test]
    fn out_of_range_error_is_ignored() {
        let spans = word_spans(&[ReadWord::new("はい", "はい")]);
        let mut words = vec![reference_word(0, "はい", None)];
        attach_phoneme_errors(&mut words, &spans, &[omission(9, 'x')]);
        assert!(words[0].is_correct);
    }

    #[test]
    fn addition_and_substitution_descriptions() {
        let addition = PhonemeError {
            position: 0,
            reading_index: 0,
            expected_unit: None,
            actual_unit: Some('ね'),
            kind: PhonemeErrorKind::Addition,
            explanation: None,
        };
        assert_eq!(describe_error(&addition), "Extra sound 'ね'");
        let substitution = PhonemeError {
            kind: PhonemeErrorKind::Substitution,
            expected_unit: Some('し'),
            explanation: Some("Confused 'shi' and 'su'".to_string()),
            ..addition
        };
        assert_eq!(describe_error(&substitution), "Confused 'shi' and 'su'");
    }
}
