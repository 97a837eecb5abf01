use crate::types::{ReadWord, WordAssessment, WordClassification, WordOrigin};

/// How many transcribed words past the cursor may be skipped to
/// resynchronize with the current reference word.
pub const MAX_LOOKAHEAD: usize = 2;

/// Greedy two-cursor word alignment by reading.
///
/// Auxiliary transcribed words are skipped silently. Matches more than
/// [`MAX_LOOKAHEAD`] words ahead are not found; the reference word is marked
/// incorrect instead.
pub fn align_words(
    reference: &[ReadWord],
    transcribed: &[ReadWord],
    classification: &WordClassification,
) -> Vec<WordAssessment> {
    let is_auxiliary = |word: &ReadWord| classification.auxiliary_words.contains(&word.text);
    let mut out = Vec::with_capacity(reference.len());
    let mut i = 0usize;
    let mut j = 0usize;

    while i < reference.len() {
        let orig = &reference[i];

        if j >= transcribed.len() {
            out.push(incorrect(i, orig, classification, not_pronounced(&orig.text)));
            i += 1;
            continue;
        }

        let trans = &transcribed[j];
        if orig.reading == trans.reading {
            out.push(correct(i, orig));
            i += 1;
            j += 1;
            continue;
        }

        if is_auxiliary(trans) {
            j += 1;
            continue;
        }

        let window_end = transcribed.len().min(j + MAX_LOOKAHEAD + 1);
        let resync = (j + 1..window_end).find(|&k| transcribed[k].reading == orig.reading);
        match resync {
            Some(k) => {
                for (skipped_index, skipped) in transcribed.iter().enumerate().take(k).skip(j) {
                    if !is_auxiliary(skipped) {
                        out.push(unnecessary(
                            skipped_index,
                            skipped,
                            "This word is not needed in the sentence.",
                        ));
                    }
                }
                out.push(correct(i, orig));
                i += 1;
                j = k + 1;
            }
            None => {
                out.push(incorrect(i, orig, classification, unclear(&orig.text)));
                i += 1;
                j += 1;
            }
        }
    }

    for (trailing_index, trans) in transcribed.iter().enumerate().skip(j) {
        if is_auxiliary(trans) {
            continue;
        }
        let message = format!("The word '{}' is not needed in the sentence.", trans.text);
        out.push(unnecessary(trailing_index, trans, &message));
    }

    tracing::debug!(
        reference_words = reference.len(),
        transcribed_words = transcribed.len(),
        correct = out.iter().filter(|w| w.is_correct).count(),
        "word alignment finished"
    );
    out
}

fn not_pronounced(word: &str) -> String {
    format!("This word was not pronounced. Pay attention to pronouncing '{word}'.")
}

fn unclear(word: &str) -> String {
    format!("Pronounce '{word}' more clearly.")
}

fn correct(index: usize, word: &ReadWord) -> WordAssessment {
    WordAssessment {
        text: word.text.clone(),
        is_correct: true,
        suggestion: None,
        origin: WordOrigin::Reference(index),
    }
}

fn incorrect(
    index: usize,
    word: &ReadWord,
    classification: &WordClassification,
    default_suggestion: String,
) -> WordAssessment {
    let suggestion = classification
        .incorrect_word_suggestions
        .get(&word.text)
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .unwrap_or(default_suggestion);
    WordAssessment {
        text: word.text.clone(),
        is_correct: false,
        suggestion: Some(suggestion),
        origin: WordOrigin::Reference(index),
    }
}

fn unnecessary(transcribed_index: usize, word: &ReadWord, message: &str) -> WordAssessment {
    WordAssessment {
        text: word.text.clone(),
        is_correct: false,
        suggestion: Some(message.to_string()),
        origin: WordOrigin::Unnecessary(transcribed_index),
    }
}
