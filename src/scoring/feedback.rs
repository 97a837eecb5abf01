use crate::types::{WordAssessment, WordClassification};

const MAX_NAMED_WORDS: usize = 3;

/// Learner-facing summary. Classifier feedback wins when present; otherwise
/// the incorrect words are named.
pub fn personalized_feedback(words: &[WordAssessment], classification: &WordClassification) -> String {
    if let Some(feedback) = classification
        .personalized_feedback
        .as_deref()
        .filter(|f| !f.trim().is_empty())
    {
        return feedback.to_string();
    }

    let incorrect: Vec<&str> = words
        .iter()
        .filter(|w| !w.is_correct)
        .map(|w| w.text.as_str())
        .collect();
    match incorrect.as_slice() {
        [] => "Great pronunciation! Keep practicing to maintain it.".to_string(),
        [word] => format!(
            "Your pronunciation is quite good. Just pay attention to how you pronounce '{word}'."
        ),
        many => {
            let named = many
                .iter()
                .take(MAX_NAMED_WORDS)
                .map(|w| format!("'{w}'"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Focus on pronouncing these words: {named}. Keep practicing!")
        }
    }
}
