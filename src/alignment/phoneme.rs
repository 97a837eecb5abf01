use crate::alignment::classifier::classify_confusion;
use crate::types::{EditOp, PhonemeError, PhonemeErrorKind, PhoneticUnit};

/// LCS edit script between two phonetic sequences.
///
/// Backtracking prefers the omission branch on ties so the script is
/// deterministic. Inside each gap between matches, omissions and additions
/// are paired in order into substitutions.
///
/// Time and memory are O(m·n); fine for sentences, not for paragraphs.
pub fn align_phonemes(reference: &[PhoneticUnit], hypothesis: &[PhoneticUnit]) -> Vec<EditOp> {
    let r: Vec<char> = reference.iter().map(|u| u.unit).collect();
    let h: Vec<char> = hypothesis.iter().map(|u| u.unit).collect();
    lcs_edit_script(&r, &h)
}

pub fn lcs_edit_script<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> Vec<EditOp> {
    let m = reference.len();
    let n = hypothesis.len();
    let width = n + 1;

    let mut lcs = vec![0u32; (m + 1) * width];
    for i in 1..=m {
        for j in 1..=n {
            lcs[i * width + j] = if reference[i - 1] == hypothesis[j - 1] {
                lcs[(i - 1) * width + (j - 1)] + 1
            } else {
                lcs[(i - 1) * width + j].max(lcs[i * width + (j - 1)])
            };
        }
    }

    let mut i = m;
    let mut j = n;
    let mut backtrack = Vec::with_capacity(m + n);
    while i > 0 && j > 0 {
        if reference[i - 1] == hypothesis[j - 1] {
            backtrack.push(EditOp::Match(i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if lcs[(i - 1) * width + j] >= lcs[i * width + (j - 1)] {
            backtrack.push(EditOp::Omission(i - 1));
            i -= 1;
        } else {
            backtrack.push(EditOp::Addition(j - 1));
            j -= 1;
        }
    }
    while i > 0 {
        backtrack.push(EditOp::Omission(i - 1));
        i -= 1;
    }
    while j > 0 {
        backtrack.push(EditOp::Addition(j - 1));
        j -= 1;
    }
    backtrack.reverse();

    pair_substitutions(backtrack)
}

fn pair_substitutions(ops: Vec<EditOp>) -> Vec<EditOp> {
    let mut script = Vec::with_capacity(ops.len());
    let mut omissions = Vec::new();
    let mut additions = Vec::new();

    let flush = |omissions: &mut Vec<usize>, additions: &mut Vec<usize>, out: &mut Vec<EditOp>| {
        let paired = omissions.len().min(additions.len());
        for k in 0..paired {
            out.push(EditOp::Substitution(omissions[k], additions[k]));
        }
        out.extend(omissions[paired..].iter().map(|&r| EditOp::Omission(r)));
        out.extend(additions[paired..].iter().map(|&h| EditOp::Addition(h)));
        omissions.clear();
        additions.clear();
    };

    for op in ops {
        match op {
            EditOp::Omission(r) => omissions.push(r),
            EditOp::Addition(h) => additions.push(h),
            other => {
                flush(&mut omissions, &mut additions, &mut script);
                script.push(other);
            }
        }
    }
    flush(&mut omissions, &mut additions, &mut script);
    script
}

/// Turn the non-matching ops of an edit script into phoneme errors.
/// Substitutions carry the confusion explanation; omissions and additions
/// are explained when they are mapped onto words.
pub fn phoneme_errors(
    script: &[EditOp],
    reference: &[PhoneticUnit],
    hypothesis: &[PhoneticUnit],
) -> Vec<PhonemeError> {
    let last_reading_index = reference.len().saturating_sub(1);
    let mut next_reference = 0usize;
    let mut errors = Vec::new();

    for (position, op) in script.iter().copied().enumerate() {
        match op {
            EditOp::Match(r, _) => next_reference = r + 1,
            EditOp::Substitution(r, h) => {
                let expected = reference[r].unit;
                let actual = hypothesis[h].unit;
                errors.push(PhonemeError {
                    position,
                    reading_index: r,
                    expected_unit: Some(expected),
                    actual_unit: Some(actual),
                    kind: PhonemeErrorKind::Substitution,
                    explanation: Some(classify_confusion(
                        &expected.to_string(),
                        &actual.to_string(),
                    )),
                });
                next_reference = r + 1;
            }
            EditOp::Omission(r) => {
                errors.push(PhonemeError {
                    position,
                    reading_index: r,
                    expected_unit: Some(reference[r].unit),
                    actual_unit: None,
                    kind: PhonemeErrorKind::Omission,
                    explanation: None,
                });
                next_reference = r + 1;
            }
            EditOp::Addition(h) => errors.push(PhonemeError {
                position,
                reading_index: next_reference.min(last_reading_index),
                expected_unit: None,
                actual_unit: Some(hypothesis[h].unit),
                kind: PhonemeErrorKind::Addition,
                explanation: None,
            }),
        }
    }
    errors
}
