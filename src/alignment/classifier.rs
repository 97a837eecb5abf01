/// One entry of the confusion table: a predicate over (expected, actual)
/// and the explanation it produces.
pub struct ConfusionRule {
    pub name: &'static str,
    applies: fn(&str, &str) -> bool,
    explain: fn(&str, &str) -> String,
}

impl ConfusionRule {
    pub fn applies(&self, expected: &str, actual: &str) -> bool {
        (self.applies)(expected, actual)
    }

    pub fn explain(&self, expected: &str, actual: &str) -> String {
        (self.explain)(expected, actual)
    }
}

/// Ordered, first match wins. Several rules can match the same pair
/// (e.g. "しゃ" vs "し" is both a sha-row confusion and a missing small ya),
/// so the order is part of the contract.
pub static CONFUSION_RULES: &[ConfusionRule] = &[
    ConfusionRule {
        name: "shi_su",
        applies: |e, a| either_way(e, a, "し", "す"),
        explain: |_, _| "Confused 'shi' and 'su'".to_string(),
    },
    ConfusionRule {
        name: "sha_row",
        applies: |e, a| within_group("しゃしゅしょ", e, a),
        explain: |e, a| format!("Confused within the 'sha/shu/sho' group: '{e}' and '{a}'"),
    },
    ConfusionRule {
        name: "cha_row",
        applies: |e, a| within_group("ちゃちゅちょ", e, a),
        explain: |e, a| format!("Confused within the 'cha/chu/cho' group: '{e}' and '{a}'"),
    },
    ConfusionRule {
        name: "ja_row",
        applies: |e, a| within_group("じゃじゅじょ", e, a),
        explain: |e, a| format!("Confused within the 'ja/ju/jo' group: '{e}' and '{a}'"),
    },
    ConfusionRule {
        name: "tsu_su",
        applies: |e, a| either_way(e, a, "つ", "す"),
        explain: |_, _| "Confused 'tsu' and 'su'".to_string(),
    },
    ConfusionRule {
        name: "fu_ha",
        applies: |e, a| either_way(e, a, "ふ", "は"),
        explain: |_, _| "Confused 'fu' and 'ha'".to_string(),
    },
    ConfusionRule {
        name: "o_wo",
        applies: |e, a| either_way(e, a, "お", "を"),
        explain: |_, _| "Confused 'o' and 'wo'".to_string(),
    },
    ConfusionRule {
        name: "he_e",
        applies: |e, a| either_way(e, a, "へ", "え"),
        explain: |_, _| "Confused 'he' and 'e'".to_string(),
    },
    ConfusionRule {
        name: "missing_small_ya",
        applies: |e, a| lost_mark(e, a, 'ゃ'),
        explain: |_, _| "Missing small 'ya' (ゃ)".to_string(),
    },
    ConfusionRule {
        name: "missing_small_yu",
        applies: |e, a| lost_mark(e, a, 'ゅ'),
        explain: |_, _| "Missing small 'yu' (ゅ)".to_string(),
    },
    ConfusionRule {
        name: "missing_small_yo",
        applies: |e, a| lost_mark(e, a, 'ょ'),
        explain: |_, _| "Missing small 'yo' (ょ)".to_string(),
    },
    ConfusionRule {
        name: "missing_small_tsu",
        applies: |e, a| lost_mark(e, a, 'っ'),
        explain: |_, _| "Missing small 'tsu' (っ)".to_string(),
    },
    ConfusionRule {
        name: "missing_n",
        applies: |e, a| lost_mark(e, a, 'ん'),
        explain: |_, _| "Missing 'n' (ん)".to_string(),
    },
];

fn either_way(expected: &str, actual: &str, x: &str, y: &str) -> bool {
    (expected == x && actual == y) || (expected == y && actual == x)
}

fn within_group(group: &str, expected: &str, actual: &str) -> bool {
    !expected.is_empty()
        && !actual.is_empty()
        && expected != actual
        && group.contains(expected)
        && group.contains(actual)
}

fn lost_mark(expected: &str, actual: &str, mark: char) -> bool {
    expected.contains(mark) && !actual.contains(mark)
}

pub fn matching_rule(expected: &str, actual: &str) -> Option<&'static ConfusionRule> {
    CONFUSION_RULES
        .iter()
        .find(|rule| rule.applies(expected, actual))
}

/// Explain a substitution. Total: pairs no rule covers get a generic message.
pub fn classify_confusion(expected: &str, actual: &str) -> String {
    match matching_rule(expected, actual) {
        Some(rule) => rule.explain(expected, actual),
        None => format!("Mispronounced: expected '{expected}', pronounced '{actual}'"),
    }
}
