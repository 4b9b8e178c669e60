//! Pure text transform helpers for the editing surface.
//!
//! # Responsibility
//! - Provide deterministic string-to-string cleanups applied before an
//!   item update.
//!
//! # Invariants
//! - Every helper is pure: no store access, no item identity, no I/O.
//! - Helpers never panic on arbitrary input, including empty strings.

/// Removes exact duplicate lines, keeping the first occurrence of each.
pub fn dedup_lines(text: &str) -> String {
    let mut seen = std::collections::BTreeSet::new();
    text.lines()
        .filter(|line| seen.insert(*line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapses runs of spaces/tabs, trims line ends, and caps blank runs at
/// one empty line.
pub fn tidy_whitespace(text: &str) -> String {
    let mut lines = Vec::new();
    let mut previous_blank = false;
    for line in text.lines() {
        let cleaned = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if cleaned.is_empty() {
            if previous_blank || lines.is_empty() {
                continue;
            }
            previous_blank = true;
        } else {
            previous_blank = false;
        }
        lines.push(cleaned);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Turns each non-empty line into a `- ` bullet; existing bullets are kept.
pub fn listify(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("- ") {
                trimmed.to_string()
            } else {
                format!("- {trimmed}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Naive grammar pass: capitalizes sentence starts and ensures terminal
/// punctuation. Deliberately simple, not a language model.
pub fn fix_grammar(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(trimmed.len() + 1);
    let mut at_sentence_start = true;
    for ch in trimmed.chars() {
        if at_sentence_start && ch.is_alphabetic() {
            result.extend(ch.to_uppercase());
            at_sentence_start = false;
            continue;
        }
        if matches!(ch, '.' | '!' | '?') {
            at_sentence_start = true;
        }
        result.push(ch);
    }

    if !result.ends_with(['.', '!', '?']) {
        result.push('.');
    }
    result
}

/// Cycles through casing styles: lowercase -> Title Case -> UPPERCASE ->
/// lowercase. Any other mix restarts the cycle at lowercase.
pub fn cycle_case(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    if text == text.to_lowercase() {
        return title_case(text);
    }
    if text == title_case(text) {
        return text.to_uppercase();
    }
    text.to_lowercase()
}

fn title_case(text: &str) -> String {
    text.split_inclusive(char::is_whitespace)
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}
