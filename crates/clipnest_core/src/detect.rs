//! Deterministic type detection for raw captured text.
//!
//! # Responsibility
//! - Classify raw text as phone/email/link/location before an item is
//!   constructed or updated.
//! - Suggest a user action label per match.
//!
//! # Invariants
//! - Detection is pure and regex-based; no store access, no I/O.
//! - The store never calls this module itself: callers detect first and
//!   pass the resulting [`ItemType`] in as a plain field.
//! - An existing `Secure` hint is always preserved.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::item::ItemType;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});
static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bhttps?://[^\s<>]+|\bwww\.[^\s<>]+\.[a-z]{2,}[^\s<>]*")
        .expect("valid link regex")
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\d[\d\s().-]{6,}\d").expect("valid phone regex")
});
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d{1,5}\s+\w[\w\s.]*\b(street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr)\b\.?")
        .expect("valid location regex")
});

/// One recognized fragment of the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMatch {
    /// Classification of the matched fragment.
    pub kind: ItemType,
    /// The matched fragment verbatim.
    pub value: String,
    /// Suggested user action label for presentation.
    pub action: &'static str,
}

/// Scans `text` and returns every recognized fragment.
///
/// Matches are reported email-before-link-before-phone-before-location so
/// the strongest signals come first; fragments may overlap (a phone number
/// inside an address line reports both).
pub fn detect_matches(text: &str) -> Vec<TypeMatch> {
    let mut matches = Vec::new();

    for found in EMAIL_RE.find_iter(text) {
        matches.push(TypeMatch {
            kind: ItemType::Email,
            value: found.as_str().to_string(),
            action: "Send Email",
        });
    }
    for found in LINK_RE.find_iter(text) {
        // Emails contain a host-like tail; skip fragments already reported.
        if matches.iter().any(|m| m.value.contains(found.as_str())) {
            continue;
        }
        matches.push(TypeMatch {
            kind: ItemType::Link,
            value: found.as_str().to_string(),
            action: "Open Link",
        });
    }
    for found in PHONE_RE.find_iter(text) {
        if matches.iter().any(|m| m.value.contains(found.as_str())) {
            continue;
        }
        matches.push(TypeMatch {
            kind: ItemType::Phone,
            value: found.as_str().to_string(),
            action: "Call",
        });
    }
    for found in LOCATION_RE.find_iter(text) {
        matches.push(TypeMatch {
            kind: ItemType::Location,
            value: found.as_str().to_string(),
            action: "Open in Maps",
        });
    }

    matches
}

/// Classifies raw text, honoring an optional pre-existing hint.
///
/// A `Secure` hint always wins so redacted content can never be
/// reclassified into something displayable. Any other hint only applies
/// when nothing is detected: precedence is first detected match, then the
/// hint, then [`ItemType::Text`].
pub fn classify(text: &str, hint: Option<ItemType>) -> ItemType {
    if let Some(hint) = hint {
        if hint == ItemType::Secure {
            return ItemType::Secure;
        }
    }
    detect_matches(text)
        .first()
        .map(|m| m.kind)
        .or(hint)
        .unwrap_or(ItemType::Text)
}

#[cfg(test)]
mod tests {
    use super::{classify, detect_matches};
    use crate::model::item::ItemType;

    #[test]
    fn detects_email_with_action_label() {
        let matches = detect_matches("reach me at dev@example.com thanks");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, ItemType::Email);
        assert_eq!(matches[0].value, "dev@example.com");
        assert_eq!(matches[0].action, "Send Email");
    }

    #[test]
    fn detects_links_with_and_without_scheme() {
        assert_eq!(classify("see https://example.com/x", None), ItemType::Link);
        assert_eq!(classify("see www.example.com/page", None), ItemType::Link);
    }

    #[test]
    fn detects_phone_numbers() {
        assert_eq!(classify("+1 (555) 123-4567", None), ItemType::Phone);
        assert_eq!(classify("555-123-4567", None), ItemType::Phone);
    }

    #[test]
    fn detects_street_addresses() {
        let matches = detect_matches("ship to 123 Main Street please");
        assert!(matches
            .iter()
            .any(|m| m.kind == ItemType::Location && m.action == "Open in Maps"));
    }

    #[test]
    fn plain_text_stays_text() {
        assert_eq!(classify("just some words", None), ItemType::Text);
        assert!(detect_matches("just some words").is_empty());
    }

    #[test]
    fn secure_hint_is_preserved() {
        assert_eq!(
            classify("dev@example.com", Some(ItemType::Secure)),
            ItemType::Secure
        );
    }

    #[test]
    fn non_secure_hint_yields_to_detection_but_backstops_plain_text() {
        // Fresh detection outranks a stale non-secure hint.
        assert_eq!(
            classify("dev@example.com", Some(ItemType::Phone)),
            ItemType::Email
        );
        // With nothing detected, the hint survives over the Text default.
        assert_eq!(
            classify("just some words", Some(ItemType::Phone)),
            ItemType::Phone
        );
    }

    #[test]
    fn email_is_not_double_reported_as_link() {
        let matches = detect_matches("dev@example.com");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, ItemType::Email);
    }
}
