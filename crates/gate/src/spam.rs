// Rust guideline compliant 2026-02-23

//! Pattern-based spam screening of contact details.
//!
//! Not an anti-fraud system: it catches the obvious bot submissions
//! (pharmacy and gambling keywords, links, keyboard mashing) and nothing more.

use std::sync::LazyLock;

use domain::ContactRecord;
use regex::Regex;

static BLOCKED_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)viagra|cialis|casino|lottery|winner").expect("word pattern is a valid regex")
});

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bhttps?://").expect("link pattern is a valid regex"));

/// A run longer than this many identical characters is suspicious.
const MAX_CHARACTER_RUN: usize = 10;

/// `true` when the name, email or location trips any spam pattern.
#[must_use]
pub fn is_spam(contact: &ContactRecord) -> bool {
    looks_like_spam(&format!("{} {} {}", contact.name, contact.email, contact.location))
}

/// `true` when `text` contains a blocked word, a link, or more than ten
/// consecutive copies of one character.
#[must_use]
pub fn looks_like_spam(text: &str) -> bool {
    BLOCKED_WORDS.is_match(text) || LINK.is_match(text) || has_long_run(text)
}

/// Line breaks never count toward a run.
fn has_long_run(text: &str) -> bool {
    let mut previous = None;
    let mut run = 0_usize;
    for c in text.chars() {
        if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
            previous = None;
            run = 0;
            continue;
        }
        if previous == Some(c) {
            run += 1;
            if run > MAX_CHARACTER_RUN {
                return true;
            }
        } else {
            previous = Some(c);
            run = 1;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::ContactChannel;

    fn contact(name: &str, email: &str, location: &str) -> ContactRecord {
        ContactRecord {
            name: name.to_owned(),
            email: email.to_owned(),
            phone: "5551234567".to_owned(),
            preferred_contact: ContactChannel::Email,
            location: location.to_owned(),
        }
    }

    #[test]
    fn clean_contact_passes() {
        assert!(!is_spam(&contact("John Doe", "john@example.com", "San Francisco, CA")));
    }

    #[test]
    fn blocked_words_any_case() {
        assert!(is_spam(&contact("CASINO King", "a@b.co", "Vegas")));
        assert!(is_spam(&contact("Ann", "lottery@b.co", "Rome")));
        assert!(is_spam(&contact("Ann", "a@b.co", "Winnerville")));
    }

    #[test]
    fn links_are_flagged() {
        assert!(is_spam(&contact("see http://x.io", "a@b.co", "Oslo")));
        assert!(is_spam(&contact("Ann", "a@b.co", "HTTPS://evil.example")));
        assert!(!is_spam(&contact("Ann", "a@b.co", "Httpville")));
    }

    #[test]
    fn eleven_repeats_are_flagged_ten_are_not() {
        assert!(looks_like_spam(&"a".repeat(11)));
        assert!(!looks_like_spam(&"a".repeat(10)));
        assert!(!looks_like_spam(&format!("{}b{}", "a".repeat(10), "a".repeat(10))));
        assert!(!looks_like_spam(&"\n".repeat(20)));
    }
}
