// Rust guideline compliant 2026-02-23

//! Coercion of form-style input before validation.
//!
//! HTML forms post everything as strings and users type `ddr4` or `16GB`.
//! These helpers map such input onto the wire shape the validator expects.
//! A value that cannot be coerced is dropped, so the validator reports the
//! field as missing rather than guessing.

use domain::{Condition, ContactChannel, Generation};
use serde_json::{Map, Value};

/// Longest free-text value kept after sanitizing.
const MAX_TEXT_CHARS: usize = 255;

/// Trim, strip `<`, `>`, `'` and `"`, and cap at 255 characters.
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '\'' | '"'))
        .take(MAX_TEXT_CHARS)
        .collect()
}

/// Trim and lower-case.
#[must_use]
pub fn sanitize_email(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Keep ASCII digits; a `+` anywhere in the input becomes a single leading `+`.
#[must_use]
pub fn sanitize_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if input.contains('+') { format!("+{digits}") } else { digits }
}

/// Coerce a raw specification: upper-case `type`, lower-case `condition`,
/// parse numeric fields from strings, sanitize `brand`.
#[must_use]
pub fn normalize_specification(raw: &Value) -> Value {
    let mut out = Map::new();

    if let Some(generation) = raw
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_uppercase)
        .filter(|s| Generation::from_wire(s).is_some())
    {
        out.insert("type".to_owned(), Value::String(generation));
    }

    for field in ["capacity", "speed", "quantity"] {
        if let Some(n) = raw.get(field).and_then(leading_integer).filter(|n| *n > 0) {
            out.insert(field.to_owned(), Value::from(n));
        }
    }

    if let Some(brand) = raw.get("brand").and_then(Value::as_str) {
        out.insert("brand".to_owned(), Value::String(sanitize_text(brand)));
    }

    if let Some(condition) = raw
        .get("condition")
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .filter(|s| Condition::from_wire(s).is_some())
    {
        out.insert("condition".to_owned(), Value::String(condition));
    }

    Value::Object(out)
}

/// Coerce raw contact details: sanitize free text, normalize email and phone,
/// lower-case `preferredContact`.
#[must_use]
pub fn normalize_contact(raw: &Value) -> Value {
    let mut out = Map::new();

    for field in ["name", "location"] {
        if let Some(text) = raw.get(field).and_then(Value::as_str) {
            out.insert(field.to_owned(), Value::String(sanitize_text(text)));
        }
    }
    if let Some(email) = raw.get("email").and_then(Value::as_str) {
        out.insert("email".to_owned(), Value::String(sanitize_email(email)));
    }
    if let Some(phone) = raw.get("phone").and_then(Value::as_str) {
        out.insert("phone".to_owned(), Value::String(sanitize_phone(phone)));
    }
    if let Some(channel) = raw
        .get("preferredContact")
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .filter(|s| ContactChannel::from_wire(s).is_some())
    {
        out.insert("preferredContact".to_owned(), Value::String(channel));
    }

    Value::Object(out)
}

/// Integer prefix of a number or string: `16` → 16, `"16GB"` → 16,
/// `"8.9"` → 8, `" -3"` → -3. Anything else has none.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float is truncated toward zero and clamped by the saturating cast"
)]
fn leading_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            f.is_finite().then(|| f.trunc() as i64)
        }),
        Value::String(s) => {
            let s = s.trim_start();
            let (sign, rest) = match s.strip_prefix('-') {
                Some(rest) => (-1, rest),
                None => (1, s.strip_prefix('+').unwrap_or(s)),
            };
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<i64>().ok().map(|n| sign * n)
        }
        _ => None,
    }
}
