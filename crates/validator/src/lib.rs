// Rust guideline compliant 2026-02-23

//! Validator for raw seller input.
//!
//! Turns untyped JSON values (form posts, request bodies) into typed
//! [`MemorySpecification`] and [`ContactRecord`] values, or into a
//! [`ValidationOutcome`] listing one message per offending field.
//!
//! Entry points: [`validate_specification`], [`validate_contact`],
//! [`parse_specification`], [`parse_contact`]. Form-style input can be
//! coerced first with [`normalize_specification`] / [`normalize_contact`].
//!
//! Nothing here panics or returns an error type for bad business input:
//! missing, wrong-typed and out-of-range values all become field errors.

mod normalize;

use std::sync::LazyLock;

use catalog::{MAX_QUANTITY, VALID_CAPACITIES_GB, is_known_brand, known_brands, profile};
use domain::{
    Condition, ContactChannel, ContactRecord, FieldError, Generation, MemorySpecification,
    ValidationOutcome,
};
use regex::Regex;
use serde_json::Value;

pub use normalize::{
    normalize_contact, normalize_specification, sanitize_email, sanitize_phone, sanitize_text,
};

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

static PHONE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()+]").expect("separator pattern is a valid regex"));

static PHONE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").expect("digits pattern is a valid regex"));

/// Minimum trimmed length for name and location.
const MIN_TEXT_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate a raw memory specification.
///
/// Every field is checked; the outcome lists at most one error per field in
/// the order `type`, `capacity`, `speed`, `brand`, `condition`, `quantity`.
#[must_use]
pub fn validate_specification(raw: &Value) -> ValidationOutcome {
    parse_specification(raw).map_or_else(|outcome| outcome, |_| ValidationOutcome::valid())
}

/// Validate raw contact details.
///
/// Field order: `name`, `email`, `phone`, `preferredContact`, `location`.
#[must_use]
pub fn validate_contact(raw: &Value) -> ValidationOutcome {
    parse_contact(raw).map_or_else(|outcome| outcome, |_| ValidationOutcome::valid())
}

/// Validate `raw` and, when every field passes, build the typed specification.
///
/// # Errors
///
/// Returns the invalid [`ValidationOutcome`] when any field fails.
pub fn parse_specification(raw: &Value) -> Result<MemorySpecification, ValidationOutcome> {
    let mut errors = Collector::default();

    let generation = errors.take("type", check_generation(raw));
    let capacity_gb = errors.take("capacity", check_capacity(raw));
    let speed_mhz = errors.take("speed", check_speed(raw, generation));
    let brand = errors.take("brand", check_brand(raw));
    let condition = errors.take("condition", check_condition(raw));
    let quantity = errors.take("quantity", check_quantity(raw));

    if let (
        Some(generation),
        Some(capacity_gb),
        Some(speed_mhz),
        Some(brand),
        Some(condition),
        Some(quantity),
    ) = (generation, capacity_gb, speed_mhz, brand, condition, quantity)
    {
        return Ok(MemorySpecification {
            generation,
            capacity_gb,
            speed_mhz,
            brand,
            condition,
            quantity,
        });
    }
    Err(errors.finish())
}

/// Validate `raw` and, when every field passes, build the typed contact record.
///
/// # Errors
///
/// Returns the invalid [`ValidationOutcome`] when any field fails.
pub fn parse_contact(raw: &Value) -> Result<ContactRecord, ValidationOutcome> {
    let mut errors = Collector::default();

    let name = errors.take("name", check_text(raw, "name", "Name"));
    let email = errors.take("email", check_email(raw));
    let phone = errors.take("phone", check_phone(raw));
    let preferred_contact = errors.take("preferredContact", check_channel(raw));
    let location = errors.take("location", check_text(raw, "location", "Location"));

    if let (Some(name), Some(email), Some(phone), Some(preferred_contact), Some(location)) =
        (name, email, phone, preferred_contact, location)
    {
        return Ok(ContactRecord { name, email, phone, preferred_contact, location });
    }
    Err(errors.finish())
}

// ---------------------------------------------------------------------------
// Error collection
// ---------------------------------------------------------------------------

/// A field check: the typed value, or the message for the first rule that failed.
type Check<T> = Result<T, String>;

#[derive(Debug, Default)]
struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    fn take<T>(&mut self, field: &str, check: Check<T>) -> Option<T> {
        match check {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.push(FieldError::new(field, message));
                None
            }
        }
    }

    fn finish(self) -> ValidationOutcome {
        ValidationOutcome::from_errors(self.errors)
    }
}

// ---------------------------------------------------------------------------
// Raw value access
// ---------------------------------------------------------------------------

/// Field value unless it is missing or blank.
///
/// Blank means `null`, `false`, numeric zero, or the empty string: the values
/// the front end treats as "not filled in". Non-object input has no fields.
fn present<'a>(raw: &'a Value, field: &str) -> Option<&'a Value> {
    raw.get(field).filter(|value| !is_blank(value))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// A JSON number that is integral and strictly positive.
///
/// `8`, `8.0` and `1e20` all qualify; `"8"`, `8.5` and `-8` do not.
/// Values beyond `u64::MAX` saturate, so callers still report them as out of range.
#[expect(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "integral and positive before the saturating cast"
)]
fn positive_integer(value: &Value) -> Option<u64> {
    let number = value.as_number()?;
    if let Some(n) = number.as_u64() {
        return (n > 0).then_some(n);
    }
    let f = number.as_f64()?;
    (f > 0.0 && f.trunc() == f).then(|| f as u64)
}

// ---------------------------------------------------------------------------
// Specification rules
// ---------------------------------------------------------------------------

fn check_generation(raw: &Value) -> Check<Generation> {
    let value = present(raw, "type").ok_or("RAM type is required")?;
    value
        .as_str()
        .and_then(Generation::from_wire)
        .ok_or_else(|| "RAM type must be DDR3, DDR4, or DDR5".to_owned())
}

fn check_capacity(raw: &Value) -> Check<u32> {
    let value = present(raw, "capacity").ok_or("Capacity is required")?;
    let capacity = positive_integer(value).ok_or("Capacity must be a positive integer")?;
    u32::try_from(capacity)
        .ok()
        .filter(|gb| VALID_CAPACITIES_GB.contains(gb))
        .ok_or_else(|| {
            let allowed: Vec<String> = VALID_CAPACITIES_GB.iter().map(u32::to_string).collect();
            format!("Capacity must be one of: {} GB", allowed.join(", "))
        })
}

/// Speed is range-checked only when the generation itself is valid.
fn check_speed(raw: &Value, generation: Option<Generation>) -> Check<u32> {
    let value = present(raw, "speed").ok_or("Speed is required")?;
    let speed = positive_integer(value).ok_or("Speed must be a positive integer")?;
    let Some(generation) = generation else {
        // The generation error is already reported; the value is never used.
        return Ok(u32::try_from(speed).unwrap_or(u32::MAX));
    };
    let p = profile(generation);
    u32::try_from(speed)
        .ok()
        .filter(|mhz| (p.min_speed_mhz..=p.max_speed_mhz).contains(mhz))
        .ok_or_else(|| {
            format!(
                "Speed for {generation} must be between {} and {} MHz",
                p.min_speed_mhz, p.max_speed_mhz
            )
        })
}

fn check_brand(raw: &Value) -> Check<String> {
    let value = present(raw, "brand").ok_or("Brand is required")?;
    let brand = value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .ok_or("Brand must be a non-empty string")?;
    if !is_known_brand(brand) {
        let names: Vec<&str> = known_brands().collect();
        return Err(format!("Unknown brand. Known brands: {}", names.join(", ")));
    }
    Ok(brand.to_owned())
}

fn check_condition(raw: &Value) -> Check<Condition> {
    let value = present(raw, "condition").ok_or("Condition is required")?;
    value
        .as_str()
        .and_then(Condition::from_wire)
        .ok_or_else(|| "Condition must be new, excellent, good, or fair".to_owned())
}

fn check_quantity(raw: &Value) -> Check<u32> {
    let value = present(raw, "quantity").ok_or("Quantity is required")?;
    let quantity = positive_integer(value).ok_or("Quantity must be a positive integer")?;
    u32::try_from(quantity)
        .ok()
        .filter(|n| *n <= MAX_QUANTITY)
        .ok_or_else(|| format!("Quantity cannot exceed {MAX_QUANTITY} modules"))
}

// ---------------------------------------------------------------------------
// Contact rules
// ---------------------------------------------------------------------------

/// Shared rule for free-text fields (`name`, `location`).
fn check_text(raw: &Value, field: &str, label: &str) -> Check<String> {
    let value = present(raw, field).ok_or_else(|| format!("{label} is required"))?;
    let text = value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| format!("{label} must be a non-empty string"))?;
    if text.trim().chars().count() < MIN_TEXT_LEN {
        return Err(format!("{label} must be at least {MIN_TEXT_LEN} characters long"));
    }
    Ok(text.to_owned())
}

fn check_email(raw: &Value) -> Check<String> {
    let value = present(raw, "email").ok_or("Email is required")?;
    let email = value.as_str().ok_or("Email must be a string")?;
    if !EMAIL_SHAPE.is_match(email) {
        return Err("Email format is invalid".to_owned());
    }
    Ok(email.to_owned())
}

fn check_phone(raw: &Value) -> Check<String> {
    let value = present(raw, "phone").ok_or("Phone number is required")?;
    let phone = value.as_str().ok_or("Phone number must be a string")?;
    let digits = PHONE_SEPARATORS.replace_all(phone, "");
    if !PHONE_DIGITS.is_match(&digits) {
        return Err("Phone number must contain 10-15 digits".to_owned());
    }
    Ok(phone.to_owned())
}

fn check_channel(raw: &Value) -> Check<ContactChannel> {
    let value = present(raw, "preferredContact").ok_or("Preferred contact method is required")?;
    value
        .as_str()
        .and_then(ContactChannel::from_wire)
        .ok_or_else(|| "Preferred contact must be email, phone, or either".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_spec() -> Value {
        json!({
            "type": "DDR4",
            "capacity": 16,
            "speed": 3200,
            "brand": "Corsair",
            "condition": "excellent",
            "quantity": 2
        })
    }

    fn valid_contact() -> Value {
        json!({
            "name": "John Doe",
            "email": "john@example.com",
            "phone": "(555) 123-4567",
            "preferredContact": "email",
            "location": "San Francisco, CA"
        })
    }

    fn with(mut base: Value, field: &str, value: Value) -> Value {
        base[field] = value;
        base
    }

    fn without(mut base: Value, field: &str) -> Value {
        base.as_object_mut().unwrap().remove(field);
        base
    }

    fn message(outcome: &ValidationOutcome, field: &str) -> String {
        outcome
            .error_for(field)
            .unwrap_or_else(|| panic!("expected an error for {field}: {outcome:?}"))
            .message
            .clone()
    }

    // ------------------------------------------------------------------
    // Specification: happy path
    // ------------------------------------------------------------------

    #[test]
    fn valid_specification_passes() {
        let outcome = validate_specification(&valid_spec());
        assert!(outcome.is_valid);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn parse_specification_builds_typed_value() {
        let spec = parse_specification(&valid_spec()).unwrap();
        assert_eq!(spec.generation, Generation::Gen4);
        assert_eq!(spec.capacity_gb, 16);
        assert_eq!(spec.speed_mhz, 3200);
        assert_eq!(spec.brand, "Corsair");
        assert_eq!(spec.condition, Condition::Excellent);
        assert_eq!(spec.quantity, 2);
    }

    #[test]
    fn integral_floats_are_integers() {
        let raw = with(valid_spec(), "capacity", json!(8.0));
        assert!(validate_specification(&raw).is_valid);
    }

    // ------------------------------------------------------------------
    // Specification: per-field messages
    // ------------------------------------------------------------------

    #[test]
    fn type_messages() {
        let outcome = validate_specification(&without(valid_spec(), "type"));
        assert_eq!(message(&outcome, "type"), "RAM type is required");
        let outcome = validate_specification(&with(valid_spec(), "type", json!("DDR2")));
        assert_eq!(message(&outcome, "type"), "RAM type must be DDR3, DDR4, or DDR5");
        let outcome = validate_specification(&with(valid_spec(), "type", json!(4)));
        assert_eq!(message(&outcome, "type"), "RAM type must be DDR3, DDR4, or DDR5");
    }

    #[test]
    fn capacity_messages_in_rule_order() {
        let outcome = validate_specification(&with(valid_spec(), "capacity", json!(0)));
        assert_eq!(message(&outcome, "capacity"), "Capacity is required");
        let outcome = validate_specification(&with(valid_spec(), "capacity", json!("16")));
        assert_eq!(message(&outcome, "capacity"), "Capacity must be a positive integer");
        let outcome = validate_specification(&with(valid_spec(), "capacity", json!(-8)));
        assert_eq!(message(&outcome, "capacity"), "Capacity must be a positive integer");
        let outcome = validate_specification(&with(valid_spec(), "capacity", json!(8.5)));
        assert_eq!(message(&outcome, "capacity"), "Capacity must be a positive integer");
        let outcome = validate_specification(&with(valid_spec(), "capacity", json!(12)));
        assert_eq!(
            message(&outcome, "capacity"),
            "Capacity must be one of: 1, 2, 4, 8, 16, 32, 64, 128 GB"
        );
    }

    #[test]
    fn speed_range_message_names_generation_and_bounds() {
        let raw = with(valid_spec(), "speed", json!(4800));
        let outcome = validate_specification(&raw);
        assert_eq!(message(&outcome, "speed"), "Speed for DDR4 must be between 1600 and 3200 MHz");

        let raw = with(with(valid_spec(), "type", json!("DDR3")), "speed", json!(700));
        let outcome = validate_specification(&raw);
        assert_eq!(message(&outcome, "speed"), "Speed for DDR3 must be between 800 and 2133 MHz");
    }

    #[test]
    fn speed_not_range_checked_when_generation_invalid() {
        let raw = with(with(valid_spec(), "type", json!("DDR9")), "speed", json!(99_999));
        let outcome = validate_specification(&raw);
        assert!(outcome.error_for("type").is_some());
        assert!(outcome.error_for("speed").is_none());
    }

    #[test]
    fn speed_bounds_are_inclusive() {
        for (generation, min, max) in [("DDR3", 800, 2133), ("DDR4", 1600, 3200), ("DDR5", 3200, 6400)] {
            let base = with(valid_spec(), "type", json!(generation));
            assert!(validate_specification(&with(base.clone(), "speed", json!(min))).is_valid);
            assert!(validate_specification(&with(base.clone(), "speed", json!(max))).is_valid);
            assert!(!validate_specification(&with(base.clone(), "speed", json!(min - 1))).is_valid);
            assert!(!validate_specification(&with(base, "speed", json!(max + 1))).is_valid);
        }
    }

    #[test]
    fn brand_messages() {
        let outcome = validate_specification(&with(valid_spec(), "brand", json!("")));
        assert_eq!(message(&outcome, "brand"), "Brand is required");
        let outcome = validate_specification(&with(valid_spec(), "brand", json!("   ")));
        assert_eq!(message(&outcome, "brand"), "Brand must be a non-empty string");
        let outcome = validate_specification(&with(valid_spec(), "brand", json!(42)));
        assert_eq!(message(&outcome, "brand"), "Brand must be a non-empty string");
        let outcome = validate_specification(&with(valid_spec(), "brand", json!("NoName")));
        assert_eq!(
            message(&outcome, "brand"),
            "Unknown brand. Known brands: Corsair, G.Skill, Kingston, Crucial, Samsung, \
             SK Hynix, Micron, ADATA, Team, Patriot, HyperX, Mushkin, GeIL"
        );
    }

    #[test]
    fn condition_messages() {
        let outcome = validate_specification(&with(valid_spec(), "condition", Value::Null));
        assert_eq!(message(&outcome, "condition"), "Condition is required");
        let outcome = validate_specification(&with(valid_spec(), "condition", json!("mint")));
        assert_eq!(message(&outcome, "condition"), "Condition must be new, excellent, good, or fair");
    }

    #[test]
    fn quantity_messages() {
        let outcome = validate_specification(&without(valid_spec(), "quantity"));
        assert_eq!(message(&outcome, "quantity"), "Quantity is required");
        let outcome = validate_specification(&with(valid_spec(), "quantity", json!(1.5)));
        assert_eq!(message(&outcome, "quantity"), "Quantity must be a positive integer");
        let outcome = validate_specification(&with(valid_spec(), "quantity", json!(101)));
        assert_eq!(message(&outcome, "quantity"), "Quantity cannot exceed 100 modules");
        assert!(validate_specification(&with(valid_spec(), "quantity", json!(100))).is_valid);
    }

    #[test]
    fn huge_whole_numbers_are_out_of_range_not_malformed() {
        let raw = with(valid_spec(), "capacity", json!(1e20));
        let raw = with(with(raw, "speed", json!(1e20)), "quantity", json!(1e20));
        let outcome = validate_specification(&raw);
        assert_eq!(
            message(&outcome, "capacity"),
            "Capacity must be one of: 1, 2, 4, 8, 16, 32, 64, 128 GB"
        );
        assert_eq!(message(&outcome, "speed"), "Speed for DDR4 must be between 1600 and 3200 MHz");
        assert_eq!(message(&outcome, "quantity"), "Quantity cannot exceed 100 modules");
    }

    // ------------------------------------------------------------------
    // Specification: collection and ordering
    // ------------------------------------------------------------------

    #[test]
    fn empty_object_reports_every_field_in_order() {
        let outcome = validate_specification(&json!({}));
        assert!(!outcome.is_valid);
        let fields: Vec<&str> = outcome.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["type", "capacity", "speed", "brand", "condition", "quantity"]);
    }

    #[test]
    fn non_object_input_is_a_validation_failure() {
        for raw in [Value::Null, json!("DDR4"), json!([1, 2, 3]), json!(7)] {
            let outcome = validate_specification(&raw);
            assert_eq!(outcome.errors.len(), 6, "input {raw}");
        }
    }

    #[test]
    fn one_error_per_field() {
        let raw = json!({
            "type": "DDR4",
            "capacity": 3,
            "speed": 100,
            "brand": "Corsair",
            "condition": "good",
            "quantity": 500
        });
        let outcome = validate_specification(&raw);
        let fields: Vec<&str> = outcome.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["capacity", "speed", "quantity"]);
    }

    // ------------------------------------------------------------------
    // Contact
    // ------------------------------------------------------------------

    #[test]
    fn valid_contact_passes() {
        let contact = parse_contact(&valid_contact()).unwrap();
        assert_eq!(contact.preferred_contact, ContactChannel::Email);
        assert_eq!(contact.phone, "(555) 123-4567");
        assert!(validate_contact(&valid_contact()).is_valid);
    }

    #[test]
    fn name_and_location_messages() {
        let outcome = validate_contact(&without(valid_contact(), "name"));
        assert_eq!(message(&outcome, "name"), "Name is required");
        let outcome = validate_contact(&with(valid_contact(), "name", json!("  ")));
        assert_eq!(message(&outcome, "name"), "Name must be a non-empty string");
        let outcome = validate_contact(&with(valid_contact(), "name", json!(" J ")));
        assert_eq!(message(&outcome, "name"), "Name must be at least 2 characters long");
        let outcome = validate_contact(&with(valid_contact(), "location", json!(true)));
        assert_eq!(message(&outcome, "location"), "Location must be a non-empty string");
        let outcome = validate_contact(&with(valid_contact(), "location", json!("X")));
        assert_eq!(message(&outcome, "location"), "Location must be at least 2 characters long");
    }

    #[test]
    fn email_messages() {
        let outcome = validate_contact(&with(valid_contact(), "email", json!("")));
        assert_eq!(message(&outcome, "email"), "Email is required");
        let outcome = validate_contact(&with(valid_contact(), "email", json!(12)));
        assert_eq!(message(&outcome, "email"), "Email must be a string");
        for bad in ["plain", "a@b", "a b@c.d", "@example.com", "a@@b.c"] {
            let outcome = validate_contact(&with(valid_contact(), "email", json!(bad)));
            assert_eq!(message(&outcome, "email"), "Email format is invalid", "email {bad}");
        }
    }

    #[test]
    fn phone_separators_are_ignored() {
        for good in ["+1 (555) 123-4567", "5551234567", "+44 20 7946 0958", "123456789012345"] {
            let outcome = validate_contact(&with(valid_contact(), "phone", json!(good)));
            assert!(outcome.is_valid, "phone {good}: {outcome:?}");
        }
    }

    #[test]
    fn phone_messages() {
        let outcome = validate_contact(&without(valid_contact(), "phone"));
        assert_eq!(message(&outcome, "phone"), "Phone number is required");
        let outcome = validate_contact(&with(valid_contact(), "phone", json!(5_551_234_567_u64)));
        assert_eq!(message(&outcome, "phone"), "Phone number must be a string");
        for bad in ["555-1234", "1234567890123456", "555.123.4567", "555-CALL-NOW"] {
            let outcome = validate_contact(&with(valid_contact(), "phone", json!(bad)));
            assert_eq!(message(&outcome, "phone"), "Phone number must contain 10-15 digits", "phone {bad}");
        }
    }

    #[test]
    fn preferred_contact_messages() {
        let outcome = validate_contact(&without(valid_contact(), "preferredContact"));
        assert_eq!(message(&outcome, "preferredContact"), "Preferred contact method is required");
        let outcome = validate_contact(&with(valid_contact(), "preferredContact", json!("fax")));
        assert_eq!(
            message(&outcome, "preferredContact"),
            "Preferred contact must be email, phone, or either"
        );
    }

    #[test]
    fn contact_errors_follow_field_order() {
        let outcome = validate_contact(&json!({ "email": "nope" }));
        let fields: Vec<&str> = outcome.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["name", "email", "phone", "preferredContact", "location"]);
    }
}
