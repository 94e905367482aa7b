// Rust guideline compliant 2026-02-23

//! Shared domain types for the memory buyback quote engine.
//!
//! Defines the seller-facing records (`MemorySpecification`, `ContactRecord`),
//! the engine outputs (`ValidationOutcome`, `Quote`), the submission records
//! kept by the gate, and the hexagonal port traits: `KeyValueStore`,
//! `Notifier`, and `Clock`. All records serialize to the camelCase JSON shape
//! the front ends already speak.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Memory module technology generation.
///
/// Serialized with the legacy `DDR3`/`DDR4`/`DDR5` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Generation {
    /// DDR3 modules.
    #[serde(rename = "DDR3")]
    Gen3,
    /// DDR4 modules.
    #[serde(rename = "DDR4")]
    Gen4,
    /// DDR5 modules.
    #[serde(rename = "DDR5")]
    Gen5,
}

impl Generation {
    /// Every generation, oldest first.
    pub const ALL: [Self; 3] = [Self::Gen3, Self::Gen4, Self::Gen5];

    /// Legacy wire name (`"DDR4"` etc.).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gen3 => "DDR3",
            Self::Gen4 => "DDR4",
            Self::Gen5 => "DDR5",
        }
    }

    /// Exact, case-sensitive match against the wire name.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == name)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical condition declared by the seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Excellent,
    Good,
    Fair,
}

impl Condition {
    /// Every condition, best first.
    pub const ALL: [Self; 4] = [Self::New, Self::Excellent, Self::Good, Self::Fair];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
        }
    }

    /// Exact, case-sensitive match against the wire name.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the seller wants to be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactChannel {
    Email,
    Phone,
    Either,
}

impl ContactChannel {
    pub const ALL: [Self; 3] = [Self::Email, Self::Phone, Self::Either];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Either => "either",
        }
    }

    /// Exact, case-sensitive match against the wire name.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for ContactChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Seller records
// ---------------------------------------------------------------------------

/// A validated description of the modules a seller wants to sell.
///
/// Only the validator (and tests) construct this type; holding one means every
/// field is inside its documented domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySpecification {
    /// Module generation.
    #[serde(rename = "type")]
    pub generation: Generation,
    /// Capacity of one module in GB, one of `1, 2, 4, ..., 128`.
    #[serde(rename = "capacity")]
    pub capacity_gb: u32,
    /// Rated speed in MHz, inside the generation's valid range.
    #[serde(rename = "speed")]
    pub speed_mhz: u32,
    /// Manufacturer name, one of the known brands.
    pub brand: String,
    pub condition: Condition,
    /// Number of identical modules, `1..=100`.
    pub quantity: u32,
}

/// A validated set of seller contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub preferred_contact: ContactChannel,
    /// Free-form location used for shipping estimates.
    pub location: String,
}

// ---------------------------------------------------------------------------
// Validation outcome
// ---------------------------------------------------------------------------

/// One field-scoped validation failure, presentable verbatim to the seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the offending field (e.g. `"capacity"`).
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_owned(), message: message.into() }
    }
}

/// Result of validating one raw record.
///
/// `errors` follows field check order; a field appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationOutcome {
    /// An outcome with no errors.
    #[must_use]
    pub fn valid() -> Self {
        Self { is_valid: true, errors: vec![] }
    }

    /// Build an outcome from collected errors; valid iff `errors` is empty.
    #[must_use]
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self { is_valid: errors.is_empty(), errors }
    }

    /// First error reported for `field`, if any.
    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

// ---------------------------------------------------------------------------
// Quote
// ---------------------------------------------------------------------------

/// Lower and upper bound around an estimate, both rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// The complete priced response for one specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Total value for all modules, rounded to cents.
    pub estimated_value: f64,
    pub price_range: PriceRange,
    /// Ordered, human-readable pricing explanations.
    pub factors: Vec<String>,
    /// Expected response time, e.g. `"Response within 2-4 hours"`.
    pub timeline: String,
    pub next_steps: Vec<String>,
}

// ---------------------------------------------------------------------------
// Submission records
// ---------------------------------------------------------------------------

/// A quote request accepted by the submission gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    /// `RAM-<millis base36>-<random base36>`, upper-case.
    pub submission_id: String,
    /// Acceptance time, serialized as RFC 3339.
    pub timestamp: DateTime<Utc>,
    pub ram_spec: MemorySpecification,
    pub contact: ContactRecord,
    pub quote: Quote,
}

/// What the seller receives once a submission is recorded and notified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub submission_id: String,
    pub message: String,
    pub quote: Quote,
}

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Errors from the `KeyValueStore` hexagonal port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be read or written.
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Human-readable description.
        reason: String,
    },
}

/// Errors from the `Notifier` hexagonal port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    /// The notification could not be delivered.
    #[error("delivery failed: {reason}")]
    DeliveryFailed {
        /// Human-readable description.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Hexagonal port: string key-value storage for rate-limit counters and
/// submission history.
///
/// The gate depends exclusively on this trait -- never on a concrete adapter.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the store cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the store cannot be written.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete `key`; deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the store cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys starting with `prefix`, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the store cannot be read.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

/// Hexagonal port: delivery of accepted submissions to the buying team.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait Notifier {
    /// Announce a freshly recorded submission.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::DeliveryFailed` when the notification cannot be delivered.
    async fn notify(&self, submission: &QuoteSubmission) -> Result<(), NotifyError>;
}

/// Hexagonal port: wall-clock time, injectable so tests control the window.
pub trait Clock {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
