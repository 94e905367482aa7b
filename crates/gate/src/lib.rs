// Rust guideline compliant 2026-02-23

//! Submission gate -- validates, quotes, rate-limits, screens and records
//! seller quote requests.
//!
//! Entry points: [`Gate::submit`], [`Gate::history`], [`Gate::clear_rate_limit`].
//! Configuration via [`GateConfig::builder`]. All state lives behind the
//! injected `domain::KeyValueStore`; delivery goes through `domain::Notifier`;
//! time comes from `domain::Clock`.

pub mod spam;

use std::cell::RefCell;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{
    Clock, FieldError, KeyValueStore, Notifier, NotifyError, QuoteSubmission, StoreError,
    SubmissionReceipt,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::Value;

/// Key prefix for per-identity submission timestamps.
pub const RATE_LIMIT_PREFIX: &str = "rate_limit:";
/// Key prefix for recorded submissions; keys sort chronologically.
pub const SUBMISSION_PREFIX: &str = "submission:";

const ACCEPTED_MESSAGE: &str = "Your quote request has been submitted successfully!";
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ID_RANDOM_CHARS: usize = 7;
const MILLIS_PER_MINUTE: i64 = 60_000;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while configuring the gate.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The supplied configuration is invalid.
    #[error("invalid gate configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
}

/// Why a submission was turned away. `Display` is the seller-facing message.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// Specification and/or contact failed validation.
    #[error("Please correct the highlighted fields and try again.")]
    InvalidInput {
        /// Specification errors first, then contact errors.
        errors: Vec<FieldError>,
    },
    /// Too many recent submissions from this identity.
    #[error("Too many submissions. Please try again in {retry_after_minutes} minutes.")]
    RateLimited {
        /// Minutes until the oldest counted submission leaves the window.
        retry_after_minutes: u64,
    },
    /// Contact details matched a spam pattern.
    #[error("Your submission was flagged as suspicious. Please contact us directly.")]
    SpamDetected,
    /// The submission was recorded but the team could not be notified.
    #[error("Failed to send notification. Please try again or contact us directly.")]
    NotificationFailed(#[source] NotifyError),
}

impl SubmissionError {
    /// Stable machine-readable code for front ends.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::RateLimited { .. } => "RATE_LIMIT_EXCEEDED",
            Self::SpamDetected => "SPAM_DETECTED",
            Self::NotificationFailed(_) => "NOTIFICATION_FAILED",
        }
    }
}

// ---------------------------------------------------------------------------
// GateConfig + builder
// ---------------------------------------------------------------------------

/// Runtime configuration for a [`Gate`].
///
/// Construct via [`GateConfig::builder`].
#[derive(Debug)]
pub struct GateConfig {
    /// Submissions allowed per identity within `window`.
    pub max_submissions: usize,
    /// Sliding rate-limit window.
    pub window: Duration,
    /// Recorded submissions kept in the store; older ones are dropped.
    pub history_limit: usize,
    /// Optional RNG seed for reproducible submission ids. `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Builder for [`GateConfig`].
///
/// Obtain via [`GateConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct GateConfigBuilder {
    max_submissions: usize,
    window: Duration,
    history_limit: usize,
    seed: Option<u64>,
}

impl GateConfig {
    /// Create a builder. `max_submissions` is the only required parameter.
    ///
    /// Default values: `window = 1 h`, `history_limit = 10`, `seed = None`.
    #[must_use]
    pub fn builder(max_submissions: usize) -> GateConfigBuilder {
        GateConfigBuilder {
            max_submissions,
            window: Duration::from_secs(60 * 60),
            history_limit: 10,
            seed: None,
        }
    }

    fn window_millis(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }
}

impl GateConfigBuilder {
    /// Override the rate-limit window.
    #[must_use]
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Override how many recorded submissions are retained.
    #[must_use]
    pub fn history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    /// Fix the RNG seed for deterministic submission ids (useful in tests).
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidConfig`] when `max_submissions` or
    /// `history_limit` is zero, or the window is shorter than a millisecond.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<GateConfig, GateError> {
        if self.max_submissions == 0 {
            return Err(GateError::InvalidConfig {
                reason: "max_submissions must be >= 1".to_owned(),
            });
        }
        if self.window.as_millis() == 0 {
            return Err(GateError::InvalidConfig {
                reason: "window must be at least 1 ms".to_owned(),
            });
        }
        if self.history_limit == 0 {
            return Err(GateError::InvalidConfig {
                reason: "history_limit must be >= 1".to_owned(),
            });
        }
        Ok(GateConfig {
            max_submissions: self.max_submissions,
            window: self.window,
            history_limit: self.history_limit,
            seed: self.seed,
        })
    }
}

// ---------------------------------------------------------------------------
// Rate limiting
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum RateDecision {
    /// Allowed; the timestamps to persist, current submission included.
    Allowed(Vec<i64>),
    Limited { retry_after_minutes: u64 },
}

/// Sliding-window check over unix-millisecond timestamps.
fn decide_rate(timestamps: Vec<i64>, now_ms: i64, window_ms: i64, max: usize) -> RateDecision {
    let mut recent: Vec<i64> =
        timestamps.into_iter().filter(|ts| now_ms.saturating_sub(*ts) < window_ms).collect();
    if recent.len() >= max {
        let oldest = recent.iter().copied().min().unwrap_or(now_ms);
        let remaining = oldest.saturating_add(window_ms).saturating_sub(now_ms);
        let minutes = (remaining + MILLIS_PER_MINUTE - 1) / MILLIS_PER_MINUTE;
        return RateDecision::Limited { retry_after_minutes: u64::try_from(minutes).unwrap_or(0) };
    }
    recent.push(now_ms);
    RateDecision::Allowed(recent)
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Orchestrates one quote submission end to end.
///
/// Holds no adapter references -- store, notifier and clock are injected per
/// call (hexagonal architecture).
#[derive(Debug)]
pub struct Gate {
    config: GateConfig,
    /// Interior mutability required because all public methods take `&self`.
    rng: RefCell<StdRng>,
}

impl Gate {
    /// Create a new gate from `config`.
    ///
    /// Seeds the RNG from `config.seed` if set, otherwise from the OS.
    #[must_use]
    pub fn new(config: GateConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng: RefCell::new(rng) }
    }

    /// Configuration this gate was built with.
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Validate, quote, rate-limit, screen, record and notify.
    ///
    /// Checks run in that order; a rejected request never consumes a
    /// rate-limit slot unless it got past validation. Store failures are
    /// logged and do not block the seller.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::InvalidInput`], [`SubmissionError::RateLimited`],
    /// [`SubmissionError::SpamDetected`] or [`SubmissionError::NotificationFailed`].
    pub async fn submit<S, N, C>(
        &self,
        identity: &str,
        raw_spec: &Value,
        raw_contact: &Value,
        store: &S,
        notifier: &N,
        clock: &C,
    ) -> Result<SubmissionReceipt, SubmissionError>
    where
        S: KeyValueStore,
        N: Notifier,
        C: Clock,
    {
        let spec = validator::parse_specification(raw_spec);
        let contact = validator::parse_contact(raw_contact);
        let (spec, contact) = match (spec, contact) {
            (Ok(spec), Ok(contact)) => (spec, contact),
            (spec, contact) => {
                let errors: Vec<FieldError> = [spec.err(), contact.err()]
                    .into_iter()
                    .flatten()
                    .flat_map(|outcome| outcome.errors)
                    .collect();
                tracing::debug!(identity, errors = errors.len(), "gate.submit.invalid");
                return Err(SubmissionError::InvalidInput { errors });
            }
        };
        let quote = pricing::build_quote(&spec);

        let now = clock.now();
        self.check_rate_limit(identity, now.timestamp_millis(), store).await?;

        if spam::is_spam(&contact) {
            tracing::warn!(identity, "gate.submit.spam_detected");
            return Err(SubmissionError::SpamDetected);
        }

        let submission = QuoteSubmission {
            submission_id: self.next_submission_id(now),
            timestamp: now,
            ram_spec: spec,
            contact,
            quote,
        };
        self.record(&submission, store).await;
        self.prune_rate_limits(now.timestamp_millis(), store).await;

        notifier.notify(&submission).await.map_err(|e| {
            tracing::error!(submission_id = %submission.submission_id, error = %e, "gate.notify.failed");
            SubmissionError::NotificationFailed(e)
        })?;

        tracing::info!(
            identity,
            submission_id = %submission.submission_id,
            estimated_value = submission.quote.estimated_value,
            "gate.submit.accepted"
        );
        Ok(SubmissionReceipt {
            submission_id: submission.submission_id,
            message: ACCEPTED_MESSAGE.to_owned(),
            quote: submission.quote,
        })
    }

    /// Recorded submissions, oldest first. Unreadable entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the submission keys cannot be listed.
    pub async fn history<S: KeyValueStore>(&self, store: &S) -> Result<Vec<QuoteSubmission>, StoreError> {
        let keys = store.list(SUBMISSION_PREFIX).await?;
        let mut submissions = Vec::with_capacity(keys.len());
        for key in keys {
            match store.get(&key).await {
                Ok(Some(json)) => match serde_json::from_str(&json) {
                    Ok(submission) => submissions.push(submission),
                    Err(e) => tracing::warn!(key = %key, error = %e, "gate.history.unreadable"),
                },
                Ok(None) => {}
                Err(e) => tracing::warn!(key = %key, error = %e, "gate.history.unavailable"),
            }
        }
        Ok(submissions)
    }

    /// Forget the rate-limit timestamps of `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the key cannot be removed.
    pub async fn clear_rate_limit<S: KeyValueStore>(&self, identity: &str, store: &S) -> Result<(), StoreError> {
        store.remove(&format!("{RATE_LIMIT_PREFIX}{identity}")).await
    }

    /// Enforce the sliding window for `identity`, recording `now_ms` when allowed.
    ///
    /// Fails open: if the store cannot be read or written, the submission is allowed.
    async fn check_rate_limit<S: KeyValueStore>(
        &self,
        identity: &str,
        now_ms: i64,
        store: &S,
    ) -> Result<(), SubmissionError> {
        let key = format!("{RATE_LIMIT_PREFIX}{identity}");
        let stored = match store.get(&key).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(identity, error = %e, "gate.rate_limit.unavailable");
                return Ok(());
            }
        };
        let timestamps: Vec<i64> = stored
            .map(|json| {
                serde_json::from_str(&json).unwrap_or_else(|e| {
                    tracing::warn!(identity, error = %e, "gate.rate_limit.corrupt");
                    vec![]
                })
            })
            .unwrap_or_default();

        match decide_rate(timestamps, now_ms, self.config.window_millis(), self.config.max_submissions) {
            RateDecision::Limited { retry_after_minutes } => {
                tracing::info!(identity, retry_after_minutes, "gate.rate_limit.exceeded");
                Err(SubmissionError::RateLimited { retry_after_minutes })
            }
            RateDecision::Allowed(recent) => {
                if let Err(e) = store.set(&key, Value::from(recent).to_string()).await {
                    tracing::warn!(identity, error = %e, "gate.rate_limit.unavailable");
                }
                Ok(())
            }
        }
    }

    /// Persist `submission` and drop the oldest entries beyond `history_limit`.
    ///
    /// Best-effort: failures are logged, never returned.
    async fn record<S: KeyValueStore>(&self, submission: &QuoteSubmission, store: &S) {
        let key = format!(
            "{SUBMISSION_PREFIX}{:013}:{}",
            submission.timestamp.timestamp_millis(),
            submission.submission_id
        );
        let json = match serde_json::to_string(submission) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "gate.record.serialize_failed");
                return;
            }
        };
        if let Err(e) = store.set(&key, json).await {
            tracing::error!(key = %key, error = %e, "gate.record.failed");
            return;
        }

        let keys = match store.list(SUBMISSION_PREFIX).await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "gate.record.trim_skipped");
                return;
            }
        };
        let excess = keys.len().saturating_sub(self.config.history_limit);
        for old in &keys[..excess] {
            if let Err(e) = store.remove(old).await {
                tracing::warn!(key = %old, error = %e, "gate.record.trim_failed");
            }
        }
    }

    /// Remove rate-limit entries whose timestamps have all left the window.
    ///
    /// Best-effort like [`record`](Self::record); keeps the store bounded by
    /// the identities active within one window.
    async fn prune_rate_limits<S: KeyValueStore>(&self, now_ms: i64, store: &S) {
        let keys = match store.list(RATE_LIMIT_PREFIX).await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "gate.rate_limit.prune_skipped");
                return;
            }
        };
        let window_ms = self.config.window_millis();
        for key in keys {
            let Ok(Some(json)) = store.get(&key).await else { continue };
            let timestamps: Vec<i64> = serde_json::from_str(&json).unwrap_or_default();
            if timestamps.iter().any(|ts| now_ms.saturating_sub(*ts) < window_ms) {
                continue;
            }
            match store.remove(&key).await {
                Ok(()) => tracing::debug!(key = %key, "gate.rate_limit.pruned"),
                Err(e) => tracing::warn!(key = %key, error = %e, "gate.rate_limit.prune_failed"),
            }
        }
    }

    /// `RAM-<millis base36>-<7 random base36>`.
    fn next_submission_id(&self, now: DateTime<Utc>) -> String {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let mut rng = self.rng.borrow_mut();
        let suffix: String = (0..ID_RANDOM_CHARS)
            .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
            .collect();
        format!("RAM-{}-{suffix}", to_base36(millis))
    }
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while n > 0 {
        // n % 36 < 36 always indexes BASE36.
        digits.push(BASE36[usize::try_from(n % 36).unwrap_or(0)]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
