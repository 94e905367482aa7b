// Rust guideline compliant 2026-02-23

//! JSON-lines request handling shared by both desk binaries.
//!
//! One request per input line, one response per output line. A request
//! without `contact` is a quote preview; with `contact` it is a submission
//! through the [`Gate`].

use anyhow::Context as _;
use catalog::MarketAdjustments;
use domain::{Clock, FieldError, KeyValueStore, Notifier, Quote};
use gate::{Gate, SubmissionError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt as _, AsyncWriteExt as _, BufReader};

/// Rate-limit identity used when a request carries none.
const ANONYMOUS: &str = "anonymous";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeskRequest {
    identity: Option<String>,
    #[serde(default)]
    ram_spec: Value,
    contact: Option<Value>,
}

/// One line of desk output, tagged by `status`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum DeskResponse {
    /// Preview; `market` shows the adjustments folded into the estimate.
    Quoted {
        quote: Quote,
        market: MarketAdjustments,
    },
    Invalid {
        errors: Vec<FieldError>,
    },
    Submitted {
        submission_id: String,
        message: String,
        quote: Quote,
    },
    Rejected {
        code: &'static str,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        retry_after_minutes: Option<u64>,
    },
    Malformed {
        message: String,
    },
}

impl From<SubmissionError> for DeskResponse {
    fn from(error: SubmissionError) -> Self {
        match error {
            SubmissionError::InvalidInput { errors } => Self::Invalid { errors },
            other => Self::Rejected {
                code: other.code(),
                message: other.to_string(),
                retry_after_minutes: match other {
                    SubmissionError::RateLimited { retry_after_minutes } => Some(retry_after_minutes),
                    _ => None,
                },
            },
        }
    }
}

/// Answer a single request line. Never fails: bad input becomes a response.
pub async fn handle_line<S, N, C>(
    gate: &Gate,
    line: &str,
    store: &S,
    notifier: &N,
    clock: &C,
) -> DeskResponse
where
    S: KeyValueStore,
    N: Notifier,
    C: Clock,
{
    let request: DeskRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "desk.request.malformed");
            return DeskResponse::Malformed { message: e.to_string() };
        }
    };
    let spec = validator::normalize_specification(&request.ram_spec);

    let Some(contact) = request.contact else {
        return match validator::parse_specification(&spec) {
            Ok(spec) => DeskResponse::Quoted {
                quote: pricing::build_quote(&spec),
                market: MarketAdjustments::CURRENT,
            },
            Err(outcome) => DeskResponse::Invalid { errors: outcome.errors },
        };
    };
    let contact = validator::normalize_contact(&contact);
    let identity = request.identity.as_deref().unwrap_or(ANONYMOUS);

    match gate.submit(identity, &spec, &contact, store, notifier, clock).await {
        Ok(receipt) => DeskResponse::Submitted {
            submission_id: receipt.submission_id,
            message: receipt.message,
            quote: receipt.quote,
        },
        Err(e) => e.into(),
    }
}

/// Serve requests from stdin until EOF.
///
/// # Errors
///
/// Returns an error when stdin cannot be read or stdout cannot be written.
pub async fn serve<S, N, C>(gate: &Gate, store: &S, notifier: &N, clock: &C) -> anyhow::Result<()>
where
    S: KeyValueStore,
    N: Notifier,
    C: Clock,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("failed to read request")? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(gate, &line, store, notifier, clock).await;
        let mut json = serde_json::to_string(&response).context("failed to encode response")?;
        json.push('\n');
        stdout.write_all(json.as_bytes()).await.context("failed to write response")?;
        stdout.flush().await.context("failed to flush response")?;
    }
    tracing::info!("desk.serve.eof");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
