//! Feature-service fetch: one GET, envelope unwrap, typed failure taxonomy.
//!
//! The service wraps records two levels deep: a top-level object with a
//! `features` array whose elements each hold the real record under
//! `attributes`. Everything field-level is delegated to the record decoder;
//! this module only owns the transport and the envelope.

use serde::Deserialize;
use thiserror::Error;
use ureq::Agent;
use url::Url;

use crate::record::AttractionRecord;

/// Why a fetch attempt failed. Every variant is terminal for the attempt;
/// there is no internal retry.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint string is not a syntactically valid URL. Raised before
    /// any I/O happens.
    #[error("invalid endpoint URL")]
    InvalidEndpoint,
    /// Connection, DNS, TLS, or HTTP-status failure from the transport.
    #[error("failed to fetch features: {0}")]
    Transport(#[source] Box<ureq::Error>),
    /// The server answered with an empty body.
    #[error("no data received from the server")]
    NoData,
    /// The body was present but is not the expected JSON shape. The
    /// diagnostic keeps serde's field/type detail verbatim for display.
    #[error("data parsing error: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct Payload {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    attributes: AttractionRecord,
}

/// Blocking HTTP client for the feature service.
pub struct Fetcher {
    agent: Agent,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            agent: Agent::new_with_defaults(),
        }
    }

    /// Issues a single GET against `endpoint` and decodes the response into
    /// records. No retry, no caller-configurable timeout.
    pub fn fetch(&self, endpoint: &str) -> Result<Vec<AttractionRecord>, FetchError> {
        let endpoint = Url::parse(endpoint).map_err(|_| FetchError::InvalidEndpoint)?;
        let mut response = self
            .agent
            .get(endpoint.as_str())
            .call()
            .map_err(|err| FetchError::Transport(Box::new(err)))?;
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|err| FetchError::Transport(Box::new(err)))?;
        let records = parse_payload(&body)?;
        tracing::info!(count = records.len(), "fetched attraction records");
        Ok(records)
    }
}

/// Unwraps the `features` / `attributes` envelope from a raw response body.
///
/// Split out from [`Fetcher::fetch`] so decode behavior is testable without a
/// socket.
pub fn parse_payload(body: &[u8]) -> Result<Vec<AttractionRecord>, FetchError> {
    if body.is_empty() {
        return Err(FetchError::NoData);
    }
    let payload: Payload =
        serde_json::from_slice(body).map_err(|err| FetchError::Decode(err.to_string()))?;
    Ok(payload
        .features
        .into_iter()
        .map(|feature| feature.attributes)
        .collect())
}
