//! Blocking HTTP client for the semantic oracle.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use amv_model::AdjudicationRequest;

use crate::error::{OracleError, Result};
use crate::protocol::{ReplyDecode, adjudication_prompt, decode_reply, request_body};

/// Default oracle endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default oracle model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Environment variable holding the oracle API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// User agent string for oracle requests.
const USER_AGENT_VALUE: &str = concat!("author-match-verifier/", env!("CARGO_PKG_VERSION"));

/// One blocking adjudication query against the semantic oracle.
///
/// The handle is constructor-injected wherever adjudication happens, so a
/// test double slots in without global state.
pub trait Oracle {
    /// Issue the query and decode its delivered reply.
    ///
    /// Transport and endpoint failures are `Err`; a delivered reply that
    /// violates the response schema is `Ok(ReplyDecode::Malformed)`.
    fn adjudicate(&self, request: &AdjudicationRequest) -> Result<ReplyDecode>;
}

/// Chat-completion oracle client.
#[derive(Debug, Clone)]
pub struct ChatOracle {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl ChatOracle {
    /// Creates a client for the given endpoint and model with an explicit
    /// API key.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| OracleError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Creates a client taking the API key from [`API_KEY_VAR`].
    pub fn from_env(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key =
            std::env::var(API_KEY_VAR).map_err(|_| OracleError::MissingApiKey(API_KEY_VAR))?;
        Self::new(base_url, model, api_key)
    }
}

impl Oracle for ChatOracle {
    fn adjudicate(&self, request: &AdjudicationRequest) -> Result<ReplyDecode> {
        let prompt = adjudication_prompt(request);
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(record_id = request.record_id, url = %url, "oracle query");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body(&self.model, &prompt))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OracleError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let raw: serde_json::Value = response.json()?;
        Ok(decode_reply(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_with_explicit_key() {
        let oracle = ChatOracle::new(DEFAULT_BASE_URL, DEFAULT_MODEL, "sk-test");
        assert!(oracle.is_ok());
    }

    #[test]
    fn trailing_slash_on_base_url_is_dropped() {
        let oracle = ChatOracle::new("https://api.openai.com/v1/", DEFAULT_MODEL, "sk-test").unwrap();
        assert_eq!(oracle.base_url, "https://api.openai.com/v1");
    }
}
