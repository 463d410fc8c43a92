//! Semantic-oracle access for mismatch adjudication.
//!
//! One query per disagreeing name pair, blocking, one outstanding request
//! at a time. The reply is constrained to a one-field schema and decoded
//! into an explicit tag (conforming verdict or malformed reply), so the
//! caller branches instead of catching.

pub mod client;
pub mod error;
pub mod protocol;

pub use client::{API_KEY_VAR, ChatOracle, DEFAULT_BASE_URL, DEFAULT_MODEL, Oracle};
pub use error::{OracleError, Result};
pub use protocol::{ReplyDecode, adjudication_prompt, decode_reply, request_body};
