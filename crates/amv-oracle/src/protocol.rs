//! Request construction and reply decoding for the constrained protocol.
//!
//! The oracle is asked in natural language and forced, through a response
//! schema, to answer with a single integer field `matched` in `{0, 1}`.

use amv_model::AdjudicationRequest;
use serde_json::Value;

/// Name the response schema is registered under in the request body.
const SCHEMA_NAME: &str = "match_verdict";

/// Natural-language instruction for one disagreeing pair.
///
/// The middle-name tie-break is part of the contract: names that differ
/// only by the presence of a middle name must be judged the same person.
pub fn adjudication_prompt(request: &AdjudicationRequest) -> String {
    format!(
        "Are {} and {} likely to be the same person? Return 1 for yes or 0 for no. \
         If the names only differ by the presence of a middle name, you should return 1.",
        request.left, request.right
    )
}

/// Chat-completion body with the constrained response schema attached.
pub fn request_body(model: &str, prompt: &str) -> Value {
    serde_json::json!({
        "model": model,
        "messages": [
            {"role": "user", "content": prompt}
        ],
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": SCHEMA_NAME,
                "strict": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "matched": {"type": "integer", "enum": [0, 1]}
                    },
                    "required": ["matched"],
                    "additionalProperties": false
                }
            }
        }
    })
}

/// Outcome of decoding one delivered reply.
///
/// `Malformed` is a value, not an error: one nonconforming reply must
/// never abort the batch, and it must never be read as "not matched".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyDecode {
    /// The reply conformed; `matched` is the decoded field.
    Verdict { matched: bool },
    /// The reply violated the schema. `detail` says where it went wrong;
    /// `reply` is the offending payload for diagnostic inspection.
    Malformed { detail: String, reply: String },
}

/// Decode a delivered completion into the tagged outcome.
///
/// Every shape assumption is checked explicitly; nothing here panics or
/// errors on an arbitrary reply.
pub fn decode_reply(raw: &Value) -> ReplyDecode {
    let Some(content) = raw
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
    else {
        return ReplyDecode::Malformed {
            detail: "no message content in reply".to_string(),
            reply: raw.to_string(),
        };
    };

    let parsed: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(err) => {
            return ReplyDecode::Malformed {
                detail: format!("message content is not JSON: {err}"),
                reply: content.to_string(),
            };
        }
    };

    match parsed.get("matched").and_then(Value::as_i64) {
        Some(0) => ReplyDecode::Verdict { matched: false },
        Some(1) => ReplyDecode::Verdict { matched: true },
        Some(other) => ReplyDecode::Malformed {
            detail: format!("matched field out of range: {other}"),
            reply: content.to_string(),
        },
        None => ReplyDecode::Malformed {
            detail: "matched field missing or not an integer".to_string(),
            reply: content.to_string(),
        },
    }
}
