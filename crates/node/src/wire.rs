//! JSON line formats read and written by the node.

use serde::{Deserialize, Serialize};

use mizuki_core::LedgerError;
use mizuki_infra::{InvocationKind, Payload};

/// Code reported for lines that are not a valid request.
pub const MALFORMED_REQUEST: &str = "MALFORMED_REQUEST";

/// One invocation, e.g. `{"function":"remit","args":["alice","bob","30"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Entry point; absent means any operation is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<InvocationKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    pub fn success(payload: Payload) -> Self {
        Self {
            ok: true,
            payload,
            code: None,
            message: None,
        }
    }

    pub fn failure(err: &LedgerError) -> Self {
        Self {
            ok: false,
            payload: None,
            code: Some(err.error_code().to_string()),
            message: Some(err.to_string()),
        }
    }

    pub fn malformed(err: &serde_json::Error) -> Self {
        Self {
            ok: false,
            payload: None,
            code: Some(MALFORMED_REQUEST.to_string()),
            message: Some(err.to_string()),
        }
    }
}
