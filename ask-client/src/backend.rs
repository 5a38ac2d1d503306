//! The `/ask` contract: payloads and the collaborator trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error_handler::TransportError;

/// Request body for `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    /// Natural language question, sent as-is.
    pub user_query: String,
}

impl AskRequest {
    pub fn new(user_query: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
        }
    }
}

/// Response body for `POST /ask`.
///
/// Only `result` is read. Its shape is owned by the backend, so it stays a
/// schema-less JSON value. A body without `result` decodes to `Value::Null`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub result: Value,
}

impl AskResponse {
    /// The result payload, or `None` when the backend sent nothing usable.
    pub fn into_result(self) -> Option<Value> {
        match self.result {
            Value::Null => None,
            other => Some(other),
        }
    }
}

/// Anything that can answer one question.
///
/// Implemented by [`crate::HttpAskService`]; tests provide in-memory doubles.
#[async_trait]
pub trait AskBackend: Send + Sync {
    /// Performs one exchange. Must not retry.
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse, TransportError>;
}
