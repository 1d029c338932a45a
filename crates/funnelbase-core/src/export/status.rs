//! Asynchronous request outcomes.
//!
//! A submit call only returns tracking information; the real outcome of a
//! batch is learned by polling `/crm/request-status`. Polling is a single
//! call here, never a loop: retry cadence is the caller's decision.

use crate::error::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One invalid record inside a failed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchError {
    /// Line number of the record inside the submitted ndjson payload.
    #[serde(default)]
    pub line: Option<u64>,
    /// Remote description of what was wrong with the record.
    #[serde(default)]
    pub description: Option<String>,
}

/// Outcome of a previously submitted async request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Not yet picked up by the remote system.
    Pending,
    /// Being processed.
    InProgress,
    /// Every record was ingested.
    Success,
    /// At least one record was rejected; successfully ingested records stay
    /// applied remotely.
    Failed(Vec<BatchError>),
    /// A status string this client does not know; preserved verbatim.
    Other(String),
}

impl RequestOutcome {
    /// Parses a `/crm/request-status` response body.
    pub(crate) fn from_body(body: &Value) -> SyncResult<Self> {
        let status = body
            .get("status")
            .and_then(Value::as_str)
            .ok_or_else(|| SyncError::InvalidResponse(format!("no status field in {body}")))?;

        if status != "FAILED" {
            return Ok(match status {
                "PENDING" => Self::Pending,
                "IN_PROGRESS" => Self::InProgress,
                "SUCCESS" => Self::Success,
                other => Self::Other(other.to_string()),
            });
        }

        // The remote sometimes returns a bare error object instead of a
        // list; normalize to a list either way.
        let errors = match body.get("errors") {
            Some(Value::Array(items)) => items.iter().map(parse_error).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(single) => vec![parse_error(single)],
        };
        Ok(Self::Failed(errors))
    }

    /// Wire status string; unknown statuses come back verbatim.
    pub fn status_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Success => "SUCCESS",
            Self::Failed(_) => "FAILED",
            Self::Other(raw) => raw,
        }
    }

    /// Line errors of a failed batch, if any.
    pub fn errors(&self) -> Option<&[BatchError]> {
        match self {
            Self::Failed(errors) => Some(errors),
            _ => None,
        }
    }

    /// Converts a failed outcome into [`SyncError::PartialBatchFailure`],
    /// for callers that want failures on the error channel.
    pub fn into_result(self) -> SyncResult<Self> {
        match self {
            Self::Failed(errors) => Err(SyncError::PartialBatchFailure(errors)),
            outcome => Ok(outcome),
        }
    }
}

fn parse_error(value: &Value) -> BatchError {
    serde_json::from_value(value.clone()).unwrap_or_else(|_| BatchError {
        line: None,
        description: Some(value.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_statuses_map() {
        let outcome = RequestOutcome::from_body(&json!({"status": "SUCCESS"})).unwrap();
        assert_eq!(outcome, RequestOutcome::Success);
        let outcome = RequestOutcome::from_body(&json!({"status": "PENDING"})).unwrap();
        assert_eq!(outcome, RequestOutcome::Pending);
    }

    #[test]
    fn unknown_status_preserved() {
        let outcome = RequestOutcome::from_body(&json!({"status": "QUEUED"})).unwrap();
        assert_eq!(outcome, RequestOutcome::Other("QUEUED".into()));
        assert_eq!(outcome.status_str(), "QUEUED");
    }

    #[test]
    fn single_error_object_becomes_one_element_list() {
        let body = json!({
            "status": "FAILED",
            "errors": {"line": 3, "description": "missing emailAddress"}
        });
        let outcome = RequestOutcome::from_body(&body).unwrap();
        let errors = outcome.errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, Some(3));
        assert_eq!(errors[0].description.as_deref(), Some("missing emailAddress"));
    }

    #[test]
    fn error_list_preserved_in_order() {
        let body = json!({
            "status": "FAILED",
            "errors": [
                {"line": 0, "description": "bad objectId"},
                {"line": 4, "description": "bad date"}
            ]
        });
        let outcome = RequestOutcome::from_body(&body).unwrap();
        let errors = outcome.errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line, Some(0));
        assert_eq!(errors[1].line, Some(4));
    }

    #[test]
    fn missing_status_is_invalid_response() {
        let err = RequestOutcome::from_body(&json!({"ok": true})).unwrap_err();
        assert!(matches!(err, SyncError::InvalidResponse(_)));
    }

    #[test]
    fn failed_outcome_converts_to_error() {
        let outcome = RequestOutcome::Failed(vec![BatchError {
            line: Some(1),
            description: None,
        }]);
        let err = outcome.into_result().unwrap_err();
        assert!(matches!(err, SyncError::PartialBatchFailure(errors) if errors.len() == 1));
    }
}
