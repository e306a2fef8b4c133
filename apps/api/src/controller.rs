//! View State Controller: the idle → loading → success/failed machine behind
//! every async screen operation.
//!
//! Each dispatch is tagged with a monotonically increasing request id. Only the
//! latest issued id may settle the operation; older completions are dropped, and
//! a reset invalidates anything still in flight.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::extract::extract_as;
use crate::llm_client::{GatewayReply, LlmError};

/// Identifies one dispatched request of an `Operation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(u64);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OperationState<T> {
    Idle,
    Loading,
    Success { data: T },
    Failed { message: String },
}

impl<T> OperationState<T> {
    /// Same state with the success payload transformed for display.
    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> OperationState<U> {
        match self {
            OperationState::Idle => OperationState::Idle,
            OperationState::Loading => OperationState::Loading,
            OperationState::Success { data } => OperationState::Success { data: f(data) },
            OperationState::Failed { message } => OperationState::Failed {
                message: message.clone(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Operation<T> {
    state: OperationState<T>,
    latest: u64,
}

impl<T> Default for Operation<T> {
    fn default() -> Self {
        Self {
            state: OperationState::Idle,
            latest: 0,
        }
    }
}

impl<T> Operation<T> {
    pub fn state(&self) -> &OperationState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, OperationState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            OperationState::Success { data } => Some(data),
            _ => None,
        }
    }

    /// Enters Loading, dropping any previous result, and issues a new request id.
    pub fn begin(&mut self) -> RequestId {
        self.latest += 1;
        self.state = OperationState::Loading;
        RequestId(self.latest)
    }

    /// Settles the operation if `id` is still the latest request.
    /// Returns false when the completion was stale and discarded.
    pub fn complete(&mut self, id: RequestId, outcome: Result<T, String>) -> bool {
        if id.0 != self.latest || !self.is_loading() {
            warn!(
                "Discarding stale completion (request {}, latest {})",
                id.0, self.latest
            );
            return false;
        }
        self.state = match outcome {
            Ok(data) => OperationState::Success { data },
            Err(message) => OperationState::Failed { message },
        };
        true
    }

    /// Back to Idle. Requests still in flight become stale.
    pub fn reset(&mut self) {
        self.latest += 1;
        self.state = OperationState::Idle;
    }
}

/// Turns a gateway reply into the screen's payload or a user-facing message.
///
/// Gateway rejections surface as `Error: <reason>`; a reply the extractor cannot
/// turn into `T` surfaces as `failure_message`. The raw reply is only logged.
pub fn settle_structured<T: DeserializeOwned>(
    reply: Result<GatewayReply, LlmError>,
    failure_message: &str,
) -> Result<T, String> {
    let text = reply.map_err(|e| format!("Error: {e}"))?.into_text();
    extract_as::<T>(&text).ok_or_else(|| {
        debug!("Structured extraction failed for gateway reply: {text}");
        failure_message.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_new_operation_is_idle() {
        let op: Operation<u32> = Operation::default();
        assert_eq!(op.state(), &OperationState::Idle);
        assert!(op.data().is_none());
    }

    #[test]
    fn test_begin_then_success() {
        let mut op = Operation::default();
        let id = op.begin();
        assert!(op.is_loading());
        assert!(op.complete(id, Ok(7)));
        assert_eq!(op.data(), Some(&7));
    }

    #[test]
    fn test_begin_then_failure_carries_no_data() {
        let mut op: Operation<u32> = Operation::default();
        let id = op.begin();
        assert!(op.complete(id, Err("boom".to_string())));
        assert_eq!(
            op.state(),
            &OperationState::Failed {
                message: "boom".to_string()
            }
        );
        assert!(op.data().is_none());
    }

    #[test]
    fn test_begin_clears_previous_result() {
        let mut op = Operation::default();
        let id = op.begin();
        op.complete(id, Ok(1));
        op.begin();
        assert!(op.data().is_none());
        assert!(op.is_loading());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut op = Operation::default();
        let first = op.begin();
        let second = op.begin();

        // The newer request settles first; the older one must not overwrite it.
        assert!(op.complete(second, Ok("new")));
        assert!(!op.complete(first, Ok("old")));
        assert_eq!(op.data(), Some(&"new"));
    }

    #[test]
    fn test_older_request_cannot_settle_while_newer_is_loading() {
        let mut op = Operation::default();
        let first = op.begin();
        let _second = op.begin();
        assert!(!op.complete(first, Ok(1)));
        assert!(op.is_loading());
    }

    #[test]
    fn test_reset_invalidates_in_flight_request() {
        let mut op = Operation::default();
        let id = op.begin();
        op.reset();
        assert!(!op.complete(id, Ok(3)));
        assert_eq!(op.state(), &OperationState::Idle);
    }

    #[test]
    fn test_double_completion_is_ignored() {
        let mut op = Operation::default();
        let id = op.begin();
        assert!(op.complete(id, Ok(1)));
        assert!(!op.complete(id, Ok(2)));
        assert_eq!(op.data(), Some(&1));
    }

    #[test]
    fn test_state_serializes_with_status_tag() {
        let mut op = Operation::default();
        let id = op.begin();
        op.complete(id, Ok(serde_json::json!({"problem": "x"})));
        assert_eq!(
            serde_json::to_value(op.state()).unwrap(),
            serde_json::json!({"status": "success", "data": {"problem": "x"}})
        );
        assert_eq!(
            serde_json::to_value(OperationState::<u8>::Loading).unwrap(),
            serde_json::json!({"status": "loading"})
        );
    }

    #[test]
    fn test_map_keeps_status_and_transforms_data() {
        let state = OperationState::Success { data: 21 };
        assert_eq!(state.map(|n| n * 2), OperationState::Success { data: 42 });
        let failed: OperationState<u8> = OperationState::Failed {
            message: "nope".to_string(),
        };
        assert_eq!(
            failed.map(|n| n.to_string()),
            OperationState::Failed {
                message: "nope".to_string()
            }
        );
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: u32,
    }

    #[test]
    fn test_settle_structured_success() {
        let reply = Ok(GatewayReply::Text("here {\"value\": 4}".to_string()));
        assert_eq!(
            settle_structured::<Payload>(reply, "try again"),
            Ok(Payload { value: 4 })
        );
    }

    #[test]
    fn test_settle_structured_extraction_failure() {
        let reply = Ok(GatewayReply::Text("no json here".to_string()));
        assert_eq!(
            settle_structured::<Payload>(reply, "try again"),
            Err("try again".to_string())
        );
    }

    #[test]
    fn test_settle_structured_gateway_error_is_verbatim() {
        let reply = Err(LlmError::Api {
            status: 500,
            message: "overloaded".to_string(),
        });
        assert_eq!(
            settle_structured::<Payload>(reply, "try again"),
            Err("Error: API error (status 500): overloaded".to_string())
        );
    }
}
