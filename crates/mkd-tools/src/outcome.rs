//! Tagged result of one operation call.

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{ErrorKind, ToolError};

/// Result of an operation as seen by the caller.
///
/// Both variants render to a single JSON payload; failures never escape as
/// panics or Rust errors past [`crate::Toolbox::call`].
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Operation succeeded with this payload.
    Success(Value),
    /// Operation failed.
    Failure(ToolError),
}

impl ToolOutcome {
    /// Wrap an operation result, serializing the success payload.
    pub fn from_result<T: Serialize>(result: Result<T, ToolError>) -> Self {
        match result.and_then(|payload| {
            serde_json::to_value(payload)
                .map_err(|e| ToolError::new(ErrorKind::Unexpected, e.to_string()))
        }) {
            Ok(payload) => Self::Success(payload),
            Err(err) => Self::Failure(err),
        }
    }

    /// True for [`ToolOutcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Error, if the call failed.
    #[must_use]
    pub fn error(&self) -> Option<&ToolError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }

    /// Payload returned to the caller: the success value or `{"error": message}`.
    #[must_use]
    pub fn into_payload(self) -> Value {
        match self {
            Self::Success(payload) => payload,
            Self::Failure(err) => json!({ "error": err.message }),
        }
    }
}

impl From<ToolError> for ToolOutcome {
    fn from(err: ToolError) -> Self {
        Self::Failure(err)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Serialize)]
    struct Payload {
        count: usize,
    }

    #[test]
    fn test_success_payload() {
        let outcome = ToolOutcome::from_result(Ok(Payload { count: 2 }));

        assert!(outcome.is_success());
        assert_eq!(outcome.into_payload(), json!({"count": 2}));
    }

    #[test]
    fn test_failure_payload() {
        let outcome = ToolOutcome::from_result::<Payload>(Err(ToolError::new(
            ErrorKind::NotFound,
            "File not found: a.md",
        )));

        assert_eq!(outcome.error().map(|e| e.kind), Some(ErrorKind::NotFound));
        assert_eq!(
            outcome.into_payload(),
            json!({"error": "File not found: a.md"})
        );
    }
}
