use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    Unavailable,
    Internal,
    Unexpected,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            400 | 422 => Self::Validation,
            502..=504 => Self::Unavailable,
            500..=599 => Self::Internal,
            _ => Self::Unexpected,
        }
    }
}

/// Error reported by the inference backend for a non-success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Builds an error from a status code and raw body. FastAPI bodies of the
    /// form `{"detail": "..."}` or `{"detail": [{"msg": "..."}, ...]}` are
    /// unwrapped; anything else is kept verbatim (trimmed).
    pub fn from_response(status: u16, body: &str) -> Self {
        let code = ErrorCode::from_status(status);
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| detail_message(&value))
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {status}")
                } else {
                    trimmed.to_string()
                }
            });
        Self { code, message }
    }
}

fn detail_message(value: &Value) -> Option<String> {
    match value.get("detail")? {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_fastapi_string_detail() {
        let err = ApiError::from_response(404, r#"{"detail":"Not Found"}"#);
        assert_eq!(err, ApiError::new(ErrorCode::NotFound, "Not Found"));
        assert_eq!(err.to_string(), "NotFound: Not Found");
    }

    #[test]
    fn joins_validation_detail_messages() {
        let body = r#"{"detail":[{"loc":["body","questions"],"msg":"field required","type":"value_error.missing"},{"msg":"bad strategy"}]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(err.message, "field required; bad strategy");
    }

    #[test]
    fn falls_back_to_raw_body_or_status() {
        assert_eq!(
            ApiError::from_response(500, " boom \n").message,
            "boom".to_string()
        );
        let empty = ApiError::from_response(503, "");
        assert_eq!(empty.code, ErrorCode::Unavailable);
        assert_eq!(empty.message, "HTTP 503");
    }
}
