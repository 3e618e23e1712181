use serde::{Deserialize, Serialize};

/// Uniform stage result envelope returned by every API operation:
/// `{ success, message, data? }`. Raw exceptions never cross the HTTP
/// boundary; failures carry a short human-readable message and technical
/// detail goes to the logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> StageResult<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        StageResult {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        StageResult {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_omits_data_field() {
        let result: StageResult<String> = StageResult::failure("Missing required fields");
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json.get("success"), Some(&serde_json::json!(false)));
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_ok_carries_data() {
        let result = StageResult::ok("Text extracted successfully", "page one".to_string());
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json.get("data"), Some(&serde_json::json!("page one")));
    }
}
