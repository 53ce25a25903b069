use serde::{Deserialize, Serialize};

// 统一的API响应结构
//
// 成功时携带 data，失败时携带 errors（字段级校验详情）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    pub fn error_empty(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    pub fn error_with_details(message: impl Into<String>, errors: serde_json::Value) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success(json!({"id": 1}), "ok");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["message"], json!("ok"));
        assert_eq!(value["data"]["id"], json!(1));
        // 成功响应不携带 errors 字段
        assert!(value.get("errors").is_none());
    }

    #[test]
    fn test_error_envelope_shape() {
        let resp = ApiResponse::error_with_details(
            "Validation failed",
            json!({"score": ["Score cannot be negative or greater than 100"]}),
        );
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["success"], json!(false));
        assert!(value.get("data").is_none());
        assert!(value["errors"]["score"].is_array());
    }

    #[test]
    fn test_error_empty_has_message_only() {
        let resp = ApiResponse::error_empty("Classroom not found");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["message"], json!("Classroom not found"));
        assert!(value.get("data").is_none());
        assert!(value.get("errors").is_none());
    }
}
