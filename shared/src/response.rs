//! API 统一响应结构
//!
//! 成功响应直接返回资源 JSON；错误（以及携带已有订单的 409 冲突）
//! 使用此信封结构。

use serde::{Deserialize, Serialize};

/// Response envelope for errors and conflict payloads
///
/// ```json
/// {
///   "code": "E0004",
///   "message": "Duplicate active order",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// 错误码 (E0000 表示成功)
    pub code: String,
    /// 消息
    pub message: String,
    /// 响应数据 (冲突时为已存在的订单)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// 创建成功信封
    pub fn ok(data: T) -> Self {
        Self {
            code: "E0000".to_string(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    /// 创建错误信封
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }

    /// 创建携带数据的错误信封 (409 冲突时携带已有订单)
    pub fn error_with_data(
        code: impl Into<String>,
        message: impl Into<String>,
        data: T,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: Some(data),
        }
    }
}
