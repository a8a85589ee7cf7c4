//! Web 层错误处理
//!
//! 所有非校验类的失败都转换为 [`WebError`]，再统一渲染为 [`ErrorResponse`] JSON。
//! 校验失败不在此处理：它是正常的业务结果，由表单控制器按字段展示。
//!
//! 请求路径在 handler 里拿不到，`IntoResponse` 先填入 `"unknown"`，
//! 并把错误放进响应 Extension，由 [`crate::middleware::error_response_path`] 补全。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use thiserror::Error;

use crate::template::TemplateError;

/// Web 层错误类型
#[derive(Error, Debug)]
pub enum WebError {
    /// 表单数据解析错误 - 400 Bad Request
    #[error("Invalid form data: {message}")]
    FormParse { message: String },

    /// 模板渲染错误 - 500 Internal Server Error
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// 内部服务器错误 - 500 Internal Server Error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl WebError {
    /// 获取错误对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::FormParse { .. } => StatusCode::BAD_REQUEST,
            WebError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let error_response = ErrorResponse::from_error(&self, "unknown");

        let mut response = error_response.into_response();
        response.extensions_mut().insert(Arc::new(self));
        response
    }
}

/// 标准错误响应格式
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: String, path: String) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown Error").to_string(),
            message,
            path,
        }
    }

    pub fn from_error(error: &WebError, path: &str) -> Self {
        Self::new(error.status_code(), error.to_string(), path.to_string())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let parse = WebError::FormParse { message: "bad".into() };
        assert_eq!(parse.status_code(), StatusCode::BAD_REQUEST);

        let internal = WebError::Internal("boom".into());
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_carries_reason() {
        let error = WebError::FormParse { message: "expected form body".into() };
        let response = ErrorResponse::from_error(&error, "/submit");

        assert_eq!(response.status, 400);
        assert_eq!(response.error, "Bad Request");
        assert_eq!(response.message, "Invalid form data: expected form body");
        assert_eq!(response.path, "/submit");
    }

    #[test]
    fn test_into_response_keeps_error_extension() {
        let response = WebError::Internal("boom".into()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<Arc<WebError>>().is_some());
    }
}
