//! 控制器支持

use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// HTTP 响应实体
///
/// 允许控制 JSON 响应的状态码和响应头
#[derive(Debug)]
pub struct ResponseEntity<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: T,
}

impl<T> ResponseEntity<T> {
    pub fn new(status: StatusCode, body: T) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// 400 Bad Request
    pub fn bad_request(body: T) -> Self {
        Self::new(StatusCode::BAD_REQUEST, body)
    }

    /// 添加响应头
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

impl<T> IntoResponse for ResponseEntity<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.status, self.headers, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CACHE_CONTROL;

    #[test]
    fn test_bad_request_with_header() {
        let response = ResponseEntity::bad_request(serde_json::json!({ "ok": false }))
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
    }
}
