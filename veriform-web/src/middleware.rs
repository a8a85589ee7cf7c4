//! 中间件模块

use axum::{
    extract::Request,
    http::{HeaderValue, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{sync::Arc, time::Instant};

use crate::constants::REQUEST_ID_HEADER;
use crate::exception_handler::{ErrorResponse, WebError};

/// 请求日志中间件
pub async fn request_logging(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        elapsed = ?start.elapsed(),
        "Request completed"
    );

    response
}

/// 请求 ID 中间件
///
/// 沿用客户端传入的 ID，否则生成新的 UUID
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .cloned()
        .or_else(|| HeaderValue::from_str(&uuid::Uuid::new_v4().to_string()).ok());

    if let Some(id) = &request_id {
        req.headers_mut().insert(REQUEST_ID_HEADER, id.clone());
    }

    let mut response = next.run(req).await;

    if let Some(id) = request_id {
        response.headers_mut().insert(REQUEST_ID_HEADER, id);
    }

    response
}

/// 错误响应中间件
///
/// handler 或提取器返回的 `WebError` 会在响应 Extension 中留下原始错误，
/// 这里用真实的请求路径重新生成错误响应
pub async fn error_response_path(uri: Uri, req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    let web_error = response.extensions().get::<Arc<WebError>>().cloned();
    let Some(web_error) = web_error else {
        return response;
    };

    let path = uri.path();
    if web_error.status_code().is_server_error() {
        tracing::error!(error = %web_error, path, "Request failed");
    } else {
        tracing::warn!(error = %web_error, path, "Request rejected");
    }

    ErrorResponse::from_error(&web_error, path).into_response()
}
