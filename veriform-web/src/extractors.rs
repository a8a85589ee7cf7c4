//! 自定义提取器
//!
//! 提取器错误统一转换为 `WebError`，由错误响应中间件补全请求路径

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::ACCEPT, request::Parts},
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

use crate::exception_handler::WebError;

/// FormData 提取器
///
/// 从 `application/x-www-form-urlencoded` 请求体中提取数据（不验证）。
/// 重复的键以最后一次出现为准。
///
/// 用法示例：
/// ```ignore
/// async fn submit(FormData(values): FormData<FormValues>) -> impl IntoResponse {
///     LoginForm::safe_parse(&values)
/// }
/// ```
pub struct FormData<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormData<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Form(value) = axum::extract::Form::<T>::from_request(req, state)
            .await
            .map_err(|e| {
                let error_msg = e.body_text();
                tracing::debug!(error = %error_msg, "Form parse error");

                WebError::FormParse { message: error_msg }
            })?;

        Ok(FormData(value))
    }
}

/// 客户端期望的响应格式
///
/// 脚本增强后的表单以 `Accept: application/json` 提交，
/// 普通的浏览器表单提交期望 HTML 页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Html,
    Json,
}

impl ResponseFormat {
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept {
            Some(accept) if accept.contains("application/json") && !accept.contains("text/html") => {
                ResponseFormat::Json
            }
            _ => ResponseFormat::Html,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(ACCEPT)
            .and_then(|value| value.to_str().ok());

        Ok(ResponseFormat::from_accept(accept))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_format_from_accept() {
        assert_eq!(ResponseFormat::from_accept(None), ResponseFormat::Html);
        assert_eq!(
            ResponseFormat::from_accept(Some("application/json")),
            ResponseFormat::Json
        );
        assert_eq!(
            ResponseFormat::from_accept(Some(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
            )),
            ResponseFormat::Html
        );
        assert_eq!(ResponseFormat::from_accept(Some("*/*")), ResponseFormat::Html);
    }
}
