//! 渐进增强表单
//!
//! 同一个路径同时服务两类客户端：
//! - 未加载脚本时，浏览器原生提交表单，校验失败返回带错误标注的 HTML 页面；
//! - 脚本加载后，页面先按嵌入的 Schema 在本地校验，再以
//!   `Accept: application/json` 提交，校验失败返回 `{"errors": ...}`。
//!
//! 两种情况下校验失败的状态码都是 400，成功后等待配置的时间再重定向到 `/`。

use axum::{
    extract::State,
    http::{header::CACHE_CONTROL, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::sync::Arc;
use veriform_validator::{FieldError, FieldErrorMap, FieldSchema, FormSchema, FormValues};

use crate::constants::FORM_PATH;
use crate::controller::ResponseEntity;
use crate::exception_handler::WebError;
use crate::extractors::{FormData, ResponseFormat};
use crate::forms::LoginForm;
use crate::state::AppState;
use crate::template::Template;

/// 校验失败时返回给脚本的数据
#[derive(Debug, Serialize)]
pub struct ActionData {
    pub errors: FieldErrorMap,
}

/// 模板中单个输入框的视图
#[derive(Debug, Serialize)]
struct FieldView<'a> {
    name: &'a str,
    label: String,
    input_type: &'static str,
    required: bool,
    min_length: Option<usize>,
    value: &'a str,
    error: Option<&'a FieldError>,
}

impl<'a> FieldView<'a> {
    fn new(field: &'a FieldSchema, values: &'a FormValues, errors: &'a FieldErrorMap) -> Self {
        let secret = field.name == "password";

        Self {
            name: &field.name,
            label: capitalize(&field.name),
            input_type: if secret { "password" } else { "text" },
            required: field.required,
            min_length: field.min_length_hint(),
            // 密码从不回填
            value: if secret { "" } else { values.get(&field.name).unwrap_or_default() },
            error: errors.get(&field.name),
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn render_form(
    state: &AppState,
    values: &FormValues,
    errors: &FieldErrorMap,
    status: StatusCode,
) -> Result<Template, WebError> {
    let schema = LoginForm::schema();

    let fields: Vec<FieldView> = schema
        .fields
        .iter()
        .map(|field| FieldView::new(field, values, errors))
        .collect();

    // 嵌入 <script> 标签，避免提前闭合
    let schema_json = serde_json::to_string(schema)
        .map_err(|e| WebError::Internal(format!("Failed to serialize form schema: {}", e)))?
        .replace("</", "<\\/");

    Ok(state
        .templates
        .render("form.html")
        .with("form_path", FORM_PATH)
        .with("fields", &fields)
        .with("form_error", &errors.get(""))
        .with("schema_json", &schema_json)
        .status(status))
}

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Template {
    state.templates.render("index.html").with("form_path", FORM_PATH)
}

/// GET 表单页面
pub async fn show_form(State(state): State<Arc<AppState>>) -> Result<Template, WebError> {
    render_form(&state, &FormValues::new(), &FieldErrorMap::new(), StatusCode::OK)
}

/// POST 表单提交
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    format: ResponseFormat,
    FormData(values): FormData<FormValues>,
) -> Result<Response, WebError> {
    match LoginForm::safe_parse(&values) {
        Ok(_form) => {
            tracing::info!(delay = ?state.form.submit_delay, "Form accepted, redirecting");
            tokio::time::sleep(state.form.submit_delay).await;

            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            let errors = e.into_field_errors();
            tracing::info!(
                fields = ?errors.keys().collect::<Vec<_>>(),
                format = ?format,
                "Form rejected"
            );

            match format {
                ResponseFormat::Json => Ok(ResponseEntity::bad_request(ActionData { errors })
                    .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
                    .into_response()),
                ResponseFormat::Html => {
                    Ok(render_form(&state, &values, &errors, StatusCode::BAD_REQUEST)?.into_response())
                }
            }
        }
    }
}
