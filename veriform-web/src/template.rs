//! 模板引擎支持
//!
//! 基于 Tera。页面模板编译进二进制，`template.dir` 可指定目录覆盖同名模板。
//!
//! ```ignore
//! state.templates
//!     .render("form.html")
//!     .with("errors", &errors)
//!     .status(StatusCode::BAD_REQUEST)
//! ```

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use std::error::Error as _;
use std::path::Path;
use std::sync::Arc;
use tera::Tera;
use veriform_core::Environment;

use crate::constants::TEMPLATE_DIR;
use crate::exception_handler::WebError;

const BUILTIN_TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("form.html", include_str!("../templates/form.html")),
];

/// 模板错误类型
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to render template '{template}': {cause}")]
    RenderError { template: String, cause: String },

    #[error("Template initialization error: {0}")]
    InitError(String),
}

/// 模板引擎
///
/// 初始化后只读，克隆开销为一次 Arc 计数
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
}

impl TemplateEngine {
    /// 仅使用内置模板
    pub fn builtin() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        add_builtin_templates(&mut tera)?;

        Ok(Self { tera: Arc::new(tera) })
    }

    /// 从目录加载模板，目录中缺少的模板使用内置版本
    ///
    /// 目录中的模板可以继承内置模板（例如只覆盖 `form.html`）
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let pattern = format!("{}/**/*.html", dir.as_ref().display());
        let mut tera = Tera::parse(&pattern).map_err(|e| {
            TemplateError::InitError(format!(
                "Failed to parse templates with pattern '{}': {}",
                pattern,
                render_cause(&e)
            ))
        })?;

        let overridden: Vec<String> = tera.get_template_names().map(String::from).collect();

        // extend 只补充缺少的模板，并重建继承链
        let mut builtin = Tera::default();
        add_builtin_templates(&mut builtin)?;
        tera.extend(&builtin).map_err(|e| {
            TemplateError::InitError(format!(
                "Failed to merge builtin templates: {}",
                render_cause(&e)
            ))
        })?;

        tracing::info!(pattern = %pattern, overridden = ?overridden, "Template engine created");
        Ok(Self { tera: Arc::new(tera) })
    }

    /// 从 Environment 创建模板引擎
    pub fn from_environment(env: &Environment) -> Result<Self, TemplateError> {
        match env.get_string(TEMPLATE_DIR) {
            Some(dir) => Self::from_dir(dir),
            None => Self::builtin(),
        }
    }

    /// 创建模板响应
    pub fn render(&self, template_name: impl Into<String>) -> Template {
        Template {
            template_name: template_name.into(),
            context: tera::Context::new(),
            status: StatusCode::OK,
            engine: self.clone(),
        }
    }

    fn render_internal(&self, template_name: &str, context: &tera::Context) -> Result<String, TemplateError> {
        self.tera
            .render(template_name, context)
            .map_err(|e| TemplateError::RenderError {
                template: template_name.to_string(),
                cause: render_cause(&e),
            })
    }
}

fn add_builtin_templates(tera: &mut Tera) -> Result<(), TemplateError> {
    tera.add_raw_templates(BUILTIN_TEMPLATES.to_vec())
        .map_err(|e| TemplateError::InitError(format!("Failed to add builtin templates: {}", e)))
}

/// Tera 把真正的原因放在 source 链的末端
fn render_cause(error: &tera::Error) -> String {
    let mut cause = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        cause = format!("{}: {}", cause, inner);
        source = inner.source();
    }
    cause
}

/// 模板响应
pub struct Template {
    template_name: String,
    context: tera::Context,
    status: StatusCode,
    engine: TemplateEngine,
}

impl Template {
    /// 添加单个变量到模板上下文
    pub fn with<K: Into<String>, V: Serialize + ?Sized>(mut self, key: K, value: &V) -> Self {
        self.context.insert(key, value);
        self
    }

    /// 设置 HTTP 状态码
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn into_html(self) -> Result<(StatusCode, Html<String>), TemplateError> {
        let html = self.engine.render_internal(&self.template_name, &self.context)?;
        Ok((self.status, Html(html)))
    }
}

impl IntoResponse for Template {
    fn into_response(self) -> Response {
        let template_name = self.template_name.clone();
        match self.into_html() {
            Ok(html) => html.into_response(),
            Err(err) => {
                tracing::error!(error = %err, template = %template_name, "Template render error");
                WebError::from(err).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_templates_render() {
        let engine = TemplateEngine::builtin().unwrap();
        let (status, Html(html)) = engine
            .render("index.html")
            .with("form_path", crate::constants::FORM_PATH)
            .into_html()
            .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(crate::constants::FORM_PATH));
    }

    #[test]
    fn test_missing_variable_is_render_error() {
        let engine = TemplateEngine::builtin().unwrap();
        let result = engine.render("index.html").into_html();

        match result {
            Err(TemplateError::RenderError { template, cause }) => {
                assert_eq!(template, "index.html");
                assert!(cause.contains("form_path"));
            }
            other => panic!("expected render error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_variable_response_is_server_error() {
        let engine = TemplateEngine::builtin().unwrap();
        let response = engine.render("index.html").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unknown_template_is_render_error() {
        let engine = TemplateEngine::builtin().unwrap();
        let result = engine.render("missing.html").with("x", &json!(1)).into_html();

        assert!(matches!(result, Err(TemplateError::RenderError { .. })));
    }

    #[test]
    fn test_partial_override_falls_back_to_builtin_templates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("index.html"),
            r#"{% extends "base.html" %}{% block content %}<p id="custom">{{ form_path | safe }}</p>{% endblock content %}"#,
        )
        .unwrap();

        let engine = TemplateEngine::from_dir(dir.path()).unwrap();

        let (_, Html(index)) = engine
            .render("index.html")
            .with("form_path", crate::constants::FORM_PATH)
            .into_html()
            .unwrap();
        assert!(index.contains(r#"<p id="custom">"#));
        assert!(index.contains("</html>"));

        let mut names: Vec<&str> = engine.tera.get_template_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["base.html", "form.html", "index.html"]);
    }

    #[test]
    fn test_template_dir_from_environment() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "custom index").unwrap();

        let env = Environment::new().with_property_source(
            veriform_core::MapPropertySource::new("test").with_property(
                TEMPLATE_DIR,
                veriform_core::ConfigValue::String(dir.path().display().to_string()),
            ),
        );
        let engine = TemplateEngine::from_environment(&env).unwrap();
        let (_, Html(html)) = engine.render("index.html").into_html().unwrap();

        assert_eq!(html, "custom index");
    }
}
