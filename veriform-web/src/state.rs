//! 应用状态
//!
//! 所有 handler 共享同一个只读的 `Arc<AppState>`

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use veriform_core::{ApplicationError, ApplicationResult, Environment};

use crate::constants::FORM_SUBMIT_DELAY_MS;
use crate::template::TemplateEngine;

/// 表单配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormProperties {
    /// 提交成功后、重定向前的等待时间
    pub submit_delay: Duration,
}

impl Default for FormProperties {
    fn default() -> Self {
        Self {
            submit_delay: Duration::from_millis(1_000),
        }
    }
}

impl FormProperties {
    pub fn from_environment(env: &Environment) -> ApplicationResult<Self> {
        let default_ms = Self::default().submit_delay.as_millis() as i64;
        let delay_ms = env.get_i64_or(FORM_SUBMIT_DELAY_MS, default_ms);

        let delay_ms = u64::try_from(delay_ms).map_err(|_| {
            ApplicationError::Config(format!("{} must not be negative: {}", FORM_SUBMIT_DELAY_MS, delay_ms))
        })?;

        Ok(Self {
            submit_delay: Duration::from_millis(delay_ms),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub templates: TemplateEngine,
    pub form: FormProperties,
}

impl AppState {
    pub fn new(templates: TemplateEngine, form: FormProperties) -> Arc<Self> {
        Arc::new(Self { templates, form })
    }

    pub fn from_environment(env: &Environment) -> ApplicationResult<Arc<Self>> {
        let templates = TemplateEngine::from_environment(env)
            .map_err(|e| ApplicationError::Config(e.to_string()))?;
        let form = FormProperties::from_environment(env)?;

        tracing::info!(submit_delay = ?form.submit_delay, "Application state initialized");
        Ok(Self::new(templates, form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriform_core::{ConfigValue, MapPropertySource};

    #[test]
    fn test_default_delay() {
        let props = FormProperties::from_environment(&Environment::new()).unwrap();
        assert_eq!(props.submit_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_negative_delay_rejected() {
        let env = Environment::new().with_property_source(
            MapPropertySource::new("test").with_property(FORM_SUBMIT_DELAY_MS, ConfigValue::Int(-5)),
        );
        assert!(FormProperties::from_environment(&env).is_err());
    }
}
