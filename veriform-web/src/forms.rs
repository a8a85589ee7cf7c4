//! 登录表单

use once_cell::sync::Lazy;
use veriform_validator::{FieldSchema, FormSchema, FormValues, Schema};

/// 服务端校验和浏览器端镜像校验共用的 Schema
static LOGIN_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .field(FieldSchema::string("email").email())
        .field(FieldSchema::string("password").min_length(8))
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl FormSchema for LoginForm {
    fn schema() -> &'static Schema {
        &LOGIN_SCHEMA
    }

    fn from_values(values: &FormValues) -> Self {
        Self {
            email: values.get("email").unwrap_or_default().to_string(),
            password: values.get("password").unwrap_or_default().to_string(),
        }
    }
}
