//! 声明式表单 Schema
//!
//! 同一份 Schema 在服务端执行校验，也会序列化为 JSON 嵌入页面，
//! 由浏览器端脚本按相同规则做即时校验。

use crate::error::ValidationResult;
use crate::rules::{ValidationRules, ValidatorBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 提交的表单键值对
///
/// 重复的键以最后一次出现为准
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = FormValues::new();
        for (key, value) in iter {
            values.insert(key, value);
        }
        values
    }
}

/// 字段规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    Email,
    MinLength { min: usize },
    MaxLength { max: usize },
    Literal { value: String },
    /// 任一分支的全部规则通过即可
    OneOf { alternatives: Vec<Vec<Rule>> },
}

impl Rule {
    fn check(&self, value: &str, field: &str) -> ValidationResult<()> {
        match self {
            Rule::Email => ValidationRules::email(value, field),
            Rule::MinLength { min } => ValidationRules::min_length(value, field, *min),
            Rule::MaxLength { max } => ValidationRules::max_length(value, field, *max),
            Rule::Literal { value: expected } => ValidationRules::literal(value, field, expected),
            Rule::OneOf { alternatives } => {
                ValidationRules::one_of(field, alternatives.len(), |index| {
                    check_all(&alternatives[index], value, field)
                })
            }
        }
    }
}

fn check_all(rules: &[Rule], value: &str, field: &str) -> ValidationResult<()> {
    let mut builder = ValidatorBuilder::new();
    for rule in rules {
        builder.add_result(rule.check(value, field));
    }
    builder.build()
}

/// 单个字符串字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub required: bool,
    pub rules: Vec<Rule>,
}

impl FieldSchema {
    /// 必填字符串字段
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            rules: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn email(self) -> Self {
        self.rule(Rule::Email)
    }

    pub fn min_length(self, min: usize) -> Self {
        self.rule(Rule::MinLength { min })
    }

    pub fn max_length(self, max: usize) -> Self {
        self.rule(Rule::MaxLength { max })
    }

    /// 取值必须是给定字面量之一
    pub fn one_of<I, S>(self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let alternatives = options
            .into_iter()
            .map(|value| vec![Rule::Literal { value: value.into() }])
            .collect();
        self.rule(Rule::OneOf { alternatives })
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// 规则中声明的最小长度，供页面生成原生 `minlength` 属性
    pub fn min_length_hint(&self) -> Option<usize> {
        self.rules.iter().find_map(|rule| match rule {
            Rule::MinLength { min } => Some(*min),
            _ => None,
        })
    }

    /// 缺失字段只报告 `Required`，不再执行其他规则
    fn validate_into(&self, values: &FormValues, builder: &mut ValidatorBuilder) {
        let value = values.get(&self.name);

        let Some(value) = value else {
            if self.required {
                builder.add_result(ValidationRules::required(None, &self.name));
            }
            return;
        };

        for rule in &self.rules {
            builder.add_result(rule.check(value, &self.name));
        }
    }
}

/// 表单 Schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// 按字段声明顺序、规则声明顺序校验，收集全部问题
    pub fn validate(&self, values: &FormValues) -> ValidationResult<()> {
        let mut builder = ValidatorBuilder::new();
        for field in &self.fields {
            field.validate_into(values, &mut builder);
        }

        if !builder.is_empty() {
            tracing::debug!(fields = self.fields.len(), "Form values failed schema validation");
        }
        builder.build()
    }
}

/// 由 Schema 校验的类型化表单
///
/// ```ignore
/// struct LoginForm { email: String }
///
/// impl FormSchema for LoginForm {
///     fn schema() -> &'static Schema { &LOGIN_SCHEMA }
///     fn from_values(values: &FormValues) -> Self {
///         Self { email: values.get("email").unwrap_or_default().to_string() }
///     }
/// }
/// ```
pub trait FormSchema: Sized {
    fn schema() -> &'static Schema;

    /// 仅在校验通过后调用
    fn from_values(values: &FormValues) -> Self;

    fn safe_parse(values: &FormValues) -> ValidationResult<Self> {
        Self::schema().validate(values)?;
        Ok(Self::from_values(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueCode;
    use crate::normalizer::normalize_issues;

    fn login_schema() -> Schema {
        Schema::new()
            .field(FieldSchema::string("email").email())
            .field(FieldSchema::string("password").min_length(8))
    }

    #[test]
    fn test_valid_values() {
        let values = FormValues::new()
            .with("email", "jane@example.com")
            .with("password", "correct horse");

        assert!(login_schema().validate(&values).is_ok());
    }

    #[test]
    fn test_empty_email_and_short_password() {
        let values = FormValues::new().with("email", "").with("password", "abc");

        let err = login_schema().validate(&values).unwrap_err();
        assert_eq!(err.issues.len(), 2);

        let errors = normalize_issues(err.issues);
        assert_eq!(errors["email"].code, IssueCode::InvalidString);
        assert_eq!(errors["password"].code, IssueCode::TooSmall);
    }

    #[test]
    fn test_missing_field_is_required() {
        let values = FormValues::new().with("password", "abc");

        let err = login_schema().validate(&values).unwrap_err();
        assert_eq!(err.issues[0].path_key(), "email");
        assert_eq!(err.issues[0].code, IssueCode::InvalidType);
        assert_eq!(err.issues[0].message, "Required");
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let schema = Schema::new().field(FieldSchema::string("nickname").optional().min_length(2));

        assert!(schema.validate(&FormValues::new()).is_ok());
        assert!(schema.validate(&FormValues::new().with("nickname", "x")).is_err());
    }

    #[test]
    fn test_one_of_reports_leftmost_alternative() {
        let schema = Schema::new().field(FieldSchema::string("role").one_of(["admin", "user"]));
        let values = FormValues::new().with("role", "guest");

        let err = schema.validate(&values).unwrap_err();
        let errors = err.into_field_errors();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors["role"].message, "Expected 'admin'");
        assert_eq!(errors["role"].code, IssueCode::InvalidLiteral);
    }

    #[test]
    fn test_later_duplicate_key_wins() {
        let values: FormValues = vec![("email", "first@example.com"), ("email", "second@example.com")]
            .into_iter()
            .collect();

        assert_eq!(values.get("email"), Some("second@example.com"));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_schema_serializes_for_client() {
        let json = serde_json::to_value(login_schema()).unwrap();

        assert_eq!(json["fields"][0]["name"], "email");
        assert_eq!(json["fields"][0]["rules"][0]["kind"], "email");
        assert_eq!(json["fields"][1]["rules"][0], serde_json::json!({ "kind": "min_length", "min": 8 }));
    }

    #[test]
    fn test_min_length_hint() {
        let schema = login_schema();
        assert_eq!(schema.get_field("password").and_then(FieldSchema::min_length_hint), Some(8));
        assert_eq!(schema.get_field("email").and_then(FieldSchema::min_length_hint), None);
    }
}
