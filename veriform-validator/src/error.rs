use crate::issue::ValidationIssue;
use crate::normalizer::{normalize_issues, FieldErrorMap};
use thiserror::Error;

/// 验证错误
///
/// 按发现顺序保存全部校验问题，顺序决定了归一化时哪条错误胜出
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Validation failed with {} issue(s)", .issues.len())]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn single(issue: ValidationIssue) -> Self {
        Self { issues: vec![issue] }
    }

    /// 归一化为每个字段一条错误
    pub fn into_field_errors(self) -> FieldErrorMap {
        normalize_issues(self.issues)
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
