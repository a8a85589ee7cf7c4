use crate::error::{ValidationError, ValidationResult};
use crate::issue::{IssueCode, IssueGroup, PathSegment, ValidationIssue};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email regex is valid")
});

/// 校验规则
///
/// 每条规则成功返回 `Ok(())`，失败返回携带单条问题的 [`ValidationError`]，
/// 由 [`ValidatorBuilder`] 汇总
pub struct ValidationRules;

impl ValidationRules {
    /// 字段必须存在
    pub fn required(value: Option<&str>, field: &str) -> ValidationResult<()> {
        if value.is_none() {
            return Err(fail(field, IssueCode::InvalidType, "Required"));
        }
        Ok(())
    }

    /// 验证邮箱格式
    pub fn email(value: &str, field: &str) -> ValidationResult<()> {
        if !EMAIL_REGEX.is_match(value) {
            return Err(fail(field, IssueCode::InvalidString, "Invalid email"));
        }
        Ok(())
    }

    /// 验证字符串最小长度（按字符计）
    pub fn min_length(value: &str, field: &str, min: usize) -> ValidationResult<()> {
        if value.chars().count() < min {
            return Err(fail(
                field,
                IssueCode::TooSmall,
                format!("String must contain at least {} character(s)", min),
            ));
        }
        Ok(())
    }

    /// 验证字符串最大长度（按字符计）
    pub fn max_length(value: &str, field: &str, max: usize) -> ValidationResult<()> {
        if value.chars().count() > max {
            return Err(fail(
                field,
                IssueCode::TooBig,
                format!("String must contain at most {} character(s)", max),
            ));
        }
        Ok(())
    }

    /// 验证字面量
    pub fn literal(value: &str, field: &str, expected: &str) -> ValidationResult<()> {
        if value != expected {
            return Err(fail(
                field,
                IssueCode::InvalidLiteral,
                format!("Expected '{}'", expected),
            ));
        }
        Ok(())
    }

    /// 联合校验：任一候选分支通过即可
    ///
    /// 全部失败时产生一条 `invalid_union` 问题，每个分支的失败按声明顺序成组
    pub fn one_of<F>(field: &str, alternatives: usize, mut check: F) -> ValidationResult<()>
    where
        F: FnMut(usize) -> ValidationResult<()>,
    {
        let mut groups = Vec::with_capacity(alternatives);

        for index in 0..alternatives {
            match check(index) {
                Ok(()) => return Ok(()),
                Err(e) => groups.push(IssueGroup::new(e.issues)),
            }
        }

        Err(ValidationError::single(ValidationIssue::union(
            vec![PathSegment::from(field)],
            groups,
        )))
    }
}

fn fail(field: &str, code: IssueCode, message: impl Into<String>) -> ValidationError {
    ValidationError::single(ValidationIssue::field(field, code, message))
}

/// 验证器构建器
///
/// 按添加顺序收集问题
#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    issues: Vec<ValidationIssue>,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn add_result(&mut self, result: ValidationResult<()>) {
        if let Err(e) = result {
            for issue in e.issues {
                self.add_issue(issue);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn build(self) -> ValidationResult<()> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.issues))
        }
    }
}
