//! 错误归一化
//!
//! 把校验问题列表（可能包含联合校验的嵌套分支）转换为
//! 「字段路径 -> 一条错误」的映射，供表单逐字段展示。

use crate::issue::{IssueCode, ValidationIssue};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// 单个字段展示的错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
    /// 客户端表单库读取的字段名为 `type`
    #[serde(rename = "type")]
    pub code: IssueCode,
}

impl From<&ValidationIssue> for FieldError {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            message: issue.message.clone(),
            code: issue.code,
        }
    }
}

/// 字段路径键 -> 错误
pub type FieldErrorMap = BTreeMap<String, FieldError>;

/// 归一化校验问题
///
/// 按工作队列顺序处理：
/// - 同一路径只保留第一次出现的问题；
/// - 联合失败取第一个分支的第一条子问题作为代表；
/// - 联合失败的所有子问题追加到队尾，使其他分支涉及的路径也能得到错误。
pub fn normalize_issues(issues: Vec<ValidationIssue>) -> FieldErrorMap {
    let mut queue = issues;
    let mut errors = FieldErrorMap::new();
    let mut cursor = 0;

    while cursor < queue.len() {
        let issue = &queue[cursor];
        if let Entry::Vacant(slot) = errors.entry(issue.path_key()) {
            if let Some(representative) = representative(issue) {
                slot.insert(FieldError::from(representative));
            }
        }

        let groups = std::mem::take(&mut queue[cursor].union_errors);
        queue.extend(groups.into_iter().flat_map(|group| group.issues));
        cursor += 1;
    }

    tracing::trace!(fields = errors.len(), "Normalized validation issues");
    errors
}

/// 第一个分支为空时没有代表，不会回退到后续分支
fn representative(issue: &ValidationIssue) -> Option<&ValidationIssue> {
    if issue.is_union() {
        issue.union_errors[0].issues.first()
    } else {
        Some(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueGroup;

    fn literal(field: &str, message: &str) -> ValidationIssue {
        ValidationIssue::field(field, IssueCode::InvalidLiteral, message)
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_issues(vec![]).is_empty());
    }

    #[test]
    fn test_invalid_email() {
        let errors = normalize_issues(vec![ValidationIssue::field(
            "email",
            IssueCode::InvalidString,
            "Invalid email",
        )]);

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors["email"],
            FieldError {
                message: "Invalid email".to_string(),
                code: IssueCode::InvalidString,
            }
        );
    }

    #[test]
    fn test_short_password() {
        let errors = normalize_issues(vec![ValidationIssue::field(
            "password",
            IssueCode::TooSmall,
            "String must contain at least 8 character(s)",
        )]);

        assert_eq!(errors["password"].message, "String must contain at least 8 character(s)");
        assert_eq!(errors["password"].code, IssueCode::TooSmall);
    }

    #[test]
    fn test_first_issue_for_path_wins() {
        let errors = normalize_issues(vec![
            ValidationIssue::field("password", IssueCode::TooSmall, "too short"),
            ValidationIssue::field("password", IssueCode::Custom, "needs a digit"),
        ]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors["password"].message, "too short");
        assert_eq!(errors["password"].code, IssueCode::TooSmall);
    }

    #[test]
    fn test_root_path_maps_to_empty_key() {
        let errors = normalize_issues(vec![ValidationIssue::new(
            vec![],
            IssueCode::Custom,
            "Passwords do not match",
        )]);

        assert_eq!(errors[""].message, "Passwords do not match");
    }

    #[test]
    fn test_union_uses_leftmost_alternative() {
        let issue = ValidationIssue::union(
            vec!["role".into()],
            vec![
                IssueGroup::new(vec![literal("role", "Expected 'admin'")]),
                IssueGroup::new(vec![literal("role", "Expected 'user'")]),
            ],
        );

        let errors = normalize_issues(vec![issue]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors["role"].message, "Expected 'admin'");
        assert_eq!(errors["role"].code, IssueCode::InvalidLiteral);
    }

    #[test]
    fn test_union_surfaces_other_paths() {
        // 第二个分支涉及 `contact.phone`，即使没被选为代表也要出现
        let issue = ValidationIssue::union(
            vec!["contact".into()],
            vec![
                IssueGroup::new(vec![ValidationIssue::new(
                    vec!["contact".into(), "email".into()],
                    IssueCode::InvalidString,
                    "Invalid email",
                )]),
                IssueGroup::new(vec![ValidationIssue::new(
                    vec!["contact".into(), "phone".into()],
                    IssueCode::TooSmall,
                    "Phone is too short",
                )]),
            ],
        );

        let errors = normalize_issues(vec![issue]);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors["contact"].message, "Invalid email");
        assert_eq!(errors["contact.email"].message, "Invalid email");
        assert_eq!(errors["contact.phone"].message, "Phone is too short");
    }

    #[test]
    fn test_union_on_already_mapped_path_still_flattens() {
        let issues = vec![
            ValidationIssue::field("role", IssueCode::InvalidType, "Required"),
            ValidationIssue::union(
                vec!["role".into()],
                vec![IssueGroup::new(vec![ValidationIssue::new(
                    vec!["role".into(), "name".into()],
                    IssueCode::TooSmall,
                    "Name is too short",
                )])],
            ),
        ];

        let errors = normalize_issues(issues);

        assert_eq!(errors["role"].message, "Required");
        assert_eq!(errors["role.name"].message, "Name is too short");
    }

    #[test]
    fn test_nested_unions_are_flattened() {
        let inner = ValidationIssue::union(
            vec!["value".into()],
            vec![IssueGroup::new(vec![ValidationIssue::new(
                vec!["value".into(), 0.into()],
                IssueCode::TooBig,
                "Too many",
            )])],
        );
        let outer = ValidationIssue::union(vec![], vec![IssueGroup::new(vec![inner])]);

        let errors = normalize_issues(vec![outer]);

        // 根路径的代表是内层联合问题本身
        assert_eq!(errors[""].code, IssueCode::InvalidUnion);
        assert_eq!(errors["value"].message, "Too many");
        assert_eq!(errors["value.0"].message, "Too many");
    }

    #[test]
    fn test_empty_first_alternative_has_no_representative() {
        let issue = ValidationIssue::union(
            vec!["role".into()],
            vec![
                IssueGroup::default(),
                IssueGroup::new(vec![literal("plan", "Expected 'pro'")]),
            ],
        );

        let errors = normalize_issues(vec![issue]);

        assert!(!errors.contains_key("role"));
        assert_eq!(errors["plan"].message, "Expected 'pro'");
    }

    #[test]
    fn test_union_without_alternatives_reports_itself() {
        let issue = ValidationIssue::union(vec!["role".into()], vec![]);
        assert!(!issue.is_union());

        let errors = normalize_issues(vec![issue]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors["role"].message, "Invalid input");
        assert_eq!(errors["role"].code, IssueCode::InvalidUnion);
    }

    #[test]
    fn test_later_issue_fills_path_left_empty_by_union() {
        let issues = vec![
            ValidationIssue::union(vec!["role".into()], vec![IssueGroup::default()]),
            ValidationIssue::field("role", IssueCode::Custom, "Pick a role"),
        ];

        let errors = normalize_issues(issues);

        assert_eq!(errors["role"].message, "Pick a role");
    }

    #[test]
    fn test_field_error_serializes_code_as_type() {
        let error = FieldError {
            message: "Invalid email".to_string(),
            code: IssueCode::InvalidString,
        };
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json, serde_json::json!({ "message": "Invalid email", "type": "invalid_string" }));
    }
}
