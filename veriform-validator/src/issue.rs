//! 校验问题模型
//!
//! 一个 [`ValidationIssue`] 描述一次校验失败：字段路径、失败类型和提示信息。
//! 联合（union）校验失败时，每个候选分支的失败会作为一个 [`IssueGroup`]
//! 挂在 `union_errors` 上。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 字段路径中的一段
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "{}", index),
            PathSegment::Key(key) => f.write_str(key),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// 失败类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// 缺失或类型不符
    InvalidType,
    /// 字符串格式不符（如邮箱）
    InvalidString,
    TooSmall,
    TooBig,
    InvalidLiteral,
    /// 所有候选分支都未通过
    InvalidUnion,
    Custom,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::InvalidType => "invalid_type",
            IssueCode::InvalidString => "invalid_string",
            IssueCode::TooSmall => "too_small",
            IssueCode::TooBig => "too_big",
            IssueCode::InvalidLiteral => "invalid_literal",
            IssueCode::InvalidUnion => "invalid_union",
            IssueCode::Custom => "custom",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个候选分支的失败列表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueGroup {
    pub issues: Vec<ValidationIssue>,
}

impl IssueGroup {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }
}

/// 一次校验失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// 字段路径，空路径表示整个表单
    pub path: Vec<PathSegment>,
    pub code: IssueCode,
    pub message: String,
    /// 联合校验的候选分支失败，非联合失败时为空
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub union_errors: Vec<IssueGroup>,
}

impl ValidationIssue {
    pub fn new(path: Vec<PathSegment>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path,
            code,
            message: message.into(),
            union_errors: Vec::new(),
        }
    }

    /// 针对单个字段的问题
    pub fn field(field: impl Into<PathSegment>, code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(vec![field.into()], code, message)
    }

    /// 联合校验失败，`groups` 按候选分支的声明顺序排列
    ///
    /// `groups` 为空时该问题按普通问题处理：归一化记录它自身的
    /// `invalid_union` / "Invalid input"。`ValidationRules::one_of` 在没有
    /// 候选分支时直接失败，产生的就是这种问题。
    pub fn union(path: Vec<PathSegment>, groups: Vec<IssueGroup>) -> Self {
        Self {
            path,
            code: IssueCode::InvalidUnion,
            message: "Invalid input".to_string(),
            union_errors: groups,
        }
    }

    pub fn is_union(&self) -> bool {
        !self.union_errors.is_empty()
    }

    /// 以 `.` 连接的路径键，空路径得到 `""`
    pub fn path_key(&self) -> String {
        self.path
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path_key(), self.message, self.code)
    }
}
