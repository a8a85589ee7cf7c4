//! Veriform Validator - 表单校验模块
//!
//! 提供声明式的表单 Schema、校验问题（issue）模型，以及把问题列表
//! 归一化为「每个字段一条错误」的 [`normalize_issues`]。
//!
//! ```ignore
//! use veriform_validator::*;
//!
//! let schema = Schema::new()
//!     .field(FieldSchema::string("email").email())
//!     .field(FieldSchema::string("password").min_length(8));
//!
//! if let Err(e) = schema.validate(&values) {
//!     let errors = e.into_field_errors();
//! }
//! ```

pub mod error;
pub mod issue;
pub mod normalizer;
pub mod rules;
pub mod schema;

pub use error::*;
pub use issue::*;
pub use normalizer::*;
pub use rules::*;
pub use schema::*;
