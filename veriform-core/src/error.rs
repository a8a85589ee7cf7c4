/// 统一的错误处理类型
///
/// 二进制入口使用 anyhow::Result，通过 .context() 添加上下文信息。
pub use anyhow::Result;

use thiserror::Error;

/// 应用启动和运行期错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to initialize logging: {0}")]
    LoggingInitFailed(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("{0}")]
    Other(String),
}

pub type ApplicationResult<T> = std::result::Result<T, ApplicationError>;
