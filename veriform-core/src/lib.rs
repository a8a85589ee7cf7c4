// veriform-core: Veriform 的基础设施
//
// 提供：
// - 分层配置（TOML 文件 + 环境变量 + 内存）
// - 基于 tracing 的日志初始化
// - 应用级错误类型

pub mod config;
pub mod error;
pub mod logging;

pub use config::{
    ConfigValue, Environment, EnvironmentPropertySource, MapPropertySource, PropertySource,
    TomlPropertySource,
};
pub use error::{ApplicationError, ApplicationResult, Result};
pub use logging::{LogFormat, LogLevel, LoggingConfig};

/// Prelude 模块，包含常用的类型
pub mod prelude {
    pub use crate::config::{
        self, ConfigValue, Environment, EnvironmentPropertySource, MapPropertySource,
        PropertySource, TomlPropertySource,
    };
    pub use crate::error::{ApplicationError, ApplicationResult, Result};
    pub use crate::logging::{LogFormat, LogLevel, LoggingConfig};
    pub use anyhow::{anyhow, Context};
}
