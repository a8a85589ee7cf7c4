//! 配置常量定义
//!
//! 定义 Web 层使用的配置键名称

// ==================== Server 配置 ====================

/// 服务器监听地址
pub const SERVER_HOST: &str = "server.host";

/// 服务器监听端口
pub const SERVER_PORT: &str = "server.port";

/// 是否启用请求日志
pub const SERVER_ENABLE_REQUEST_LOGGING: &str = "server.enable-request-logging";

// ==================== 表单配置 ====================

/// 提交成功后、重定向前的等待时间（毫秒）
pub const FORM_SUBMIT_DELAY_MS: &str = "form.submit-delay-ms";

// ==================== 模板配置 ====================

/// 模板覆盖目录，未设置时使用内置模板
pub const TEMPLATE_DIR: &str = "template.dir";

// ==================== 路由 ====================

/// 表单页面路径
pub const FORM_PATH: &str = "/progressively-enhanced-form-validation";

/// 请求 ID 响应头
pub const REQUEST_ID_HEADER: &str = "x-request-id";
