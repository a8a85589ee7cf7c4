//! # Veriform Web
//!
//! 渐进增强的表单校验示例，基于 Axum 构建
//!
//! ## 核心特性
//!
//! - **服务端权威校验** - 表单提交按 Schema 校验，失败返回 400 和逐字段错误
//! - **浏览器端镜像校验** - 同一份 Schema 嵌入页面，脚本加载后即时校验
//! - **无脚本可用** - 未加载脚本时依靠原生 `required` / `minlength` 和整页提交

pub mod constants;
pub mod controller;
pub mod exception_handler;
pub mod extractors;
pub mod form_controller;
pub mod forms;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod template;

use veriform_core::{ApplicationResult, Environment};

use crate::routes::build_router;
use crate::server::{ServerProperties, WebServer};
use crate::state::AppState;

/// 按配置组装并运行服务器
pub async fn run(env: &Environment) -> ApplicationResult<()> {
    let server = ServerProperties::from_environment(env)?;
    let state = AppState::from_environment(env)?;

    let router = build_router(state, &server);
    WebServer::new(server, router).run().await
}

pub mod prelude {
    //! 预导入模块

    pub use crate::controller::*;
    pub use crate::exception_handler::*;
    pub use crate::extractors::*;
    pub use crate::routes::*;
    pub use crate::server::*;
    pub use crate::state::*;
    pub use crate::template::*;

    pub use axum;
    pub use axum::http::StatusCode;
    pub use axum::response::{IntoResponse, Response};
    pub use axum::Router;
}
