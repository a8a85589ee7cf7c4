//! Web 服务器模块
//!
//! 基于 Axum 的 Web 服务器实现

use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use veriform_core::{ApplicationError, ApplicationResult, Environment};

use crate::constants::*;

/// Web 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerProperties {
    /// 服务器监听地址
    pub host: String,

    /// 服务器监听端口
    pub port: u16,

    /// 是否启用请求日志
    pub enable_request_logging: bool,
}

impl Default for ServerProperties {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_request_logging: true,
        }
    }
}

impl ServerProperties {
    /// 从 Environment 加载配置
    pub fn from_environment(env: &Environment) -> ApplicationResult<Self> {
        let defaults = Self::default();
        let port = env.get_i64_or(SERVER_PORT, i64::from(defaults.port));

        Ok(Self {
            host: env.get_string_or(SERVER_HOST, &defaults.host),
            port: u16::try_from(port).map_err(|_| {
                ApplicationError::Config(format!("{} out of range: {}", SERVER_PORT, port))
            })?,
            enable_request_logging: env
                .get_bool_or(SERVER_ENABLE_REQUEST_LOGGING, defaults.enable_request_logging),
        })
    }

    /// 获取服务器地址
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Veriform Web 服务器
pub struct WebServer {
    config: ServerProperties,
    router: Router,
}

impl WebServer {
    pub fn new(config: ServerProperties, router: Router) -> Self {
        Self { config, router }
    }

    /// 启动服务器，收到 Ctrl+C 或 SIGTERM 后优雅退出
    pub async fn run(self) -> ApplicationResult<()> {
        let addr = self.config.address();

        tracing::info!("🚀 Starting Veriform on {}", addr);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ApplicationError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

        tracing::info!("✅ Server listening on http://{}", addr);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApplicationError::Server(e.to_string()))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
