//! 路由装配

use axum::{middleware::from_fn, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::constants::FORM_PATH;
use crate::form_controller::{index, show_form, submit_form};
use crate::middleware::{error_response_path, request_id, request_logging};
use crate::server::ServerProperties;
use crate::state::AppState;

/// 构建应用路由
///
/// 中间件由外到内：请求 ID、请求日志（可关闭）、tracing span、错误响应路径
pub fn build_router(state: Arc<AppState>, server: &ServerProperties) -> Router {
    let mut router = Router::new()
        .route("/", get(index))
        .route(FORM_PATH, get(show_form).post(submit_form))
        .layer(from_fn(error_response_path))
        .layer(TraceLayer::new_for_http());

    if server.enable_request_logging {
        router = router.layer(from_fn(request_logging));
    }

    router.layer(from_fn(request_id)).with_state(state)
}
