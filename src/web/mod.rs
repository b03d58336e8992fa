//! 展示层（Web）
//!
//! 负责页面生命周期：文件上传、进度提示、原始响应展示、题目渲染。
//! 业务全部委托给 workflow 层，本层只做 HTTP 编解码。

pub mod handlers;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::error::{AppError, GenerationError};
use crate::models::ErrorResponse;
use crate::workflow::McqPipeline;

/// 请求间共享的只读状态
pub struct AppState {
    pub pipeline: McqPipeline,
}

/// 构建应用路由
pub fn build_router(config: &Config, state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/generate", post(handlers::generate))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Generation(GenerationError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Generation(GenerationError::QuotaExceeded { .. }) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            stage: self.stage().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
