//! HTTP 处理函数

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::Html,
    Json,
};
use bytes::Bytes;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{GenerateResponse, HealthResponse};
use crate::web::AppState;

/// 内嵌的单页前端
const INDEX_HTML: &str = include_str!("index.html");

/// 首页
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// 健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "PDF 选择题生成服务运行中".to_string(),
    })
}

/// 接收上传的 PDF，运行出题流水线
///
/// multipart 中只识别 `file` 字段，文件名必须以 `.pdf` 结尾
pub async fn generate(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut pdf_file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("读取上传数据失败: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let filename = field.file_name().unwrap_or("unknown").to_string();
            if !filename.to_lowercase().ends_with(".pdf") {
                warn!("拒绝非 PDF 文件: {}", filename);
                return Err(AppError::BadRequest(format!(
                    "文件类型不支持: {}，只接受 PDF 文件",
                    filename
                )));
            }
            let data: Bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("读取上传文件失败: {}", e)))?;
            info!("收到上传文件 '{}': {} 字节", filename, data.len());
            pdf_file_data = Some((filename, data.to_vec()));
        }
    }

    let (filename, file_data) = pdf_file_data
        .ok_or_else(|| AppError::BadRequest("请求中没有 PDF 文件".to_string()))?;

    info!("开始处理 '{}'", filename);
    let output = state.pipeline.run(&file_data).await?;

    let notice = if output.records.is_empty() {
        Some("未能从模型响应中解析出任何题目，请检查下方的原始响应。".to_string())
    } else {
        None
    };

    Ok(Json(GenerateResponse {
        raw_response: output.raw_response,
        questions: output.records,
        diagnostics: output.diagnostics.iter().map(|d| d.to_string()).collect(),
        notice,
    }))
}
