use serde::{Deserialize, Serialize};

use crate::models::QuestionRecord;

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// 题目生成接口的响应
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// 生成服务的原始响应文本（展示层原样显示，便于排查）
    pub raw_response: String,
    /// 解析出的题目
    pub questions: Vec<QuestionRecord>,
    /// 被丢弃的格式错误块的诊断信息
    pub diagnostics: Vec<String>,
    /// 一道题都没有解析出来时的明确提示
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// 错误响应体
///
/// `stage` 指出失败的阶段（文本提取 / 题目生成 / ...）
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub stage: String,
    pub message: String,
}
