//! 生成服务 - 业务能力层
//!
//! 只负责"调用 Gemini 生成选择题"能力，不关心流程。
//!
//! ## 技术栈
//! - 使用 `reqwest` 直接调用 Gemini REST `generateContent` 接口
//! - 生成参数（temperature / topP / topK / maxOutputTokens）为固定常量，
//!   不暴露给用户配置

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, GenerationError};
use crate::utils::truncate_text;

/// 生成温度
const GENERATION_TEMPERATURE: f64 = 0.7;
/// 核采样阈值
const GENERATION_TOP_P: f64 = 1.0;
/// top-k 采样
const GENERATION_TOP_K: u32 = 1;
/// 最大输出 token 数
const GENERATION_MAX_OUTPUT_TOKENS: u32 = 1024;

/// 出题指令模板，`{content}` 处插入提取出的全文
const PROMPT_TEMPLATE: &str = "\
Generate 10 multiple-choice questions (MCQs) with four options based on the following content:\n\n\
{content}. Return the answer in the following format:\n\n\
\tEach question must have one correct answer and four answer options. \n\n\
\tEnsure that the questions cover various topics and concepts in the source material. \n\n\
\tFormatting: \n\n\
\tEach MCQ should be presented in the following format: \n\n\
\tQuestion: [Your question here] \n\n\
\tOptions: \n\n\
\tA) [Option A] \n\n\
\tB) [Option B] \n\n\
\tC) [Option C] \n\n\
\tD) [Option D] \n\n\
\tCorrect Answer: [Specify the correct answer] \n\n\
.\nAnswer:";

// ========== Gemini 接口的请求 / 响应结构 ==========

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    top_k: u32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: GENERATION_TEMPERATURE,
            top_p: GENERATION_TOP_P,
            top_k: GENERATION_TOP_K,
            max_output_tokens: GENERATION_MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// 生成服务
///
/// 职责：
/// - 把提取出的全文填入固定指令模板
/// - 调用 Gemini API 并返回原始响应文本
/// - 不解析响应内容（交给 parser 模块）
pub struct LlmService {
    client: reqwest::Client,
    api_key: String,
    api_base_url: String,
    model_name: String,
    timeout_secs: u64,
}

impl LlmService {
    /// 创建新的生成服务
    ///
    /// 请求超时来自配置（默认 120 秒），超时映射为
    /// [`GenerationError::Timeout`]
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_key: config.gemini_api_key.clone(),
            api_base_url: config.gemini_api_base_url.clone(),
            model_name: config.gemini_model_name.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }

    /// 构建出题提示词
    fn build_prompt(content: &str) -> String {
        PROMPT_TEMPLATE.replace("{content}", content)
    }

    /// 根据文档全文生成选择题，返回模型的原始响应文本
    pub async fn generate_mcqs(&self, content: &str) -> AppResult<String> {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base_url, self.model_name
        );

        debug!("调用生成服务，模型: {}", self.model_name);
        debug!("文档全文长度: {} 字符", content.chars().count());

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(content),
                }],
            }],
            generation_config: GenerationConfig::default(),
        };

        let response = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("生成服务请求失败: {}", e);
                if e.is_timeout() {
                    GenerationError::Timeout {
                        seconds: self.timeout_secs,
                    }
                } else {
                    GenerationError::RequestFailed {
                        endpoint: endpoint.clone(),
                        source: Box::new(e),
                    }
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::QuotaExceeded { endpoint }.into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "生成服务返回错误状态 {}: {}",
                status,
                truncate_text(&body, 200)
            );
            return Err(GenerationError::BadResponse {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::generation_request_failed(endpoint.clone(), e))?;

        // 拼接首个候选的全部文本片段
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse {
                model: self.model_name.clone(),
            }
            .into());
        }

        debug!("生成服务响应长度: {} 字符", text.chars().count());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_interpolates_content() {
        let prompt = LlmService::build_prompt("光合作用发生在叶绿体中。");

        assert!(prompt.contains("光合作用发生在叶绿体中。"));
        assert!(!prompt.contains("{content}"));
        assert!(prompt.starts_with("Generate 10 multiple-choice questions"));
    }

    #[test]
    fn test_prompt_documents_expected_layout() {
        let prompt = LlmService::build_prompt("x");

        // 模板必须向模型说明解析器所依赖的块布局
        assert!(prompt.contains("Question: [Your question here]"));
        assert!(prompt.contains("A) [Option A]"));
        assert!(prompt.contains("D) [Option D]"));
        assert!(prompt.contains("Correct Answer: [Specify the correct answer]"));
    }

    #[test]
    fn test_generation_config_wire_names_and_constants() {
        let config = GenerationConfig::default();
        let json = serde_json::to_value(&config).expect("序列化失败");

        assert_eq!(json["temperature"], serde_json::json!(0.7));
        assert_eq!(json["topP"], serde_json::json!(1.0));
        assert_eq!(json["topK"], serde_json::json!(1));
        assert_eq!(json["maxOutputTokens"], serde_json::json!(1024));
    }

    #[test]
    fn test_response_with_missing_candidates_deserializes() {
        let body: GenerateContentResponse =
            serde_json::from_str("{}").expect("应能反序列化空对象");
        assert!(body.candidates.is_empty());
    }
}
