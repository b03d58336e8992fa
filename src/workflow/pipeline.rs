//! 出题流水线 - 流程层
//!
//! 核心职责：定义"一次上传"的完整处理流程
//!
//! 流程顺序（严格线性，无重试、无缓存）：
//! 1. 提取 PDF 文本
//! 2. 调用生成服务
//! 3. 解析响应为题目记录
//!
//! 提取和生成阶段的失败直接向上传播并中止流程；
//! 解析阶段按块容错（见 parser 模块），不会使流水线失败。

use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::QuestionRecord;
use crate::parser::{self, ParseError};
use crate::services::{LlmService, PdfService};
use crate::utils::truncate_text;

/// 一次流水线运行的产出
#[derive(Debug)]
pub struct McqOutput {
    /// 生成服务的原始响应（展示层原样显示）
    pub raw_response: String,
    /// 解析出的题目记录
    pub records: Vec<QuestionRecord>,
    /// 被丢弃块的诊断信息
    pub diagnostics: Vec<ParseError>,
}

/// 出题流水线
///
/// - 编排 提取 → 生成 → 解析 的完整流程
/// - 不持有任何请求级状态，可在请求间共享
pub struct McqPipeline {
    pdf_service: PdfService,
    llm_service: LlmService,
    verbose_logging: bool,
}

impl McqPipeline {
    /// 创建新的流水线
    pub fn new(config: &Config) -> Self {
        Self {
            pdf_service: PdfService::new(),
            llm_service: LlmService::new(config),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 处理一份上传的 PDF
    pub async fn run(&self, pdf_bytes: &[u8]) -> AppResult<McqOutput> {
        // ========== 阶段 1: 文本提取 ==========
        info!("📄 开始提取 PDF 文本 ({} 字节)", pdf_bytes.len());
        let content = self.pdf_service.extract_text(pdf_bytes)?;
        info!("✓ 文本提取完成，共 {} 字符", content.chars().count());
        if self.verbose_logging {
            info!("提取文本预览: {}", truncate_text(&content, 200));
        }

        // ========== 阶段 2: 题目生成 ==========
        info!("🤖 调用生成服务...");
        let raw_response = self.llm_service.generate_mcqs(&content).await?;
        info!(
            "✓ 生成完成，响应预览: {}",
            truncate_text(&raw_response, 120)
        );

        // ========== 阶段 3: 响应解析 ==========
        let outcome = parser::parse(&raw_response);
        if outcome.diagnostics.is_empty() {
            info!("✓ 解析完成，共 {} 道题目", outcome.records.len());
        } else {
            warn!(
                "⚠️ 解析完成，{} 道题目，{} 个块被丢弃",
                outcome.records.len(),
                outcome.diagnostics.len()
            );
        }

        Ok(McqOutput {
            raw_response,
            records: outcome.records,
            diagnostics: outcome.diagnostics,
        })
    }
}
