//! PDF 文本提取服务 - 业务能力层
//!
//! 只负责"从 PDF 字节流提取纯文本"能力，不关心流程

use lopdf::Document;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, ExtractionError};

/// PDF 文本提取服务
pub struct PdfService;

impl PdfService {
    pub fn new() -> Self {
        Self
    }

    /// 从 PDF 字节流提取全文
    ///
    /// 按页序逐页提取，页与页之间以单个换行符连接，
    /// 避免跨页单词粘连。
    ///
    /// - 单页提取失败或无文本（纯图片页）：跳过该页，不报错
    /// - 整个文档无法读取：[`ExtractionError::DocumentUnreadable`]
    /// - 所有页面均无文本：[`ExtractionError::NoExtractableText`]
    pub fn extract_text(&self, pdf_bytes: &[u8]) -> AppResult<String> {
        let doc = Document::load_mem(pdf_bytes).map_err(AppError::document_unreadable)?;

        let pages = doc.get_pages();
        let page_count = pages.len();
        debug!("PDF 共 {} 页", page_count);

        let mut page_texts: Vec<String> = Vec::with_capacity(page_count);

        for (page_num, _page_id) in pages {
            match doc.extract_text(&[page_num]) {
                Ok(text) => {
                    if text.trim().is_empty() {
                        debug!("第 {} 页无可提取文本，跳过", page_num);
                    } else {
                        page_texts.push(text.trim_end().to_string());
                    }
                }
                Err(e) => {
                    warn!("第 {} 页文本提取失败，跳过: {}", page_num, e);
                }
            }
        }

        if page_texts.is_empty() {
            return Err(ExtractionError::NoExtractableText { page_count }.into());
        }

        let full_text = page_texts.join("\n");
        debug!("提取完成，共 {} 字符", full_text.chars().count());

        Ok(full_text)
    }
}

impl Default for PdfService {
    fn default() -> Self {
        Self::new()
    }
}
