//! # PDF MCQ Generator
//!
//! 从上传的 PDF 生成选择题的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构，一次上传对应一条严格线性的处理流水线：
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个输入
//! - `PdfService` - PDF 文本提取能力（lopdf，逐页）
//! - `LlmService` - Gemini 出题能力（固定指令模板与生成参数）
//!
//! ### ② 解析层（Parser，核心）
//! - `parser/` - 把模型的半结构化响应切分为题目记录
//! - 按行扫描的状态机，单块出错只丢弃该块并记录诊断
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/McqPipeline` - 提取 → 生成 → 解析 的流程编排
//!
//! ### ④ 展示层（Web）
//! - `web/` - axum 路由、multipart 上传、内嵌单页前端
//! - 原始响应原样展示；零题目时给出明确提示
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod services;
pub mod utils;
pub mod web;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::QuestionRecord;
pub use parser::{parse, ParseError, ParseOutcome};
pub use services::{LlmService, PdfService};
pub use workflow::{McqOutput, McqPipeline};
