use serde::{Deserialize, Serialize};

/// 一道解析成功的选择题
///
/// `options` 为定长数组：4 个选项在解析阶段校验完毕，
/// 渲染时按下标访问不会越界
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 题干
    pub question: String,
    /// 4 个选项，保留原始的 "A) ..." 前缀
    pub options: [String; 4],
    /// 正确答案（含选项标签）
    pub correct_answer: String,
}
