//! 响应解析器 - 核心模块
//!
//! 把生成服务返回的半结构化文本切分成结构化的题目记录。
//!
//! 期望的文本布局（每道题一个块）：
//!
//! ```text
//! Question: <题干>
//! Options:
//! A) <选项>
//! B) <选项>
//! C) <选项>
//! D) <选项>
//! Correct Answer: <答案>
//! ```
//!
//! ## 实现方式
//!
//! 按行扫描的状态机（寻找题干 → 读题干 → 读选项 → 读答案），
//! 标记匹配容忍行首空白和大小写差异，出错时报告 1 起始的行号。
//!
//! ## 容错策略
//!
//! 单个块格式错误时丢弃该块并记录诊断信息，继续解析后续块；
//! 整个解析过程永不中止。诊断随 [`ParseOutcome`] 一并返回，
//! 由展示层呈现给用户。
//!
//! 首个 "Question:" 标记之前的文本视为模型的开场白，直接丢弃。

use thiserror::Error;
use tracing::warn;

use crate::models::QuestionRecord;

/// 题干标记
const MARKER_QUESTION: &str = "question:";
/// 选项标记
const MARKER_OPTIONS: &str = "options:";
/// 答案标记
const MARKER_ANSWER: &str = "correct answer:";

/// 单个题目块的解析错误
///
/// 行号为 1 起始，指向出错位置（块起始行或块结束行）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 块内缺少 "Options:" 标记
    #[error("第 {line} 行: 题目块缺少 \"Options:\" 标记")]
    MissingOptions { line: usize },

    /// 块内缺少 "Correct Answer:" 标记
    #[error("第 {line} 行: 题目块缺少 \"Correct Answer:\" 标记")]
    MissingAnswer { line: usize },

    /// 选项数量不是 4
    ///
    /// 在解析阶段校验，避免渲染阶段按 0-3 下标访问时越界
    #[error("第 {line} 行: 题目块有 {found} 个选项，应为 4 个")]
    OptionCountOutOfRange { line: usize, found: usize },
}

/// 解析结果
///
/// 成功解析出的记录按出现顺序排列；被丢弃的块以诊断形式保留
#[derive(Debug, Default)]
pub struct ParseOutcome {
    /// 解析出的题目记录
    pub records: Vec<QuestionRecord>,
    /// 被丢弃块的诊断信息
    pub diagnostics: Vec<ParseError>,
}

/// 状态机状态
enum State {
    /// 尚未遇到题目块（或上一个块已结束）
    SeekingQuestion,
    /// 正在累积题干文本
    InQuestion,
    /// 正在累积选项行
    InOptions,
}

/// 正在构建的题目块
struct Block {
    /// 块起始行号（"Question:" 所在行）
    start_line: usize,
    question_lines: Vec<String>,
    option_lines: Vec<String>,
}

impl Block {
    fn new(start_line: usize, first_line: &str) -> Self {
        let mut question_lines = Vec::new();
        if !first_line.trim().is_empty() {
            question_lines.push(first_line.trim().to_string());
        }
        Self {
            start_line,
            question_lines,
            option_lines: Vec::new(),
        }
    }

    /// 用答案行收尾，构造完整记录
    fn finish(self, answer: &str, answer_line: usize) -> Result<QuestionRecord, ParseError> {
        let found = self.option_lines.len();
        let options: [String; 4] =
            self.option_lines
                .try_into()
                .map_err(|_| ParseError::OptionCountOutOfRange {
                    line: answer_line,
                    found,
                })?;

        Ok(QuestionRecord {
            question: self.question_lines.join("\n").trim().to_string(),
            options,
            correct_answer: answer.trim().to_string(),
        })
    }
}

/// 匹配行首标记（容忍前导空白和大小写），返回标记之后的剩余文本
fn marker_rest<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let trimmed = line.trim_start();
    match trimmed.get(..marker.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(marker) => Some(&trimmed[marker.len()..]),
        _ => None,
    }
}

/// 解析生成服务的原始响应
///
/// 纯函数：除 `warn!` 诊断日志外无副作用。
///
/// - 输入中没有任何 "Question:" 标记（包括空字符串）时返回空结果，不报错
/// - 格式错误的块被丢弃并记入 `diagnostics`，不影响其余块
pub fn parse(raw_response: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut state = State::SeekingQuestion;
    let mut block: Option<Block> = None;

    for (idx, line) in raw_response.lines().enumerate() {
        let line_no = idx + 1;

        // 新的题目块开始：先给未收尾的旧块记一笔诊断
        if let Some(rest) = marker_rest(line, MARKER_QUESTION) {
            if let Some(open) = block.take() {
                let err = match state {
                    State::InQuestion => ParseError::MissingOptions { line: open.start_line },
                    _ => ParseError::MissingAnswer { line: open.start_line },
                };
                drop_block(&mut outcome, err);
            }
            block = Some(Block::new(line_no, rest));
            state = State::InQuestion;
            continue;
        }

        match state {
            // 块外的行（开场白、答案后的补充说明）直接忽略
            State::SeekingQuestion => {}

            State::InQuestion => {
                if let Some(rest) = marker_rest(line, MARKER_OPTIONS) {
                    // "Options:" 同一行上如有内容，作为第一个选项行
                    if let Some(b) = block.as_mut() {
                        if !rest.trim().is_empty() {
                            b.option_lines.push(rest.trim().to_string());
                        }
                    }
                    state = State::InOptions;
                } else if marker_rest(line, MARKER_ANSWER).is_some() {
                    // 答案标记出现在选项标记之前：顺序约束被破坏
                    if let Some(open) = block.take() {
                        drop_block(
                            &mut outcome,
                            ParseError::MissingOptions { line: open.start_line },
                        );
                    }
                    state = State::SeekingQuestion;
                } else if let Some(b) = block.as_mut() {
                    if !line.trim().is_empty() {
                        b.question_lines.push(line.trim().to_string());
                    }
                }
            }

            State::InOptions => {
                if let Some(rest) = marker_rest(line, MARKER_ANSWER) {
                    if let Some(open) = block.take() {
                        match open.finish(rest, line_no) {
                            Ok(record) => outcome.records.push(record),
                            Err(e) => drop_block(&mut outcome, e),
                        }
                    }
                    state = State::SeekingQuestion;
                } else if let Some(b) = block.as_mut() {
                    if !line.trim().is_empty() {
                        b.option_lines.push(line.trim().to_string());
                    }
                }
            }
        }
    }

    // 输入结束时仍未收尾的块
    if let Some(open) = block.take() {
        let err = match state {
            State::InQuestion => ParseError::MissingOptions { line: open.start_line },
            _ => ParseError::MissingAnswer { line: open.start_line },
        };
        drop_block(&mut outcome, err);
    }

    outcome
}

/// 丢弃一个格式错误的块并记录诊断
fn drop_block(outcome: &mut ParseOutcome, err: ParseError) {
    warn!("丢弃格式错误的题目块: {}", err);
    outcome.diagnostics.push(err);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "Question: What is 2+2?\n\
Options:\n\
A) 3\n\
B) 4\n\
C) 5\n\
D) 6\n\
Correct Answer: B) 4\n";

    #[test]
    fn test_round_trip_single_block() {
        let outcome = parse(WELL_FORMED);

        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.diagnostics.is_empty());

        let record = &outcome.records[0];
        assert_eq!(record.question, "What is 2+2?");
        assert_eq!(record.options, ["A) 3", "B) 4", "C) 5", "D) 6"]);
        assert_eq!(record.correct_answer, "B) 4");
    }

    #[test]
    fn test_two_blocks_in_order_no_cross_contamination() {
        let raw = "Question: First?\n\
Options:\n\
A) a1\n\
B) b1\n\
C) c1\n\
D) d1\n\
Correct Answer: A) a1\n\
Question: Second?\n\
Options:\n\
A) a2\n\
B) b2\n\
C) c2\n\
D) d2\n\
Correct Answer: D) d2\n";

        let outcome = parse(raw);

        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.records[0].question, "First?");
        assert_eq!(outcome.records[0].options, ["A) a1", "B) b1", "C) c1", "D) d1"]);
        assert_eq!(outcome.records[0].correct_answer, "A) a1");
        assert_eq!(outcome.records[1].question, "Second?");
        assert_eq!(outcome.records[1].options, ["A) a2", "B) b2", "C) c2", "D) d2"]);
        assert_eq!(outcome.records[1].correct_answer, "D) d2");
    }

    #[test]
    fn test_empty_input_yields_empty_outcome() {
        let outcome = parse("");
        assert!(outcome.records.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_no_question_marker_yields_empty_outcome() {
        let outcome = parse("这里没有任何题目标记，只有一段普通文本。\n换行也一样。");
        assert!(outcome.records.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_preamble_is_discarded() {
        let raw = format!("Here are your 10 MCQs:\n\n{}", WELL_FORMED);
        let outcome = parse(&raw);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].question, "What is 2+2?");
    }

    #[test]
    fn test_missing_options_marker_is_diagnosed_not_fabricated() {
        let raw = "Question: Broken?\n\
A) 1\n\
B) 2\n\
Correct Answer: A) 1\n";

        let outcome = parse(raw);

        assert!(outcome.records.is_empty());
        assert_eq!(
            outcome.diagnostics,
            vec![ParseError::MissingOptions { line: 1 }]
        );
    }

    #[test]
    fn test_missing_answer_marker_is_diagnosed() {
        let raw = "Question: Broken?\n\
Options:\n\
A) 1\n\
B) 2\n\
C) 3\n\
D) 4\n";

        let outcome = parse(raw);

        assert!(outcome.records.is_empty());
        assert_eq!(
            outcome.diagnostics,
            vec![ParseError::MissingAnswer { line: 1 }]
        );
    }

    #[test]
    fn test_three_options_is_out_of_range() {
        let raw = "Question: Broken?\n\
Options:\n\
A) 1\n\
B) 2\n\
C) 3\n\
Correct Answer: A) 1\n";

        let outcome = parse(raw);

        assert!(outcome.records.is_empty());
        assert_eq!(
            outcome.diagnostics,
            vec![ParseError::OptionCountOutOfRange { line: 6, found: 3 }]
        );
    }

    #[test]
    fn test_malformed_block_does_not_abort_later_blocks() {
        let raw = format!(
            "Question: Broken?\nCorrect Answer: A) 1\n{}",
            WELL_FORMED
        );

        let outcome = parse(&raw);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].question, "What is 2+2?");
        assert_eq!(
            outcome.diagnostics,
            vec![ParseError::MissingOptions { line: 1 }]
        );
    }

    #[test]
    fn test_marker_case_and_whitespace_tolerance() {
        let raw = "  QUESTION: Tolerant?\n\
options:\n\
A) 1\n\
B) 2\n\
C) 3\n\
D) 4\n\
  correct answer: C) 3\n";

        let outcome = parse(raw);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].question, "Tolerant?");
        assert_eq!(outcome.records[0].correct_answer, "C) 3");
    }

    #[test]
    fn test_blank_lines_between_options_are_skipped() {
        let raw = "Question: Spaced?\n\
Options:\n\
A) 1\n\
\n\
B) 2\n\
C) 3\n\
D) 4\n\
Correct Answer: B) 2\n";

        let outcome = parse(raw);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].options, ["A) 1", "B) 2", "C) 3", "D) 4"]);
    }

    #[test]
    fn test_trailing_commentary_after_answer_is_ignored() {
        let raw = format!("{}\n以上就是全部题目，祝学习愉快！\n", WELL_FORMED);
        let outcome = parse(&raw);
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_multiline_question_text() {
        let raw = "Question: 下列关于光合作用的说法，\n\
哪一项是正确的？\n\
Options:\n\
A) 1\n\
B) 2\n\
C) 3\n\
D) 4\n\
Correct Answer: A) 1\n";

        let outcome = parse(raw);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(
            outcome.records[0].question,
            "下列关于光合作用的说法，\n哪一项是正确的？"
        );
    }

    #[test]
    fn test_option_lines_kept_verbatim_with_labels() {
        let raw = "Question: Labels?\n\
Options:\n\
A) 北京 (首都)\n\
B) 上海\n\
C) 广州\n\
D) 深圳\n\
Correct Answer: A) 北京 (首都)\n";

        let outcome = parse(raw);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].options[0], "A) 北京 (首都)");
    }
}
