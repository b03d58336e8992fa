//! 日志工具模块
//!
//! 提供日志初始化和格式化的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 日志级别优先读取 `RUST_LOG`，未设置时按 `verbose` 选择
/// `debug` 或 `info`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `bind_addr`: 服务监听地址
/// - `model_name`: 使用的生成模型
pub fn log_startup(bind_addr: &str, model_name: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 选择题生成服务");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📡 监听地址: {}", bind_addr);
    info!("🤖 生成模型: {}", model_name);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_short_input_unchanged() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
    }

    #[test]
    fn test_truncate_text_long_input_gets_ellipsis() {
        assert_eq!(truncate_text("abcdefgh", 5), "abcde...");
    }
}
