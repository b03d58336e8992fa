use anyhow::Result;
use tracing::error;

use pdf_mcq_generator::app::App;
use pdf_mcq_generator::config::Config;
use pdf_mcq_generator::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 日志必须先于配置加载初始化，配置错误才看得见；
    // 这里直接读 VERBOSE_LOGGING，完整解析仍在 Config::from_env
    let verbose = std::env::var("VERBOSE_LOGGING")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    logging::init(verbose);

    // 加载配置，缺少 API 密钥在这里直接失败
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ 启动失败: {}", e);
            return Err(e.into());
        }
    };

    // 初始化并运行应用
    App::initialize(config).run().await?;

    Ok(())
}
