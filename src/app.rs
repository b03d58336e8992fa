use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tracing::info;

use crate::config::Config;
use crate::utils::logging;
use crate::web::{self, AppState};
use crate::workflow::McqPipeline;

/// 应用主结构
pub struct App {
    config: Config,
    router: Router,
}

impl App {
    /// 初始化应用
    ///
    /// 构建流水线与路由；配置在此之前已校验完毕
    pub fn initialize(config: Config) -> Self {
        logging::log_startup(&config.bind_addr, &config.gemini_model_name);

        let state = Arc::new(AppState {
            pipeline: McqPipeline::new(&config),
        });
        let router = web::build_router(&config, state);

        Self { config, router }
    }

    /// 启动 HTTP 服务并一直运行
    pub async fn run(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr).await?;
        info!("✓ 服务已就绪: http://{}", self.config.bind_addr);

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
