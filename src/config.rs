use crate::error::{AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP 服务监听地址
    pub bind_addr: String,
    /// 上传文件大小上限（字节）
    pub max_upload_bytes: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 生成服务配置 ---
    /// Gemini API 密钥（必须提供，无默认值）
    pub gemini_api_key: String,
    pub gemini_api_base_url: String,
    pub gemini_model_name: String,
    /// 生成请求的超时秒数
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:7690".to_string(),
            max_upload_bytes: 20 * 1024 * 1024,
            verbose_logging: false,
            gemini_api_key: String::new(),
            gemini_api_base_url: "https://generativelanguage.googleapis.com".to_string(),
            gemini_model_name: "gemini-pro".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 除 `GEMINI_API_KEY` 外的变量都有默认值；
    /// 密钥缺失在启动期直接报 [`ConfigError::EnvVarNotFound`]。
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();

        let gemini_api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            ConfigError::EnvVarNotFound {
                var_name: "GEMINI_API_KEY".to_string(),
            }
        })?;

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(default.bind_addr),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_upload_bytes),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            gemini_api_key,
            gemini_api_base_url: std::env::var("GEMINI_API_BASE_URL").unwrap_or(default.gemini_api_base_url),
            gemini_model_name: std::env::var("GEMINI_MODEL_NAME").unwrap_or(default.gemini_model_name),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
        })
    }
}
