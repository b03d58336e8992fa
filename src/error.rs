use crate::parser::ParseError;
use std::fmt;

/// 应用程序错误类型
///
/// 每个变体对应流水线的一个阶段，用户可见的错误信息
/// 必须能指出是哪个阶段失败（配置 / 提取 / 生成 / 解析）
#[derive(Debug)]
pub enum AppError {
    /// 配置错误（启动阶段，致命）
    Config(ConfigError),
    /// PDF 文本提取错误
    Extraction(ExtractionError),
    /// 生成服务调用错误
    Generation(GenerationError),
    /// 响应解析错误
    Parse(ParseError),
    /// 请求本身不合法（文件类型、缺少字段等）
    BadRequest(String),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Extraction(e) => write!(f, "文本提取错误: {}", e),
            AppError::Generation(e) => write!(f, "生成错误: {}", e),
            AppError::Parse(e) => write!(f, "解析错误: {}", e),
            AppError::BadRequest(msg) => write!(f, "请求错误: {}", msg),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Extraction(e) => Some(e),
            AppError::Generation(e) => Some(e),
            AppError::Parse(e) => Some(e),
            AppError::BadRequest(_) => None,
            AppError::Other(_) => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量不存在
    EnvVarNotFound {
        var_name: String,
    },
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarNotFound { var_name } => {
                write!(f, "环境变量 {} 不存在", var_name)
            }
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// PDF 文本提取错误
#[derive(Debug)]
pub enum ExtractionError {
    /// 文档无法读取（损坏或不是合法 PDF）
    DocumentUnreadable {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 文档所有页面均无可提取文本
    NoExtractableText {
        page_count: usize,
    },
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::DocumentUnreadable { source } => {
                write!(f, "无法读取 PDF 文档: {}", source)
            }
            ExtractionError::NoExtractableText { page_count } => {
                write!(f, "文档 {} 页均无可提取文本", page_count)
            }
        }
    }
}

impl std::error::Error for ExtractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractionError::DocumentUnreadable { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            ExtractionError::NoExtractableText { .. } => None,
        }
    }
}

/// 生成服务调用错误
#[derive(Debug)]
pub enum GenerationError {
    /// 网络请求失败
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 请求超时
    Timeout {
        seconds: u64,
    },
    /// 请求频率 / 配额限制
    QuotaExceeded {
        endpoint: String,
    },
    /// 服务返回错误状态
    BadResponse {
        status: u16,
        body: String,
    },
    /// 服务返回空内容
    ///
    /// 空响应不能被当成"没有题目"静默处理
    EmptyResponse {
        model: String,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::RequestFailed { endpoint, source } => {
                write!(f, "生成服务请求失败 ({}): {}", endpoint, source)
            }
            GenerationError::Timeout { seconds } => {
                write!(f, "生成服务请求超时 ({} 秒)", seconds)
            }
            GenerationError::QuotaExceeded { endpoint } => {
                write!(f, "生成服务请求频率限制 ({})", endpoint)
            }
            GenerationError::BadResponse { status, body } => {
                write!(f, "生成服务返回错误状态 {}: {}", status, body)
            }
            GenerationError::EmptyResponse { model } => {
                write!(f, "生成服务返回内容为空 (模型: {})", model)
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::RequestFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        AppError::Extraction(err)
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::Generation(err)
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        AppError::Parse(err)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文档不可读错误
    pub fn document_unreadable(
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Extraction(ExtractionError::DocumentUnreadable {
            source: Box::new(source),
        })
    }

    /// 创建生成请求失败错误
    pub fn generation_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Generation(GenerationError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 返回错误所属的阶段名称（用于面向用户的错误提示）
    pub fn stage(&self) -> &'static str {
        match self {
            AppError::Config(_) => "配置",
            AppError::Extraction(_) => "文本提取",
            AppError::Generation(_) => "题目生成",
            AppError::Parse(_) => "响应解析",
            AppError::BadRequest(_) => "请求校验",
            AppError::Other(_) => "未知阶段",
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
