//! 前端统一错误类型

use thiserror::Error;

/// 前端统一错误类型
#[derive(Error, Debug)]
pub enum FrontendError {
    /// 配置错误（缺少必需的环境变量、非法取值等），启动时致命
    #[error("configuration error: {0}")]
    Config(String),

    /// 服务发现错误（注册中心不可达、响应格式错误）
    #[error("discovery error: {0}")]
    Discovery(String),

    /// 出站 HTTP 错误
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO 错误
    #[error("io error: {0}")]
    Io(String),

    /// 配置文件解析错误
    #[error("toml error: {0}")]
    Toml(String),
}

impl FrontendError {
    /// 创建配置错误
    pub fn config(msg: impl Into<String>) -> Self {
        FrontendError::Config(msg.into())
    }

    /// 创建服务发现错误
    pub fn discovery(msg: impl Into<String>) -> Self {
        FrontendError::Discovery(msg.into())
    }

    /// 缺少必需的环境变量
    pub fn missing_env(name: &str) -> Self {
        Self::config(format!("required environment variable {} is not set", name))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, FrontendError::Config(_))
    }
}

/// 前端结果类型
pub type Result<T> = std::result::Result<T, FrontendError>;
