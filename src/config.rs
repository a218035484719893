use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::discovery::{BackendType, DiscoveryConfig};
use crate::error::{FrontendError, Result};

/// 指定 TOML 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "FRONTEND_CONFIG";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// 后端服务监听端口
    #[serde(default = "default_backend_port")]
    pub port: u16,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            port: default_backend_port(),
        }
    }
}

fn default_backend_port() -> u16 {
    3000
}

/// 页面上展示的信息
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// 可用区短名（如 "1a"）
    pub az: Option<String>,
    /// 构建标识
    pub code_hash: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl Config {
    /// 加载配置：设置了 `FRONTEND_CONFIG` 时读取文件，否则读取环境变量
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load_from_file(&path),
            _ => Self::from_env(),
        }
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源构造配置，空字符串视为未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let namespace = get("CLOUD_MAP_NAMESPACE")
            .ok_or_else(|| FrontendError::missing_env("CLOUD_MAP_NAMESPACE"))?;

        let mut discovery = DiscoveryConfig::new(namespace);
        discovery.availability_zone = get("FULL_AZ");
        discovery.endpoint = get("CLOUD_MAP_ENDPOINT");
        if let Some(region) = get("AWS_REGION") {
            discovery.region = region;
        }
        if let Some(backend) = get("REGISTRY_BACKEND") {
            discovery.backend = backend
                .parse::<BackendType>()
                .map_err(FrontendError::config)?;
        }

        let mut server = ServerConfig::default();
        if let Some(addr) = get("LISTEN_ADDR") {
            server.listen_addr = addr
                .parse()
                .map_err(|e| FrontendError::config(format!("invalid LISTEN_ADDR {}: {}", addr, e)))?;
        }

        let mut backend = BackendConfig::default();
        if let Some(port) = get("BACKEND_PORT") {
            backend.port = port
                .parse()
                .map_err(|e| FrontendError::config(format!("invalid BACKEND_PORT {}: {}", port, e)))?;
        }

        let mut logging = LoggingConfig::default();
        if let Some(format) = get("LOG_FORMAT") {
            logging.format = format.parse().map_err(FrontendError::config)?;
        }

        let config = Config {
            server,
            discovery,
            backend,
            display: DisplayConfig {
                az: get("AZ"),
                code_hash: get("CODE_HASH"),
            },
            logging,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.discovery.namespace.trim().is_empty() {
            return Err(FrontendError::config("discovery.namespace must not be empty"));
        }
        if self.discovery.backend == BackendType::Static && self.discovery.instances.is_empty() {
            return Err(FrontendError::config(
                "static discovery backend requires at least one instance",
            ));
        }
        Ok(())
    }
}
