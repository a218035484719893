//! 后端 HTTP 客户端模块
//!
//! 对发现到的后端实例发起一次 GET 请求；任何失败都折叠为固定的占位文本。

use std::time::Duration;
use tracing::{debug, error};

use crate::discovery::ResolvedInstance;
use crate::error::Result;

/// 没有可用后端时展示的文本
pub const NO_BACKEND_FOUND: &str = "no backend found";

/// 客户端配置
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            read_timeout: Duration::from_secs(2),
        }
    }
}

/// 客户端构建器
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<BackendClient> {
        BackendClient::new(self.config)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 后端调用结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 后端返回 200，携带原始响应体
    Body(String),
    /// 没有实例、网络错误、超时或非 200 状态
    Fallback,
}

impl FetchOutcome {
    pub fn into_text(self) -> String {
        match self {
            FetchOutcome::Body(body) => body,
            FetchOutcome::Fallback => NO_BACKEND_FOUND.to_string(),
        }
    }
}

/// 后端 HTTP 客户端
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl BackendClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .no_proxy()
            .build()?;

        Ok(Self { http_client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 调用后端并返回要展示的文本
    ///
    /// 状态码恰好为 200 时返回响应体，否则返回 [`NO_BACKEND_FOUND`]。
    /// `instance` 为 `None` 时不发起任何网络请求。
    pub async fn fetch(&self, instance: Option<&ResolvedInstance>, path: &str, port: u16) -> String {
        self.fetch_outcome(instance, path, port).await.into_text()
    }

    /// 调用后端，返回区分成功与回退的结果
    pub async fn fetch_outcome(
        &self,
        instance: Option<&ResolvedInstance>,
        path: &str,
        port: u16,
    ) -> FetchOutcome {
        let Some(instance) = instance else {
            debug!(path = %path, "No backend instance resolved, skipping request");
            return FetchOutcome::Fallback;
        };

        let url = instance.to_http_url(port, path);
        match self.get(&url).await {
            Ok(Some(body)) => FetchOutcome::Body(body),
            Ok(None) => FetchOutcome::Fallback,
            Err(e) => {
                error!(url = %url, error = %e, details = ?e, "Backend request failed");
                FetchOutcome::Fallback
            }
        }
    }

    /// 发起 GET；非 200 返回 `Ok(None)`
    ///
    /// 响应体按 UTF-8 原样解释，不受 `charset` 影响；非法字节替换为 U+FFFD。
    async fn get(&self, url: &str) -> std::result::Result<Option<String>, reqwest::Error> {
        let resp = self.http_client.get(url).send().await?;
        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            error!(url = %url, status = %status, "Backend returned non-200 status");
            return Ok(None);
        }
        let body = resp.bytes().await?;
        Ok(Some(String::from_utf8_lossy(&body).into_owned()))
    }
}
