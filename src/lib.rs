//! ECS Demo Frontend
//!
//! 通过 AWS Cloud Map 发现 nodejs 与 crystal 后端实例，调用它们并在首页展示原始响应。

pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod health;
pub mod server;
pub mod telemetry;

// Re-exports
pub use client::{BackendClient, ClientBuilder, ClientConfig, FetchOutcome, NO_BACKEND_FOUND};
pub use config::{BackendConfig, Config, DisplayConfig, LogFormat, LoggingConfig, ServerConfig};
pub use discovery::{
    BackendType, DiscoveryBackend, DiscoveryConfig, DiscoveryFactory, DiscoveryMode,
    DiscoveryQuery, ResolvedInstance, ServiceInstance, ServiceResolver, StaticInstance,
};
pub use error::{FrontendError, Result};
pub use server::{AppState, HttpServer, router};
