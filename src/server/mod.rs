//! HTTP 服务端模块
//!
//! 提供应用状态、路由构建和带优雅停机的服务器

pub mod handlers;
pub mod page;

use std::net::SocketAddr;
use std::sync::Arc;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::{BackendClient, ClientBuilder};
use crate::config::Config;
use crate::discovery::{DiscoveryFactory, ServiceResolver};
use crate::error::Result;

pub use handlers::{BackendRoute, CRYSTAL_BACKEND, NODEJS_BACKEND};

/// 应用状态
///
/// 启动时构建一次，所有请求共享只读引用。
pub struct AppState {
    pub config: Config,
    pub resolver: ServiceResolver,
    pub client: BackendClient,
}

impl AppState {
    pub fn new(config: Config, resolver: ServiceResolver, client: BackendClient) -> Self {
        Self {
            config,
            resolver,
            client,
        }
    }

    /// 按配置创建注册中心后端和后端客户端
    pub async fn from_config(config: Config) -> Result<Self> {
        let resolver = DiscoveryFactory::create_resolver(&config.discovery).await?;
        let client = ClientBuilder::new().build()?;
        Ok(Self::new(config, resolver, client))
    }

    /// 发现并调用一个后端，返回要展示的文本
    pub async fn call_backend(&self, route: &BackendRoute) -> String {
        let instance = self.resolver.resolve(route.service_name, route.mode).await;
        self.client
            .fetch(instance.as_ref(), route.path, self.config.backend.port)
            .await
    }
}

/// 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(crate::health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    state: Arc<AppState>,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.state.config.server.listen_addr
    }

    /// 绑定监听地址并运行，直到收到关闭信号
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.addr();
        let listener = TcpListener::bind(addr).await?;
        info!(
            address = %listener.local_addr()?,
            namespace = %self.state.resolver.namespace(),
            availability_zone = self.state.resolver.availability_zone().unwrap_or("*"),
            "🚀 Starting frontend"
        );

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Frontend stopped");
        Ok(())
    }
}

/// 等待关闭信号（Ctrl+C 或 SIGTERM）
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Shutdown signal received (Ctrl+C)"),
        _ = terminate => info!("Shutdown signal received (SIGTERM)"),
    }
}
