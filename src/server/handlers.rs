//! 路由处理函数

use std::sync::Arc;
use axum::extract::State;
use axum::response::Html;

use crate::discovery::DiscoveryMode;
use crate::server::AppState;
use crate::server::page::{self, PageView};

/// 一个要调用的后端服务
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendRoute {
    pub service_name: &'static str,
    pub path: &'static str,
    pub mode: DiscoveryMode,
}

pub const NODEJS_BACKEND: BackendRoute = BackendRoute {
    service_name: "ecsdemo-nodejs",
    path: "/",
    mode: DiscoveryMode::Soft,
};

pub const CRYSTAL_BACKEND: BackendRoute = BackendRoute {
    service_name: "ecsdemo-crystal",
    path: "/crystal",
    mode: DiscoveryMode::Soft,
};

/// `GET /`
///
/// 两个后端相互独立地发现和调用，一个失败不影响另一个。
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let (text, crystal) = tokio::join!(
        state.call_backend(&NODEJS_BACKEND),
        state.call_backend(&CRYSTAL_BACKEND),
    );

    let view = PageView {
        az: state.config.display.az.as_deref(),
        code_hash: state.config.display.code_hash.as_deref(),
        text: &text,
        crystal: &crystal,
    };
    Html(page::render(&view))
}
