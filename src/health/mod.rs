//! 健康检查模块
//!
//! `/health` 在进程可服务时始终返回 `200 OK`，不依赖注册中心或后端状态。

use axum::http::StatusCode;

/// 健康检查响应体
pub const HEALTH_BODY: &str = "OK";

/// `GET /health`
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, HEALTH_BODY)
}
