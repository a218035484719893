//! 测试共用的假后端服务

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::get;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

/// 启动一个模拟 nodejs / crystal 后端的服务，返回监听地址
///
/// - `GET /` -> 200 "hello"
/// - `GET /crystal` -> 200 "crystal says hi"
/// - `GET /created` -> 201 "created"
/// - `GET /broken` -> 500 "boom"
/// - `GET /slow` -> 5 秒后 200 "too late"
/// - `GET /latin1` -> 200 "héllo"（UTF-8 字节，但声明 `charset=iso-8859-1`）
#[allow(dead_code)]
pub async fn spawn_backend() -> SocketAddr {
    let app = Router::new()
        .route("/", get(|| async { "hello" }))
        .route("/crystal", get(|| async { "crystal says hi" }))
        .route("/created", get(|| async { (StatusCode::CREATED, "created") }))
        .route("/broken", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
        .route(
            "/latin1",
            get(|| async { ([(header::CONTENT_TYPE, "text/plain; charset=iso-8859-1")], "héllo") }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        );

    spawn(app).await
}

/// 只有 `/crystal` 正常、`/` 超时的后端
#[allow(dead_code)]
pub async fn spawn_slow_nodejs_backend() -> SocketAddr {
    let app = Router::new()
        .route(
            "/",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        )
        .route("/crystal", get(|| async { "crystal says hi" }));

    spawn(app).await
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// 不可路由的地址，TCP 握手不会完成
#[allow(dead_code)]
pub const BLACK_HOLE_HOST: &str = "10.255.255.1";

/// 返回一个当前没有进程监听的本地端口
#[allow(dead_code)]
pub async fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}
