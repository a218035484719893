//! 服务发现后端抽象和实现

pub mod cloud_map;
pub mod static_backend;

use async_trait::async_trait;

use crate::discovery::instance::{DiscoveryQuery, ServiceInstance};
use crate::discovery::config::BackendType;
use crate::error::Result;

/// 服务发现后端 trait
///
/// 所有注册中心后端（Cloud Map、静态配置）都需要实现这个 trait。
/// 由于需要动态分发（dyn），使用 async-trait
#[async_trait]
pub trait DiscoveryBackend: Send + Sync {
    /// 发现服务实例
    ///
    /// 返回命名空间内匹配 `query.service_name` 的实例；`query.availability_zone`
    /// 为 `Some` 时只返回该可用区的实例。返回顺序不作保证。
    async fn discover(&self, query: &DiscoveryQuery) -> Result<Vec<ServiceInstance>>;

    /// 后端类型（用于日志）
    fn backend_type(&self) -> BackendType;
}
