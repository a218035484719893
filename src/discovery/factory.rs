//! 服务发现工厂

use std::sync::Arc;
use tracing::info;

use crate::discovery::backend::DiscoveryBackend;
use crate::discovery::backend::cloud_map::CloudMapBackend;
use crate::discovery::backend::static_backend::StaticBackend;
use crate::discovery::config::{BackendType, DiscoveryConfig};
use crate::discovery::resolver::ServiceResolver;
use crate::error::Result;

/// 服务发现工厂
pub struct DiscoveryFactory;

impl DiscoveryFactory {
    /// 从配置创建服务发现后端
    pub async fn create_backend(config: &DiscoveryConfig) -> Result<Arc<dyn DiscoveryBackend>> {
        match config.backend {
            BackendType::CloudMap => {
                let backend = CloudMapBackend::new(config).await?;
                info!(
                    region = %config.region,
                    endpoint = backend.endpoint().unwrap_or("default"),
                    "Using Cloud Map discovery backend"
                );
                Ok(Arc::new(backend))
            }
            BackendType::Static => {
                info!(
                    instance_count = config.instances.len(),
                    "Using static discovery backend"
                );
                Ok(Arc::new(StaticBackend::new(config)))
            }
        }
    }

    /// 从配置创建解析器
    pub async fn create_resolver(config: &DiscoveryConfig) -> Result<ServiceResolver> {
        let backend = Self::create_backend(config).await?;
        Ok(ServiceResolver::from_config(backend, config))
    }
}
