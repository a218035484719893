//! 静态配置的服务发现后端
//!
//! 实例来自配置文件，按服务名和查询参数过滤，适合本地运行和测试。

use async_trait::async_trait;

use crate::discovery::backend::DiscoveryBackend;
use crate::discovery::config::{BackendType, DiscoveryConfig};
use crate::discovery::instance::{DiscoveryQuery, ServiceInstance};
use crate::error::Result;

/// 静态服务发现后端
#[derive(Debug, Clone)]
pub struct StaticBackend {
    instances: Vec<ServiceInstance>,
}

impl StaticBackend {
    /// 从配置创建
    pub fn new(config: &DiscoveryConfig) -> Self {
        let instances = config
            .instances
            .iter()
            .enumerate()
            .map(|(idx, inst)| ServiceInstance {
                instance_id: inst
                    .instance_id
                    .clone()
                    .unwrap_or_else(|| format!("{}-{}", inst.service_name, idx)),
                service_name: inst.service_name.clone(),
                attributes: inst.attributes.clone(),
            })
            .collect();

        Self { instances }
    }

    /// 直接使用实例列表创建
    pub fn from_instances(instances: Vec<ServiceInstance>) -> Self {
        Self { instances }
    }
}

#[async_trait]
impl DiscoveryBackend for StaticBackend {
    async fn discover(&self, query: &DiscoveryQuery) -> Result<Vec<ServiceInstance>> {
        let parameters = query.query_parameters();
        Ok(self
            .instances
            .iter()
            .filter(|inst| inst.service_name == query.service_name)
            .filter(|inst| inst.matches_parameters(&parameters))
            .cloned()
            .collect())
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Static
    }
}
