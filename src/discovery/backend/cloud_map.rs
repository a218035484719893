//! AWS Cloud Map 服务发现后端
//!
//! 通过 `aws-sdk-servicediscovery` 调用数据面 `DiscoverInstances` 接口，
//! 凭证和签名由 SDK 默认凭证链负责（ECS 任务角色、环境变量等）。

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_config::timeout::TimeoutConfig;
use aws_sdk_servicediscovery::Client;
use aws_sdk_servicediscovery::config::Region;
use aws_sdk_servicediscovery::error::DisplayErrorContext;
use aws_sdk_servicediscovery::types::HttpInstanceSummary;
use std::time::Duration;
use tracing::debug;

use crate::discovery::backend::DiscoveryBackend;
use crate::discovery::config::{BackendType, DiscoveryConfig};
use crate::discovery::instance::{DiscoveryQuery, ServiceInstance};
use crate::error::{FrontendError, Result};

const REGISTRY_TIMEOUT: Duration = Duration::from_secs(5);

/// Cloud Map 服务发现后端
pub struct CloudMapBackend {
    client: Client,
    endpoint: Option<String>,
}

impl CloudMapBackend {
    /// 从默认凭证链加载 AWS 配置并创建后端
    pub async fn new(config: &DiscoveryConfig) -> Result<Self> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(REGISTRY_TIMEOUT)
                    .build(),
            )
            .load()
            .await;

        Ok(Self::from_sdk_config(&sdk_config, config))
    }

    /// 基于已加载的 AWS 配置创建后端
    ///
    /// `config.endpoint` 存在时作为 `endpoint_url` 覆盖默认地址。
    pub fn from_sdk_config(sdk_config: &SdkConfig, config: &DiscoveryConfig) -> Self {
        let mut builder = aws_sdk_servicediscovery::config::Builder::from(sdk_config);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
            endpoint: config.endpoint.clone(),
        }
    }

    /// 注册中心地址覆盖，未配置时由 SDK 按区域推导
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

fn to_service_instance(summary: &HttpInstanceSummary, service_name: &str) -> ServiceInstance {
    ServiceInstance {
        instance_id: summary.instance_id().unwrap_or_default().to_string(),
        service_name: summary.service_name().unwrap_or(service_name).to_string(),
        attributes: summary.attributes().cloned().unwrap_or_default(),
    }
}

#[async_trait]
impl DiscoveryBackend for CloudMapBackend {
    async fn discover(&self, query: &DiscoveryQuery) -> Result<Vec<ServiceInstance>> {
        let query_parameters = query.query_parameters();

        let output = self
            .client
            .discover_instances()
            .namespace_name(&query.namespace)
            .service_name(&query.service_name)
            .set_query_parameters((!query_parameters.is_empty()).then_some(query_parameters))
            .send()
            .await
            .map_err(|e| {
                FrontendError::discovery(format!(
                    "DiscoverInstances failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let instances = output.instances();
        debug!(
            service_name = %query.service_name,
            instance_count = instances.len(),
            "DiscoverInstances completed"
        );

        Ok(instances
            .iter()
            .map(|summary| to_service_instance(summary, &query.service_name))
            .collect())
    }

    fn backend_type(&self) -> BackendType {
        BackendType::CloudMap
    }
}
