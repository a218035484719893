//! 服务实例解析
//!
//! 先按当前可用区查询注册中心；没有结果时根据 [`DiscoveryMode`] 决定是否
//! 放开可用区再查一次，最后在结果中均匀随机选择一个实例。

use std::sync::Arc;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::discovery::backend::DiscoveryBackend;
use crate::discovery::config::{DiscoveryConfig, DiscoveryMode};
use crate::discovery::instance::{
    ATTR_INSTANCE_IPV4, DiscoveryQuery, ResolvedInstance, ServiceInstance,
};

/// 服务实例解析器
///
/// 每次调用都会重新查询注册中心，不缓存结果。
#[derive(Clone)]
pub struct ServiceResolver {
    backend: Arc<dyn DiscoveryBackend>,
    namespace: String,
    availability_zone: Option<String>,
}

impl ServiceResolver {
    pub fn new(
        backend: Arc<dyn DiscoveryBackend>,
        namespace: impl Into<String>,
        availability_zone: Option<String>,
    ) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
            availability_zone,
        }
    }

    /// 从服务发现配置创建
    pub fn from_config(backend: Arc<dyn DiscoveryBackend>, config: &DiscoveryConfig) -> Self {
        Self::new(backend, config.namespace.clone(), config.availability_zone.clone())
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn availability_zone(&self) -> Option<&str> {
        self.availability_zone.as_deref()
    }

    /// 解析服务实例
    ///
    /// # 参数
    /// * `service_name` - 服务名（如 "ecsdemo-nodejs"）
    /// * `mode` - soft: 本可用区没有实例时查询所有可用区；hard: 直接返回 `None`
    ///
    /// # 返回
    /// 随机选中的实例属性；找不到实例、实例缺少 IP 属性或注册中心出错时返回 `None`
    pub async fn resolve(&self, service_name: &str, mode: DiscoveryMode) -> Option<ResolvedInstance> {
        let query = DiscoveryQuery::new(
            service_name,
            self.namespace.clone(),
            self.availability_zone.clone(),
            mode,
        );

        let instances = self.lookup(&query).await;
        if !instances.is_empty() {
            return Self::pick(instances);
        }

        match mode {
            DiscoveryMode::Hard => {
                info!(
                    service_name = %service_name,
                    "hard mode: no instance found in the current availability zone"
                );
                None
            }
            DiscoveryMode::Soft if !query.is_filtered() => {
                info!(
                    service_name = %service_name,
                    "soft mode: no availability zone filter, skipping fallback"
                );
                None
            }
            DiscoveryMode::Soft => {
                info!(
                    service_name = %service_name,
                    "soft mode: trying all the availability zones"
                );
                let instances = self.lookup(&query.without_zone()).await;
                Self::pick(instances)
            }
        }
    }

    /// 执行一次注册中心查询，错误按空结果处理
    async fn lookup(&self, query: &DiscoveryQuery) -> Vec<ServiceInstance> {
        info!(
            service_name = %query.service_name,
            availability_zone = query.availability_zone.as_deref().unwrap_or("*"),
            namespace = %query.namespace,
            backend = ?self.backend.backend_type(),
            "sd lookup: trying to find service"
        );

        match self.backend.discover(query).await {
            Ok(instances) => instances,
            Err(e) => {
                warn!(
                    service_name = %query.service_name,
                    namespace = %query.namespace,
                    error = %e,
                    "sd lookup failed, treating as no instances"
                );
                Vec::new()
            }
        }
    }

    /// 均匀随机选择一个实例
    fn pick(instances: Vec<ServiceInstance>) -> Option<ResolvedInstance> {
        let chosen = instances.choose(&mut rand::thread_rng())?;
        let resolved = ResolvedInstance::from_attributes(chosen.attributes.clone());
        if resolved.is_none() {
            warn!(
                instance_id = %chosen.instance_id,
                service_name = %chosen.service_name,
                "selected instance has no {} attribute",
                ATTR_INSTANCE_IPV4
            );
        }
        resolved
    }
}
