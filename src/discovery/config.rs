//! 服务发现配置

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 服务发现配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// 后端类型：cloudmap, static
    #[serde(default)]
    pub backend: BackendType,

    /// Cloud Map 命名空间（必需）
    pub namespace: String,

    /// 查询时使用的可用区过滤条件（如 "us-east-1a"）
    #[serde(default)]
    pub availability_zone: Option<String>,

    /// AWS 区域，SDK 据此推导默认的注册中心地址
    #[serde(default = "default_region")]
    pub region: String,

    /// 注册中心地址覆盖（本地模拟器等），作为 SDK 的 `endpoint_url`
    #[serde(default)]
    pub endpoint: Option<String>,

    /// 静态实例列表（仅 static 后端使用）
    #[serde(default)]
    pub instances: Vec<StaticInstance>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl DiscoveryConfig {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            backend: BackendType::default(),
            namespace: namespace.into(),
            availability_zone: None,
            region: default_region(),
            endpoint: None,
            instances: Vec::new(),
        }
    }

    /// 设置可用区过滤条件
    pub fn with_availability_zone(mut self, zone: impl Into<String>) -> Self {
        self.availability_zone = Some(zone.into());
        self
    }

    pub fn with_backend(mut self, backend: BackendType) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// 添加静态实例
    pub fn with_instance(mut self, instance: StaticInstance) -> Self {
        self.instances.push(instance);
        self
    }

}

/// 后端类型
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    #[default]
    #[serde(alias = "cloud_map", alias = "cloud-map")]
    CloudMap,
    Static,
}

impl std::str::FromStr for BackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "cloudmap" | "servicediscovery" => Ok(BackendType::CloudMap),
            "static" => Ok(BackendType::Static),
            _ => Err(format!("Unknown backend type: {}", s)),
        }
    }
}

/// 发现模式
///
/// - `Soft`: 当前可用区找不到实例时，再查询一次所有可用区
/// - `Hard`: 当前可用区找不到实例时直接返回空结果
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    #[default]
    Soft,
    Hard,
}

impl std::str::FromStr for DiscoveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "soft" => Ok(DiscoveryMode::Soft),
            "hard" => Ok(DiscoveryMode::Hard),
            _ => Err(format!("Unknown discovery mode: {}", s)),
        }
    }
}

/// 静态配置的服务实例
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaticInstance {
    /// 服务名（如 "ecsdemo-nodejs"）
    pub service_name: String,

    /// 实例 ID，缺省时按序号生成
    #[serde(default)]
    pub instance_id: Option<String>,

    /// 实例属性（至少应包含 AWS_INSTANCE_IPV4）
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl StaticInstance {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            instance_id: None,
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
