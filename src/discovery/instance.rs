//! 服务实例与查询定义

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::discovery::config::DiscoveryMode;

/// 实例 IPv4 地址属性
pub const ATTR_INSTANCE_IPV4: &str = "AWS_INSTANCE_IPV4";

/// 可用区属性，同时也是查询参数名
pub const ATTR_AVAILABILITY_ZONE: &str = "AVAILABILITY_ZONE";

/// 注册中心返回的服务实例
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceInstance {
    /// 实例 ID（唯一标识）
    pub instance_id: String,

    /// 服务名（如 "ecsdemo-nodejs"）
    pub service_name: String,

    /// 实例发布的属性
    pub attributes: HashMap<String, String>,
}

impl ServiceInstance {
    /// 创建新的服务实例
    pub fn new(service_name: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            service_name: service_name.into(),
            attributes: HashMap::new(),
        }
    }

    /// 添加属性
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// 检查是否匹配查询参数（所有参数都必须与同名属性相等）
    pub fn matches_parameters(&self, parameters: &HashMap<String, String>) -> bool {
        parameters.iter().all(|(key, value)| {
            self.attributes.get(key).map(|v| v == value).unwrap_or(false)
        })
    }
}

/// 一次服务发现查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryQuery {
    pub service_name: String,
    pub namespace: String,
    /// 可用区过滤条件，`None` 表示不过滤
    pub availability_zone: Option<String>,
    pub mode: DiscoveryMode,
}

impl DiscoveryQuery {
    pub fn new(
        service_name: impl Into<String>,
        namespace: impl Into<String>,
        availability_zone: Option<String>,
        mode: DiscoveryMode,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            namespace: namespace.into(),
            availability_zone,
            mode,
        }
    }

    /// 去掉可用区过滤条件后的查询（soft 模式的第二次查询）
    pub fn without_zone(&self) -> Self {
        Self {
            availability_zone: None,
            ..self.clone()
        }
    }

    /// 是否带有可用区过滤条件
    pub fn is_filtered(&self) -> bool {
        self.availability_zone.is_some()
    }

    /// 转换为注册中心查询参数
    pub fn query_parameters(&self) -> HashMap<String, String> {
        let mut parameters = HashMap::new();
        if let Some(zone) = &self.availability_zone {
            parameters.insert(ATTR_AVAILABILITY_ZONE.to_string(), zone.clone());
        }
        parameters
    }
}

/// 经过校验的实例属性
///
/// 保证包含非空的 `AWS_INSTANCE_IPV4`，可以直接用于构造后端 URL。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstance {
    host: String,
    attributes: HashMap<String, String>,
}

impl ResolvedInstance {
    /// 从属性构造；缺少 IP 属性时返回 `None`
    pub fn from_attributes(attributes: HashMap<String, String>) -> Option<Self> {
        let host = attributes
            .get(ATTR_INSTANCE_IPV4)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())?
            .to_string();
        Some(Self { host, attributes })
    }

    /// 直接用主机地址构造（测试与静态配置使用）
    pub fn with_host(host: impl Into<String>) -> Self {
        let host = host.into();
        let mut attributes = HashMap::new();
        attributes.insert(ATTR_INSTANCE_IPV4.to_string(), host.clone());
        Self { host, attributes }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// 转换为 HTTP URL，`path` 不以 `/` 开头时自动补齐
    pub fn to_http_url(&self, port: u16, path: &str) -> String {
        if path.starts_with('/') {
            format!("http://{}:{}{}", self.host, port, path)
        } else {
            format!("http://{}:{}/{}", self.host, port, path)
        }
    }
}
