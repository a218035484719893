//! 服务实例解析测试
//!
//! 使用记录查询的内存后端验证 soft / hard 回退行为。

use async_trait::async_trait;
use ecsdemo_frontend::discovery::{
    ATTR_AVAILABILITY_ZONE, ATTR_INSTANCE_IPV4, BackendType, DiscoveryBackend, DiscoveryMode,
    DiscoveryQuery, ServiceInstance, ServiceResolver,
};
use ecsdemo_frontend::{FrontendError, Result};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

const NAMESPACE: &str = "demo";
const ZONE: &str = "us-east-1a";

/// 按是否带可用区过滤返回不同结果，并记录每次查询
struct RecordingBackend {
    filtered: Vec<ServiceInstance>,
    unfiltered: Vec<ServiceInstance>,
    fail_filtered: bool,
    queries: Mutex<Vec<DiscoveryQuery>>,
}

impl RecordingBackend {
    fn new(filtered: Vec<ServiceInstance>, unfiltered: Vec<ServiceInstance>) -> Self {
        Self {
            filtered,
            unfiltered,
            fail_filtered: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    fn failing_filtered(unfiltered: Vec<ServiceInstance>) -> Self {
        Self {
            fail_filtered: true,
            ..Self::new(vec![], unfiltered)
        }
    }

    fn queries(&self) -> Vec<DiscoveryQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiscoveryBackend for RecordingBackend {
    async fn discover(&self, query: &DiscoveryQuery) -> Result<Vec<ServiceInstance>> {
        self.queries.lock().unwrap().push(query.clone());
        if query.is_filtered() {
            if self.fail_filtered {
                return Err(FrontendError::discovery("registry unavailable"));
            }
            Ok(self.filtered.clone())
        } else {
            Ok(self.unfiltered.clone())
        }
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Static
    }
}

fn instance(id: &str, ip: &str, zone: &str) -> ServiceInstance {
    ServiceInstance::new("ecsdemo-nodejs", id)
        .with_attribute(ATTR_INSTANCE_IPV4, ip)
        .with_attribute(ATTR_AVAILABILITY_ZONE, zone)
}

fn resolver(backend: Arc<RecordingBackend>) -> ServiceResolver {
    ServiceResolver::new(backend, NAMESPACE, Some(ZONE.to_string()))
}

/// 测试：可用区内有实例时不触发回退查询
#[tokio::test]
async fn test_filtered_hit_skips_fallback() {
    let backend = Arc::new(RecordingBackend::new(
        vec![
            instance("i-1", "10.0.0.5", ZONE),
            instance("i-2", "10.0.0.6", ZONE),
        ],
        vec![instance("i-3", "10.0.1.7", "us-east-1b")],
    ));
    let resolver = resolver(backend.clone());

    for _ in 0..20 {
        let resolved = resolver
            .resolve("ecsdemo-nodejs", DiscoveryMode::Soft)
            .await
            .expect("instance should be resolved");
        assert!(["10.0.0.5", "10.0.0.6"].contains(&resolved.host()));
    }

    let queries = backend.queries();
    assert_eq!(queries.len(), 20);
    assert!(queries.iter().all(|q| q.is_filtered()));
    assert!(queries.iter().all(|q| q.namespace == NAMESPACE));
    assert!(queries.iter().all(|q| q.availability_zone.as_deref() == Some(ZONE)));
}

/// 测试：soft 模式下可用区为空时只多查一次不带过滤的查询
#[tokio::test]
async fn test_soft_mode_falls_back_once() {
    let backend = Arc::new(RecordingBackend::new(
        vec![],
        vec![instance("i-3", "10.0.1.7", "us-east-1b")],
    ));
    let resolver = resolver(backend.clone());

    let resolved = resolver
        .resolve("ecsdemo-nodejs", DiscoveryMode::Soft)
        .await
        .expect("fallback should find an instance");
    assert_eq!(resolved.host(), "10.0.1.7");

    let queries = backend.queries();
    assert_eq!(queries.len(), 2);
    assert!(queries[0].is_filtered());
    assert!(!queries[1].is_filtered());
    assert_eq!(queries[1].namespace, NAMESPACE);
    assert_eq!(queries[1].service_name, "ecsdemo-nodejs");
}

/// 测试：soft 模式下两次查询都为空时返回空结果
#[tokio::test]
async fn test_soft_mode_both_empty() {
    let backend = Arc::new(RecordingBackend::new(vec![], vec![]));
    let resolver = resolver(backend.clone());

    assert!(resolver.resolve("ecsdemo-nodejs", DiscoveryMode::Soft).await.is_none());
    assert_eq!(backend.queries().len(), 2);
}

/// 测试：未配置可用区时 soft 模式不重复发送相同的无过滤查询
#[tokio::test]
async fn test_soft_mode_without_zone_queries_once() {
    let backend = Arc::new(RecordingBackend::new(vec![], vec![]));
    let resolver = ServiceResolver::new(backend.clone(), NAMESPACE, None);

    assert!(resolver.resolve("ecsdemo-nodejs", DiscoveryMode::Soft).await.is_none());

    let queries = backend.queries();
    assert_eq!(queries.len(), 1);
    assert!(!queries[0].is_filtered());
}

/// 测试：未配置可用区时直接使用无过滤查询的结果
#[tokio::test]
async fn test_soft_mode_without_zone_finds_instance() {
    let backend = Arc::new(RecordingBackend::new(
        vec![],
        vec![instance("i-3", "10.0.1.7", "us-east-1b")],
    ));
    let resolver = ServiceResolver::new(backend.clone(), NAMESPACE, None);

    let resolved = resolver
        .resolve("ecsdemo-nodejs", DiscoveryMode::Soft)
        .await
        .expect("unfiltered query should find an instance");
    assert_eq!(resolved.host(), "10.0.1.7");
    assert_eq!(backend.queries().len(), 1);
}

/// 测试：hard 模式下可用区为空时不再查询
#[tokio::test]
async fn test_hard_mode_no_second_query() {
    let backend = Arc::new(RecordingBackend::new(
        vec![],
        vec![instance("i-3", "10.0.1.7", "us-east-1b")],
    ));
    let resolver = resolver(backend.clone());

    assert!(resolver.resolve("ecsdemo-nodejs", DiscoveryMode::Hard).await.is_none());

    let queries = backend.queries();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].is_filtered());
}

/// 测试：注册中心出错按空结果处理，soft 模式继续回退
#[tokio::test]
async fn test_registry_error_is_recovered() {
    let backend = Arc::new(RecordingBackend::failing_filtered(vec![instance(
        "i-3",
        "10.0.1.7",
        "us-east-1b",
    )]));
    let resolver = resolver(backend.clone());

    let resolved = resolver.resolve("ecsdemo-nodejs", DiscoveryMode::Soft).await;
    assert_eq!(resolved.map(|r| r.host().to_string()), Some("10.0.1.7".to_string()));

    assert!(resolver.resolve("ecsdemo-nodejs", DiscoveryMode::Hard).await.is_none());
    assert_eq!(backend.queries().len(), 3);
}

/// 测试：选中的实例缺少 IP 属性时视为空结果
#[tokio::test]
async fn test_instance_without_ip_is_empty() {
    let backend = Arc::new(RecordingBackend::new(
        vec![ServiceInstance::new("ecsdemo-nodejs", "i-1")
            .with_attribute(ATTR_AVAILABILITY_ZONE, ZONE)],
        vec![],
    ));
    let resolver = resolver(backend.clone());

    assert!(resolver.resolve("ecsdemo-nodejs", DiscoveryMode::Soft).await.is_none());
    assert_eq!(backend.queries().len(), 1);
}

/// 测试：多个实例时随机选择会覆盖到每一个
#[tokio::test]
async fn test_selection_covers_all_instances() {
    let backend = Arc::new(RecordingBackend::new(
        vec![
            instance("i-1", "10.0.0.1", ZONE),
            instance("i-2", "10.0.0.2", ZONE),
            instance("i-3", "10.0.0.3", ZONE),
        ],
        vec![],
    ));
    let resolver = resolver(backend);

    let mut seen = HashSet::new();
    for _ in 0..300 {
        if let Some(resolved) = resolver.resolve("ecsdemo-nodejs", DiscoveryMode::Hard).await {
            seen.insert(resolved.host().to_string());
        }
    }
    assert_eq!(seen.len(), 3);
}
