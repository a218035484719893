//! 服务发现模块
//!
//! 通过注册中心（AWS Cloud Map 或静态配置）按可用区查找后端实例，
//! 支持 soft / hard 两种回退模式。

pub mod backend;
pub mod config;
pub mod factory;
pub mod instance;
pub mod resolver;

pub use backend::DiscoveryBackend;
pub use backend::cloud_map::CloudMapBackend;
pub use backend::static_backend::StaticBackend;
pub use config::{BackendType, DiscoveryConfig, DiscoveryMode, StaticInstance};
pub use factory::DiscoveryFactory;
pub use instance::{
    ATTR_AVAILABILITY_ZONE, ATTR_INSTANCE_IPV4, DiscoveryQuery,
    ResolvedInstance, ServiceInstance,
};
pub use resolver::ServiceResolver;
