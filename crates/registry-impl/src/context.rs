//! 进程级注册表上下文
//!
//! 按标识持有多个注册表，首次访问时创建，只能通过 [`RegistryContext::reset_all`] 整体清空。

use crate::registry::ServiceRegistry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use registry_common::RegistryConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// 全局注册表上下文
static GLOBAL_CONTEXT: Lazy<RegistryContext> = Lazy::new(|| {
    let config = RegistryConfig::load().unwrap_or_else(|e| {
        warn!("加载注册表配置失败，使用默认配置: {}", e);
        RegistryConfig::default()
    });
    RegistryContext::with_config(config)
});

/// 注册表上下文
#[derive(Debug)]
pub struct RegistryContext {
    /// 按标识索引的注册表
    instances: DashMap<String, Arc<ServiceRegistry>>,
    /// 新建注册表使用的配置
    config: RegistryConfig,
}

impl RegistryContext {
    /// 创建新的上下文
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// 使用指定配置创建上下文
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            instances: DashMap::new(),
            config,
        }
    }

    /// 进程生命周期内的全局上下文
    pub fn global() -> &'static RegistryContext {
        &GLOBAL_CONTEXT
    }

    /// 新建注册表使用的配置
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// 获取指定标识的注册表，不存在时创建
    pub fn get(&self, id: &str) -> Arc<ServiceRegistry> {
        let entry = self.instances.entry(id.to_string()).or_insert_with(|| {
            info!("创建注册表实例: {}", id);
            Arc::new(ServiceRegistry::with_config(&self.config))
        });
        Arc::clone(entry.value())
    }

    /// 获取默认标识的共享注册表
    pub fn shared(&self) -> Arc<ServiceRegistry> {
        self.get(&self.config.default_instance_id)
    }

    /// 清空全部注册表，之后的访问会重新创建
    ///
    /// 调用方已经持有的注册表不受影响。
    pub fn reset_all(&self) {
        let count = self.instances.len();
        self.instances.clear();
        info!("已重置 {} 个注册表实例", count);
    }

    /// 指定标识的注册表是否已创建
    pub fn contains(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    /// 已创建的注册表数量
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// 是否尚未创建任何注册表
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Default for RegistryContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 获取全局上下文中指定标识的注册表
pub fn get_instance(id: &str) -> Arc<ServiceRegistry> {
    RegistryContext::global().get(id)
}

/// 获取全局上下文中的共享注册表
pub fn get_shared_instance() -> Arc<ServiceRegistry> {
    RegistryContext::global().shared()
}

/// 重置全局上下文中的全部注册表
pub fn reset() {
    RegistryContext::global().reset_all();
}
