//! 服务注册表实现

use crate::binding::Binding;
use indexmap::IndexMap;
use parking_lot::RwLock;
use registry_abstractions::{
    Arguments, DefinitionSource, Instance, ObjectRegistry, ObjectSignature,
};
use registry_common::{RegistryConfig, RegistryError, RegistryResult, Scope};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

thread_local! {
    /// 当前线程上各注册表的嵌套解析深度，以注册表地址为键
    static RESOLUTION_DEPTH: RefCell<HashMap<usize, usize>> = RefCell::new(HashMap::new());
}

/// 服务注册表
///
/// 以字符串标识映射到惰性构建的服务实例，支持原型与单例两种作用域、
/// 解析时的命名参数注入，以及基于解析深度的循环依赖检测。
///
/// 绑定表由读写锁保护，工厂执行期间不持有锁，因此工厂可以重新进入注册表解析依赖。
/// 解析深度按线程分别计数：工厂总在发起解析的线程上同步执行，
/// 因此每条解析链只累加自己的深度，并发解析互不影响。
pub struct ServiceRegistry {
    /// 绑定表，保持首次插入顺序
    bindings: RwLock<IndexMap<String, Binding>>,
    /// 允许的最大嵌套解析深度
    max_recursion_depth: usize,
}

impl ServiceRegistry {
    /// 创建新的注册表
    pub fn new() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    /// 使用指定配置创建注册表
    pub fn with_config(config: &RegistryConfig) -> Self {
        Self {
            bindings: RwLock::new(IndexMap::new()),
            max_recursion_depth: config.max_recursion_depth,
        }
    }

    /// 创建注册表并立即加载定义来源
    pub fn with_container(source: &dyn DefinitionSource) -> RegistryResult<Self> {
        Self::with_config_and_container(&RegistryConfig::default(), source)
    }

    /// 使用指定配置创建注册表并立即加载定义来源
    pub fn with_config_and_container(
        config: &RegistryConfig,
        source: &dyn DefinitionSource,
    ) -> RegistryResult<Self> {
        let registry = Self::with_config(config);
        registry.register_container(source)?;
        Ok(registry)
    }

    /// 当前线程上的嵌套解析深度
    pub fn recursion_level(&self) -> usize {
        let key = self.depth_key();
        RESOLUTION_DEPTH.with(|depths| depths.borrow().get(&key).copied().unwrap_or(0))
    }

    /// 允许的最大嵌套解析深度
    pub fn max_recursion_depth(&self) -> usize {
        self.max_recursion_depth
    }

    /// 绑定数量
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    /// 绑定表是否为空
    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }

    fn depth_key(&self) -> usize {
        self as *const Self as usize
    }

    /// 进入一层解析，超出最大深度时视为循环依赖
    fn enter(&self, name: &str) -> RegistryResult<DepthGuard> {
        let key = self.depth_key();
        let depth = RESOLUTION_DEPTH.with(|depths| {
            let mut depths = depths.borrow_mut();
            let depth = depths.entry(key).or_insert(0);
            *depth += 1;
            *depth
        });

        if depth > self.max_recursion_depth {
            leave(key);
            warn!(
                "解析 '{}' 时深度达到 {}，超过上限 {}，可能存在循环引用",
                name, depth, self.max_recursion_depth
            );
            return Err(RegistryError::circular_dependency(name, depth));
        }

        Ok(DepthGuard { key })
    }

    /// 将命名参数写入绑定表
    ///
    /// 先校验全部键再写入，任一键无效时绑定表保持不变。
    fn add_arguments(&self, arguments: Arguments) -> RegistryResult<()> {
        for key in arguments.keys() {
            validate_name(key)?;
        }

        let mut bindings = self.bindings.write();
        for (key, value) in arguments {
            debug!("注入参数: {}", key);
            bindings.insert(key, Binding::argument(value));
        }
        Ok(())
    }

    fn find_binding(&self, name: &str) -> Option<Binding> {
        self.bindings.read().get(name).cloned()
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRegistry for ServiceRegistry {
    fn register_object(
        &self,
        name: &str,
        signature: ObjectSignature,
        scope: Scope,
    ) -> RegistryResult<()> {
        validate_name(name)?;

        if !signature.is_factory() {
            return Err(RegistryError::invalid_argument(format!(
                "服务 '{name}' 的对象签名必须是工厂"
            )));
        }

        debug!("注册服务: {} ({})", name, scope);
        let replaced = self
            .bindings
            .write()
            .insert(name.to_string(), Binding::new(signature, scope));

        if replaced.is_some() {
            warn!("覆盖已注册的服务: {}", name);
        }
        Ok(())
    }

    fn new_object(&self, name: &str, arguments: Option<Arguments>) -> RegistryResult<Instance> {
        validate_name(name)?;

        let _guard = self.enter(name)?;

        if let Some(arguments) = arguments {
            self.add_arguments(arguments)?;
        }

        let binding = self
            .find_binding(name)
            .ok_or_else(|| RegistryError::not_found(name))?;

        debug!("解析服务: {} (深度 {})", name, self.recursion_level());
        binding.instantiate(self)
    }

    fn has_object(&self, name: &str) -> RegistryResult<bool> {
        validate_name(name)?;
        Ok(self.bindings.read().contains_key(name))
    }

    fn get_all_services(&self) -> IndexMap<String, ObjectSignature> {
        self.bindings
            .read()
            .iter()
            .map(|(name, binding)| (name.clone(), binding.signature().clone()))
            .collect()
    }

    fn register_container(&self, source: &dyn DefinitionSource) -> RegistryResult<()> {
        info!("加载定义来源: {}", source.name());

        let definitions = source.load_all_definitions().ok_or_else(|| {
            warn!("定义来源 {} 未返回可调用的定义", source.name());
            RegistryError::invalid_operation("容器必须返回可调用的定义")
        })?;

        definitions(self as &dyn ObjectRegistry)?;

        info!("定义来源 {} 加载完成，当前共 {} 个绑定", source.name(), self.len());
        Ok(())
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.bindings.read().keys().collect::<Vec<_>>())
            .field("recursion_level", &self.recursion_level())
            .field("max_recursion_depth", &self.max_recursion_depth)
            .finish()
    }
}

/// 解析深度守卫，离开作用域时回退一层深度
struct DepthGuard {
    key: usize,
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        leave(self.key);
    }
}

/// 回退当前线程上一层深度，归零时移除记录
fn leave(key: usize) {
    // 线程退出阶段本地存储可能已经销毁
    let _ = RESOLUTION_DEPTH.try_with(|depths| {
        let mut depths = depths.borrow_mut();
        if let Some(depth) = depths.get_mut(&key) {
            *depth -= 1;
            if *depth == 0 {
                depths.remove(&key);
            }
        }
    });
}

fn validate_name(name: &str) -> RegistryResult<()> {
    if name.trim().is_empty() {
        return Err(RegistryError::invalid_argument("服务标识不能为空"));
    }
    Ok(())
}
