//! 服务构建方式
//!
//! 绑定要么是一个工厂，要么是一个固定值。

use crate::registry::ObjectRegistry;
use indexmap::IndexMap;
use registry_common::RegistryResult;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 注册表中流转的服务实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 解析时注入的命名参数，保持插入顺序
pub type Arguments = IndexMap<String, Instance>;

/// 将任意值包装为 [`Instance`]
pub fn instance<T: Any + Send + Sync>(value: T) -> Instance {
    Arc::new(value)
}

type FactoryFn = dyn Fn(&dyn ObjectRegistry) -> RegistryResult<Instance> + Send + Sync;

/// 服务工厂
///
/// 以注册表为唯一参数构建实例，工厂内部可以继续向注册表解析依赖。
#[derive(Clone)]
pub struct ObjectFactory {
    factory_fn: Arc<FactoryFn>,
}

impl ObjectFactory {
    /// 从接收注册表的函数创建工厂
    pub fn new<F>(factory_fn: F) -> Self
    where
        F: Fn(&dyn ObjectRegistry) -> RegistryResult<Instance> + Send + Sync + 'static,
    {
        Self {
            factory_fn: Arc::new(factory_fn),
        }
    }

    /// 从无参函数创建工厂
    pub fn from_fn<F>(factory_fn: F) -> Self
    where
        F: Fn() -> RegistryResult<Instance> + Send + Sync + 'static,
    {
        Self::new(move |_| factory_fn())
    }

    /// 从返回具体类型的函数创建工厂
    pub fn of<T, F>(factory_fn: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&dyn ObjectRegistry) -> RegistryResult<T> + Send + Sync + 'static,
    {
        Self::new(move |registry| factory_fn(registry).map(instance))
    }

    /// 调用工厂
    pub fn create(&self, registry: &dyn ObjectRegistry) -> RegistryResult<Instance> {
        (self.factory_fn)(registry)
    }

    /// 两个句柄是否指向同一个工厂
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.factory_fn, &other.factory_fn)
    }
}

impl fmt::Debug for ObjectFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectFactory")
            .field("factory_fn", &"<function>")
            .finish()
    }
}

/// 服务签名：可调用的工厂或者原样返回的值
#[derive(Clone)]
pub enum ObjectSignature {
    /// 每次解析时调用的工厂
    Factory(ObjectFactory),
    /// 解析时原样返回的值
    Value(Instance),
}

impl ObjectSignature {
    /// 是否为工厂签名
    pub fn is_factory(&self) -> bool {
        matches!(self, ObjectSignature::Factory(_))
    }

    /// 按签名产生实例：工厂被调用，值被原样返回
    pub fn produce(&self, registry: &dyn ObjectRegistry) -> RegistryResult<Instance> {
        match self {
            ObjectSignature::Factory(factory) => factory.create(registry),
            ObjectSignature::Value(value) => Ok(Arc::clone(value)),
        }
    }
}

impl From<ObjectFactory> for ObjectSignature {
    fn from(factory: ObjectFactory) -> Self {
        ObjectSignature::Factory(factory)
    }
}

impl fmt::Debug for ObjectSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectSignature::Factory(factory) => f.debug_tuple("Factory").field(factory).finish(),
            ObjectSignature::Value(_) => f.debug_tuple("Value").field(&"<instance>").finish(),
        }
    }
}
