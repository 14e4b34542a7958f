//! 服务注册表抽象接口

use crate::signature::{Arguments, Instance, ObjectFactory, ObjectSignature};
use crate::source::DefinitionSource;
use indexmap::IndexMap;
use registry_common::{RegistryError, RegistryResult, Scope};
use std::any::Any;
use std::sync::Arc;

/// 服务注册表 trait
///
/// 以字符串标识映射到惰性构建的服务实例。工厂在解析时收到注册表本身，
/// 因此该 trait 必须保持对象安全。
pub trait ObjectRegistry: Send + Sync {
    /// 注册服务
    ///
    /// 同名绑定会被覆盖。`signature` 必须是工厂，否则返回 [`RegistryError::InvalidArgument`]。
    fn register_object(
        &self,
        name: &str,
        signature: ObjectSignature,
        scope: Scope,
    ) -> RegistryResult<()>;

    /// 解析服务
    ///
    /// `arguments` 中的每一项会作为原型绑定写入注册表，之后才查找 `name`。
    fn new_object(&self, name: &str, arguments: Option<Arguments>) -> RegistryResult<Instance>;

    /// 检查是否存在绑定（包括参数注入的绑定）
    fn has_object(&self, name: &str) -> RegistryResult<bool>;

    /// 获取全部绑定，按首次插入顺序排列
    fn get_all_services(&self) -> IndexMap<String, ObjectSignature>;

    /// 从定义来源批量注册
    fn register_container(&self, source: &dyn DefinitionSource) -> RegistryResult<()>;
}

/// [`ObjectRegistry`] 的便捷扩展
pub trait ObjectRegistryExt: ObjectRegistry {
    /// 以闭包注册服务
    fn register<F>(&self, name: &str, scope: Scope, factory_fn: F) -> RegistryResult<()>
    where
        F: Fn(&dyn ObjectRegistry) -> RegistryResult<Instance> + Send + Sync + 'static,
    {
        self.register_object(name, ObjectFactory::new(factory_fn).into(), scope)
    }

    /// 以返回具体类型的闭包注册服务
    fn register_typed<T, F>(&self, name: &str, scope: Scope, factory_fn: F) -> RegistryResult<()>
    where
        T: Any + Send + Sync,
        F: Fn(&dyn ObjectRegistry) -> RegistryResult<T> + Send + Sync + 'static,
    {
        self.register_object(name, ObjectFactory::of(factory_fn).into(), scope)
    }

    /// 解析并转换为具体类型
    fn resolve<T>(&self, name: &str) -> RegistryResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        downcast(name, self.new_object(name, None)?)
    }

    /// 带命名参数解析并转换为具体类型
    fn resolve_with<T>(&self, name: &str, arguments: Arguments) -> RegistryResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        downcast(name, self.new_object(name, Some(arguments))?)
    }
}

impl<R: ObjectRegistry + ?Sized> ObjectRegistryExt for R {}

fn downcast<T: Any + Send + Sync>(name: &str, instance: Instance) -> RegistryResult<Arc<T>> {
    instance
        .downcast::<T>()
        .map_err(|_| RegistryError::type_mismatch::<T>(name))
}
