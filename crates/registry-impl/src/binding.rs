//! 绑定记录

use once_cell::sync::OnceCell;
use registry_abstractions::{Instance, ObjectRegistry, ObjectSignature};
use registry_common::{RegistryResult, Scope};
use std::fmt;
use std::sync::Arc;

/// 注册表中的一条绑定
///
/// 单例缓存单元随绑定创建，重新注册同名服务会得到新的单元。
#[derive(Clone)]
pub(crate) struct Binding {
    signature: ObjectSignature,
    scope: Scope,
    singleton: Arc<OnceCell<Instance>>,
}

impl Binding {
    pub(crate) fn new(signature: ObjectSignature, scope: Scope) -> Self {
        Self {
            signature,
            scope,
            singleton: Arc::new(OnceCell::new()),
        }
    }

    /// 参数注入的绑定：原型作用域，始终返回同一个值
    pub(crate) fn argument(value: Instance) -> Self {
        Self::new(ObjectSignature::Value(value), Scope::Prototype)
    }

    pub(crate) fn signature(&self) -> &ObjectSignature {
        &self.signature
    }

    /// 按作用域产生实例
    ///
    /// 调用方不得持有注册表锁，工厂可能重新进入注册表。
    pub(crate) fn instantiate(&self, registry: &dyn ObjectRegistry) -> RegistryResult<Instance> {
        if !self.scope.is_singleton() {
            return self.signature.produce(registry);
        }

        if let Some(cached) = self.singleton.get() {
            return Ok(Arc::clone(cached));
        }

        let created = self.signature.produce(registry)?;
        // 并发首建时以先写入的实例为准
        Ok(Arc::clone(self.singleton.get_or_init(|| created)))
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("signature", &self.signature)
            .field("scope", &self.scope)
            .field("cached", &self.singleton.get().is_some())
            .finish()
    }
}
