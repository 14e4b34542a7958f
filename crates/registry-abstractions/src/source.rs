//! 定义来源抽象接口
//!
//! 定义来源只负责交出一个批量注册函数，注册表调用该函数并把自身传进去。

use crate::registry::ObjectRegistry;
use registry_common::RegistryResult;
use std::fmt;
use std::sync::Arc;

/// 批量注册函数
pub type Definitions = Box<dyn FnOnce(&dyn ObjectRegistry) -> RegistryResult<()> + Send>;

/// 定义来源 trait
pub trait DefinitionSource: Send + Sync {
    /// 加载全部定义
    ///
    /// 返回 `None` 表示来源无法给出可调用的定义，注册表以
    /// [`registry_common::RegistryError::InvalidOperation`] 拒绝。
    fn load_all_definitions(&self) -> Option<Definitions>;

    /// 来源名称
    fn name(&self) -> &str {
        "anonymous"
    }
}

type DefinitionsFn = dyn Fn(&dyn ObjectRegistry) -> RegistryResult<()> + Send + Sync;

/// 基于闭包的定义来源
#[derive(Clone)]
pub struct FnDefinitionSource {
    name: String,
    definitions: Arc<DefinitionsFn>,
}

impl FnDefinitionSource {
    /// 创建新的闭包定义来源
    pub fn new<F>(name: impl Into<String>, definitions: F) -> Self
    where
        F: Fn(&dyn ObjectRegistry) -> RegistryResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            definitions: Arc::new(definitions),
        }
    }
}

impl DefinitionSource for FnDefinitionSource {
    fn load_all_definitions(&self) -> Option<Definitions> {
        let definitions = Arc::clone(&self.definitions);
        Some(Box::new(move |registry| definitions(registry)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FnDefinitionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDefinitionSource")
            .field("name", &self.name)
            .field("definitions", &"<function>")
            .finish()
    }
}
