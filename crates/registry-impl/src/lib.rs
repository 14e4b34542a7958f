//! # 服务注册表具体实现
//!
//! 提供具体的服务注册表 [`ServiceRegistry`] 以及按标识管理注册表的 [`RegistryContext`]。

mod binding;
pub mod context;
pub mod registry;

pub use context::{get_instance, get_shared_instance, reset, RegistryContext};
pub use registry::ServiceRegistry;

pub use registry_abstractions::{
    instance, Arguments, DefinitionSource, Definitions, FnDefinitionSource, Instance,
    ObjectFactory, ObjectRegistry, ObjectRegistryExt, ObjectSignature,
};
pub use registry_common::{RegistryConfig, RegistryError, RegistryResult, Scope};
