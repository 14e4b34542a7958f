//! # Registry Abstractions
//!
//! 服务注册表抽象层，定义服务注册、解析和批量加载的核心接口。
//!
//! ## 核心接口
//!
//! - [`ObjectRegistry`] - 服务注册表接口
//! - [`ObjectRegistryExt`] - 类型化解析与便捷注册
//! - [`DefinitionSource`] - 批量注册定义来源
//! - [`ObjectFactory`] / [`ObjectSignature`] - 服务构建方式

pub mod registry;
pub mod signature;
pub mod source;

pub use registry::*;
pub use signature::*;
pub use source::*;
