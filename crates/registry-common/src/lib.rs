//! # Registry Common
//!
//! 服务注册表的公共类型：错误、作用域、配置与日志初始化。
//!
//! ## 核心类型
//!
//! - [`RegistryError`] - 注册与解析错误
//! - [`Scope`] - 服务实例化作用域
//! - [`RegistryConfig`] - 注册表配置
//! - [`LoggingConfig`] - 日志配置

pub mod configuration;
pub mod errors;
pub mod logging;
pub mod scope;

pub use configuration::*;
pub use errors::*;
pub use logging::*;
pub use scope::*;
