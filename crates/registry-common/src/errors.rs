//! 错误类型定义

use thiserror::Error;

/// 服务注册表错误类型
#[derive(Error, Debug)]
pub enum RegistryError {
    /// 名称或参数键不合法
    #[error("参数无效: {message}")]
    InvalidArgument { message: String },

    /// 服务未注册
    #[error("请求的服务 '{name}' 不可用")]
    NotFound { name: String },

    /// 嵌套解析超过最大深度
    #[error("检测到 '{name}' 可能存在循环引用 (解析深度 {depth})")]
    CircularDependency { name: String, depth: usize },

    /// 当前状态下不允许的操作
    #[error("非法操作: {message}")]
    InvalidOperation { message: String },

    /// 实例不是请求的具体类型
    #[error("类型转换失败: '{name}' 不是 {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    /// 工厂返回了自身的错误
    #[error("服务 '{name}' 构建失败: {source}")]
    Construction {
        name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RegistryError {
    /// 创建参数无效错误
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// 创建服务不存在错误
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// 创建循环依赖错误
    pub fn circular_dependency(name: impl Into<String>, depth: usize) -> Self {
        Self::CircularDependency {
            name: name.into(),
            depth,
        }
    }

    /// 创建非法操作错误
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// 创建类型转换错误
    pub fn type_mismatch<T: ?Sized>(name: impl Into<String>) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected: std::any::type_name::<T>(),
        }
    }

    /// 包装工厂自身的构建错误
    pub fn construction(
        name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Construction {
            name: name.into(),
            source: source.into(),
        }
    }

    /// 是否为服务不存在错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// 是否为循环依赖错误
    pub fn is_circular_dependency(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    /// 配置来源解析失败
    #[error("配置解析失败: {source}")]
    ParseError {
        #[from]
        source: config::ConfigError,
    },

    /// 配置值不合法
    #[error("配置验证失败: {message}")]
    ValidationError { message: String },

    /// 日志订阅器安装失败
    #[error("日志初始化失败: {message}")]
    LoggingError { message: String },
}

impl ConfigError {
    /// 创建配置验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// 注册表操作的结果类型
pub type RegistryResult<T> = Result<T, RegistryError>;
/// 配置操作的结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;
