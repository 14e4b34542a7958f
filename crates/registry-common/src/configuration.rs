//! 注册表配置

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

/// 默认的最大解析深度
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 10;

/// 默认的共享实例标识
pub const DEFAULT_INSTANCE_ID: &str = "shared";

/// 默认的环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "SERVICE_REGISTRY";

/// 服务注册表配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// 嵌套解析的最大深度，超出后视为循环依赖
    pub max_recursion_depth: usize,
    /// 未指定标识时使用的进程级实例标识
    pub default_instance_id: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            default_instance_id: DEFAULT_INSTANCE_ID.to_string(),
        }
    }
}

impl RegistryConfig {
    /// 设置最大解析深度
    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    /// 设置默认实例标识
    pub fn with_default_instance_id(mut self, id: impl Into<String>) -> Self {
        self.default_instance_id = id.into();
        self
    }

    /// 从默认来源加载配置
    ///
    /// 依次叠加内置默认值、可选的 `config/registry` 文件和 `SERVICE_REGISTRY_*` 环境变量。
    pub fn load() -> ConfigResult<Self> {
        Self::load_with_env_prefix(DEFAULT_ENV_PREFIX)
    }

    /// 使用指定的环境变量前缀加载配置
    pub fn load_with_env_prefix(prefix: &str) -> ConfigResult<Self> {
        debug!("加载注册表配置，环境变量前缀: {}", prefix);
        Self::load_from(config::Environment::with_prefix(prefix).try_parsing(true))
    }

    fn load_from(environment: config::Environment) -> ConfigResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/registry").required(false))
            .add_source(environment)
            .build()
            .map_err(|e| {
                error!("配置构建失败: {}", e);
                ConfigError::from(e)
            })?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 从指定文件加载配置，格式由扩展名决定
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("加载注册表配置文件: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileReadError {
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("配置文件不存在: {}", path.display()),
                ),
            });
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_recursion_depth == 0 {
            return Err(ConfigError::validation("max_recursion_depth 必须大于 0"));
        }
        if self.default_instance_id.trim().is_empty() {
            return Err(ConfigError::validation("default_instance_id 不能为空"));
        }
        Ok(())
    }
}
