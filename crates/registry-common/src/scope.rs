//! 服务实例化作用域

use crate::errors::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 服务实例化作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// 原型模式 - 每次解析都创建新实例
    #[default]
    Prototype,
    /// 单例模式 - 首次创建的实例在绑定的整个生命周期内复用
    Singleton,
}

impl Scope {
    /// 从可选的作用域标识解析，`None` 表示原型模式
    pub fn from_option(scope: Option<&str>) -> Result<Self, RegistryError> {
        scope.map_or(Ok(Self::Prototype), str::parse)
    }

    /// 作用域标识
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Prototype => "prototype",
            Scope::Singleton => "singleton",
        }
    }

    /// 是否在注册表内只构造一次
    pub fn is_singleton(&self) -> bool {
        matches!(self, Scope::Singleton)
    }
}

impl FromStr for Scope {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prototype" => Ok(Scope::Prototype),
            "singleton" => Ok(Scope::Singleton),
            other => Err(RegistryError::invalid_argument(format!(
                "未知的作用域: '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
