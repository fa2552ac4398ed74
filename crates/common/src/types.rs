//! 通用类型定义

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 用户 ID
///
/// 由上游身份层下发的不透明字符串，这里不做格式校验
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// 组织 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct OrganizationId(pub String);

impl OrganizationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrganizationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
