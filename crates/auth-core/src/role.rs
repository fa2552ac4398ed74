//! 角色
//!
//! 角色按权限从高到低全序排列：
//! SUPER_ADMIN > ORG_ADMIN > MANAGER > COORDINATOR > FIELD_WORKER > VIEWER

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{IntoStaticStr, VariantArray};

use crate::error::AuthzError;
use crate::permission::Permission;

/// 角色
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    OrgAdmin,
    Manager,
    Coordinator,
    FieldWorker,
    Viewer,
}

impl Role {
    /// 全部角色，从高到低（即声明顺序），由枚举派生
    pub const ALL: &'static [Role] = <Role as VariantArray>::VARIANTS;

    /// 等级，数值越大权限越高
    pub fn rank(&self) -> u8 {
        match self {
            Role::SuperAdmin => 6,
            Role::OrgAdmin => 5,
            Role::Manager => 4,
            Role::Coordinator => 3,
            Role::FieldWorker => 2,
            Role::Viewer => 1,
        }
    }

    /// 角色代码
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// 本角色在下一级角色之上新增的权限
    ///
    /// 角色的完整权限 = 所有更低角色的权限 ∪ 本角色新增权限，
    /// SUPER_ADMIN 另外持有全部权限
    pub(crate) fn grants(&self) -> &'static [Permission] {
        match self {
            Role::SuperAdmin => &[Permission::ManageOrganizations],
            Role::OrgAdmin => &[Permission::ManageUsers, Permission::ManageSecurity],
            Role::Manager => &[
                Permission::ManageReports,
                Permission::DeleteReports,
                Permission::ManageAssessments,
                Permission::ManageTemplates,
                Permission::ViewAuditLogs,
            ],
            Role::Coordinator => &[
                Permission::EditReports,
                Permission::EditAssessments,
                Permission::ViewSecurity,
            ],
            Role::FieldWorker => &[
                Permission::CreateReports,
                Permission::CreateAssessments,
                Permission::UploadMedia,
            ],
            Role::Viewer => &[
                Permission::ViewReports,
                Permission::ViewAssessments,
                Permission::ViewTemplates,
            ],
        }
    }

    /// 是否高于或等于另一个角色
    pub fn is_higher_or_equal(&self, other: Role) -> bool {
        self.rank() >= other.rank()
    }

    /// 是否严格高于另一个角色
    pub fn is_higher_than(&self, other: Role) -> bool {
        self.rank() > other.rank()
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| AuthzError::UnknownRole(s.to_string()))
    }
}

/// 主体上携带的角色声明
///
/// 身份层下发的角色字符串可能已损坏或来自旧版本，
/// 无法识别的值原样保留，鉴权时按无权限处理
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleClaim {
    Recognized(Role),
    Unrecognized(String),
}

impl RoleClaim {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<Role>() {
            Ok(role) => Self::Recognized(role),
            Err(_) => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Recognized(role) => Some(*role),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Recognized(role) => role.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<Role> for RoleClaim {
    fn from(role: Role) -> Self {
        Self::Recognized(role)
    }
}

impl From<&str> for RoleClaim {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for RoleClaim {
    fn from(raw: String) -> Self {
        match raw.parse::<Role>() {
            Ok(role) => Self::Recognized(role),
            Err(_) => Self::Unrecognized(raw),
        }
    }
}

impl fmt::Display for RoleClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RoleClaim {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoleClaim {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(RoleClaim::from)
    }
}
