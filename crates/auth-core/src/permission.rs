//! 权限枚举
//!
//! 权限集合是封闭的，`ALL`、权限代码和解析都从枚举本身派生

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{IntoStaticStr, VariantArray};

use crate::error::AuthzError;

/// 权限
///
/// 线上表示为 SCREAMING_SNAKE_CASE，例如 `"VIEW_REPORTS"`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ManageUsers,
    ManageOrganizations,
    ManageReports,
    CreateReports,
    EditReports,
    DeleteReports,
    ViewReports,
    ManageAssessments,
    CreateAssessments,
    EditAssessments,
    ViewAssessments,
    ManageTemplates,
    ViewTemplates,
    UploadMedia,
    ManageSecurity,
    ViewSecurity,
    ViewAuditLogs,
}

impl Permission {
    /// 全部权限，按声明顺序，由枚举派生
    pub const ALL: &'static [Permission] = <Permission as VariantArray>::VARIANTS;

    /// 权限代码
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| AuthzError::UnknownPermission(s.to_string()))
    }
}
