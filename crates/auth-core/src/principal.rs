//! 鉴权主体

use relief_common::{OrganizationId, UserId};
use serde::{Deserialize, Serialize};

use crate::resource::ScopeAxis;
use crate::role::{Role, RoleClaim};

/// 已认证的请求主体
///
/// 由身份层在每次请求时构造，鉴权核心只读不写
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: UserId,
    pub role: RoleClaim,
    pub organization_id: OrganizationId,
}

impl Principal {
    pub fn new(
        id: impl Into<UserId>,
        role: impl Into<RoleClaim>,
        organization_id: impl Into<OrganizationId>,
    ) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            organization_id: organization_id.into(),
        }
    }

    /// 可识别的角色，无法识别时为 None
    pub fn role(&self) -> Option<Role> {
        self.role.role()
    }

    pub fn is_super_admin(&self) -> bool {
        self.role() == Some(Role::SuperAdmin)
    }

    /// 主体在某个作用域维度上的取值
    pub fn scope_value(&self, axis: ScopeAxis) -> &str {
        match axis {
            ScopeAxis::Organization => self.organization_id.as_str(),
            ScopeAxis::Owner => self.id.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case() {
        let principal: Principal = serde_json::from_value(json!({
            "id": "user-1",
            "role": "FIELD_WORKER",
            "organizationId": "org-a",
        }))
        .unwrap();

        assert_eq!(principal.id.as_str(), "user-1");
        assert_eq!(principal.role(), Some(Role::FieldWorker));
        assert_eq!(principal.scope_value(ScopeAxis::Organization), "org-a");
        assert_eq!(principal.scope_value(ScopeAxis::Owner), "user-1");
    }

    #[test]
    fn test_unrecognized_role_survives_deserialization() {
        let principal: Principal = serde_json::from_value(json!({
            "id": "user-2",
            "role": "INVALID_ROLE",
            "organizationId": "org-a",
        }))
        .unwrap();

        assert_eq!(principal.role(), None);
        assert!(!principal.is_super_admin());
        assert_eq!(principal.role.as_str(), "INVALID_ROLE");
    }
}
