//! RBAC 评估器
//!
//! 纯函数：结果只取决于入参和两张静态表（角色等级、角色权限），
//! 无共享可变状态，可在任意线程并发调用

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;

use crate::error::{AuthzError, AuthzResult};
use crate::permission::Permission;
use crate::principal::Principal;
use crate::resource::{ResourceRecord, ScopeAxis};
use crate::role::Role;

/// 角色权限表，首次访问时构建，之后只读
static ROLE_PERMISSIONS: Lazy<HashMap<Role, BTreeSet<Permission>>> =
    Lazy::new(build_role_permissions);

static NO_PERMISSIONS: BTreeSet<Permission> = BTreeSet::new();

/// 从最低角色开始逐级累加，保证高角色的权限是低角色的超集
fn build_role_permissions() -> HashMap<Role, BTreeSet<Permission>> {
    let mut table = HashMap::with_capacity(Role::ALL.len());
    let mut inherited = BTreeSet::new();

    for role in Role::ALL.iter().rev().copied() {
        inherited.extend(role.grants().iter().copied());
        if role == Role::SuperAdmin {
            inherited.extend(Permission::ALL.iter().copied());
        }
        table.insert(role, inherited.clone());
    }

    table
}

fn require_principal(principal: Option<&Principal>) -> AuthzResult<&Principal> {
    principal.ok_or(AuthzError::MissingPrincipal)
}

/// 角色持有的权限集合
pub fn permissions_for(role: Role) -> &'static BTreeSet<Permission> {
    ROLE_PERMISSIONS.get(&role).unwrap_or(&NO_PERMISSIONS)
}

impl Principal {
    /// 检查权限
    ///
    /// SUPER_ADMIN 直接放行；无法识别的角色没有任何权限
    pub fn has_permission(&self, permission: Permission) -> bool {
        match self.role() {
            Some(Role::SuperAdmin) => true,
            Some(role) => permissions_for(role).contains(&permission),
            None => false,
        }
    }

    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(*p))
    }

    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(*p))
    }

    /// 资源的指定字段是否与主体匹配
    ///
    /// 字段缺失时拒绝；空字符串视同缺失，两边都为空也不放行
    pub fn can_access<R: ResourceRecord + ?Sized>(&self, resource: &R, field: &str) -> bool {
        let expected = self.scope_value(ScopeAxis::for_field(field));
        if expected.is_empty() {
            return false;
        }
        resource.field(field) == Some(expected)
    }

    /// 主体的全部有效权限（有序）
    pub fn effective_permissions(&self) -> Vec<Permission> {
        match self.role() {
            Some(role) => permissions_for(role).iter().copied().collect(),
            None => Vec::new(),
        }
    }

    /// 是否可以给其他用户分配指定角色
    ///
    /// SUPER_ADMIN 可分配任意角色；其余角色需要 MANAGE_USERS 且只能分配严格更低的角色
    pub fn can_assign_role(&self, target: Role) -> bool {
        match self.role() {
            Some(Role::SuperAdmin) => true,
            Some(role) => self.has_permission(Permission::ManageUsers) && role.is_higher_than(target),
            None => false,
        }
    }
}

/// 检查主体是否拥有某个权限
///
/// 主体缺失属于调用方违约，返回 `AuthzError::MissingPrincipal` 而不是 `false`
pub fn has_permission(principal: Option<&Principal>, permission: Permission) -> AuthzResult<bool> {
    Ok(require_principal(principal)?.has_permission(permission))
}

/// 是否拥有全部权限，空列表为 true
pub fn has_all_permissions(
    principal: Option<&Principal>,
    permissions: &[Permission],
) -> AuthzResult<bool> {
    Ok(require_principal(principal)?.has_all_permissions(permissions))
}

/// 是否拥有任一权限，空列表为 false
pub fn has_any_permission(
    principal: Option<&Principal>,
    permissions: &[Permission],
) -> AuthzResult<bool> {
    Ok(require_principal(principal)?.has_any_permission(permissions))
}

/// 角色 a 是否高于或等于角色 b
pub fn is_role_higher_or_equal(a: Role, b: Role) -> bool {
    a.is_higher_or_equal(b)
}

/// 检查资源作用域
///
/// `field` 为组织类字段时与主体组织比较，其余字段与主体 ID 比较
pub fn can_access_resource<R: ResourceRecord + ?Sized>(
    principal: Option<&Principal>,
    resource: &R,
    field: &str,
) -> AuthzResult<bool> {
    Ok(require_principal(principal)?.can_access(resource, field))
}

pub fn effective_permissions(principal: Option<&Principal>) -> AuthzResult<Vec<Permission>> {
    Ok(require_principal(principal)?.effective_permissions())
}

pub fn can_assign_role(principal: Option<&Principal>, target: Role) -> AuthzResult<bool> {
    Ok(require_principal(principal)?.can_assign_role(target))
}
