//! relief-auth-core - 鉴权核心库
//!
//! RBAC 核心逻辑：角色等级、角色权限表、多权限检查和资源作用域检查

pub mod error;
pub mod evaluator;
pub mod guard;
pub mod permission;
pub mod principal;
pub mod resource;
pub mod role;

pub use error::{AuthzError, AuthzResult};
pub use evaluator::{
    can_access_resource, can_assign_role, effective_permissions, has_all_permissions,
    has_any_permission, has_permission, is_role_higher_or_equal, permissions_for,
};
pub use guard::Guard;
pub use permission::Permission;
pub use principal::Principal;
pub use resource::{ResourceRecord, ScopeAxis};
pub use role::{Role, RoleClaim};

/// 权限检查宏
#[macro_export]
macro_rules! require_permission {
    ($principal:expr, $permission:expr) => {
        $crate::guard::require_permission($principal, $permission)?
    };
}

/// 角色检查宏
#[macro_export]
macro_rules! require_role {
    ($principal:expr, $role:expr) => {
        $crate::guard::require_role_at_least($principal, $role)?
    };
}
