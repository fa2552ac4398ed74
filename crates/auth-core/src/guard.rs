//! 鉴权守卫
//!
//! 供请求处理器在执行变更前调用，把评估结果转换为 `AppResult`：
//! 主体缺失 → `Unauthenticated` (401)，拒绝 → `Forbidden` (403)

use metrics::counter;
use relief_config::AuthorizationConfig;
use relief_errors::{AppError, AppResult};
use tracing::{debug, warn};

use crate::error::AuthzError;
use crate::permission::Permission;
use crate::principal::Principal;
use crate::resource::ResourceRecord;
use crate::role::Role;

/// 鉴权守卫
#[derive(Debug, Clone)]
pub struct Guard {
    log_denials: bool,
    record_metrics: bool,
}

impl Default for Guard {
    fn default() -> Self {
        Self::new(&AuthorizationConfig::default())
    }
}

impl Guard {
    pub fn new(config: &AuthorizationConfig) -> Self {
        Self {
            log_denials: config.log_denials,
            record_metrics: config.record_metrics,
        }
    }

    /// 要求单个权限
    pub fn require_permission(
        &self,
        principal: Option<&Principal>,
        permission: Permission,
    ) -> AppResult<()> {
        let principal = self.authenticated(principal, "permission")?;
        self.decide(
            "permission",
            principal,
            principal.has_permission(permission),
            || format!("Missing permission: {}", permission),
        )
    }

    /// 要求全部权限
    pub fn require_all_permissions(
        &self,
        principal: Option<&Principal>,
        permissions: &[Permission],
    ) -> AppResult<()> {
        let principal = self.authenticated(principal, "all_permissions")?;
        self.decide(
            "all_permissions",
            principal,
            principal.has_all_permissions(permissions),
            || {
                let missing: Vec<&str> = permissions
                    .iter()
                    .filter(|p| !principal.has_permission(**p))
                    .map(|p| p.as_str())
                    .collect();
                format!("Missing permissions: {}", missing.join(", "))
            },
        )
    }

    /// 要求任一权限
    pub fn require_any_permission(
        &self,
        principal: Option<&Principal>,
        permissions: &[Permission],
    ) -> AppResult<()> {
        let principal = self.authenticated(principal, "any_permission")?;
        self.decide(
            "any_permission",
            principal,
            principal.has_any_permission(permissions),
            || {
                let wanted: Vec<&str> = permissions.iter().map(|p| p.as_str()).collect();
                format!("Requires one of: {}", wanted.join(", "))
            },
        )
    }

    /// 要求角色不低于 `minimum`
    pub fn require_role_at_least(
        &self,
        principal: Option<&Principal>,
        minimum: Role,
    ) -> AppResult<()> {
        let principal = self.authenticated(principal, "role")?;
        let allowed = principal
            .role()
            .is_some_and(|role| role.is_higher_or_equal(minimum));
        self.decide("role", principal, allowed, || {
            format!("Requires role {} or higher", minimum)
        })
    }

    /// 要求资源作用域匹配
    pub fn require_resource_access<R: ResourceRecord + ?Sized>(
        &self,
        principal: Option<&Principal>,
        resource: &R,
        field: &str,
    ) -> AppResult<()> {
        let principal = self.authenticated(principal, "resource")?;
        self.decide(
            "resource",
            principal,
            principal.can_access(resource, field),
            || format!("Resource is outside the caller's scope ({})", field),
        )
    }

    /// 要求可以分配目标角色
    pub fn require_role_assignment(
        &self,
        principal: Option<&Principal>,
        target: Role,
    ) -> AppResult<()> {
        let principal = self.authenticated(principal, "role_assignment")?;
        self.decide(
            "role_assignment",
            principal,
            principal.can_assign_role(target),
            || format!("Not allowed to assign role {}", target),
        )
    }

    fn authenticated<'a>(
        &self,
        principal: Option<&'a Principal>,
        check: &'static str,
    ) -> AppResult<&'a Principal> {
        principal.ok_or_else(|| {
            warn!(check, "Authorization check called without a principal");
            if self.record_metrics {
                counter!("authorization_checks_errors_total", "check" => check).increment(1);
            }
            AppError::from(AuthzError::MissingPrincipal)
        })
    }

    fn decide(
        &self,
        check: &'static str,
        principal: &Principal,
        allowed: bool,
        reason: impl FnOnce() -> String,
    ) -> AppResult<()> {
        if self.record_metrics {
            counter!(
                "authorization_checks_total",
                "check" => check,
                "allowed" => allowed.to_string()
            )
            .increment(1);
        }

        if allowed {
            debug!(
                check,
                user_id = %principal.id,
                role = %principal.role,
                "Authorization granted"
            );
            return Ok(());
        }

        let reason = reason();
        if self.log_denials {
            warn!(
                check,
                user_id = %principal.id,
                role = %principal.role,
                organization_id = %principal.organization_id,
                reason = %reason,
                "Authorization denied"
            );
        }
        Err(AppError::forbidden(reason))
    }
}

/// 使用默认配置检查单个权限
pub fn require_permission(principal: Option<&Principal>, permission: Permission) -> AppResult<()> {
    Guard::default().require_permission(principal, permission)
}

pub fn require_all_permissions(
    principal: Option<&Principal>,
    permissions: &[Permission],
) -> AppResult<()> {
    Guard::default().require_all_permissions(principal, permissions)
}

pub fn require_any_permission(
    principal: Option<&Principal>,
    permissions: &[Permission],
) -> AppResult<()> {
    Guard::default().require_any_permission(principal, permissions)
}

pub fn require_role_at_least(principal: Option<&Principal>, minimum: Role) -> AppResult<()> {
    Guard::default().require_role_at_least(principal, minimum)
}

pub fn require_resource_access<R: ResourceRecord + ?Sized>(
    principal: Option<&Principal>,
    resource: &R,
    field: &str,
) -> AppResult<()> {
    Guard::default().require_resource_access(principal, resource, field)
}

pub fn require_role_assignment(principal: Option<&Principal>, target: Role) -> AppResult<()> {
    Guard::default().require_role_assignment(principal, target)
}
