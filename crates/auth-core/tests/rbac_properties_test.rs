//! RBAC 行为测试
//!
//! 覆盖角色等级、权限表单调性、多权限检查和资源作用域

use std::collections::HashMap;

use relief_auth_core::{
    AuthzError, Permission, Principal, Role, can_access_resource, effective_permissions,
    has_all_permissions, has_any_permission, has_permission, is_role_higher_or_equal,
    permissions_for,
};
use serde_json::json;

/// 测试辅助：按角色代码创建主体
fn user_with_role(role: &str) -> Principal {
    Principal::new("user-1", role, "org-a")
}

#[test]
fn test_super_admin_holds_every_permission() {
    let admin = user_with_role("SUPER_ADMIN");
    for permission in Permission::ALL.iter().copied() {
        assert_eq!(has_permission(Some(&admin), permission), Ok(true), "{}", permission);
    }
    assert_eq!(permissions_for(Role::SuperAdmin).len(), Permission::ALL.len());
}

#[test]
fn test_higher_roles_hold_every_lower_role_permission() {
    for higher in Role::ALL.iter().copied() {
        for lower in Role::ALL.iter().copied().filter(|r| higher > *r) {
            let missing: Vec<_> = permissions_for(lower)
                .difference(permissions_for(higher))
                .collect();
            assert!(missing.is_empty(), "{} lacks {:?} held by {}", higher, missing, lower);
        }
    }
}

#[test]
fn test_evaluator_agrees_with_table() {
    for role in Role::ALL.iter().copied() {
        let principal = Principal::new("user-1", role, "org-a");
        for permission in Permission::ALL.iter().copied() {
            let expected = permissions_for(role).contains(&permission);
            assert_eq!(has_permission(Some(&principal), permission), Ok(expected));
        }
    }
}

#[test]
fn test_role_ordering_is_reflexive() {
    for role in Role::ALL.iter().copied() {
        assert!(is_role_higher_or_equal(role, role));
    }
}

#[test]
fn test_role_ordering_is_total_and_not_symmetric() {
    assert!(!is_role_higher_or_equal(Role::Viewer, Role::FieldWorker));
    assert!(is_role_higher_or_equal(Role::FieldWorker, Role::Viewer));
    assert!(is_role_higher_or_equal(Role::SuperAdmin, Role::OrgAdmin));
    assert!(!is_role_higher_or_equal(Role::Manager, Role::OrgAdmin));

    for a in Role::ALL.iter().copied() {
        for b in Role::ALL.iter().copied() {
            let forward = is_role_higher_or_equal(a, b);
            let backward = is_role_higher_or_equal(b, a);
            assert!(forward || backward, "{} and {} are not comparable", a, b);
            if a != b {
                assert_ne!(forward, backward, "{} and {} compare both ways", a, b);
            }
        }
    }
}

#[test]
fn test_empty_permission_list() {
    let viewer = user_with_role("VIEWER");
    assert_eq!(has_all_permissions(Some(&viewer), &[]), Ok(true));
    assert_eq!(has_any_permission(Some(&viewer), &[]), Ok(false));

    let broken = user_with_role("INVALID_ROLE");
    assert_eq!(has_all_permissions(Some(&broken), &[]), Ok(true));
}

#[test]
fn test_manager_vs_field_worker_report_permissions() {
    let required = [
        Permission::ViewReports,
        Permission::EditReports,
        Permission::ManageReports,
    ];

    let manager = user_with_role("MANAGER");
    assert_eq!(has_all_permissions(Some(&manager), &required), Ok(true));

    let field_worker = user_with_role("FIELD_WORKER");
    assert_eq!(has_all_permissions(Some(&field_worker), &required), Ok(false));
    assert_eq!(has_any_permission(Some(&field_worker), &required), Ok(true));
}

#[test]
fn test_permission_order_does_not_matter() {
    let coordinator = user_with_role("COORDINATOR");
    let forward = [Permission::EditReports, Permission::DeleteReports];
    let reversed = [Permission::DeleteReports, Permission::EditReports];

    assert_eq!(
        has_all_permissions(Some(&coordinator), &forward),
        has_all_permissions(Some(&coordinator), &reversed)
    );
    assert_eq!(
        has_any_permission(Some(&coordinator), &forward),
        has_any_permission(Some(&coordinator), &reversed)
    );
}

#[test]
fn test_organization_scoping() {
    let resource = json!({"id": "report-1", "organizationId": "org-a"});

    let in_org = Principal::new("user-1", Role::Viewer, "org-a");
    let other_org = Principal::new("user-2", Role::OrgAdmin, "org-b");

    assert_eq!(can_access_resource(Some(&in_org), &resource, "organizationId"), Ok(true));
    assert_eq!(can_access_resource(Some(&other_org), &resource, "organizationId"), Ok(false));
}

#[test]
fn test_ownership_scoping() {
    let owner = Principal::new("user-1", Role::FieldWorker, "org-a");
    let non_owner = Principal::new("user-2", Role::FieldWorker, "org-a");
    let resource = json!({"authorId": owner.id.as_str()});

    assert_eq!(can_access_resource(Some(&owner), &resource, "authorId"), Ok(true));
    assert_eq!(can_access_resource(Some(&non_owner), &resource, "authorId"), Ok(false));
}

#[test]
fn test_missing_scope_field_fails_closed() {
    let resource = json!({"id": "x"});
    for role in Role::ALL.iter().copied() {
        let principal = Principal::new("x", role, "org-a");
        assert_eq!(can_access_resource(Some(&principal), &resource, "organizationId"), Ok(false));
    }

    let null_org = json!({"organizationId": null});
    let principal = user_with_role("SUPER_ADMIN");
    assert_eq!(can_access_resource(Some(&principal), &null_org, "organizationId"), Ok(false));
}

#[test]
fn test_scoping_over_string_map() {
    let mut resource = HashMap::new();
    resource.insert("organizationId".to_string(), "org-a".to_string());
    resource.insert("uploadedById".to_string(), "user-9".to_string());

    let principal = user_with_role("COORDINATOR");
    assert_eq!(can_access_resource(Some(&principal), &resource, "organizationId"), Ok(true));
    assert_eq!(can_access_resource(Some(&principal), &resource, "uploadedById"), Ok(false));
}

#[test]
fn test_missing_principal_is_an_error() {
    let resource = json!({"organizationId": "org-a"});

    assert_eq!(has_permission(None, Permission::ViewReports), Err(AuthzError::MissingPrincipal));
    assert_eq!(has_all_permissions(None, &[]), Err(AuthzError::MissingPrincipal));
    assert_eq!(has_any_permission(None, &[]), Err(AuthzError::MissingPrincipal));
    assert_eq!(
        can_access_resource(None, &resource, "organizationId"),
        Err(AuthzError::MissingPrincipal)
    );
    assert_eq!(effective_permissions(None), Err(AuthzError::MissingPrincipal));
}

#[test]
fn test_invalid_role_is_denied_not_escalated() {
    let principal = user_with_role("INVALID_ROLE");
    assert_eq!(has_permission(Some(&principal), Permission::ViewReports), Ok(false));
    for permission in Permission::ALL.iter().copied() {
        assert_eq!(has_permission(Some(&principal), permission), Ok(false));
    }
    assert_eq!(effective_permissions(Some(&principal)), Ok(Vec::new()));
}

#[test]
fn test_principal_from_session_payload() {
    let principal: Principal = serde_json::from_value(json!({
        "id": "user-7",
        "role": "MANAGER",
        "organizationId": "org-c",
    }))
    .unwrap();

    assert_eq!(has_permission(Some(&principal), Permission::DeleteReports), Ok(true));
    assert_eq!(
        can_access_resource(Some(&principal), &json!({"organizationId": "org-c"}), "organizationId"),
        Ok(true)
    );
}

#[test]
fn test_empty_organization_fails_closed() {
    let principal = Principal::new("user-1", Role::OrgAdmin, "");
    let resource = json!({"organizationId": ""});
    assert_eq!(can_access_resource(Some(&principal), &resource, "organizationId"), Ok(false));
}
