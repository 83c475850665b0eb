//! Tests for permission resolution, seeding, and toggling.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockRolePermissionRepository;

fn service(repo: MockRolePermissionRepository) -> PermissionService {
    PermissionService::new(Arc::new(repo))
}

#[tokio::test]
async fn main_admin_never_queries_storage() {
    let mut repo = MockRolePermissionRepository::new();
    repo.expect_list_for_role().never();

    let resolved = service(repo).resolve(Role::MainAdmin).await;

    for module in ModuleId::ALL {
        assert!(resolved.has_module_access(*module));
    }
}

#[tokio::test]
async fn stored_rows_drive_access() {
    let mut repo = MockRolePermissionRepository::new();
    repo.expect_list_for_role()
        .withf(|role| *role == Role::Manager)
        .times(1)
        .return_once(|_| {
            Ok(vec![
                RolePermission::new(Role::Manager, ModuleId::Finance, true),
                RolePermission::new(Role::Manager, ModuleId::Dashboard, false),
            ])
        });

    let resolved = service(repo).resolve(Role::Manager).await;

    assert!(resolved.has_module_access(ModuleId::Finance));
    assert!(!resolved.has_module_access(ModuleId::Dashboard));
    assert!(!resolved.is_fallback());
}

#[rstest]
#[case(Role::SecondAdmin)]
#[case(Role::Manager)]
#[case(Role::Staff)]
#[tokio::test]
async fn storage_failure_substitutes_fallback_table(#[case] role: Role) {
    let mut repo = MockRolePermissionRepository::new();
    repo.expect_list_for_role()
        .times(1)
        .return_once(|_| Err(RolePermissionRepositoryError::connection("refused")));

    let resolved = service(repo).resolve(role).await;
    let expected = ResolvedPermissions::fallback(role, "ignored");

    assert!(resolved.is_fallback());
    for module in ModuleId::ALL {
        assert_eq!(
            resolved.has_module_access(*module),
            expected.has_module_access(*module),
            "{role} / {module}"
        );
    }
}

#[tokio::test]
async fn matrix_returns_stored_rows_without_seeding() {
    let mut repo = MockRolePermissionRepository::new();
    repo.expect_list_all()
        .times(1)
        .return_once(|| Ok(vec![RolePermission::new(Role::Staff, ModuleId::Tracking, true)]));
    repo.expect_upsert().never();

    let matrix = service(repo).matrix().await.expect("matrix loads");

    assert!(!matrix.seeded());
    assert_eq!(matrix.rows().len(), 1);
}

#[tokio::test]
async fn empty_matrix_is_seeded_with_defaults() {
    let mut repo = MockRolePermissionRepository::new();
    repo.expect_list_all().times(1).return_once(|| Ok(Vec::new()));
    repo.expect_upsert()
        .withf(|rows| rows == default_permission_matrix().as_slice())
        .times(1)
        .return_once(|_| Ok(()));

    let matrix = service(repo).matrix().await.expect("matrix seeds");

    assert!(matrix.seeded());
    assert!(!matrix.is_enabled(Role::SecondAdmin, ModuleId::Users));
}

#[tokio::test]
async fn matrix_surfaces_connection_errors() {
    let mut repo = MockRolePermissionRepository::new();
    repo.expect_list_all()
        .times(1)
        .return_once(|| Err(RolePermissionRepositoryError::connection("down")));

    let error = service(repo).matrix().await.expect_err("storage down");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[case::flips_enabled(Some(true), false)]
#[case::flips_disabled(Some(false), true)]
#[case::inserts_enabled(None, true)]
#[tokio::test]
async fn toggle_upserts_by_natural_key(#[case] existing: Option<bool>, #[case] expected: bool) {
    let mut repo = MockRolePermissionRepository::new();
    repo.expect_find()
        .withf(|role, module| *role == Role::Staff && *module == ModuleId::Finance)
        .times(1)
        .return_once(move |role, module| {
            Ok(existing.map(|enabled| RolePermission::new(role, module, enabled)))
        });
    repo.expect_upsert()
        .withf(move |rows| {
            rows == [RolePermission::new(Role::Staff, ModuleId::Finance, expected)]
        })
        .times(1)
        .return_once(|_| Ok(()));

    let row = service(repo)
        .toggle(Role::Staff, ModuleId::Finance)
        .await
        .expect("toggle succeeds");

    assert_eq!(row.enabled, expected);
}

#[tokio::test]
async fn toggling_main_admin_is_rejected() {
    let mut repo = MockRolePermissionRepository::new();
    repo.expect_find().never();
    repo.expect_upsert().never();

    let error = service(repo)
        .toggle(Role::MainAdmin, ModuleId::Users)
        .await
        .expect_err("main_admin is fixed");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}
