//! Role-to-module permission resolution.
//!
//! Visibility of a module for a role comes from stored `(role, module,
//! enabled)` rows. `main_admin` bypasses storage entirely. When storage cannot
//! be read the static fallback table below is substituted and the result is
//! tagged with [`PermissionSource::Fallback`] so callers and logs can tell the
//! two apart.

use std::collections::BTreeSet;

use super::{ModuleId, Role};

/// One stored permission row, keyed naturally by `(role, module)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePermission {
    /// Role the row applies to.
    pub role: Role,
    /// Module the row gates.
    pub module: ModuleId,
    /// Whether the module is visible for the role.
    pub enabled: bool,
}

impl RolePermission {
    /// Construct a row.
    pub fn new(role: Role, module: ModuleId, enabled: bool) -> Self {
        Self {
            role,
            module,
            enabled,
        }
    }
}

/// Where a resolved permission set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionSource {
    /// Hardcoded `main_admin` override; storage was not consulted.
    Builtin,
    /// Stored permission rows.
    Stored,
    /// Static fallback table substituted after a storage failure.
    Fallback {
        /// Description of the storage failure.
        reason: String,
    },
}

/// Modules visible to one role, plus the provenance of that answer.
///
/// # Examples
/// ```
/// use docketsync::domain::{ModuleId, ResolvedPermissions, Role};
///
/// let resolved = ResolvedPermissions::fallback(Role::Staff, "timeout");
/// assert!(resolved.has_module_access(ModuleId::Connotes));
/// assert!(!resolved.has_module_access(ModuleId::Finance));
/// assert!(resolved.is_fallback());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPermissions {
    role: Role,
    modules: BTreeSet<ModuleId>,
    source: PermissionSource,
}

impl ResolvedPermissions {
    /// Every module, without consulting storage.
    pub fn main_admin() -> Self {
        Self {
            role: Role::MainAdmin,
            modules: ModuleId::ALL.iter().copied().collect(),
            source: PermissionSource::Builtin,
        }
    }

    /// Modules with an enabled row for exactly this role.
    ///
    /// Rows for other roles and disabled rows are ignored.
    pub fn from_stored(role: Role, rows: &[RolePermission]) -> Self {
        let modules = rows
            .iter()
            .filter(|row| row.role == role && row.enabled)
            .map(|row| row.module)
            .collect();
        Self {
            role,
            modules,
            source: PermissionSource::Stored,
        }
    }

    /// Static fallback set for the role.
    pub fn fallback(role: Role, reason: impl Into<String>) -> Self {
        Self {
            role,
            modules: fallback_modules(role).iter().copied().collect(),
            source: PermissionSource::Fallback {
                reason: reason.into(),
            },
        }
    }

    /// Role the set was resolved for.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Visible modules in declaration order.
    pub fn modules(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.modules.iter().copied()
    }

    /// Provenance of this set.
    pub fn source(&self) -> &PermissionSource {
        &self.source
    }

    /// Whether the fallback table was substituted.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, PermissionSource::Fallback { .. })
    }

    /// Whether `module` is visible. Always true for `main_admin`.
    pub fn has_module_access(&self, module: ModuleId) -> bool {
        match self.role {
            Role::MainAdmin => true,
            Role::SecondAdmin | Role::Manager | Role::Staff => self.modules.contains(&module),
        }
    }
}

/// Static module set used when stored permissions cannot be read.
pub fn fallback_modules(role: Role) -> &'static [ModuleId] {
    use ModuleId::{Connotes, Dashboard, Finance, Manifest, Settings, Tracking, Users};

    match role {
        Role::MainAdmin => ModuleId::ALL,
        Role::SecondAdmin => &[Dashboard, Manifest, Connotes, Tracking, Finance, Settings],
        Role::Manager => &[Dashboard, Manifest, Connotes, Tracking, Settings],
        Role::Staff => &[Dashboard, Connotes, Tracking],
    }
}

/// Rows written when the permission table is found empty.
///
/// `main_admin` gets every module enabled, `second_admin` every module with
/// `users` present but disabled, and managers and staff an enabled row for
/// each module of their fallback set.
pub fn default_permission_matrix() -> Vec<RolePermission> {
    let main_admin = ModuleId::ALL
        .iter()
        .map(|module| RolePermission::new(Role::MainAdmin, *module, true));
    let second_admin = ModuleId::ALL.iter().map(|module| {
        RolePermission::new(Role::SecondAdmin, *module, *module != ModuleId::Users)
    });
    let manager = fallback_modules(Role::Manager)
        .iter()
        .map(|module| RolePermission::new(Role::Manager, *module, true));
    let staff = fallback_modules(Role::Staff)
        .iter()
        .map(|module| RolePermission::new(Role::Staff, *module, true));

    main_admin
        .chain(second_admin)
        .chain(manager)
        .chain(staff)
        .collect()
}

/// Full permission table as shown on the administration screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrix {
    rows: Vec<RolePermission>,
    seeded: bool,
}

impl PermissionMatrix {
    /// Wrap stored rows. `seeded` records whether defaults were just written.
    pub fn new(rows: Vec<RolePermission>, seeded: bool) -> Self {
        Self { rows, seeded }
    }

    /// Stored rows.
    pub fn rows(&self) -> &[RolePermission] {
        &self.rows
    }

    /// Whether the defaults were written while building this matrix.
    pub fn seeded(&self) -> bool {
        self.seeded
    }

    /// Cell value; a missing row reads as disabled.
    pub fn is_enabled(&self, role: Role, module: ModuleId) -> bool {
        self.rows
            .iter()
            .find(|row| row.role == role && row.module == module)
            .is_some_and(|row| row.enabled)
    }
}
