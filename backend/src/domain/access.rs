//! Request-scoped access context.
//!
//! Built on every request from the session's auth user id: the caller's
//! profile plus the modules their role may see. Handlers ask it for module
//! and role checks instead of consulting global state.

use super::{Error, ModuleId, Profile, ResolvedPermissions, Role};

/// One entry of the navigation sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationEntry {
    pub module: ModuleId,
    pub title: &'static str,
    pub route: &'static str,
}

/// Authenticated caller with resolved module permissions.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessContext {
    profile: Profile,
    permissions: ResolvedPermissions,
}

impl AccessContext {
    pub fn new(profile: Profile, permissions: ResolvedPermissions) -> Self {
        Self {
            profile,
            permissions,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn role(&self) -> Role {
        self.profile.role
    }

    pub fn permissions(&self) -> &ResolvedPermissions {
        &self.permissions
    }

    /// Whether `module` is visible to the caller.
    pub fn has_module_access(&self, module: ModuleId) -> bool {
        self.permissions.has_module_access(module)
    }

    /// Reject the request unless `module` is visible to the caller.
    pub fn require_module(&self, module: ModuleId) -> Result<(), Error> {
        if self.has_module_access(module) {
            Ok(())
        } else {
            Err(Error::forbidden(format!(
                "module {module} is not enabled for role {}",
                self.role()
            )))
        }
    }

    /// Reject the request unless the caller's role passes `check`.
    ///
    /// `action` names the operation in the error message.
    pub fn require_role(&self, check: impl Fn(Role) -> bool, action: &str) -> Result<(), Error> {
        if check(self.role()) {
            Ok(())
        } else {
            Err(Error::forbidden(format!(
                "role {} may not {action}",
                self.role()
            )))
        }
    }

    /// Sidebar entries for the visible modules, in display order.
    pub fn navigation(&self) -> Vec<NavigationEntry> {
        ModuleId::ALL
            .iter()
            .copied()
            .filter(|module| self.has_module_access(*module))
            .map(|module| NavigationEntry {
                module,
                title: module.title(),
                route: module.route(),
            })
            .collect()
    }
}
