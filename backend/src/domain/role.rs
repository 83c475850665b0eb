//! Staff roles and the feature modules they can be granted.
//!
//! Both sets are closed: adding a role or module is a compile-time change
//! that forces every `match` over them to be revisited.

use super::value_macros::define_text_enum;

define_text_enum! {
    /// Role assigned to a staff profile.
    pub enum Role ("role") {
        /// Owner account; always sees every module.
        MainAdmin => "main_admin",
        /// Deputy administrator.
        SecondAdmin => "second_admin",
        /// Operations manager.
        Manager => "manager",
        /// Counter or warehouse staff.
        Staff => "staff",
    }
}

impl Role {
    /// Main or second administrator.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::MainAdmin | Self::SecondAdmin)
    }

    /// Administrators and managers.
    pub fn is_manager(self) -> bool {
        self.is_admin() || matches!(self, Self::Manager)
    }

    /// Whether the role may close dockets.
    pub fn can_manage_dockets(self) -> bool {
        self.is_manager()
    }

    /// Whether the role may provision, edit, or delete staff accounts.
    pub fn can_manage_users(self) -> bool {
        self.is_admin()
    }

    /// Whether a user with this role may assign `target` to another account.
    ///
    /// `main_admin` is never assignable; `second_admin` is reserved to the
    /// main administrator.
    ///
    /// # Examples
    /// ```
    /// use docketsync::domain::Role;
    ///
    /// assert!(Role::MainAdmin.can_assign(Role::SecondAdmin));
    /// assert!(!Role::SecondAdmin.can_assign(Role::SecondAdmin));
    /// assert!(!Role::MainAdmin.can_assign(Role::MainAdmin));
    /// ```
    pub fn can_assign(self, target: Role) -> bool {
        match (self, target) {
            (_, Self::MainAdmin) => false,
            (Self::MainAdmin, _) => true,
            (Self::SecondAdmin, Self::Manager | Self::Staff) => true,
            (Self::SecondAdmin, Self::SecondAdmin) => false,
            (Self::Manager | Self::Staff, _) => false,
        }
    }
}

define_text_enum! {
    /// Named feature area gated by role-based visibility.
    pub enum ModuleId ("module") {
        Dashboard => "dashboard",
        Manifest => "manifest",
        Connotes => "connotes",
        Tracking => "tracking",
        Finance => "finance",
        Users => "users",
        Settings => "settings",
    }
}

impl ModuleId {
    /// Navigation label.
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Manifest => "Manifest",
            Self::Connotes => "Connotes",
            Self::Tracking => "Tracking",
            Self::Finance => "Finance",
            Self::Users => "Users",
            Self::Settings => "Settings",
        }
    }

    /// Client route the module's navigation entry points at.
    pub fn route(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Manifest => "/manifest",
            Self::Connotes => "/connotes",
            Self::Tracking => "/tracking",
            Self::Finance => "/finance",
            Self::Users => "/users",
            Self::Settings => "/settings",
        }
    }
}
