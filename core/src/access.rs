//! Screen access table and the guard that consults it.
//!
//! Every screen is either public or protected by an allow-list of role tags.
//! The guard never looks at a screen directly; it only reads [`Screen::allowed_roles`].

use tracing::debug;

pub const ADMIN: &str = "admin";
pub const MANAGER: &str = "manager";
pub const EMPLOYEE: &str = "employee";
pub const DELIVERY: &str = "delivery";

const ALL_ROLES: &[&str] = &[ADMIN, MANAGER, EMPLOYEE, DELIVERY];
const ADMIN_MANAGER: &[&str] = &[ADMIN, MANAGER];
const ADMIN_MANAGER_EMPLOYEE: &[&str] = &[ADMIN, MANAGER, EMPLOYEE];
const ADMIN_MANAGER_DELIVERY: &[&str] = &[ADMIN, MANAGER, DELIVERY];
const ADMIN_ONLY: &[&str] = &[ADMIN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Callback,
    ChangePassword,
    Dashboard,
    Orders,
    Customers,
    Employees,
    Roles,
    Products,
    Categories,
    Supplies,
    Reports,
    Delivery,
    Settings,
}

impl Screen {
    pub const ALL: [Screen; 14] = [
        Screen::Login,
        Screen::Callback,
        Screen::ChangePassword,
        Screen::Dashboard,
        Screen::Orders,
        Screen::Customers,
        Screen::Employees,
        Screen::Roles,
        Screen::Products,
        Screen::Categories,
        Screen::Supplies,
        Screen::Reports,
        Screen::Delivery,
        Screen::Settings,
    ];

    /// Where authenticated users land.
    pub const DEFAULT: Screen = Screen::Dashboard;

    pub fn path(self) -> &'static str {
        match self {
            Screen::Login => "/login",
            Screen::Callback => "/callback",
            Screen::ChangePassword => "/change-password",
            Screen::Dashboard => "/dashboard",
            Screen::Orders => "/orders",
            Screen::Customers => "/customers",
            Screen::Employees => "/employees",
            Screen::Roles => "/roles",
            Screen::Products => "/products",
            Screen::Categories => "/categories",
            Screen::Supplies => "/supplies",
            Screen::Reports => "/reports",
            Screen::Delivery => "/delivery",
            Screen::Settings => "/settings",
        }
    }

    pub fn from_path(path: &str) -> Option<Screen> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Self::ALL.into_iter().find(|screen| screen.path() == path)
    }

    /// `None` for public screens.
    pub fn allowed_roles(self) -> Option<&'static [&'static str]> {
        match self {
            Screen::Login | Screen::Callback | Screen::ChangePassword => None,
            Screen::Dashboard | Screen::Orders => Some(ALL_ROLES),
            Screen::Customers => Some(ADMIN_MANAGER_EMPLOYEE),
            Screen::Employees
            | Screen::Roles
            | Screen::Products
            | Screen::Categories
            | Screen::Supplies
            | Screen::Reports => Some(ADMIN_MANAGER),
            Screen::Delivery => Some(ADMIN_MANAGER_DELIVERY),
            Screen::Settings => Some(ADMIN_ONLY),
        }
    }

    pub fn is_public(self) -> bool {
        self.allowed_roles().is_none()
    }

    pub fn allows(self, role: Option<&str>) -> bool {
        match (self.allowed_roles(), role) {
            (None, _) => true,
            (Some(roles), Some(role)) => roles.contains(&role),
            (Some(_), None) => false,
        }
    }
}

/// What the auth provider currently knows about the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub authenticated: bool,
    pub loading: bool,
    pub role: Option<String>,
}

impl AuthState {
    pub fn signed_in(role: &str) -> Self {
        Self {
            authenticated: true,
            loading: false,
            role: Some(role.to_string()),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Render,
    /// Auth state is still loading.
    Wait,
    Redirect(Screen),
    /// Signed in, but the role may not even see the default screen.
    Forbidden,
    NotFound,
}

pub fn guard(screen: Screen, auth: &AuthState) -> Access {
    let access = decide(screen, auth);
    debug!(screen = screen.path(), role = ?auth.role, ?access, "access decision");
    access
}

fn decide(screen: Screen, auth: &AuthState) -> Access {
    match screen {
        Screen::Callback | Screen::ChangePassword => return Access::Render,
        _ if auth.loading => return Access::Wait,
        Screen::Login if auth.authenticated => return Access::Redirect(Screen::DEFAULT),
        Screen::Login => return Access::Render,
        _ => {}
    }

    if !auth.authenticated {
        return Access::Redirect(Screen::Login);
    }

    let role = auth.role.as_deref();
    if screen.allows(role) {
        Access::Render
    } else if screen != Screen::DEFAULT && Screen::DEFAULT.allows(role) {
        Access::Redirect(Screen::DEFAULT)
    } else {
        Access::Forbidden
    }
}

/// Resolve a raw location. `/` goes to the default screen.
pub fn resolve(path: &str, auth: &AuthState) -> Access {
    if path.trim_end_matches('/').is_empty() {
        return Access::Redirect(Screen::DEFAULT);
    }
    match Screen::from_path(path) {
        Some(screen) => guard(screen, auth),
        None => Access::NotFound,
    }
}
