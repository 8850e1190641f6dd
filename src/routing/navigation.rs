use crate::models::Role;

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

const fn item(name: &'static str, href: &'static str) -> NavItem {
    NavItem { name, href }
}

const TENANT_MENU: &[NavItem] = &[
    item("Dashboard", "/dashboard"),
    item("My Payments", "/finance"),
    item("Available Units", "/available-units"),
    item("Maintenance", "/maintenance"),
    item("Consultation", "/consultation"),
];

const STAFF_MENU: &[NavItem] = &[
    item("Dashboard", "/dashboard"),
    item("Properties", "/properties"),
    item("Tenants", "/tenants"),
    item("Finance", "/finance"),
    item("Maintenance", "/maintenance"),
];

/// Sidebar entries for a signed-in user. Tenants get their own menu;
/// every other role shares the management menu.
pub fn navigation_for(role: &Role) -> &'static [NavItem] {
    match role {
        Role::Tenant => TENANT_MENU,
        _ => STAFF_MENU,
    }
}
