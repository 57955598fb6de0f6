//! Role-based navigation

use shared::models::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: &'static str,
}

const fn item(label: &'static str, route: &'static str) -> MenuItem {
    MenuItem { label, route }
}

const CUSTOMER_MENU: &[MenuItem] = &[
    item("Home", "/"),
    item("Rooms", "/rooms"),
    item("My Bookings", "/my-bookings"),
    item("Payments", "/payments"),
    item("Profile", "/profile"),
];

const STAFF_MENU: &[MenuItem] = &[
    item("Dashboard", "/dashboard"),
    item("Bookings", "/staff/bookings"),
    item("Rooms", "/staff/rooms"),
    item("Customers", "/staff/customers"),
    item("Invoices", "/staff/invoices"),
    item("Profile", "/profile"),
];

const ADMIN_MENU: &[MenuItem] = &[
    item("Dashboard", "/dashboard"),
    item("Bookings", "/staff/bookings"),
    item("Rooms", "/staff/rooms"),
    item("Customers", "/staff/customers"),
    item("Invoices", "/staff/invoices"),
    item("Staff", "/admin/staff"),
    item("Analytics", "/admin/analytics"),
    item("Profile", "/profile"),
];

const OWNER_MENU: &[MenuItem] = &[
    item("Dashboard", "/dashboard"),
    item("Analytics", "/admin/analytics"),
    item("Staff", "/admin/staff"),
    item("Profile", "/profile"),
];

/// Navigation entries for a role. Exhaustive on purpose: a new role
/// fails to compile until it gets a menu.
pub fn menu_for(role: UserRole) -> &'static [MenuItem] {
    match role {
        UserRole::Customer => CUSTOMER_MENU,
        UserRole::Staff => STAFF_MENU,
        UserRole::Admin => ADMIN_MENU,
        UserRole::Owner => OWNER_MENU,
    }
}
