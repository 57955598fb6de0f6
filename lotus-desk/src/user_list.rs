//! User management controller
//!
//! One controller drives both the staff list and the customer list; the
//! scope picks the endpoint and which columns exist. Search is
//! debounced and resets pagination, create/edit share one form, and the
//! submit button is guarded by a single loading flag.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use shared::models::{CustomerType, User, UserCreate, UserRole, UserUpdate};
use validator::ValidateEmail;

use lotus_client::api::{UserAdminApi, UserQuery};

use crate::debounce::Debouncer;

/// Quiet period after the last keystroke before the search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserScope {
    Staff,
    Customer,
}

impl UserScope {
    /// Tier filter and spend columns only exist for customers.
    pub fn has_customer_columns(self) -> bool {
        self == UserScope::Customer
    }

    fn noun(self) -> &'static str {
        match self {
            UserScope::Staff => "staff member",
            UserScope::Customer => "customer",
        }
    }
}

/// Shared create/edit form. `password` is required on create; left
/// blank on edit it means "unchanged" and is omitted from the payload.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    pub id_card: String,
    pub address: String,
    pub is_active: bool,
    pub customer_type: Option<CustomerType>,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            password: String::new(),
            full_name: user.full_name.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            id_card: user.id_card.clone().unwrap_or_default(),
            address: user.address.clone().unwrap_or_default(),
            is_active: user.is_active,
            customer_type: user.customer_type,
        }
    }

    pub fn validate(&self, require_password: bool) -> BTreeMap<&'static str, String> {
        let mut errors = BTreeMap::new();
        if self.username.trim().is_empty() {
            errors.insert("username", "Username is required".to_string());
        }
        if !self.email.validate_email() {
            errors.insert("email", "Enter a valid email address".to_string());
        }
        if require_password && self.password.trim().is_empty() {
            errors.insert("password", "Password is required".to_string());
        }
        if self.full_name.trim().is_empty() {
            errors.insert("full_name", "Full name is required".to_string());
        }
        let phone = self.phone.trim();
        if !phone.is_empty() && !(is_digits(phone) && (9..=11).contains(&phone.len())) {
            errors.insert("phone", "Phone must be 9 to 11 digits".to_string());
        }
        let id_card = self.id_card.trim();
        if !id_card.is_empty() && !(is_digits(id_card) && matches!(id_card.len(), 9 | 12)) {
            errors.insert("id_card", "ID card must be 9 or 12 digits".to_string());
        }
        errors
    }

    fn opt(value: &str) -> Option<String> {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn to_create(&self, role: UserRole) -> UserCreate {
        UserCreate {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_string(),
            phone: Self::opt(&self.phone),
            id_card: Self::opt(&self.id_card),
            address: Self::opt(&self.address),
            role,
            is_active: self.is_active,
            customer_type: self.customer_type,
        }
    }

    fn to_update(&self, role: UserRole) -> UserUpdate {
        UserUpdate {
            email: self.email.trim().to_string(),
            password: Self::opt(&self.password),
            full_name: self.full_name.trim().to_string(),
            phone: Self::opt(&self.phone),
            id_card: Self::opt(&self.id_card),
            address: Self::opt(&self.address),
            role,
            is_active: self.is_active,
            customer_type: self.customer_type,
        }
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug)]
pub struct UserListController {
    pub scope: UserScope,
    pub users: Vec<User>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    /// Live text-box contents; applied to queries only after the
    /// debounce fires.
    pub search_input: String,
    search_applied: Option<String>,
    pub customer_type: Option<CustomerType>,
    debounce: Debouncer,
    pub loading: bool,
    pub submit_loading: bool,
    pub form_errors: BTreeMap<&'static str, String>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl UserListController {
    pub fn new(scope: UserScope) -> Self {
        Self {
            scope,
            users: Vec::new(),
            total: 0,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_input: String::new(),
            search_applied: None,
            customer_type: None,
            debounce: Debouncer::new(SEARCH_DEBOUNCE),
            loading: false,
            submit_loading: false,
            form_errors: BTreeMap::new(),
            error: None,
            notice: None,
        }
    }

    fn role(&self) -> UserRole {
        match self.scope {
            UserScope::Staff => UserRole::Staff,
            UserScope::Customer => UserRole::Customer,
        }
    }

    fn query(&self) -> UserQuery {
        let mut query = UserQuery::new(self.page, self.page_size);
        query.search = self.search_applied.clone();
        query.customer_type = self.customer_type;
        query
    }

    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search_input = text.into();
        self.debounce.touch(now);
    }

    /// Drive the debounce from the UI loop. Returns true when the
    /// pending search just fired; the caller refreshes then. Firing
    /// applies the term and resets to page 1.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        if !self.debounce.fire(now) {
            return false;
        }
        let term = self.search_input.trim();
        self.search_applied = (!term.is_empty()).then(|| term.to_string());
        self.page = 1;
        true
    }

    /// Tier filter applies immediately, no debounce.
    pub async fn set_customer_type<A: UserAdminApi>(
        &mut self,
        api: &A,
        tier: Option<CustomerType>,
    ) {
        self.customer_type = tier;
        self.page = 1;
        self.refresh(api).await;
    }

    pub async fn set_page<A: UserAdminApi>(&mut self, api: &A, page: u32) {
        self.page = page.max(1);
        self.refresh(api).await;
    }

    pub async fn refresh<A: UserAdminApi>(&mut self, api: &A) {
        self.loading = true;
        let query = self.query();
        let result = match self.scope {
            UserScope::Staff => api.list_staff(&query).await,
            UserScope::Customer => api.list_customers(&query).await,
        };
        self.loading = false;
        match result {
            Ok(list) => {
                self.total = list.total();
                self.users = list.into_items();
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not load users"));
            }
        }
    }

    /// Create a user in this scope. Staff go through the admin-only
    /// endpoint. Returns true on success; the caller refreshes.
    pub async fn create<A: UserAdminApi>(&mut self, api: &A, form: &UserForm) -> bool {
        if self.submit_loading {
            return false;
        }
        self.form_errors = form.validate(true);
        if !self.form_errors.is_empty() {
            return false;
        }
        let req = form.to_create(self.role());
        self.submit_loading = true;
        let result = match self.scope {
            UserScope::Staff => api.create_staff(&req).await,
            UserScope::Customer => api.create_user(&req).await,
        };
        self.submit_loading = false;
        match result {
            Ok(user) => {
                self.notice = Some(format!("Created {} {}", self.scope.noun(), user.username));
                self.error = None;
                true
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not create the user"));
                false
            }
        }
    }

    pub async fn update<A: UserAdminApi>(&mut self, api: &A, id: i64, form: &UserForm) -> bool {
        if self.submit_loading {
            return false;
        }
        self.form_errors = form.validate(false);
        if !self.form_errors.is_empty() {
            return false;
        }
        let req = form.to_update(self.role());
        self.submit_loading = true;
        let result = api.update_user(id, &req).await;
        self.submit_loading = false;
        match result {
            Ok(user) => {
                if let Some(row) = self.users.iter_mut().find(|u| u.id == id) {
                    *row = user;
                }
                self.notice = Some(format!("Updated {}", self.scope.noun()));
                self.error = None;
                true
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not update the user"));
                false
            }
        }
    }

    /// Flip activation. The server decides the resulting state and the
    /// confirmation message, which is surfaced verbatim.
    pub async fn toggle_active<A: UserAdminApi>(&mut self, api: &A, id: i64) -> bool {
        if self.submit_loading {
            return false;
        }
        self.submit_loading = true;
        let result = api.toggle_active(id).await;
        self.submit_loading = false;
        match result {
            Ok(response) => {
                if let Some(row) = self.users.iter_mut().find(|u| u.id == id) {
                    match response.is_active {
                        Some(active) => row.is_active = active,
                        None => row.is_active = !row.is_active,
                    }
                }
                self.notice = response
                    .message
                    .or_else(|| Some("User status updated".to_string()));
                self.error = None;
                true
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not update the user status"));
                false
            }
        }
    }
}
