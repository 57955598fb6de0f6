//! Query-string building for list endpoints

use shared::models::CustomerType;

/// Accumulates `key=value` pairs and renders `path?query`.
#[derive(Debug, Default)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn append_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.append(key, v),
            None => self,
        }
    }

    pub fn build(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let query: Vec<String> = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, percent_encode(v)))
            .collect();
        format!("{}?{}", path, query.join("&"))
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Server-side pagination + free-text search
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
}

impl PageQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        if !search.trim().is_empty() {
            self.search = Some(search);
        }
        self
    }

    pub fn to_path(&self, base: &str) -> String {
        QueryString::new()
            .append("page", self.page)
            .append("page_size", self.page_size)
            .append_opt("search", self.search.as_deref())
            .build(base)
    }
}

/// User-list query: pagination + search + optional tier filter
#[derive(Debug, Clone)]
pub struct UserQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub customer_type: Option<CustomerType>,
}

impl UserQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            search: None,
            customer_type: None,
        }
    }

    pub fn to_path(&self, base: &str) -> String {
        QueryString::new()
            .append("page", self.page)
            .append("page_size", self.page_size)
            .append_opt("search", self.search.as_deref())
            .append_opt("customer_type", self.customer_type.map(|t| t.as_wire()))
            .build(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_leaves_path_untouched() {
        assert_eq!(QueryString::new().build("users/"), "users/");
    }

    #[test]
    fn search_terms_are_encoded() {
        let path = QueryString::new()
            .append("search", "room 101 & spa")
            .build("rooms/");
        assert_eq!(path, "rooms/?search=room%20101%20%26%20spa");
    }

    #[test]
    fn user_query_includes_tier_wire_form() {
        let mut query = UserQuery::new(2, 10);
        query.customer_type = Some(CustomerType::SuperVip);
        assert_eq!(
            query.to_path("users/customers_list/"),
            "users/customers_list/?page=2&page_size=10&customer_type=SUPER_VIP"
        );
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = PageQuery::new(1, 20).with_search("   ");
        assert!(query.search.is_none());
    }
}
