//! Role Containment Queries
//!
//! Declarative filters over the serialized role column. A query is built
//! by the role set and handed to a store; the store either renders it as
//! a raw LIKE predicate or evaluates it directly against column text.

use crate::config::RoleColumn;

/// Filter matching records whose role column contains one role.
///
/// With a marker configured, the filter searches for the wrapped token
/// `<marker><role><marker>`. Wrapping on both sides is a correctness
/// requirement: a bare substring search for `admin` would also match a
/// stored `administrator`.
///
/// Without a marker the filter degrades to an exact-element containment
/// test that only a store with a structured view of the column (a native
/// array-contains operator, or parsing the serialized text) can answer;
/// no LIKE pattern is rendered in that mode.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleQuery {
    table: String,
    column: String,
    marker: Option<char>,
    role: String,
}

impl RoleQuery {
    pub fn new(table: impl Into<String>, config: &RoleColumn, role: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: config.column.clone(),
            marker: config.marker,
            role: role.into(),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// The marker-wrapped token searched for in serialized column text,
    /// or `None` when marker wrapping is disabled.
    pub fn token(&self) -> Option<String> {
        self.marker
            .map(|marker| format!("{marker}{}{marker}", self.role))
    }

    /// Render as a raw SQL pattern predicate:
    /// `<table>.<column> LIKE "%<marker><role><marker>%"`.
    ///
    /// Returns `None` when marker wrapping is disabled: an unwrapped LIKE
    /// would spuriously match partial role names, so markerless queries
    /// must go through a structured containment operator instead.
    pub fn to_like_sql(&self) -> Option<String> {
        self.token()
            .map(|token| format!("{}.{} LIKE \"%{}%\"", self.table, self.column, token))
    }

    /// Evaluate the filter against one serialized column blob.
    ///
    /// The marker path is a fixed substring test, exactly what the LIKE
    /// predicate expresses. The markerless path parses the blob as a
    /// string array and tests exact membership.
    pub fn matches(&self, blob: &str) -> bool {
        match self.token() {
            Some(token) => blob.contains(&token),
            None => serde_json::from_str::<Vec<String>>(blob)
                .map(|roles| roles.iter().any(|r| r == &self.role))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(role: &str) -> RoleQuery {
        RoleQuery::new("users", &RoleColumn::default(), role)
    }

    #[test]
    fn test_like_sql_rendering() {
        let sql = query("admin").to_like_sql().unwrap();
        assert_eq!(sql, "users.roles LIKE \"%!admin!%\"");
    }

    #[test]
    fn test_wrapped_token_prevents_substring_collision() {
        let q = query("admin");
        assert!(q.matches(r#"["!admin!"]"#));
        assert!(!q.matches(r#"["!administrator!"]"#));
        assert!(q.matches(r#"["!editor!","!admin!"]"#));
    }

    #[test]
    fn test_markerless_query_uses_exact_containment() {
        let config = RoleColumn::default().without_marker();
        let q = RoleQuery::new("users", &config, "admin");
        assert!(q.to_like_sql().is_none());
        assert!(q.matches(r#"["admin","editor"]"#));
        assert!(!q.matches(r#"["administrator"]"#));
    }

    #[test]
    fn test_markerless_query_rejects_unparseable_blob() {
        let config = RoleColumn::default().without_marker();
        let q = RoleQuery::new("users", &config, "admin");
        assert!(!q.matches("not json"));
    }
}
