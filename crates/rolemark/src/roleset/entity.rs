//! Role Set Entity
//!
//! Ordered role collection attached to one persisted record, plus the
//! lifecycle transforms that mediate its storage representation.

use tracing::warn;

use crate::config::RoleColumn;
use crate::error::Result;
use crate::roleset::query::RoleQuery;
use crate::store::Store;

/// An entity's role collection.
///
/// Holds bare role names while in application memory. The serialized form
/// written to a store wraps every name in the configured marker character;
/// stores drive that transform through [`RoleSet::add_role_markers`] and
/// [`RoleSet::strip_role_markers`] at each storage boundary crossing.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSet {
    config: RoleColumn,
    roles: Vec<String>,
}

impl RoleSet {
    pub fn new(config: RoleColumn) -> Self {
        Self {
            config,
            roles: Vec::new(),
        }
    }

    /// Rebuild a role set from stored column values. Used by stores after
    /// a read; callers are expected to strip markers afterward.
    pub fn from_roles(config: RoleColumn, roles: Vec<String>) -> Self {
        Self { config, roles }
    }

    pub fn config(&self) -> &RoleColumn {
        &self.config
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Exact, case-sensitive membership test.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Append `role` unless already present.
    ///
    /// An empty list is populated with the configured default roles first.
    /// Returns `false` without mutation when the role is already held.
    /// Does not persist.
    pub fn add_role(&mut self, role: impl Into<String>) -> bool {
        let role = role.into();
        if self.roles.is_empty() {
            self.make_default_roles();
        }
        if self.has_role(&role) {
            return false;
        }
        self.roles.push(role);
        true
    }

    /// Remove the first exact match of `role`. Returns whether a removal
    /// occurred. Does not persist.
    pub fn remove_role(&mut self, role: &str) -> bool {
        match self.roles.iter().position(|r| r == role) {
            Some(index) => {
                self.roles.remove(index);
                true
            }
            None => false,
        }
    }

    /// Reset the list to empty. Does not persist.
    pub fn clear_roles(&mut self) {
        self.roles.clear();
    }

    /// Add `role` and synchronously save the record through `store`.
    ///
    /// Rejects the role outright (no mutation, no persistence) when marker
    /// wrapping is enabled and the name contains the marker character;
    /// accepting it would corrupt containment queries for every role that
    /// shares a prefix or suffix with it.
    ///
    /// The returned boolean reports whether the role was newly added; the
    /// save is attempted either way, and store failures propagate as
    /// [`crate::RoleError`].
    pub fn add_role_and_save(
        &mut self,
        store: &mut dyn Store,
        id: &str,
        role: &str,
    ) -> Result<bool> {
        if self.config.contains_marker(role) {
            warn!(role, "rejected role name containing the reserved marker");
            return Ok(false);
        }
        let added = self.add_role(role);
        store.save(id, self)?;
        Ok(added)
    }

    /// Remove `role` and synchronously save the record through `store`.
    ///
    /// Returns whether a removal occurred; store failures propagate.
    pub fn remove_role_and_save(
        &mut self,
        store: &mut dyn Store,
        id: &str,
        role: &str,
    ) -> Result<bool> {
        let removed = self.remove_role(role);
        store.save(id, self)?;
        Ok(removed)
    }

    /// Create-validation lifecycle hook.
    ///
    /// Stores invoke this before validating a record's first write so every
    /// created record carries an initialized (possibly empty) list rather
    /// than an absent value.
    pub fn make_default_roles(&mut self) {
        if self.roles.is_empty() {
            self.roles = self.config.default_roles.clone();
        }
    }

    /// Pre-write lifecycle hook: wrap every role as `<marker><role><marker>`.
    pub fn add_role_markers(&mut self) {
        if let Some(marker) = self.config.marker {
            for role in &mut self.roles {
                *role = format!("{marker}{role}{marker}");
            }
        }
    }

    /// Post-write / post-load / post-rollback lifecycle hook: remove all
    /// marker characters, restoring bare names. Idempotent and safe on
    /// already-bare data.
    pub fn strip_role_markers(&mut self) {
        if let Some(marker) = self.config.marker {
            for role in &mut self.roles {
                role.retain(|c| c != marker);
            }
        }
    }

    /// Build a containment query for records holding `role`.
    ///
    /// The query is a declarative filter handed to the store; it is not
    /// executed here.
    pub fn with_role(&self, table: &str, role: &str) -> RoleQuery {
        RoleQuery::new(table, &self.config, role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role_set() -> RoleSet {
        RoleSet::new(RoleColumn::default())
    }

    #[test]
    fn test_add_and_has_role() {
        let mut roles = role_set();
        assert!(roles.add_role("admin"));
        assert!(roles.has_role("admin"));
        assert!(!roles.has_role("user"));
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let mut roles = role_set();
        roles.add_role("Admin");
        assert!(!roles.has_role("admin"));
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let mut roles = role_set();
        assert!(roles.add_role("admin"));
        assert!(!roles.add_role("admin"));
        assert_eq!(roles.roles(), ["admin".to_string()]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut roles = role_set();
        roles.add_role("editor");
        roles.add_role("admin");
        roles.add_role("viewer");
        assert_eq!(
            roles.roles(),
            ["editor".to_string(), "admin".to_string(), "viewer".to_string()]
        );
    }

    #[test]
    fn test_remove_role() {
        let mut roles = role_set();
        roles.add_role("admin");
        assert!(roles.remove_role("admin"));
        assert!(!roles.has_role("admin"));
        assert!(!roles.remove_role("admin"));
    }

    #[test]
    fn test_clear_roles() {
        let mut roles = role_set();
        roles.add_role("admin");
        roles.add_role("editor");
        roles.clear_roles();
        assert!(roles.roles().is_empty());
    }

    #[test]
    fn test_default_roles_populated_on_first_add() {
        let config = RoleColumn::default().with_default_roles(["member"]);
        let mut roles = RoleSet::new(config);
        assert!(roles.add_role("admin"));
        assert_eq!(roles.roles(), ["member".to_string(), "admin".to_string()]);
    }

    #[test]
    fn test_add_of_default_role_reports_duplicate() {
        let config = RoleColumn::default().with_default_roles(["member"]);
        let mut roles = RoleSet::new(config);
        assert!(!roles.add_role("member"));
        assert_eq!(roles.roles(), ["member".to_string()]);
    }

    #[test]
    fn test_make_default_roles_only_fills_empty_list() {
        let config = RoleColumn::default().with_default_roles(["member"]);
        let mut roles = RoleSet::new(config);
        roles.add_role("admin");
        roles.remove_role("member");
        roles.make_default_roles();
        assert_eq!(roles.roles(), ["admin".to_string()]);
    }

    #[test]
    fn test_marker_round_trip() {
        let mut roles = role_set();
        roles.add_role("admin");
        roles.add_role("editor");
        let bare = roles.roles().to_vec();

        roles.add_role_markers();
        assert_eq!(
            roles.roles(),
            ["!admin!".to_string(), "!editor!".to_string()]
        );

        roles.strip_role_markers();
        assert_eq!(roles.roles(), bare.as_slice());
    }

    #[test]
    fn test_strip_is_idempotent() {
        let mut roles = role_set();
        roles.add_role("admin");
        roles.add_role_markers();
        roles.strip_role_markers();
        let once = roles.roles().to_vec();
        roles.strip_role_markers();
        assert_eq!(roles.roles(), once.as_slice());
    }

    #[test]
    fn test_markers_disabled_when_unset() {
        let mut roles = RoleSet::new(RoleColumn::default().without_marker());
        roles.add_role("admin");
        roles.add_role_markers();
        assert_eq!(roles.roles(), ["admin".to_string()]);
    }
}
