//! Role Column Configuration

use serde::{Deserialize, Serialize};

/// Configuration for one serialized role column.
///
/// Identifies where the role list lives on the host entity and which
/// reserved character delimits roles in the stored representation.
/// A `marker` of `None` disables marker wrapping entirely; stores then
/// need native containment support to answer role queries safely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleColumn {
    /// Column/field identifier on the host entity
    pub column: String,

    /// Reserved delimiter character. Must not appear in role names.
    pub marker: Option<char>,

    /// Roles installed when an empty list is first populated
    pub default_roles: Vec<String>,
}

impl Default for RoleColumn {
    fn default() -> Self {
        Self {
            column: "roles".to_string(),
            marker: Some('!'),
            default_roles: Vec::new(),
        }
    }
}

impl RoleColumn {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ..Default::default()
        }
    }

    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn without_marker(mut self) -> Self {
        self.marker = None;
        self
    }

    pub fn with_default_roles(
        mut self,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.default_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `role` contains the reserved marker character.
    ///
    /// Such names are rejected on the persisted add path: a marker inside
    /// a role name would corrupt containment queries.
    pub fn contains_marker(&self, role: &str) -> bool {
        match self.marker {
            Some(marker) => role.contains(marker),
            None => false,
        }
    }
}
