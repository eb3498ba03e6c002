//! In-Memory Store
//!
//! Reference [`Store`] implementation. Serializes the role column to a
//! JSON text blob and answers containment queries against that blob, the
//! same shape a LIKE predicate sees on a SQL engine.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::RoleColumn;
use crate::error::{Result, RoleError};
use crate::roleset::{RoleQuery, RoleSet};
use crate::store::Store;

/// One stored record: the serialized role column plus audit fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,

    /// Serialized role column text (JSON array of wrapped role tokens)
    pub column: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// In-memory store with a configurable role-count validation limit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, StoredRecord>,
    max_roles: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes whose role list exceeds `limit` entries.
    pub fn with_max_roles(mut self, limit: usize) -> Self {
        self.max_roles = Some(limit);
        self
    }

    pub fn record(&self, id: &str) -> Option<&StoredRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn validate(&self, roles: &RoleSet) -> Result<()> {
        if let Some(limit) = self.max_roles {
            if roles.roles().len() > limit {
                return Err(RoleError::validation(format!(
                    "role list exceeds limit of {limit}"
                )));
            }
        }
        Ok(())
    }

    /// Wrap and serialize the column. On success the list is left wrapped;
    /// the caller strips it once the write has completed or rolled back.
    fn encode_column(roles: &mut RoleSet) -> Result<String> {
        roles.add_role_markers();
        match serde_json::to_string(roles.roles()) {
            Ok(blob) => Ok(blob),
            Err(err) => {
                roles.strip_role_markers();
                Err(err.into())
            }
        }
    }
}

impl Store for MemoryStore {
    fn create(&mut self, roles: &mut RoleSet) -> Result<String> {
        roles.make_default_roles();
        self.validate(roles)?;

        let column = Self::encode_column(roles)?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        self.records.insert(
            id.clone(),
            StoredRecord {
                id: id.clone(),
                column,
                created_at: now,
                updated_at: now,
            },
        );
        roles.strip_role_markers();

        info!(id = %id, "created record with role column");
        Ok(id)
    }

    fn save(&mut self, id: &str, roles: &mut RoleSet) -> Result<()> {
        self.validate(roles)?;

        let column = Self::encode_column(roles)?;
        match self.records.get_mut(id) {
            Some(record) => {
                record.column = column;
                record.updated_at = Utc::now();
                roles.strip_role_markers();
                debug!(id, "saved role column");
                Ok(())
            }
            None => {
                // Failed write: roll the in-memory list back to bare names.
                roles.strip_role_markers();
                Err(RoleError::not_found(id))
            }
        }
    }

    fn load(&self, id: &str, config: RoleColumn) -> Result<RoleSet> {
        let record = self
            .records
            .get(id)
            .ok_or_else(|| RoleError::not_found(id))?;
        let stored: Vec<String> = serde_json::from_str(&record.column)?;

        let mut roles = RoleSet::from_roles(config, stored);
        roles.strip_role_markers();
        debug!(id, count = roles.roles().len(), "loaded role column");
        Ok(roles)
    }

    fn find_with_role(&self, query: &RoleQuery) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self
            .records
            .values()
            .filter(|record| query.matches(&record.column))
            .map(|record| record.id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }
}
