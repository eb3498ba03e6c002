//! Store Contract
//!
//! The persistence collaborator the role set delegates to. Validation,
//! durability and transaction semantics belong to the implementation.

pub mod memory;

pub use memory::{MemoryStore, StoredRecord};

use crate::config::RoleColumn;
use crate::error::Result;
use crate::roleset::{RoleQuery, RoleSet};

/// Persistence contract for records carrying a serialized role column.
///
/// Implementations must drive the role lifecycle at every storage
/// boundary crossing, synchronously and in this order:
///
/// - `create`: invoke [`RoleSet::make_default_roles`] before validating
///   the record's first write, so a new record always carries an
///   initialized list;
/// - every write: invoke [`RoleSet::add_role_markers`] immediately before
///   writing, and [`RoleSet::strip_role_markers`] immediately after the
///   write completes or rolls back;
/// - every read: invoke [`RoleSet::strip_role_markers`] on the loaded
///   list before handing it back.
///
/// The role set holds bare names in memory at all times under this
/// contract; only stored column text ever contains wrapped tokens.
pub trait Store {
    /// Validate and durably write a new record. Returns its id.
    fn create(&mut self, roles: &mut RoleSet) -> Result<String>;

    /// Validate and durably overwrite the role column of record `id`.
    fn save(&mut self, id: &str, roles: &mut RoleSet) -> Result<()>;

    /// Read record `id` and rebuild its role set under `config`.
    fn load(&self, id: &str, config: RoleColumn) -> Result<RoleSet>;

    /// Ids of records whose role column satisfies `query`.
    fn find_with_role(&self, query: &RoleQuery) -> Result<Vec<String>>;
}
