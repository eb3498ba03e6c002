//! Rolemark
//!
//! Role-list column management for persisted entities:
//! - An ordered, duplicate-free list of role names attached to one record
//! - Marker wrapping of the serialized column so containment queries
//!   cannot false-positive on partial role names
//! - A declarative `with_role` query builder handed to the store
//! - A store contract that drives the wrap/strip lifecycle at every
//!   storage boundary crossing
//!
//! ## Module Organization (Aggregate-based)
//!
//! - `roleset` - The role collection entity and its query builder
//! - `store` - Persistence contract plus an in-memory reference store
//! - `config` / `error` - Shared configuration and error types

pub mod config;
pub mod error;
pub mod roleset;
pub mod store;

// Re-export common types
pub use config::RoleColumn;
pub use error::{Result, RoleError};

// Re-export main entity types for convenience
pub use roleset::entity::RoleSet;
pub use roleset::query::RoleQuery;

// Re-export stores
pub use store::{MemoryStore, Store};
