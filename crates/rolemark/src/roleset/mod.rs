//! Role Set Aggregate
//!
//! The role collection entity and its containment query builder.

pub mod entity;
pub mod query;

// Re-export main types
pub use entity::RoleSet;
pub use query::RoleQuery;
