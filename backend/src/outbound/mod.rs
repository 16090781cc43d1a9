//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: the flat CSV user table
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod persistence;
