//! Bracketry Core Types
//!
//! This crate provides the foundational types for tournament bracket trees:
//!
//! - **Identifiers**: String-interned pair identities ([`identifier::Id`])
//! - **Tree**: Arena model of layers, rounds and pairs ([`tree`] module)
//! - **Document**: Serializable bracket description ([`document`] module)
//! - **Errors**: Tree assembly errors ([`TreeError`])

pub mod document;
pub mod identifier;
pub mod tree;

mod error;

pub use error::TreeError;
