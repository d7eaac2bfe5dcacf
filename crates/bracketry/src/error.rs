//! Error types for Bracketry operations.
//!
//! This module provides the main error type [`BracketError`]. Layout itself
//! never fails; errors come from assembling trees and loading inputs.

use std::io;

use thiserror::Error;

use bracketry_core::TreeError;

/// The main error type for Bracketry operations.
#[derive(Debug, Error)]
pub enum BracketError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document error: {0}")]
    Document(String),
}
