//! Error types for building tournament trees.

use thiserror::Error;

use crate::identifier::Id;

/// Errors raised while assembling a [`TournamentTree`](crate::tree::TournamentTree).
///
/// A built tree is referentially sound, so these errors never surface from
/// the layout engine itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    #[error("pair `{0}` is defined more than once")]
    DuplicatePair(Id),

    #[error("broken tree reference: pair `{pair}` links to unknown pair `{reference}`")]
    BrokenReference { pair: Id, reference: Id },

    #[error("layer at position {0} is defined more than once")]
    DuplicateLayer(usize),

    #[error("round refers to unknown layer at position {0}")]
    UnknownLayer(usize),

    #[error("unknown round index {0}")]
    UnknownRound(usize),

    #[error("unknown column index {0}")]
    UnknownColumn(usize),
}
