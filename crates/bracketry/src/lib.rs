//! Bracketry - vertical layout of scrollable tournament brackets.
//!
//! A bracket is drawn as columns of rounds that scroll horizontally. This
//! crate computes, for a given first visible column, the vertical offset of
//! every pair (match) and the height of every round. Rendering is left to
//! the caller.

pub mod config;
pub mod layout;

mod error;

pub use bracketry_core::{TreeError, document, identifier, tree};

pub use error::BracketError;

use std::collections::HashMap;

use log::{debug, info};

use bracketry_core::{
    document::TreeDocument,
    tree::{Round, TournamentTree},
};

use config::AppConfig;
use layout::PairOffsets;

/// Entry point bundling a configuration with the layout operations.
///
/// # Examples
///
/// ```rust
/// use bracketry::{BracketBuilder, config::AppConfig, document::TreeDocument};
///
/// let builder = BracketBuilder::new(AppConfig::default());
/// let tree = builder
///     .build_tree(TreeDocument::default())
///     .expect("Failed to build tree");
///
/// let offsets = builder.offsets(&tree, 0);
/// assert!(offsets.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct BracketBuilder {
    config: AppConfig,
}

impl BracketBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Turn a bracket description into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::Tree`] for duplicate pairs, unknown layers or
    /// broken references.
    pub fn build_tree(&self, document: TreeDocument) -> Result<TournamentTree, BracketError> {
        info!("Building tournament tree");
        let tree = document.into_tree()?;
        debug!(pairs = tree.len(), columns = tree.columns().len(); "Tree built successfully");
        Ok(tree)
    }

    /// Compute pair offsets using the layer heights recorded in the tree.
    pub fn offsets(&self, tree: &TournamentTree, current_slide_index: usize) -> PairOffsets {
        self.offsets_with_heights(tree, current_slide_index, &tree.layer_heights())
    }

    /// Compute pair offsets with an explicit layer height table.
    pub fn offsets_with_heights(
        &self,
        tree: &TournamentTree,
        current_slide_index: usize,
        layer_heights: &HashMap<usize, f32>,
    ) -> PairOffsets {
        layout::compute_offsets(
            current_slide_index,
            tree,
            layer_heights,
            self.config.layout(),
        )
    }

    /// Height of a round including its title area.
    pub fn round_height(&self, tree: &TournamentTree, round: Option<&Round>) -> f32 {
        layout::round_height(tree, round, self.config.layout())
    }
}
