//! Serializable description of a tournament tree.
//!
//! The document mirrors the rendering structure (columns of rounds of pairs)
//! and is turned into a [`TournamentTree`] through [`TreeBuilder`], so the
//! same referential checks apply.
//!
//! # Example
//!
//! ```
//! use bracketry_core::document::{ColumnDocument, LayerDocument, PairDocument, RoundDocument, TreeDocument};
//!
//! let document = TreeDocument::new(
//!     vec![LayerDocument::new(0, Some(120.0))],
//!     vec![ColumnDocument::new(vec![RoundDocument::new(
//!         0,
//!         0,
//!         vec![PairDocument::new("final")],
//!     )])],
//! );
//!
//! let tree = document.into_tree().unwrap();
//! assert_eq!(tree.len(), 1);
//! ```

use serde::Deserialize;

use crate::{
    error::TreeError,
    identifier::Id,
    tree::{PairDef, PairValue, TournamentTree, TreeBuilder},
};

/// Root of a bracket description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeDocument {
    #[serde(default)]
    layers: Vec<LayerDocument>,

    #[serde(default)]
    columns: Vec<ColumnDocument>,
}

impl TreeDocument {
    pub fn new(layers: Vec<LayerDocument>, columns: Vec<ColumnDocument>) -> Self {
        Self { layers, columns }
    }

    /// Builds the tree described by this document.
    ///
    /// A document without any layer gets an implicit base layer of unknown
    /// height.
    ///
    /// # Errors
    ///
    /// Returns a [`TreeError`] for duplicate or dangling definitions.
    pub fn into_tree(self) -> Result<TournamentTree, TreeError> {
        let mut builder = TreeBuilder::new();

        if self.layers.is_empty() {
            builder.add_layer(0, None)?;
        }
        for layer in self.layers {
            builder.add_layer(layer.position, layer.height)?;
        }

        for column_doc in self.columns {
            let column = builder.add_column();
            for round_doc in column_doc.rounds {
                let round = if round_doc.virtualized {
                    builder.add_virtualized_round(column, round_doc.position, round_doc.layer)?
                } else {
                    builder.add_round(column, round_doc.position, round_doc.layer)?
                };

                for pair_doc in round_doc.pairs {
                    builder.add_pair(round, pair_doc.into_def())?;
                }
            }
        }

        builder.build()
    }
}

/// A layer entry: its position and, optionally, its pixel height.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerDocument {
    position: usize,

    #[serde(default)]
    height: Option<f32>,
}

impl LayerDocument {
    pub fn new(position: usize, height: Option<f32>) -> Self {
        Self { position, height }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnDocument {
    #[serde(default)]
    rounds: Vec<RoundDocument>,
}

impl ColumnDocument {
    pub fn new(rounds: Vec<RoundDocument>) -> Self {
        Self { rounds }
    }
}

/// A round entry. `virtualized` rounds keep their pairs in the tree but
/// leave an empty slot in their column.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundDocument {
    position: usize,

    #[serde(default)]
    layer: usize,

    #[serde(default)]
    virtualized: bool,

    #[serde(default)]
    pairs: Vec<PairDocument>,
}

impl RoundDocument {
    pub fn new(position: usize, layer: usize, pairs: Vec<PairDocument>) -> Self {
        Self {
            position,
            layer,
            virtualized: false,
            pairs,
        }
    }

    pub fn virtualized(mut self) -> Self {
        self.virtualized = true;
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairDocument {
    id: Id,

    #[serde(default)]
    input: Vec<Id>,

    #[serde(default)]
    output: Option<Id>,

    #[serde(default)]
    home: Option<u32>,

    #[serde(default)]
    away: Option<u32>,

    #[serde(default)]
    input_other_layout: bool,

    #[serde(default)]
    merging_layers: bool,
}

impl PairDocument {
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            input: Vec::new(),
            output: None,
            home: None,
            away: None,
            input_other_layout: false,
            merging_layers: false,
        }
    }

    fn into_def(self) -> PairDef {
        let mut def = PairDef::new(self.id)
            .with_inputs(self.input)
            .with_input_other_layout(self.input_other_layout)
            .with_merging_layers(self.merging_layers);

        if let Some(output) = self.output {
            def = def.with_output(output);
        }
        if self.home.is_some() || self.away.is_some() {
            def = def.with_value(PairValue::new(self.home, self.away));
        }

        def
    }
}
