//! Arena model of a tournament bracket.
//!
//! A bracket is a set of layers (sub-brackets that are merged later on),
//! rounds (column slices of matches sharing a layer and depth) and pairs
//! (single matches). Rendering groups rounds into scrollable columns.
//!
//! All cross references are identity lookups into the [`TournamentTree`]:
//!
//! - a [`Pair`] knows its round and layer through [`RoundId`] / [`LayerId`]
//! - a [`Round`] lists its pairs by [`Id`] and knows its layer by [`LayerId`]
//! - `input` / `output` links between pairs are [`Id`]s resolved through
//!   [`TournamentTree::pair`]
//!
//! Trees are assembled with [`TreeBuilder`], which rejects dangling links.
//!
//! # Example
//!
//! ```
//! use bracketry_core::tree::{PairDef, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! builder.add_layer(0, Some(240.0)).unwrap();
//!
//! let first = builder.add_column();
//! let second = builder.add_column();
//! let semis = builder.add_round(first, 0, 0).unwrap();
//! let finals = builder.add_round(second, 1, 0).unwrap();
//!
//! builder.add_pair(semis, PairDef::new("semi-1").with_output("final")).unwrap();
//! builder.add_pair(semis, PairDef::new("semi-2").with_output("final")).unwrap();
//! builder
//!     .add_pair(finals, PairDef::new("final").with_inputs(["semi-1", "semi-2"]))
//!     .unwrap();
//!
//! let tree = builder.build().unwrap();
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.columns().len(), 2);
//! ```

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{error::TreeError, identifier::Id};

/// Index of a [`Layer`] inside its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(usize);

impl LayerId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a [`Round`] inside its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoundId(usize);

impl RoundId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A horizontal tier of the bracket.
///
/// Position `0` is the base layer. The height is the precomputed pixel extent
/// of the layer, when known.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    position: usize,
    height: Option<f32>,
}

impl Layer {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }
}

/// A column slice of pairs sharing a layer and elimination depth.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    id: RoundId,
    position: usize,
    layer: LayerId,
    pairs: Vec<Id>,
}

impl Round {
    pub fn id(&self) -> RoundId {
        self.id
    }

    /// Position of the round, compared against the visible column index to
    /// detect rounds hidden under the scroll.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// Pair identities in rendering order, top to bottom.
    pub fn pairs(&self) -> &[Id] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Result of a played match. Either side may be missing while the match is
/// in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairValue {
    home: Option<u32>,
    away: Option<u32>,
}

impl PairValue {
    pub fn new(home: Option<u32>, away: Option<u32>) -> Self {
        Self { home, away }
    }

    /// Creates a value with both sides scored.
    pub fn scored(home: u32, away: u32) -> Self {
        Self::new(Some(home), Some(away))
    }

    pub fn home(&self) -> Option<u32> {
        self.home
    }

    pub fn away(&self) -> Option<u32> {
        self.away
    }

    /// Returns `true` when both sides carry a result.
    pub fn is_complete(&self) -> bool {
        self.home.is_some() && self.away.is_some()
    }
}

/// A single match in the bracket.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    id: Id,
    value: Option<PairValue>,
    input: Vec<Id>,
    output: Option<Id>,
    input_other_layout: bool,
    merging_layers: bool,
    round: RoundId,
    layer: LayerId,
}

impl Pair {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn value(&self) -> Option<PairValue> {
        self.value
    }

    /// Pairs feeding this one, in order. Zero inputs marks a seed pair, one
    /// input a bye, two inputs a regular match.
    pub fn input(&self) -> &[Id] {
        &self.input
    }

    /// The pair this one feeds into; `None` for the final.
    pub fn output(&self) -> Option<Id> {
        self.output
    }

    /// Whether at least one input lives in a visually distinct layout region.
    pub fn input_other_layout(&self) -> bool {
        self.input_other_layout
    }

    /// Whether this pair joins two previously separate layers.
    pub fn merging_layers(&self) -> bool {
        self.merging_layers
    }

    pub fn round(&self) -> RoundId {
        self.round
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }
}

/// Rendering-level group of round slots.
///
/// A slot is `None` when the round is virtualized away by the renderer; its
/// pairs still exist in the tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    rounds: Vec<Option<RoundId>>,
}

impl Column {
    pub fn rounds(&self) -> &[Option<RoundId>] {
        &self.rounds
    }
}

/// Immutable snapshot of a whole bracket.
#[derive(Debug, Clone, Default)]
pub struct TournamentTree {
    layers: Vec<Layer>,
    rounds: Vec<Round>,
    columns: Vec<Column>,
    pairs_by_id: IndexMap<Id, Pair>,
}

impl TournamentTree {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn pair(&self, id: Id) -> Option<&Pair> {
        self.pairs_by_id.get(&id)
    }

    /// Iterates over every pair in definition order.
    pub fn pairs(&self) -> impl Iterator<Item = &Pair> {
        self.pairs_by_id.values()
    }

    pub fn round(&self, id: RoundId) -> Option<&Round> {
        self.rounds.get(id.0)
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.0)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the round the pair belongs to.
    pub fn round_of(&self, pair: &Pair) -> Option<&Round> {
        self.round(pair.round)
    }

    /// Returns the layer the pair belongs to.
    pub fn layer_of(&self, pair: &Pair) -> Option<&Layer> {
        self.layer(pair.layer)
    }

    /// Resolves the pairs of a round, keeping the round's order.
    pub fn round_pairs<'a>(&'a self, round: &'a Round) -> impl Iterator<Item = &'a Pair> + 'a {
        round.pairs.iter().filter_map(|id| self.pair(*id))
    }

    /// Layer heights keyed by layer position, for layers with a known height.
    pub fn layer_heights(&self) -> HashMap<usize, f32> {
        self.layers
            .iter()
            .filter_map(|layer| layer.height.map(|height| (layer.position, height)))
            .collect()
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs_by_id.is_empty()
    }
}

/// Definition of a pair handed to [`TreeBuilder::add_pair`].
#[derive(Debug, Clone, PartialEq)]
pub struct PairDef {
    id: Id,
    value: Option<PairValue>,
    input: Vec<Id>,
    output: Option<Id>,
    input_other_layout: bool,
    merging_layers: bool,
}

impl PairDef {
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            value: None,
            input: Vec::new(),
            output: None,
            input_other_layout: false,
            merging_layers: false,
        }
    }

    pub fn with_value(mut self, value: PairValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Appends a single input link.
    pub fn with_input(mut self, input: impl Into<Id>) -> Self {
        self.input.push(input.into());
        self
    }

    /// Replaces the input links.
    pub fn with_inputs<I, T>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Id>,
    {
        self.input = inputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output(mut self, output: impl Into<Id>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_input_other_layout(mut self, input_other_layout: bool) -> Self {
        self.input_other_layout = input_other_layout;
        self
    }

    pub fn with_merging_layers(mut self, merging_layers: bool) -> Self {
        self.merging_layers = merging_layers;
        self
    }
}

/// Incremental assembler for [`TournamentTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    layers: Vec<Layer>,
    rounds: Vec<Round>,
    columns: Vec<Column>,
    pairs: IndexMap<Id, Pair>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a layer at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicateLayer`] when the position is taken.
    pub fn add_layer(&mut self, position: usize, height: Option<f32>) -> Result<LayerId, TreeError> {
        if self.layer_id(position).is_some() {
            return Err(TreeError::DuplicateLayer(position));
        }

        self.layers.push(Layer { position, height });
        Ok(LayerId(self.layers.len() - 1))
    }

    /// Appends an empty column and returns its index.
    pub fn add_column(&mut self) -> usize {
        self.columns.push(Column::default());
        self.columns.len() - 1
    }

    /// Appends a visible round to a column.
    ///
    /// # Errors
    ///
    /// Fails when the column or the layer at `layer_position` is unknown.
    pub fn add_round(
        &mut self,
        column: usize,
        position: usize,
        layer_position: usize,
    ) -> Result<RoundId, TreeError> {
        self.push_round(column, position, layer_position, true)
    }

    /// Appends a round whose column slot is virtualized away.
    ///
    /// The round and its pairs are part of the tree, but the column exposes
    /// an empty slot in its place.
    ///
    /// # Errors
    ///
    /// Fails when the column or the layer at `layer_position` is unknown.
    pub fn add_virtualized_round(
        &mut self,
        column: usize,
        position: usize,
        layer_position: usize,
    ) -> Result<RoundId, TreeError> {
        self.push_round(column, position, layer_position, false)
    }

    /// Appends a pair to the bottom of a round.
    ///
    /// # Errors
    ///
    /// Fails when the round is unknown or the pair identity is already used.
    pub fn add_pair(&mut self, round: RoundId, def: PairDef) -> Result<Id, TreeError> {
        let target = self
            .rounds
            .get_mut(round.0)
            .ok_or(TreeError::UnknownRound(round.0))?;

        if self.pairs.contains_key(&def.id) {
            return Err(TreeError::DuplicatePair(def.id));
        }

        target.pairs.push(def.id);
        let pair = Pair {
            id: def.id,
            value: def.value,
            input: def.input,
            output: def.output,
            input_other_layout: def.input_other_layout,
            merging_layers: def.merging_layers,
            round,
            layer: target.layer,
        };
        trace!(pair:? = pair; "Pair added");
        self.pairs.insert(def.id, pair);

        Ok(def.id)
    }

    /// Validates every `input` / `output` link and freezes the tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::BrokenReference`] for the first link that does
    /// not resolve to a defined pair.
    pub fn build(self) -> Result<TournamentTree, TreeError> {
        for pair in self.pairs.values() {
            let links = pair.input.iter().chain(pair.output.iter());
            if let Some(reference) = links.copied().find(|id| !self.pairs.contains_key(id)) {
                return Err(TreeError::BrokenReference {
                    pair: pair.id,
                    reference,
                });
            }
        }

        debug!(
            layers = self.layers.len(),
            rounds = self.rounds.len(),
            columns = self.columns.len(),
            pairs = self.pairs.len();
            "Tournament tree built"
        );

        Ok(TournamentTree {
            layers: self.layers,
            rounds: self.rounds,
            columns: self.columns,
            pairs_by_id: self.pairs,
        })
    }

    fn layer_id(&self, position: usize) -> Option<LayerId> {
        self.layers
            .iter()
            .position(|layer| layer.position == position)
            .map(LayerId)
    }

    fn push_round(
        &mut self,
        column: usize,
        position: usize,
        layer_position: usize,
        visible: bool,
    ) -> Result<RoundId, TreeError> {
        let layer = self
            .layer_id(layer_position)
            .ok_or(TreeError::UnknownLayer(layer_position))?;
        let slots = &mut self
            .columns
            .get_mut(column)
            .ok_or(TreeError::UnknownColumn(column))?
            .rounds;

        let id = RoundId(self.rounds.len());
        slots.push(visible.then_some(id));
        self.rounds.push(Round {
            id,
            position,
            layer,
            pairs: Vec::new(),
        });

        Ok(id)
    }
}
