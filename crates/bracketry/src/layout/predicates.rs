//! Classification of a pair's input wiring.
//!
//! Only a fully scored pair whose input comes from another layout region is
//! subject to cross-layer correction. The base layer (position `0`) receives
//! such input from below, any other layer from above.

use bracketry_core::tree::{Pair, TournamentTree};

/// Where the input of a pair comes from, relative to its own layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputWiring {
    /// No cross-layer correction applies.
    SameLayer,
    /// Input crosses into the base layer from a lower layer.
    FromLowerLayer,
    /// Input crosses into an upper layer.
    FromUpperLayer,
}

/// Returns `true` when both sides of the pair carry a result.
pub fn is_scored(pair: &Pair) -> bool {
    pair.value().is_some_and(|value| value.is_complete())
}

fn crosses_layout(pair: &Pair) -> bool {
    is_scored(pair) && pair.input_other_layout()
}

/// Scored pair on the base layer with input from another layout region.
pub fn has_input_from_lower_layer(tree: &TournamentTree, pair: &Pair) -> bool {
    crosses_layout(pair) && tree.layer_of(pair).is_some_and(|layer| layer.position() == 0)
}

/// Scored pair above the base layer with input from another layout region.
pub fn has_input_from_upper_layer(tree: &TournamentTree, pair: &Pair) -> bool {
    crosses_layout(pair) && tree.layer_of(pair).is_some_and(|layer| layer.position() > 0)
}

/// Classifies the input wiring of a pair.
pub fn input_wiring(tree: &TournamentTree, pair: &Pair) -> InputWiring {
    if has_input_from_upper_layer(tree, pair) {
        InputWiring::FromUpperLayer
    } else if has_input_from_lower_layer(tree, pair) {
        InputWiring::FromLowerLayer
    } else {
        InputWiring::SameLayer
    }
}
