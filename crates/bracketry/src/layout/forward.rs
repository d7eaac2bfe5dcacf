//! Forward propagation of offsets into rounds right of the visible column.
//!
//! A pair inherits its position from the pairs feeding it: a bye keeps the
//! offset of its single input (corrected when the line crosses layers), a
//! regular match is centered between its two inputs, and a match joining two
//! layers is pinned to the bottom of the combined layer.

use log::trace;

use bracketry_core::{
    identifier::Id,
    tree::{Pair, Round, TournamentTree},
};

use super::{
    Anomaly, PairOffsets,
    predicates::{InputWiring, input_wiring},
    sibling::pair_offset,
};
use crate::config::LayoutConfig;

/// Returns `true` when the round's parent round is scrolled out of view and
/// its wiring is inconsistent.
///
/// That is the case when any input of any pair of the round lacks the
/// cross-layout flag while its own round lies before the visible column.
pub fn has_hidden_parent_round(
    tree: &TournamentTree,
    round: &Round,
    current_slide_index: usize,
) -> bool {
    tree.round_pairs(round)
        .flat_map(|pair| pair.input())
        .filter_map(|id| {
            let input = tree.pair(*id);
            debug_assert!(input.is_some(), "broken tree reference to input {id}");
            input
        })
        .any(|input| {
            !input.input_other_layout()
                && tree
                    .round_of(input)
                    .is_some_and(|parent| parent.position() < current_slide_index)
        })
}

/// Computes offsets of `pairs` from the offsets already in `offsets`.
///
/// `layer_height` is the pixel height of the round's layer, used by pairs
/// that merge two layers. Anomalies are reported on `offsets`; the returned
/// vector always holds one offset per pair.
pub fn propagate_offsets(
    tree: &TournamentTree,
    pairs: &[&Pair],
    layer_height: f32,
    config: &LayoutConfig,
    offsets: &mut PairOffsets,
) -> Vec<f32> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| {
            let offset = match *pair.input() {
                [] => Some(pair_offset(pairs, index, config)),
                [input] => inherited(offsets, pair, input).map(|base| {
                    match input_wiring(tree, pair) {
                        InputWiring::FromUpperLayer => base - config.different_layers_offset(),
                        InputWiring::FromLowerLayer => base + config.different_layers_offset(),
                        InputWiring::SameLayer => base,
                    }
                }),
                [_, _] if pair.merging_layers() => Some(layer_height - config.pair_height()),
                [first, second] => {
                    let first = inherited(offsets, pair, first);
                    let second = inherited(offsets, pair, second);
                    first.zip(second).map(|(first, second)| (first + second) / 2.0)
                }
                ref inputs => {
                    offsets.report(Anomaly::UnsupportedArity {
                        pair: pair.id(),
                        count: inputs.len(),
                    });
                    Some(0.0)
                }
            };

            let offset = offset.unwrap_or_else(|| pair_offset(pairs, index, config));
            trace!(pair:% = pair.id(), offset; "Propagated offset");
            offset
        })
        .collect()
}

fn inherited(offsets: &mut PairOffsets, pair: &Pair, input: Id) -> Option<f32> {
    let offset = offsets.get(input);
    if offset.is_none() {
        offsets.report(Anomaly::MissingInputOffset {
            pair: pair.id(),
            input,
        });
    }
    offset
}
