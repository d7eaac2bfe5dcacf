//! Vertical layout of tournament brackets.
//!
//! The bracket is rendered as horizontally scrolling columns. Given the index
//! of the first visible column, every pair receives a vertical offset:
//!
//! 1. Rounds of the visible column are packed from sibling spacing alone.
//! 2. Rounds right of it inherit offsets from their inputs.
//! 3. Rounds left of it mirror the offsets of the pairs they feed into,
//!    walking from the visible column outward.
//!
//! Layout never fails. Inconsistent data is contained to the pair it affects
//! and reported as an [`Anomaly`] alongside the offsets.

mod forward;
mod mirror;
mod predicates;
mod rounds;
mod sibling;

pub use forward::has_hidden_parent_round;
pub use predicates::{
    InputWiring, has_input_from_lower_layer, has_input_from_upper_layer, input_wiring, is_scored,
};
pub use rounds::flatten_rounds;
pub use sibling::{pair_offset, sibling_offsets};

use std::collections::HashMap;

use indexmap::{IndexMap, map::Entry};
use log::{debug, info, trace, warn};
use thiserror::Error;

use bracketry_core::{
    identifier::Id,
    tree::{Pair, Round, TournamentTree},
};

use crate::config::LayoutConfig;

/// A soft data-integrity condition found while laying out a bracket.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Anomaly {
    #[error("pair `{pair}` has {count} inputs, expected at most 2; offset left at 0")]
    UnsupportedArity { pair: Id, count: usize },

    #[error("input `{input}` of pair `{pair}` has no offset; pair placed by sibling spacing")]
    MissingInputOffset { pair: Id, input: Id },

    #[error("output of pair `{pair}` has no offset; pair placed by sibling spacing")]
    MissingOutputOffset { pair: Id },
}

/// Offsets of pairs from the top of their round, in pixels.
///
/// Entries keep the order in which they were computed. An entry, once
/// written, is never replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairOffsets {
    offsets: IndexMap<Id, f32>,
    anomalies: Vec<Anomaly>,
}

impl PairOffsets {
    /// Returns the offset of a pair, if it was placed.
    pub fn get(&self, id: Id) -> Option<f32> {
        self.offsets.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, f32)> + '_ {
        self.offsets.iter().map(|(id, offset)| (*id, *offset))
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Data-integrity conditions met during layout, in discovery order.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Consumes the result, returning the bare offsets map.
    pub fn into_inner(self) -> IndexMap<Id, f32> {
        self.offsets
    }

    pub(crate) fn insert(&mut self, id: Id, offset: f32) {
        match self.offsets.entry(id) {
            Entry::Vacant(entry) => {
                entry.insert(offset);
            }
            Entry::Occupied(entry) => {
                debug!(pair:% = id, kept = *entry.get(), ignored = offset; "Offset already placed");
            }
        }
    }

    pub(crate) fn report(&mut self, anomaly: Anomaly) {
        warn!("{anomaly}");
        self.anomalies.push(anomaly);
    }

    fn extend(&mut self, pairs: &[&Pair], offsets: Vec<f32>) {
        for (pair, offset) in pairs.iter().zip(offsets) {
            self.insert(pair.id(), offset);
        }
    }
}

fn resolve_pairs<'a>(tree: &'a TournamentTree, round: &'a Round) -> Vec<&'a Pair> {
    let pairs: Vec<&Pair> = tree.round_pairs(round).collect();
    debug_assert_eq!(
        pairs.len(),
        round.pairs().len(),
        "broken tree reference in round {}",
        round.id().index()
    );
    pairs
}

/// Computes the offset of every pair reachable from the columns of `tree`.
///
/// `current_slide_index` is the index of the first visible column.
/// `layer_heights` maps layer positions to pixel heights; a missing entry
/// counts as height `0`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use bracketry::{config::LayoutConfig, identifier::Id, layout::compute_offsets};
/// use bracketry_core::tree::{PairDef, TreeBuilder};
///
/// let mut builder = TreeBuilder::new();
/// builder.add_layer(0, None).unwrap();
/// let semis = builder.add_column();
/// let finals = builder.add_column();
/// let semis = builder.add_round(semis, 0, 0).unwrap();
/// let finals = builder.add_round(finals, 1, 0).unwrap();
/// builder.add_pair(semis, PairDef::new("s1").with_output("f")).unwrap();
/// builder.add_pair(semis, PairDef::new("s2").with_output("f")).unwrap();
/// builder.add_pair(finals, PairDef::new("f").with_inputs(["s1", "s2"])).unwrap();
/// let tree = builder.build().unwrap();
///
/// let config = LayoutConfig::default();
/// let offsets = compute_offsets(0, &tree, &HashMap::new(), &config);
///
/// let s1 = offsets.get(Id::new("s1")).unwrap();
/// let s2 = offsets.get(Id::new("s2")).unwrap();
/// assert_eq!(offsets.get(Id::new("f")), Some((s1 + s2) / 2.0));
/// ```
pub fn compute_offsets(
    current_slide_index: usize,
    tree: &TournamentTree,
    layer_heights: &HashMap<usize, f32>,
    config: &LayoutConfig,
) -> PairOffsets {
    let columns = tree.columns();
    info!(current_slide_index, columns = columns.len(); "Computing pair offsets");

    let current_rounds = flatten_rounds(tree, [tree.column(current_slide_index)]);
    let right_rounds = flatten_rounds(
        tree,
        columns
            .get(current_slide_index.saturating_add(1)..)
            .unwrap_or_default()
            .iter()
            .map(Some),
    );
    let left_rounds = flatten_rounds(
        tree,
        columns[..current_slide_index.min(columns.len())]
            .iter()
            .rev()
            .map(Some),
    );

    let mut offsets = PairOffsets::default();

    for round in current_rounds.into_iter().flatten() {
        let pairs = resolve_pairs(tree, round);
        offsets.extend(&pairs, sibling_offsets(&pairs, config));
    }
    debug!(placed = offsets.len(); "Visible column laid out");

    for round in right_rounds.into_iter().flatten() {
        let pairs = resolve_pairs(tree, round);

        let placed = if has_hidden_parent_round(tree, round, current_slide_index) {
            debug!(round = round.id().index(); "Parent round hidden, using sibling spacing");
            sibling_offsets(&pairs, config)
        } else {
            let height = layer_height(tree, round, layer_heights);
            forward::propagate_offsets(tree, &pairs, height, config, &mut offsets)
        };
        offsets.extend(&pairs, placed);
    }
    debug!(placed = offsets.len(); "Right columns laid out");

    for round in left_rounds.into_iter().flatten() {
        let pairs = resolve_pairs(tree, round);
        let placed = mirror::mirror_offsets(&pairs, config, &mut offsets);
        offsets.extend(&pairs, placed);
    }

    info!(
        placed = offsets.len(),
        anomalies = offsets.anomalies().len();
        "Pair offsets computed"
    );

    offsets
}

fn layer_height(tree: &TournamentTree, round: &Round, layer_heights: &HashMap<usize, f32>) -> f32 {
    let position = tree.layer(round.layer()).map(|layer| layer.position());
    match position.and_then(|position| layer_heights.get(&position)) {
        Some(height) => *height,
        None => {
            debug!(layer:? = position; "No height for layer, using 0");
            0.0
        }
    }
}

/// Vertical extent of a round including its title area.
///
/// This is the offset of the last pair plus the title height, one pair
/// height and the bottom side indent. Absent or empty rounds have height 0.
pub fn round_height(tree: &TournamentTree, round: Option<&Round>, config: &LayoutConfig) -> f32 {
    let Some(round) = round else {
        return 0.0;
    };

    let pairs = resolve_pairs(tree, round);
    let Some(last) = pairs.len().checked_sub(1) else {
        return 0.0;
    };

    let height = pair_offset(&pairs, last, config)
        + config.title_height()
        + config.pair_height()
        + config.side_indent();
    trace!(round = round.id().index(), height; "Round height");
    height
}

#[cfg(test)]
mod tests {
    use bracketry_core::tree::{PairDef, PairValue, TreeBuilder};
    use float_cmp::assert_approx_eq;

    use super::*;

    fn config() -> LayoutConfig {
        LayoutConfig::default()
            .with_side_indent(10.0)
            .with_pair_height(20.0)
            .with_small_indent(4.0)
            .with_large_indent(12.0)
            .with_title_height(30.0)
            .with_different_layers_offset(15.0)
    }

    fn offset(offsets: &PairOffsets, id: &str) -> f32 {
        offsets
            .get(Id::new(id))
            .unwrap_or_else(|| panic!("no offset for {id}"))
    }

    /// Quarter-finals, semi-finals and a final, one column each.
    fn eight_player_bracket() -> TournamentTree {
        let mut builder = TreeBuilder::new();
        builder.add_layer(0, Some(500.0)).unwrap();
        let columns: Vec<usize> = (0..3).map(|_| builder.add_column()).collect();
        let quarters = builder.add_round(columns[0], 0, 0).unwrap();
        let semis = builder.add_round(columns[1], 1, 0).unwrap();
        let finals = builder.add_round(columns[2], 2, 0).unwrap();

        for (id, output) in [("q1", "s1"), ("q2", "s1"), ("q3", "s2"), ("q4", "s2")] {
            builder
                .add_pair(quarters, PairDef::new(id).with_output(output))
                .unwrap();
        }
        builder
            .add_pair(semis, PairDef::new("s1").with_inputs(["q1", "q2"]).with_output("f"))
            .unwrap();
        builder
            .add_pair(semis, PairDef::new("s2").with_inputs(["q3", "q4"]).with_output("f"))
            .unwrap();
        builder
            .add_pair(finals, PairDef::new("f").with_inputs(["s1", "s2"]))
            .unwrap();

        builder.build().unwrap()
    }

    #[test]
    fn test_first_column_visible() {
        let tree = eight_player_bracket();
        let offsets = compute_offsets(0, &tree, &tree.layer_heights(), &config());

        assert_eq!(offset(&offsets, "q1"), 10.0);
        assert_eq!(offset(&offsets, "q2"), 34.0);
        assert_eq!(offset(&offsets, "q3"), 66.0);
        assert_eq!(offset(&offsets, "q4"), 90.0);
        assert_eq!(offset(&offsets, "s1"), 22.0);
        assert_eq!(offset(&offsets, "s2"), 78.0);
        assert_eq!(offset(&offsets, "f"), 50.0);
        assert!(offsets.anomalies().is_empty());
    }

    #[test]
    fn test_middle_column_visible_mirrors_left() {
        let tree = eight_player_bracket();
        let offsets = compute_offsets(1, &tree, &tree.layer_heights(), &config());

        assert_eq!(offset(&offsets, "s1"), 10.0);
        assert_eq!(offset(&offsets, "s2"), 34.0);
        assert_eq!(offset(&offsets, "f"), 22.0);
        assert_eq!(offset(&offsets, "q1"), 10.0);
        assert_eq!(offset(&offsets, "q2"), 10.0);
        assert_eq!(offset(&offsets, "q3"), 34.0);
        assert_eq!(offset(&offsets, "q4"), 34.0);
        assert!(offsets.anomalies().is_empty());
    }

    #[test]
    fn test_zone_order() {
        let tree = eight_player_bracket();
        let offsets = compute_offsets(1, &tree, &tree.layer_heights(), &config());
        let order: Vec<String> = offsets.iter().map(|(id, _)| id.to_string()).collect();

        assert_eq!(order, ["s1", "s2", "f", "q1", "q2", "q3", "q4"]);
    }

    #[test]
    fn test_last_column_visible_mirrors_outward() {
        let tree = eight_player_bracket();
        let offsets = compute_offsets(2, &tree, &tree.layer_heights(), &config());

        for id in ["f", "s1", "s2", "q1", "q2", "q3", "q4"] {
            assert_eq!(offset(&offsets, id), 10.0, "pair {id}");
        }
    }

    #[test]
    fn test_index_past_last_column() {
        let tree = eight_player_bracket();
        let offsets = compute_offsets(7, &tree, &tree.layer_heights(), &config());

        assert_eq!(offsets.len(), 7);
        assert_eq!(offset(&offsets, "f"), 10.0);
        assert_eq!(offset(&offsets, "q4"), 10.0);
        assert_eq!(
            offsets.anomalies(),
            &[Anomaly::MissingOutputOffset { pair: Id::new("f") }]
        );
    }

    #[test]
    fn test_empty_tree() {
        let tree = TreeBuilder::new().build().unwrap();
        let offsets = compute_offsets(0, &tree, &HashMap::new(), &config());
        assert!(offsets.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let tree = eight_player_bracket();
        let heights = tree.layer_heights();

        for index in 0..4 {
            let first = compute_offsets(index, &tree, &heights, &config());
            let second = compute_offsets(index, &tree, &heights, &config());
            assert_eq!(first, second);
        }
    }

    /// Column 1 holds a round whose recorded position lags behind the column
    /// index, as happens with cut data for hidden rounds.
    fn cut_bracket(lagging_position: usize) -> TournamentTree {
        let mut builder = TreeBuilder::new();
        builder.add_layer(0, None).unwrap();
        let columns: Vec<usize> = (0..3).map(|_| builder.add_column()).collect();
        let first = builder.add_round(columns[0], 0, 0).unwrap();
        let lagging = builder.add_round(columns[1], lagging_position, 0).unwrap();
        let last = builder.add_round(columns[2], 2, 0).unwrap();

        builder
            .add_pair(first, PairDef::new("cut-a").with_output("cut-c"))
            .unwrap();
        builder
            .add_pair(first, PairDef::new("cut-b").with_output("cut-d"))
            .unwrap();
        builder
            .add_pair(lagging, PairDef::new("cut-c").with_input("cut-a").with_output("cut-e"))
            .unwrap();
        builder
            .add_pair(lagging, PairDef::new("cut-d").with_input("cut-b").with_output("cut-f"))
            .unwrap();
        builder
            .add_pair(last, PairDef::new("cut-e").with_inputs(["cut-c", "cut-d"]))
            .unwrap();
        builder
            .add_pair(last, PairDef::new("cut-f").with_inputs(["cut-c", "cut-d"]))
            .unwrap();

        builder.build().unwrap()
    }

    #[test]
    fn test_hidden_parent_round_falls_back_to_siblings() {
        let tree = cut_bracket(0);
        let offsets = compute_offsets(1, &tree, &HashMap::new(), &config());

        // Visible column packs cut-c and cut-d at 10 and 42.
        assert_eq!(offset(&offsets, "cut-c"), 10.0);
        assert_eq!(offset(&offsets, "cut-d"), 42.0);
        // Forward propagation would have centered both at 26. Both are
        // terminal, so the sibling gap is the small one.
        assert_eq!(offset(&offsets, "cut-e"), 10.0);
        assert_eq!(offset(&offsets, "cut-f"), 34.0);
    }

    #[test]
    fn test_consistent_parent_round_propagates() {
        let tree = cut_bracket(1);
        let offsets = compute_offsets(1, &tree, &HashMap::new(), &config());

        assert_eq!(offset(&offsets, "cut-e"), 26.0);
        assert_eq!(offset(&offsets, "cut-f"), 26.0);
    }

    /// Base layer and a lower layer merging into a grand final.
    fn two_layer_bracket() -> TournamentTree {
        let mut builder = TreeBuilder::new();
        builder.add_layer(0, Some(200.0)).unwrap();
        builder.add_layer(1, Some(120.0)).unwrap();
        let columns: Vec<usize> = (0..3).map(|_| builder.add_column()).collect();
        let upper_first = builder.add_round(columns[0], 0, 0).unwrap();
        let lower_first = builder.add_round(columns[0], 0, 1).unwrap();
        let lower_bye = builder.add_round(columns[1], 1, 1).unwrap();
        let grand_final = builder.add_round(columns[2], 2, 0).unwrap();

        builder
            .add_pair(upper_first, PairDef::new("up").with_output("gf"))
            .unwrap();
        builder
            .add_pair(
                lower_first,
                PairDef::new("low")
                    .with_output("low-bye")
                    .with_value(PairValue::scored(2, 0)),
            )
            .unwrap();
        builder
            .add_pair(
                lower_bye,
                PairDef::new("low-bye")
                    .with_input("low")
                    .with_output("gf")
                    .with_input_other_layout(true)
                    .with_value(PairValue::scored(1, 0)),
            )
            .unwrap();
        builder
            .add_pair(
                grand_final,
                PairDef::new("gf")
                    .with_inputs(["up", "low-bye"])
                    .with_merging_layers(true),
            )
            .unwrap();

        builder.build().unwrap()
    }

    #[test]
    fn test_layers_cross_and_merge() {
        let tree = two_layer_bracket();
        let offsets = compute_offsets(0, &tree, &tree.layer_heights(), &config());

        assert_eq!(offset(&offsets, "up"), 10.0);
        assert_eq!(offset(&offsets, "low"), 10.0);
        assert_eq!(offset(&offsets, "low-bye"), -5.0);
        assert_eq!(offset(&offsets, "gf"), 180.0);
    }

    #[test]
    fn test_missing_layer_height_counts_as_zero() {
        let tree = two_layer_bracket();
        let offsets = compute_offsets(0, &tree, &HashMap::new(), &config());

        assert_eq!(offset(&offsets, "gf"), -20.0);
    }

    #[test]
    fn test_round_height() {
        let tree = eight_player_bracket();
        let quarters = tree.rounds().first();

        // last pair at 90, title 30, pair 20, side indent 10
        assert_approx_eq!(f32, round_height(&tree, quarters, &config()), 150.0);

        let finals = tree.rounds().last();
        assert_approx_eq!(f32, round_height(&tree, finals, &config()), 70.0);
    }

    #[test]
    fn test_round_height_of_absent_or_empty_round() {
        let mut builder = TreeBuilder::new();
        builder.add_layer(0, None).unwrap();
        let column = builder.add_column();
        let empty = builder.add_round(column, 0, 0).unwrap();
        let tree = builder.build().unwrap();

        assert_eq!(round_height(&tree, None, &config()), 0.0);
        assert_eq!(round_height(&tree, tree.round(empty), &config()), 0.0);
    }

    #[test]
    fn test_virtualized_round_contributes_nothing() {
        let mut builder = TreeBuilder::new();
        builder.add_layer(0, None).unwrap();
        let column = builder.add_column();
        let hidden = builder.add_virtualized_round(column, 0, 0).unwrap();
        let shown = builder.add_round(column, 0, 0).unwrap();
        builder.add_pair(hidden, PairDef::new("v-hidden")).unwrap();
        builder.add_pair(shown, PairDef::new("v-shown")).unwrap();
        let tree = builder.build().unwrap();

        let offsets = compute_offsets(0, &tree, &HashMap::new(), &config());

        assert_eq!(offsets.get(Id::new("v-hidden")), None);
        assert_eq!(offsets.get(Id::new("v-shown")), Some(10.0));
    }

    #[test]
    fn test_insert_keeps_first_offset() {
        let mut offsets = PairOffsets::default();
        offsets.insert(Id::new("twice"), 1.0);
        offsets.insert(Id::new("twice"), 2.0);

        assert_eq!(offsets.get(Id::new("twice")), Some(1.0));
        assert_eq!(offsets.len(), 1);
    }

    #[test]
    fn test_into_inner_keeps_computation_order() {
        let mut offsets = PairOffsets::default();
        offsets.insert(Id::new("later-column"), 40.0);
        offsets.insert(Id::new("earlier-column"), 10.0);

        let map = offsets.into_inner();
        let order: Vec<Id> = map.keys().copied().collect();

        assert_eq!(order, [Id::new("later-column"), Id::new("earlier-column")]);
        assert_eq!(map.get(&Id::new("earlier-column")), Some(&10.0));
    }
}
