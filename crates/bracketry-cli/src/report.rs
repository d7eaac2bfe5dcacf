//! Plain-text layout report.
//!
//! The report lists one `pair<TAB>offset` line per pair in computation
//! order, a blank line, then one `round<TAB>column<TAB>position<TAB>height`
//! line per visible round.

use std::iter;

use bracketry::{BracketBuilder, layout::PairOffsets, tree::TournamentTree};

/// Render the offsets and round heights of `tree` as text.
pub fn render(builder: &BracketBuilder, tree: &TournamentTree, offsets: &PairOffsets) -> String {
    let pair_lines = offsets
        .iter()
        .map(|(pair, offset)| format!("{pair}\t{offset}\n"));

    let round_lines = tree
        .columns()
        .iter()
        .enumerate()
        .flat_map(|(column, slots)| {
            slots
                .rounds()
                .iter()
                .flatten()
                .filter_map(move |id| tree.round(*id))
                .map(move |round| (column, round))
        })
        .map(|(column, round)| {
            let height = builder.round_height(tree, Some(round));
            format!(
                "{}\t{column}\t{}\t{height}\n",
                round.id().index(),
                round.position()
            )
        });

    pair_lines
        .chain(iter::once("\n".to_string()))
        .chain(round_lines)
        .collect()
}
