//! Flattening of column groups into one ordered list of rounds.

use bracketry_core::tree::{Column, Round, TournamentTree};

/// Concatenates the round slots of the given columns, in the given order.
///
/// Absent columns contribute nothing. Virtualized slots are kept as `None`
/// so that callers treat them as empty rounds.
pub fn flatten_rounds<'a, I>(tree: &'a TournamentTree, columns: I) -> Vec<Option<&'a Round>>
where
    I: IntoIterator<Item = Option<&'a Column>>,
{
    columns
        .into_iter()
        .flatten()
        .flat_map(move |column| {
            column
                .rounds()
                .iter()
                .map(move |slot| slot.and_then(|id| tree.round(id)))
        })
        .collect()
}
