//! Backward mirroring of offsets into rounds left of the visible column.
//!
//! Rounds scrolled out to the left are not laid out on their own; each pair
//! takes the offset of the pair it feeds into, which is always resolved
//! first because the left zone is walked from the visible column outward.

use log::trace;

use bracketry_core::tree::Pair;

use super::{Anomaly, PairOffsets, sibling::pair_offset};
use crate::config::LayoutConfig;

/// Computes offsets of `pairs` by copying the offset of each pair's output.
///
/// A pair without output, or whose output has no offset yet, falls back to
/// its sibling position and is reported as an anomaly.
pub fn mirror_offsets(pairs: &[&Pair], config: &LayoutConfig, offsets: &mut PairOffsets) -> Vec<f32> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| {
            let mirrored = pair.output().and_then(|output| offsets.get(output));
            let offset = match mirrored {
                Some(offset) => offset,
                None => {
                    offsets.report(Anomaly::MissingOutputOffset { pair: pair.id() });
                    pair_offset(pairs, index, config)
                }
            };

            trace!(pair:% = pair.id(), offset; "Mirrored offset");
            offset
        })
        .collect()
}
