//! Offsets of pairs within one round from sibling spacing alone.
//!
//! The first pair sits at the side indent. Every following pair is one pair
//! height plus a gap below its predecessor; the gap is small when both feed
//! the same downstream pair and large otherwise.

use bracketry_core::tree::Pair;

use crate::config::LayoutConfig;

/// Distance between the tops of two adjacent pairs.
fn spacing(previous: &Pair, next: &Pair, config: &LayoutConfig) -> f32 {
    let indent = if previous.output() == next.output() {
        config.small_indent()
    } else {
        config.large_indent()
    };

    config.pair_height() + indent
}

/// Offset of the pair at `index`, walking the round from its first pair.
///
/// Only pairs up to and including `index` contribute. An empty round yields
/// `0.0`; an index past the end yields the offset of the last pair.
pub fn pair_offset(pairs: &[&Pair], index: usize, config: &LayoutConfig) -> f32 {
    let count = index.saturating_add(1).min(pairs.len());
    if count == 0 {
        return 0.0;
    }

    pairs[..count]
        .windows(2)
        .fold(config.side_indent(), |offset, window| {
            offset + spacing(window[0], window[1], config)
        })
}

/// Offsets of every pair of a round, in round order.
pub fn sibling_offsets(pairs: &[&Pair], config: &LayoutConfig) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(pairs.len());
    let mut previous: Option<(&Pair, f32)> = None;

    for &pair in pairs {
        let offset = match previous {
            None => config.side_indent(),
            Some((prev, prev_offset)) => prev_offset + spacing(prev, pair, config),
        };
        offsets.push(offset);
        previous = Some((pair, offset));
    }

    offsets
}
