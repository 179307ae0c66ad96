//! Card ordering.
//!
//! Cards carry a float `pos`; a list displays them in ascending order. A card
//! dropped at an index takes the midpoint of its new neighbours, so a move
//! touches one card. Repeated moves into the same slot halve the gap each
//! time and would eventually run out of f64 precision, so once the gap falls
//! under `MIN_POSITION_GAP` the caller renumbers the whole list instead.

use serde_json::Value;

/// Spacing between cards after renumbering, and the slot size at either end
pub const POSITION_GAP: f64 = 65536.0;

/// Smallest distance a new position may keep from either neighbour
pub const MIN_POSITION_GAP: f64 = 1.0 / 1024.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Use this position
    At(f64),
    /// Neighbours are too close; renumber the list and place again
    Renumber,
}

/// Position for a card inserted at `index` among `sorted` (ascending
/// positions of the destination list, excluding the moved card).
pub fn place(sorted: &[f64], index: usize) -> Placement {
    let Some((&first, _)) = sorted.split_first() else {
        return Placement::At(POSITION_GAP);
    };

    if index == 0 {
        return between(0.0, non_zero_or(first, POSITION_GAP));
    }

    if index >= sorted.len() {
        let last = sorted[sorted.len() - 1];
        return Placement::At(non_zero_or(last, POSITION_GAP) + POSITION_GAP);
    }

    let before = sorted[index - 1];
    let after = non_zero_or(sorted[index], before + POSITION_GAP);
    between(before, after)
}

/// Evenly spaced replacements for `current`, all above its highest position.
///
/// Applying them from last to first keeps the list in order at every step.
pub fn renumbered(current: &[f64]) -> Vec<f64> {
    let base = current.iter().copied().fold(0.0, f64::max);
    (1..=current.len())
        .map(|i| base + i as f64 * POSITION_GAP)
        .collect()
}

/// Reads a card's `pos`, treating a missing or unreadable value as 0
pub fn position_of(card: &Value) -> f64 {
    match card.get("pos") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn between(before: f64, after: f64) -> Placement {
    let mid = before + (after - before) / 2.0;
    if mid - before >= MIN_POSITION_GAP && after - mid >= MIN_POSITION_GAP {
        Placement::At(mid)
    } else {
        Placement::Renumber
    }
}

fn non_zero_or(pos: f64, fallback: f64) -> f64 {
    if pos == 0.0 {
        fallback
    } else {
        pos
    }
}
