//! The backward jump-pointer dominance scan.
//!
//! Incremental analogue of a monotonic-stack "next strictly smaller/greater
//! element" computation: instead of an explicit stack, each defeated record's
//! own `back_distance` is reused as a jump pointer that skips everything that
//! record already dominates. Every record takes the defeat branch at most
//! once over its lifetime and is skipped forever after, so a stream of N
//! candles costs O(N) total.

use crate::record::{KilledRecord, SideSlot};
use crate::side::Side;
use crate::Candle;

/// What one scan produced for the record under construction. The killed
/// records' `forward_distance` / `right_cusp` mutations have already been
/// applied to the history slice by the time this is returned.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Candles back to the nearest strictly-dominating predecessor; 0 only
    /// when the history was empty.
    pub back_distance: usize,
    /// Extreme opposing-side price over the visited backward span,
    /// [`Side::IDENTITY`] when there were no predecessors.
    pub left_cusp: f64,
    /// Snapshots of the records defeated by this scan, nearest first.
    pub killed: Vec<KilledRecord>,
}

/// Scan backward from the newest record, defeating every predecessor the new
/// candle dominates and fixing each one's forward annotation in place.
///
/// Walks via jump pointers: after defeating a record, the cursor moves back
/// by that record's own `back_distance`, landing directly on its nearest
/// dominating ancestor. The walk stops at the first chain break (a
/// predecessor the candle fails to defeat), or with the accumulated distance
/// bumped by one once history is exhausted.
///
/// Interior mutation goes through the slice index on every iteration; no
/// record borrow is held across iterations.
pub fn scan<S, R>(records: &mut [R], candle: &Candle) -> ScanOutcome
where
    S: Side,
    R: SideSlot<S>,
{
    let probe = S::probe(candle);
    let mut extreme = S::IDENTITY;
    let mut killed = Vec::new();
    let mut back = 0usize;

    let Some(mut cursor) = records.len().checked_sub(1) else {
        return ScanOutcome { back_distance: 0, left_cusp: extreme, killed };
    };
    let max_index = cursor;

    loop {
        let slot = &mut records[cursor];
        extreme = S::more_extreme(extreme, S::opposing(slot.candle()));

        if S::breaks_chain(probe, S::probe(slot.candle())) {
            // This predecessor becomes the new record's nearest dominating
            // ancestor.
            back += 1;
            break;
        }

        let jump = slot.pivot().back_distance;
        {
            let pivot = slot.pivot_mut();
            pivot.forward_distance = back + 1;
            pivot.right_cusp = extreme;
        }
        killed.push(KilledRecord { candle: *slot.candle(), pivot: *slot.pivot() });

        back += jump;
        if jump == 0 || back >= max_index {
            // History exhausted: the defeated record was the first one, or
            // the jump would land at or before it.
            back += 1;
            break;
        }
        // cursor == max_index - (back - jump) and back < max_index here, so
        // the subtraction stays in bounds.
        cursor -= jump;
    }

    ScanOutcome { back_distance: back, left_cusp: extreme, killed }
}
