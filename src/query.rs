//! Stateless filters and aggregates over record slices.
//!
//! Pattern-matching code chains these over a record's killed set or a
//! windowed history slice, e.g. to qualify a "W": keep killed records whose
//! widths fall in a band, whose left cusp does not overshoot the right, and
//! whose total span clears a minimum. Everything here is pure and
//! order-preserving; nothing mutates record state.

use crate::record::PivotLike;

/// Filter/aggregate operations available on any `[PivotRecord]`,
/// `[KilledRecord]`, or other [`PivotLike`] slice.
pub trait PivotQuery<T: PivotLike> {
    /// Records whose `back_distance` lies strictly in `(left, left_max)` and
    /// whose `forward_distance` lies strictly in `(right, right_max)`.
    fn width_range(&self, left: usize, right: usize, left_max: usize, right_max: usize) -> Vec<T>;

    /// The record with the largest span (first seen wins ties); the zero
    /// sentinel on empty input.
    fn widest_span(&self) -> T;

    /// The record with the smallest span (first seen wins ties); the zero
    /// sentinel on empty input.
    fn narrowest_span(&self) -> T;

    /// Records where `left_cusp < right_cusp * (1 + tolerance)`: the left
    /// cusp sits at or below the right one, within tolerance. Near-symmetric
    /// or rising cusp pairs.
    fn left_cusp_not_above_right(&self, tolerance: f64) -> Vec<T>;

    /// Mirror of [`left_cusp_not_above_right`](Self::left_cusp_not_above_right):
    /// records where `left_cusp * (1 + tolerance) > right_cusp`.
    fn left_cusp_not_below_right(&self, tolerance: f64) -> Vec<T>;

    /// Still-active frontier extremes older than `min_distance`:
    /// `back_distance > min_distance` and `forward_distance == 0`.
    ///
    /// The very first record of a history carries `back_distance == 0`, so a
    /// positive `min_distance` never selects it.
    fn undefeated_older_than(&self, min_distance: usize) -> Vec<T>;

    /// Records whose total span exceeds `min_width`.
    fn span_wider_than(&self, min_width: usize) -> Vec<T>;
}

impl<T: PivotLike> PivotQuery<T> for [T] {
    fn width_range(&self, left: usize, right: usize, left_max: usize, right_max: usize) -> Vec<T> {
        self.iter()
            .filter(|r| {
                let p = r.pivot();
                p.back_distance > left
                    && p.back_distance < left_max
                    && p.forward_distance > right
                    && p.forward_distance < right_max
            })
            .cloned()
            .collect()
    }

    fn widest_span(&self) -> T {
        let mut best = T::default();
        let mut best_span = 0usize;
        for r in self {
            let span = r.pivot().span();
            if span > best_span {
                best_span = span;
                best = r.clone();
            }
        }
        best
    }

    fn narrowest_span(&self) -> T {
        let mut best = T::default();
        let mut best_span = usize::MAX;
        for r in self {
            let span = r.pivot().span();
            if span < best_span {
                best_span = span;
                best = r.clone();
            }
        }
        best
    }

    fn left_cusp_not_above_right(&self, tolerance: f64) -> Vec<T> {
        self.iter()
            .filter(|r| {
                let p = r.pivot();
                p.left_cusp < p.right_cusp * (1.0 + tolerance)
            })
            .cloned()
            .collect()
    }

    fn left_cusp_not_below_right(&self, tolerance: f64) -> Vec<T> {
        self.iter()
            .filter(|r| {
                let p = r.pivot();
                p.left_cusp * (1.0 + tolerance) > p.right_cusp
            })
            .cloned()
            .collect()
    }

    fn undefeated_older_than(&self, min_distance: usize) -> Vec<T> {
        self.iter()
            .filter(|r| {
                let p = r.pivot();
                p.back_distance > min_distance && p.forward_distance == 0
            })
            .cloned()
            .collect()
    }

    fn span_wider_than(&self, min_width: usize) -> Vec<T> {
        self.iter()
            .filter(|r| r.pivot().span() > min_width)
            .cloned()
            .collect()
    }
}
