//! Append-only pivot histories: the admission guard, the record arena the
//! scanner mutates, and the defensive read accessors.

use std::marker::PhantomData;

use crate::record::{DualPivotRecord, Pivot, PivotRecord};
use crate::scan::{scan, ScanOutcome};
use crate::side::{Ascending, Descending, Side};
use crate::{Candle, PivotError, Result};

fn pivot_from(outcome: &ScanOutcome) -> Pivot {
    Pivot {
        back_distance: outcome.back_distance,
        forward_distance: 0,
        left_cusp: outcome.left_cusp,
        right_cusp: 0.0,
    }
}

// ============================================================
// SINGLE-DIRECTION HISTORY
// ============================================================

/// Time-ordered record history for one scan direction.
///
/// `admit` is the sole mutation entry point and requires `&mut self`: the
/// borrow checker is the single-writer guard the engine depends on, so a
/// concurrent read during an in-progress admission cannot compile. Readers
/// interleave freely among themselves.
#[derive(Debug, Clone)]
pub struct PivotHistory<S: Side> {
    records: Vec<PivotRecord>,
    last_end_time: Option<i64>,
    retention: Option<usize>,
    _side: PhantomData<S>,
}

/// Tracks record lows; feeds "M" (double top) analysis.
pub type AscendingHistory = PivotHistory<Ascending>;

/// Tracks record highs; feeds "W" (double bottom) analysis.
pub type DescendingHistory = PivotHistory<Descending>;

impl<S: Side> Default for PivotHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Side> PivotHistory<S> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            last_end_time: None,
            retention: None,
            _side: PhantomData,
        }
    }

    /// History that keeps at most `limit` most-recent records, truncating the
    /// oldest prefix in batches (never the interior). Records may then carry
    /// back distances larger than the retained length; the scanner's
    /// exhaustion guard covers that.
    pub fn with_retention(limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(PivotError::InvalidValue("retention limit must be > 0"));
        }
        let mut history = Self::new();
        history.retention = Some(limit);
        Ok(history)
    }

    /// Admit one closed candle: scan, mutate defeated predecessors, append.
    ///
    /// Returns the newly created record, or `None` when the candle's end time
    /// is not strictly after the last admitted one (duplicates and
    /// out-of-order delivery are silently dropped, so re-admitting the same
    /// candle is a no-op).
    pub fn admit(&mut self, candle: Candle) -> Option<&PivotRecord> {
        if !self.admits(candle.end_time) {
            return None;
        }

        let outcome = scan::<S, _>(&mut self.records, &candle);
        self.records.push(PivotRecord {
            candle,
            pivot: pivot_from(&outcome),
            killed: outcome.killed,
        });
        self.last_end_time = Some(candle.end_time);
        self.compact();

        self.records.last()
    }

    fn admits(&self, end_time: i64) -> bool {
        self.last_end_time.map_or(true, |last| end_time > last)
    }

    fn compact(&mut self) {
        if let Some(limit) = self.retention {
            if self.records.len() >= limit.saturating_mul(2) {
                let cut = self.records.len() - limit;
                self.records.drain(..cut);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Newest record, or the zero sentinel when empty.
    pub fn last(&self) -> PivotRecord {
        self.records.last().cloned().unwrap_or_default()
    }

    /// Reverse-indexed access: `at(0)` is the newest record. Out-of-range
    /// indices yield the zero sentinel so downstream filters never
    /// null-check.
    pub fn at(&self, i: usize) -> PivotRecord {
        self.get(i).cloned().unwrap_or_default()
    }

    /// Reverse-indexed access without the sentinel.
    pub fn get(&self, i: usize) -> Option<&PivotRecord> {
        let len = self.records.len();
        if i >= len {
            return None;
        }
        self.records.get(len - i - 1)
    }

    /// The `width` records strictly older than reverse index `i` (the record
    /// at `i` itself is excluded), clipped to bounds.
    pub fn window(&self, i: usize, width: usize) -> &[PivotRecord] {
        let len = self.records.len();
        if i >= len {
            return &[];
        }
        let end = len - i - 1;
        let start = end.saturating_sub(width);
        &self.records[start..end]
    }

    /// Full retained history, oldest first.
    pub fn records(&self) -> &[PivotRecord] {
        &self.records
    }
}

// ============================================================
// COMBINED HISTORY
// ============================================================

/// Both directions over one shared record sequence: every admission runs the
/// ascending and the descending scan against the same candle, each reading
/// and mutating only its own direction's fields.
#[derive(Debug, Clone, Default)]
pub struct CombinedHistory {
    records: Vec<DualPivotRecord>,
    last_end_time: Option<i64>,
    retention: Option<usize>,
}

impl CombinedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`PivotHistory::with_retention`].
    pub fn with_retention(limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(PivotError::InvalidValue("retention limit must be > 0"));
        }
        Ok(Self { retention: Some(limit), ..Self::default() })
    }

    /// Admit one closed candle through both scans. Same guard semantics as
    /// [`PivotHistory::admit`].
    pub fn admit(&mut self, candle: Candle) -> Option<&DualPivotRecord> {
        if !self.last_end_time.map_or(true, |last| candle.end_time > last) {
            return None;
        }

        let up = scan::<Ascending, _>(&mut self.records, &candle);
        let down = scan::<Descending, _>(&mut self.records, &candle);
        self.records.push(DualPivotRecord {
            candle,
            ascending: pivot_from(&up),
            descending: pivot_from(&down),
            killed_ascending: up.killed,
            killed_descending: down.killed,
        });
        self.last_end_time = Some(candle.end_time);

        if let Some(limit) = self.retention {
            if self.records.len() >= limit.saturating_mul(2) {
                let cut = self.records.len() - limit;
                self.records.drain(..cut);
            }
        }

        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> DualPivotRecord {
        self.records.last().cloned().unwrap_or_default()
    }

    pub fn at(&self, i: usize) -> DualPivotRecord {
        self.get(i).cloned().unwrap_or_default()
    }

    pub fn get(&self, i: usize) -> Option<&DualPivotRecord> {
        let len = self.records.len();
        if i >= len {
            return None;
        }
        self.records.get(len - i - 1)
    }

    pub fn window(&self, i: usize, width: usize) -> &[DualPivotRecord] {
        let len = self.records.len();
        if i >= len {
            return &[];
        }
        let end = len - i - 1;
        let start = end.saturating_sub(width);
        &self.records[start..end]
    }

    pub fn records(&self) -> &[DualPivotRecord] {
        &self.records
    }
}
