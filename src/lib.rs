//! # pivotscan
//!
//! Incremental candle dominance scanner for W/M (double top / double bottom)
//! pivot analysis.
//!
//! For every admitted candle the engine computes, in amortized constant time,
//! how far back the nearest strictly-dominating predecessor sits
//! (`back_distance`), which older records the candle supersedes as a new
//! extreme (its killed set), and the extreme opposing-side price over the
//! superseded span (the cusp prices). The annotated history feeds pattern
//! logic that looks for "W" (double bottom) and "M" (double top) shapes.
//!
//! ## Quick Start
//!
//! ```rust
//! use pivotscan::prelude::*;
//!
//! // Track record highs ("W" side): a candle defeats every predecessor
//! // whose high it reaches or exceeds.
//! let mut history = DescendingHistory::new();
//!
//! for (i, (high, low)) in [(10.0, 9.0), (12.0, 9.5), (11.0, 10.0)].iter().enumerate() {
//!     let t = i as i64 * 60_000;
//!     history.admit(Candle::new(*low, *high, *low, *high, 1.0, t, t + 60_000));
//! }
//!
//! let last = history.last();
//! assert_eq!(last.pivot.back_distance, 1); // 11 lost to 12 one candle back
//!
//! // Stateless filters over any record slice:
//! let wide = history.records().span_wider_than(0);
//! assert!(!wide.is_empty());
//! ```

pub mod history;
pub mod query;
pub mod record;
pub mod scan;
pub mod side;

pub mod prelude {
    pub use crate::{
        // Histories
        history::{AscendingHistory, CombinedHistory, DescendingHistory, PivotHistory},
        // Queries
        query::PivotQuery,
        // Records
        record::{DualPivotRecord, KilledRecord, Pivot, PivotLike, PivotRecord, SideSlot},
        // Parallel replay
        replay_parallel,
        // Scanner
        scan::{scan, ScanOutcome},
        // Directions
        side::{Ascending, Descending, Side},
        // Core types
        Candle,
        PivotError,
        ReplayError,
        ReplayResult,
        Result,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, PivotError>;

/// Errors produced at the crate's front doors.
///
/// The engine itself is a total function over well-formed candles: an
/// out-of-order candle is dropped by the admission guard, not reported, and
/// accessors on short histories return zero sentinels. Errors only arise when
/// raw external data is validated or a configuration value is rejected.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PivotError {
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("Invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: &'static str },
}

// ============================================================
// CANDLE
// ============================================================

/// One closed OHLCV bar. Immutable once observed; the engine stores a copy.
///
/// Timestamps are epoch milliseconds. `end_time` orders the stream: the
/// admission guard only accepts candles whose `end_time` is strictly greater
/// than the last admitted one.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub start_time: i64,
    pub end_time: i64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        start_time: i64,
        end_time: i64,
    ) -> Self {
        Self { open, high, low, close, volume, start_time, end_time }
    }

    /// Validate data consistency. The scanner assumes well-formed candles and
    /// never checks; call this at the boundary where raw feed data enters.
    pub fn validate(&self) -> Result<()> {
        if self.high < self.low {
            return Err(PivotError::InvalidCandle { index: 0, reason: "high < low" });
        }
        if self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan() {
            return Err(PivotError::InvalidCandle { index: 0, reason: "NaN in OHLC" });
        }
        if self.open.is_infinite()
            || self.high.is_infinite()
            || self.low.is_infinite()
            || self.close.is_infinite()
        {
            return Err(PivotError::InvalidCandle { index: 0, reason: "Infinite value in OHLC" });
        }
        if self.end_time <= self.start_time {
            return Err(PivotError::InvalidCandle { index: 0, reason: "end_time <= start_time" });
        }
        Ok(())
    }
}

// ============================================================
// PARALLEL REPLAY
// ============================================================

use rayon::prelude::*;

use crate::history::CombinedHistory;

/// Rebuilt history for a single instrument.
#[derive(Debug)]
pub struct ReplayResult {
    pub symbol: String,
    pub history: CombinedHistory,
}

/// Validation failure for a single instrument.
#[derive(Debug)]
pub struct ReplayError {
    pub symbol: String,
    pub error: PivotError,
}

/// Replay historical candle streams for multiple instruments in parallel.
///
/// Each instrument is validated, then admitted strictly sequentially into its
/// own [`CombinedHistory`] (the single-writer contract holds per instrument by
/// construction). Instruments fan out across the rayon pool.
pub fn replay_parallel<'a, I>(instruments: I) -> (Vec<ReplayResult>, Vec<ReplayError>)
where
    I: IntoParallelIterator<Item = (&'a str, &'a [Candle])>,
{
    let results: Vec<_> = instruments
        .into_par_iter()
        .map(|(symbol, candles)| {
            validate_candles(candles)
                .map(|_| {
                    let mut history = CombinedHistory::new();
                    for candle in candles {
                        history.admit(*candle);
                    }
                    ReplayResult { symbol: symbol.to_string(), history }
                })
                .map_err(|error| ReplayError { symbol: symbol.to_string(), error })
        })
        .collect();

    let mut successes = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(r) => successes.push(r),
            Err(e) => errors.push(e),
        }
    }

    (successes, errors)
}

fn validate_candles(candles: &[Candle]) -> Result<()> {
    for (i, candle) in candles.iter().enumerate() {
        candle.validate().map_err(|e| match e {
            PivotError::InvalidCandle { reason, .. } => {
                PivotError::InvalidCandle { index: i, reason }
            }
            other => other,
        })?;
    }
    Ok(())
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(low: f64, high: f64, t: i64) -> Candle {
        Candle::new(low, high, low, high, 1000.0, t, t + 60_000)
    }

    #[test]
    fn test_candle_validation() {
        assert!(candle(1.0, 2.0, 0).validate().is_ok());
        assert!(candle(3.0, 2.0, 0).validate().is_err());
        assert!(candle(f64::NAN, 2.0, 0).validate().is_err());
        assert!(candle(1.0, f64::INFINITY, 0).validate().is_err());

        let mut flat = candle(1.0, 2.0, 0);
        flat.end_time = flat.start_time;
        assert!(flat.validate().is_err());
    }

    #[test]
    fn test_replay_parallel() {
        let good: Vec<Candle> = (0..50)
            .map(|i| candle(10.0 - (i % 7) as f64 * 0.5, 11.0 + (i % 5) as f64 * 0.5, i * 60_000))
            .collect();
        let bad = vec![candle(1.0, 2.0, 0), candle(5.0, 4.0, 60_000)];

        let instruments: Vec<(&str, &[Candle])> = vec![("BTCUSDT", &good), ("ETHUSDT", &bad)];
        let (results, errors) = replay_parallel(instruments);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "BTCUSDT");
        assert_eq!(results[0].history.len(), 50);

        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].error,
            PivotError::InvalidCandle { index: 1, .. }
        ));
    }

    #[test]
    fn test_candle_serde_round_trip() {
        let c = candle(9.5, 10.5, 120_000);
        let json = serde_json::to_string(&c).unwrap();
        let back: Candle = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
