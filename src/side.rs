//! Direction capabilities for the dominance scan.
//!
//! The scanner is written once, generic over a [`Side`]: the pair of
//! comparators that says which price a candle competes on, when a predecessor
//! is defeated, and which opposing-side extreme gets folded into the cusp
//! prices. Two zero-sized instantiations cover both chart orientations:
//!
//! - [`Ascending`] tracks record **lows** ("M" / double-top analysis);
//! - [`Descending`] tracks record **highs** ("W" / double-bottom analysis).

use crate::Candle;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Ascending {}
    impl Sealed for super::Descending {}
}

/// Comparator set for one scan direction.
///
/// Ties defeat: a candle whose probe price equals a predecessor's continues
/// the kill chain, it does not break it.
pub trait Side: sealed::Sealed + Send + Sync + 'static {
    /// Identity of the opposing-extreme fold; also the left cusp of a record
    /// with no predecessors at all.
    const IDENTITY: f64;

    /// The price this direction competes on (low for [`Ascending`], high for
    /// [`Descending`]).
    fn probe(candle: &Candle) -> f64;

    /// The opposing-side price folded into cusp extremes.
    fn opposing(candle: &Candle) -> f64;

    /// True when `probe` fails to defeat a predecessor priced `prior`,
    /// fixing that predecessor as the nearest dominating ancestor.
    fn breaks_chain(probe: f64, prior: f64) -> bool;

    /// Fold step for the running opposing extreme.
    fn more_extreme(current: f64, candidate: f64) -> f64;
}

/// Low-dominance direction: each candle competes on its low; the cusp tracks
/// the highest high across the superseded span.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascending;

/// High-dominance direction: each candle competes on its high; the cusp
/// tracks the lowest low across the superseded span.
#[derive(Debug, Clone, Copy, Default)]
pub struct Descending;

impl Side for Ascending {
    const IDENTITY: f64 = 0.0;

    #[inline]
    fn probe(candle: &Candle) -> f64 {
        candle.low
    }

    #[inline]
    fn opposing(candle: &Candle) -> f64 {
        candle.high
    }

    #[inline]
    fn breaks_chain(probe: f64, prior: f64) -> bool {
        probe > prior
    }

    #[inline]
    fn more_extreme(current: f64, candidate: f64) -> f64 {
        current.max(candidate)
    }
}

impl Side for Descending {
    const IDENTITY: f64 = f64::INFINITY;

    #[inline]
    fn probe(candle: &Candle) -> f64 {
        candle.high
    }

    #[inline]
    fn opposing(candle: &Candle) -> f64 {
        candle.low
    }

    #[inline]
    fn breaks_chain(probe: f64, prior: f64) -> bool {
        probe < prior
    }

    #[inline]
    fn more_extreme(current: f64, candidate: f64) -> f64 {
        current.min(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending_comparators() {
        let c = Candle::new(10.0, 12.0, 9.0, 11.0, 1.0, 0, 60_000);
        assert_eq!(Ascending::probe(&c), 9.0);
        assert_eq!(Ascending::opposing(&c), 12.0);
        assert!(Ascending::breaks_chain(10.0, 9.0));
        assert!(!Ascending::breaks_chain(9.0, 9.0)); // tie defeats
        assert_eq!(Ascending::more_extreme(Ascending::IDENTITY, 12.0), 12.0);
    }

    #[test]
    fn test_descending_comparators() {
        let c = Candle::new(10.0, 12.0, 9.0, 11.0, 1.0, 0, 60_000);
        assert_eq!(Descending::probe(&c), 12.0);
        assert_eq!(Descending::opposing(&c), 9.0);
        assert!(Descending::breaks_chain(11.0, 12.0));
        assert!(!Descending::breaks_chain(12.0, 12.0)); // tie defeats
        assert_eq!(Descending::more_extreme(Descending::IDENTITY, 9.0), 9.0);
    }
}
