//! Per-candle annotation records and the seams the scanner drives them
//! through.

use crate::side::{Ascending, Descending, Side};
use crate::Candle;

/// JSON has no representation for the descending identity cusp
/// (`f64::INFINITY`, carried by a record with no predecessors): serde_json
/// writes non-finite floats as `null` and refuses to read them back. Map the
/// non-finite sentinel to `null` on the way out and back to the identity on
/// the way in so annotated records survive a round trip.
mod cusp {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// Dominance annotation for one candle in one direction.
///
/// `back_distance` is fixed at creation: the count of candles back to the
/// nearest strictly-dominating predecessor (0 only for the very first record
/// of a history). `forward_distance` starts at 0 ("still the frontier
/// extreme") and is written exactly once, by the single later scan that
/// defeats the record; `right_cusp` is written alongside it and is not
/// meaningful while `forward_distance == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Pivot {
    pub back_distance: usize,
    pub forward_distance: usize,
    #[serde(with = "cusp")]
    pub left_cusp: f64,
    pub right_cusp: f64,
}

impl Pivot {
    /// Backward plus forward distance; proxy for pattern breadth.
    #[inline]
    pub fn span(&self) -> usize {
        self.back_distance + self.forward_distance
    }

    /// True while no later candle has defeated this record.
    #[inline]
    pub fn is_undefeated(&self) -> bool {
        self.forward_distance == 0
    }
}

/// Snapshot of a record taken at the moment it was defeated, as stored in the
/// defeater's killed set. Carries only the candle and its final annotation; a
/// killed record's own killed list is never consulted downstream.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct KilledRecord {
    pub candle: Candle,
    pub pivot: Pivot,
}

/// One candle's record in a single-direction history.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct PivotRecord {
    pub candle: Candle,
    pub pivot: Pivot,
    /// Records this candle defeated on admission, nearest first.
    pub killed: Vec<KilledRecord>,
}

/// One candle's record in a combined history: both directions annotate the
/// same shared candle, each reading and mutating only its own fields.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct DualPivotRecord {
    pub candle: Candle,
    pub ascending: Pivot,
    pub descending: Pivot,
    pub killed_ascending: Vec<KilledRecord>,
    pub killed_descending: Vec<KilledRecord>,
}

/// Scanner-side seam: how a record exposes the annotation belonging to
/// direction `S`. A [`PivotRecord`] serves whichever direction owns its
/// history; a [`DualPivotRecord`] projects the matching field.
pub trait SideSlot<S: Side> {
    fn candle(&self) -> &Candle;
    fn pivot(&self) -> &Pivot;
    fn pivot_mut(&mut self) -> &mut Pivot;
}

impl<S: Side> SideSlot<S> for PivotRecord {
    #[inline]
    fn candle(&self) -> &Candle {
        &self.candle
    }

    #[inline]
    fn pivot(&self) -> &Pivot {
        &self.pivot
    }

    #[inline]
    fn pivot_mut(&mut self) -> &mut Pivot {
        &mut self.pivot
    }
}

impl SideSlot<Ascending> for DualPivotRecord {
    #[inline]
    fn candle(&self) -> &Candle {
        &self.candle
    }

    #[inline]
    fn pivot(&self) -> &Pivot {
        &self.ascending
    }

    #[inline]
    fn pivot_mut(&mut self) -> &mut Pivot {
        &mut self.ascending
    }
}

impl SideSlot<Descending> for DualPivotRecord {
    #[inline]
    fn candle(&self) -> &Candle {
        &self.candle
    }

    #[inline]
    fn pivot(&self) -> &Pivot {
        &self.descending
    }

    #[inline]
    fn pivot_mut(&mut self) -> &mut Pivot {
        &mut self.descending
    }
}

/// Query-side seam: anything carrying a candle and one direction's
/// annotation. Lets the filter library treat live records and killed-set
/// snapshots uniformly.
pub trait PivotLike: Clone + Default {
    fn candle(&self) -> &Candle;
    fn pivot(&self) -> &Pivot;
}

impl PivotLike for PivotRecord {
    #[inline]
    fn candle(&self) -> &Candle {
        &self.candle
    }

    #[inline]
    fn pivot(&self) -> &Pivot {
        &self.pivot
    }
}

impl PivotLike for KilledRecord {
    #[inline]
    fn candle(&self) -> &Candle {
        &self.candle
    }

    #[inline]
    fn pivot(&self) -> &Pivot {
        &self.pivot
    }
}
