//! Epistemic cost value
//!
//! A cost is either a finite, non-negative surprise in bits or positive
//! infinity. "Not yet evaluated" is modelled outside this type as `None`, so a
//! derived field is always one of three distinguishable states. JSON has no
//! infinity, so it is written as the string sentinel `"Infinity"`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// Sentinel used for infinity in persisted documents
pub const INFINITY_SENTINEL: &str = "Infinity";

/// Epistemic cost: 0 is certain, `Infinite` is certainly false or unknowable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EpistemicCost {
    /// A finite cost in bits
    Finite(f64),
    /// Positive infinity
    Infinite,
}

impl EpistemicCost {
    /// Zero cost (certain)
    pub const ZERO: EpistemicCost = EpistemicCost::Finite(0.0);

    /// Convert a raw float. NaN and negative infinity have no cost.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_nan() || value == f64::NEG_INFINITY {
            None
        } else if value == f64::INFINITY {
            Some(EpistemicCost::Infinite)
        } else {
            Some(EpistemicCost::Finite(value))
        }
    }

    /// Surprise `-log2(p)` of a probability
    ///
    /// `p <= 0` is infinitely surprising; `p >= 1` costs nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use entail_domain::EpistemicCost;
    ///
    /// assert_eq!(EpistemicCost::from_probability(0.5), Some(EpistemicCost::Finite(1.0)));
    /// assert_eq!(EpistemicCost::from_probability(0.0), Some(EpistemicCost::Infinite));
    /// assert_eq!(EpistemicCost::from_probability(f64::NAN), None);
    /// ```
    pub fn from_probability(p: f64) -> Option<Self> {
        if p.is_nan() {
            None
        } else if p <= 0.0 {
            Some(EpistemicCost::Infinite)
        } else if p >= 1.0 {
            Some(EpistemicCost::ZERO)
        } else {
            Some(EpistemicCost::Finite(-p.log2()))
        }
    }

    /// The cost as a float (`f64::INFINITY` for `Infinite`)
    pub fn value(&self) -> f64 {
        match self {
            EpistemicCost::Finite(v) => *v,
            EpistemicCost::Infinite => f64::INFINITY,
        }
    }

    /// Whether the cost is infinite
    pub fn is_infinite(&self) -> bool {
        matches!(self, EpistemicCost::Infinite)
    }

    /// Total order: finite costs by value, infinity above all of them
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (EpistemicCost::Finite(a), EpistemicCost::Finite(b)) => a.total_cmp(b),
            (EpistemicCost::Finite(_), EpistemicCost::Infinite) => Ordering::Less,
            (EpistemicCost::Infinite, EpistemicCost::Finite(_)) => Ordering::Greater,
            (EpistemicCost::Infinite, EpistemicCost::Infinite) => Ordering::Equal,
        }
    }
}

impl PartialOrd for EpistemicCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.total_cmp(other))
    }
}

impl Add for EpistemicCost {
    type Output = EpistemicCost;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (EpistemicCost::Finite(a), EpistemicCost::Finite(b)) => EpistemicCost::Finite(a + b),
            _ => EpistemicCost::Infinite,
        }
    }
}

/// Add two possibly-undefined costs; undefined absorbs everything
pub fn sum(a: Option<EpistemicCost>, b: Option<EpistemicCost>) -> Option<EpistemicCost> {
    Some(a? + b?)
}

impl fmt::Display for EpistemicCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpistemicCost::Finite(v) => write!(f, "{:.3}", v),
            EpistemicCost::Infinite => f.write_str("inf"),
        }
    }
}

impl Serialize for EpistemicCost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EpistemicCost::Finite(v) => serializer.serialize_f64(*v),
            EpistemicCost::Infinite => serializer.serialize_str(INFINITY_SENTINEL),
        }
    }
}

struct CostVisitor;

impl<'de> Visitor<'de> for CostVisitor {
    type Value = EpistemicCost;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a number or the string \"{}\"", INFINITY_SENTINEL)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        EpistemicCost::from_f64(v).ok_or_else(|| E::custom("cost must not be NaN"))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(EpistemicCost::Finite(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(EpistemicCost::Finite(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match v {
            INFINITY_SENTINEL | "inf" => Ok(EpistemicCost::Infinite),
            other => Err(E::custom(format!("unknown cost sentinel: {}", other))),
        }
    }
}

impl<'de> Deserialize<'de> for EpistemicCost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CostVisitor)
    }
}
