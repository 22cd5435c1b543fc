//! The link struct and weight validation.

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};

use super::error::{KuGraphError, KuGraphResult};

/// Opaque identifier naming a knowledge unit. No format constraints.
pub type KnowledgeUnitId = String;

/// Lowest weight a link may carry.
pub const MIN_WEIGHT: f64 = 0.0;

/// Highest weight a link may carry.
pub const MAX_WEIGHT: f64 = 1.0;

/// Reject weights outside [`MIN_WEIGHT`, `MAX_WEIGHT`]. NaN is rejected too.
pub fn validate_weight(weight: f64) -> KuGraphResult<f64> {
    if (MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
        Ok(weight)
    } else {
        Err(KuGraphError::InvalidWeight(weight))
    }
}

/// A directed, weighted link to a target knowledge unit.
///
/// The source is implied by the graph key the link is stored under.
/// Serializes as a `[target, weight]` pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(KnowledgeUnitId, f64)")]
pub struct Link {
    /// Target knowledge unit.
    pub target: KnowledgeUnitId,
    /// Strength of the relationship (0.0 = weak, 1.0 = strong).
    pub weight: f64,
}

impl Link {
    /// Create a link. Callers are expected to have validated the weight.
    pub fn new(target: impl Into<KnowledgeUnitId>, weight: f64) -> Self {
        Self {
            target: target.into(),
            weight,
        }
    }
}

impl From<(KnowledgeUnitId, f64)> for Link {
    fn from((target, weight): (KnowledgeUnitId, f64)) -> Self {
        Self { target, weight }
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.target)?;
        pair.serialize_element(&self.weight)?;
        pair.end()
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.target, self.weight)
    }
}
