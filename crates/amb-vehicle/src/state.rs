//! Ambulance lifecycle state and on-network position.

use amb_core::{JunctionId, SegmentId};

/// Lifecycle of one dispatch.
///
/// ```text
/// Idle ─dispatch─▶ RoutePlanning ─▶ Traveling ⇄ Rerouting
///                        │              │
///                        ▼              ▼
///                      Failed        Arrived
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AmbulanceState {
    /// Not dispatched.
    Idle,
    /// Dispatched; the first route is computed on the next advance.
    RoutePlanning,
    /// Following the current route.
    Traveling,
    /// Just switched to a better route; moves on it for one tick without
    /// re-evaluating, then returns to `Traveling`.
    Rerouting,
    /// Reached the destination.  Terminal until the next dispatch.
    Arrived,
    /// No route to the destination exists.  Terminal until the next dispatch.
    Failed,
}

impl AmbulanceState {
    /// `true` for `Arrived` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, AmbulanceState::Arrived | AmbulanceState::Failed)
    }

    /// `true` while a dispatch is in progress.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            AmbulanceState::RoutePlanning | AmbulanceState::Traveling | AmbulanceState::Rerouting
        )
    }
}

/// Where the ambulance is on the network.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    AtJunction(JunctionId),
    OnSegment {
        segment:   SegmentId,
        from:      JunctionId,
        to:        JunctionId,
        /// Length units covered since leaving `from`.  In `[0, length)`.
        travelled: f64,
        length:    f64,
    },
}

impl Position {
    /// The junction the ambulance stands on, if any.
    pub fn junction(&self) -> Option<JunctionId> {
        match *self {
            Position::AtJunction(j) => Some(j),
            Position::OnSegment { .. } => None,
        }
    }

    /// Fraction of the current segment covered, in `[0, 1)`.  0 at a junction.
    pub fn progress(&self) -> f64 {
        match *self {
            Position::AtJunction(_) => 0.0,
            Position::OnSegment { travelled, length, .. } => (travelled / length).clamp(0.0, 1.0),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::AtJunction(j) => write!(f, "at {j}"),
            Position::OnSegment { from, to, .. } => {
                write!(f, "{from} -> {to} ({:.0}%)", self.progress() * 100.0)
            }
        }
    }
}
