//! Planner settings.
//!
//! The binaries assemble a [`PlannerConfig`] from their command line
//! arguments. The struct is also deserializable, missing fields fall back to
//! their defaults:
//!
//! ```json
//! { "congestion_threshold": 2, "queue": "radix" }
//! ```

use serde::{Deserialize, Serialize};

use crate::{congestion::Congestion, queue::QueueKind};

/// Segments whose congestion exceeds this level are reported.
pub const DEFAULT_CONGESTION_THRESHOLD: Congestion = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Segments on a route with a congestion level strictly above this value
    /// are flagged.
    pub congestion_threshold: Congestion,

    /// Frontier implementation used by the search.
    pub queue: QueueKind,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            congestion_threshold: DEFAULT_CONGESTION_THRESHOLD,
            queue: QueueKind::default(),
        }
    }
}
