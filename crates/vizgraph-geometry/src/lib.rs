#![forbid(unsafe_code)]

//! Link geometry for vizgraph: endpoint trimming, arc paths, and marker
//! resolution.
//!
//! Everything here is a pure function over a `vizgraph-core` snapshot,
//! except for the two pieces of per-instance memo state, the multi-edge
//! curvature index and the marker-id cache, which live in a
//! [`GeometryContext`] the host threads through its render calls. Keeping
//! that state instance-scoped (rather than in process-wide statics) means
//! multiple graph instances on one page never cross-contaminate.

pub mod marker;
pub mod path;
pub mod trim;
pub mod vector;

pub use marker::{MarkerCache, MarkerSize};
pub use path::{MultiEdgeIndex, arc_radius, build_link_path_definition};
pub use trim::{LinkEnds, arrow_clearance, normalize_endpoints};
pub use vector::{Point, unit_vector};

/// Per-graph-instance geometry state, threaded explicitly by the host.
#[derive(Debug, Clone, Default)]
pub struct GeometryContext {
    pub multi_edge: MultiEdgeIndex,
    pub markers: MarkerCache,
}

impl GeometryContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
