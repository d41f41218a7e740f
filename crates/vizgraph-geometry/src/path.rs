#![forbid(unsafe_code)]

//! Arc-path construction and multi-edge curvature.

use std::collections::{HashMap, HashSet};

use vizgraph_core::{GraphConfig, Link, LinkCurveType, LinkKey};

use crate::vector::Point;

/// Arc radius for a curve type between two (already trimmed) points.
///
/// - [`Straight`](LinkCurveType::Straight): 0, a degenerate arc that
///   renders as a line.
/// - [`CurveFull`](LinkCurveType::CurveFull): exactly 1, a semicircle.
/// - [`CurveSmooth`](LinkCurveType::CurveSmooth): the Euclidean distance
///   between the points, a gentle bulge.
#[must_use]
pub fn arc_radius(from: Point, to: Point, curve: LinkCurveType) -> f64 {
    match curve {
        LinkCurveType::Straight => 0.0,
        LinkCurveType::CurveFull => 1.0,
        LinkCurveType::CurveSmooth => from.distance_to(to),
    }
}

/// The SVG path definition for a link: `M<from>A<r>,<r> 0 0,1 <to>`.
#[must_use]
pub fn build_link_path_definition(from: Point, to: Point, curve: LinkCurveType) -> String {
    let radius = arc_radius(from, to, curve);
    format!(
        "M{},{}A{},{} 0 0,1 {},{}",
        from.x, from.y, radius, radius, to.x, to.y
    )
}

/// Per-instance duplicate-edge tracker.
///
/// Counts how many *distinct explicit ids* each (source, target) pair has
/// carried. Once a pair has seen more than one, every link on that pair is
/// forced onto the smooth-curve strategy so parallel edges fan out instead
/// of stacking. The count only grows for the instance's lifetime (a
/// re-added duplicate still curves correctly), which is also why this
/// state is instance-scoped rather than process-wide.
#[derive(Debug, Clone, Default)]
pub struct MultiEdgeIndex {
    seen: HashMap<LinkKey, HashSet<String>>,
}

impl MultiEdgeIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a link's explicit id under its endpoint pair. Links without
    /// an explicit id cannot be told apart and are not counted.
    pub fn observe(&mut self, link: &Link) {
        if let Some(id) = &link.id {
            self.seen.entry(link.key()).or_default().insert(id.clone());
        }
    }

    /// How many distinct explicit ids this pair has carried so far.
    #[must_use]
    pub fn distinct_ids(&self, key: &LinkKey) -> usize {
        self.seen.get(key).map_or(0, HashSet::len)
    }

    /// The curve type the link should actually render with: the requested
    /// type (per-link override or the configured default), upgraded to
    /// smooth once its pair is known to carry parallel edges.
    pub fn effective_curve(&mut self, link: &Link, config: &GraphConfig) -> LinkCurveType {
        self.observe(link);
        if self.distinct_ids(&link.key()) > 1 {
            LinkCurveType::CurveSmooth
        } else {
            link.curve.unwrap_or(config.link.curve_type)
        }
    }
}
