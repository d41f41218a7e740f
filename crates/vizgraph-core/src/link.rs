#![forbid(unsafe_code)]

//! Link representations and the top-level input payload.

use crate::node::{NodeId, NodeSpec};

/// The (source, target) pair identifying a link's endpoints.
///
/// Parallel edges share a key; the optional explicit [`LinkSpec::id`]
/// disambiguates them for the multi-edge curvature index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkKey {
    pub source: NodeId,
    pub target: NodeId,
}

impl LinkKey {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// True when `id` is one of the two endpoints.
    #[must_use]
    pub fn touches(&self, id: &NodeId) -> bool {
        self.source == *id || self.target == *id
    }
}

/// Requested curve type for a link path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LinkCurveType {
    /// Degenerate arc of radius 0; renders as a line.
    #[default]
    Straight,
    /// Arc radius equal to the endpoint distance; a gentle bulge.
    CurveSmooth,
    /// Arc radius fixed at 1; a semicircle.
    CurveFull,
}

impl LinkCurveType {
    /// String form used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::CurveSmooth => "curve-smooth",
            Self::CurveFull => "curve-full",
        }
    }
}

/// A caller-authored link description.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkSpec {
    pub source: NodeId,
    pub target: NodeId,
    /// Explicit id, used to tell parallel edges apart.
    pub id: Option<String>,
    /// Weight; defaults to 1. Must be finite.
    pub value: Option<f64>,
    pub color: Option<String>,
    pub stroke_width: Option<f64>,
    pub curve: Option<LinkCurveType>,
    /// Intermediate waypoints the path must pass through.
    pub break_points: Option<Vec<(f64, f64)>>,
}

impl LinkSpec {
    /// A spec with only endpoints; everything else defaults.
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn key(&self) -> LinkKey {
        LinkKey {
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }

    /// The effective weight: explicit value or 1.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.value.unwrap_or(1.0)
    }
}

/// A render-ready link.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    pub id: Option<String>,
    /// Weight (explicit value or 1).
    pub value: f64,
    /// Derived from the connectivity matrix: true when the matrix weight
    /// between the resolved endpoints is 0.
    pub is_hidden: bool,
    /// Internal sequence index, retained across reconciliation for links
    /// matched by (source, target).
    pub seq: usize,
    pub color: Option<String>,
    pub stroke_width: Option<f64>,
    pub curve: Option<LinkCurveType>,
    pub break_points: Vec<(f64, f64)>,
}

impl Link {
    #[must_use]
    pub fn key(&self) -> LinkKey {
        LinkKey {
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }

    /// Build a fresh link from a spec with the given sequence index.
    #[must_use]
    pub fn from_spec(spec: &LinkSpec, seq: usize) -> Self {
        Self {
            source: spec.source.clone(),
            target: spec.target.clone(),
            id: spec.id.clone(),
            value: spec.weight(),
            is_hidden: false,
            seq,
            color: spec.color.clone(),
            stroke_width: spec.stroke_width,
            curve: spec.curve,
            break_points: spec.break_points.clone().unwrap_or_default(),
        }
    }

    /// True when the spec differs from this link in any field other than
    /// the endpoints themselves.
    #[must_use]
    pub(crate) fn cosmetics_differ(&self, spec: &LinkSpec) -> bool {
        self.id != spec.id
            || self.value != spec.weight()
            || self.color != spec.color
            || self.stroke_width != spec.stroke_width
            || self.curve != spec.curve
            || self.break_points != spec.break_points.clone().unwrap_or_default()
    }

    /// Overwrite the authored attributes from a spec, leaving `is_hidden`
    /// and `seq` alone.
    pub(crate) fn apply_cosmetics(&mut self, spec: &LinkSpec) {
        self.id = spec.id.clone();
        self.value = spec.weight();
        self.color = spec.color.clone();
        self.stroke_width = spec.stroke_width;
        self.curve = spec.curve;
        self.break_points = spec.break_points.clone().unwrap_or_default();
    }
}

/// The payload callers hand to the engine.
///
/// A missing `links` array is not an error: the engine warns and treats it
/// as empty. An empty `nodes` list, however, is fatal at validation.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphData {
    pub nodes: Vec<NodeSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub links: Option<Vec<LinkSpec>>,
}

impl GraphData {
    /// Build a payload from explicit node and link lists.
    pub fn new(nodes: Vec<NodeSpec>, links: Vec<LinkSpec>) -> Self {
        Self {
            nodes,
            links: Some(links),
        }
    }
}
