#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! Only the fields the core actually reads live here; purely visual knobs
//! (fonts, label rendering, d3 alpha cosmetics) belong to the host. The
//! physics block is carried so that configuration diffing can tell the host
//! whether forces/drag/zoom need re-binding, even though the engine itself
//! never integrates forces.

use crate::link::LinkCurveType;
use crate::node::SymbolType;

/// Propagation breadth when a node or link gains focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighlightDegree {
    /// Highlight stops at the focused element itself.
    Zero,
    /// The focused node plus its direct matrix neighbors.
    #[default]
    One,
    /// Like `One`, plus links whose both endpoints are already flagged.
    Two,
}

/// Highlight-color override, with an explicit keep-original sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighlightColor {
    /// Keep the element's own color when highlighted.
    #[default]
    KeepOriginal,
    /// Paint highlighted elements with this color.
    Color(String),
}

impl HighlightColor {
    /// Resolve against an element's base color.
    #[must_use]
    pub fn resolve<'a>(&'a self, base: &'a str) -> &'a str {
        match self {
            Self::KeepOriginal => base,
            Self::Color(c) => c.as_str(),
        }
    }
}

/// Node defaults, overridable per node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NodeConfig {
    /// Default node size, in area units (the circle radius is derived as
    /// `sqrt(size / PI)`). Default: 200.
    pub size: f64,
    /// Default fill color. Default: `"#d3d3d3"`.
    pub color: String,
    /// Default shape. Default: circle.
    pub symbol_type: SymbolType,
    /// Color override applied to highlighted nodes.
    pub highlight_color: HighlightColor,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            color: "#d3d3d3".to_owned(),
            symbol_type: SymbolType::Circle,
            highlight_color: HighlightColor::KeepOriginal,
        }
    }
}

/// Link defaults, overridable per link.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// Default stroke color. Default: `"#d3d3d3"`.
    pub color: String,
    /// Base stroke width. Default: 1.5.
    pub stroke_width: f64,
    /// When true, a link's stroke width scales with its value.
    pub semantic_stroke_width: bool,
    /// Color override applied to highlighted links.
    pub highlight_color: HighlightColor,
    /// Default curve type; per-link overrides and the multi-edge index may
    /// still force smooth curves.
    pub curve_type: LinkCurveType,
    /// Arrow marker dimensions, in stroke-width units (SVG
    /// `markerUnits="strokeWidth"` semantics). Defaults: 6 by 6.
    pub marker_width: f64,
    pub marker_height: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            color: "#d3d3d3".to_owned(),
            stroke_width: 1.5,
            semantic_stroke_width: false,
            highlight_color: HighlightColor::KeepOriginal,
            curve_type: LinkCurveType::Straight,
            marker_width: 6.0,
            marker_height: 6.0,
        }
    }
}

/// Force/drag/zoom parameters owned by the external simulation.
///
/// The engine never reads these to compute anything; they exist so that
/// [`GraphConfig::diff`] can report when the host must re-bind its
/// simulation and gesture handlers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsConfig {
    /// Many-body charge strength. Default: -100.
    pub gravity: f64,
    /// Target link length. Default: 100.
    pub link_length: f64,
    /// Link force strength. Default: 1.
    pub link_strength: f64,
    /// Simulation alpha target. Default: 0.05.
    pub alpha_target: f64,
    /// Disable the link force entirely.
    pub disable_link_force: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -100.0,
            link_length: 100.0,
            link_strength: 1.0,
            alpha_target: 0.05,
            disable_link_force: false,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Directed graphs get asymmetric matrices, directed degree semantics,
    /// and arrowhead clearance at link targets.
    pub directed: bool,
    /// Enables leaf collapse/expand on node click and hidden-link
    /// filtering in the render-ready views.
    pub collapsible: bool,
    pub highlight_degree: HighlightDegree,
    /// Opacity applied to non-relevant elements while a highlight is
    /// active. Default: 1 (no dimming).
    pub highlight_opacity: f64,
    /// Zoom bounds; the marker resolver buckets against `max_zoom`.
    pub max_zoom: f64,
    pub min_zoom: f64,
    pub node: NodeConfig,
    pub link: LinkConfig,
    pub physics: PhysicsConfig,
}

/// Outcome of diffing two configurations, as a single dispatch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    None,
    /// Something visual changed; no re-binding required.
    Cosmetic,
    /// Physics or zoom bounds changed; the host must re-bind
    /// forces/drag/zoom.
    Physics,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: false,
            collapsible: false,
            highlight_degree: HighlightDegree::One,
            highlight_opacity: 1.0,
            max_zoom: 8.0,
            min_zoom: 0.1,
            node: NodeConfig::default(),
            link: LinkConfig::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Compare against an incoming configuration.
    ///
    /// Physics-specific fields (the physics block plus the zoom bounds)
    /// take precedence: if any of them changed the result is
    /// [`ConfigChange::Physics`] even when cosmetic fields changed too.
    #[must_use]
    pub fn diff(&self, incoming: &GraphConfig) -> ConfigChange {
        if self.physics != incoming.physics
            || self.max_zoom != incoming.max_zoom
            || self.min_zoom != incoming.min_zoom
        {
            ConfigChange::Physics
        } else if self != incoming {
            ConfigChange::Cosmetic
        } else {
            ConfigChange::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigChange, GraphConfig, HighlightColor, HighlightDegree};

    // --- defaults ---

    #[test]
    fn defaults_match_documented_values() {
        let config = GraphConfig::default();
        assert!(!config.directed);
        assert!(!config.collapsible);
        assert_eq!(config.highlight_degree, HighlightDegree::One);
        assert_eq!(config.node.size, 200.0);
        assert_eq!(config.link.stroke_width, 1.5);
        assert_eq!(config.max_zoom, 8.0);
    }

    // --- sentinel ---

    #[test]
    fn keep_original_sentinel_resolves_to_base() {
        assert_eq!(HighlightColor::KeepOriginal.resolve("#abc"), "#abc");
        assert_eq!(
            HighlightColor::Color("#f00".into()).resolve("#abc"),
            "#f00"
        );
    }

    // --- diff ---

    #[test]
    fn identical_configs_diff_to_none() {
        let a = GraphConfig::default();
        assert_eq!(a.diff(&GraphConfig::default()), ConfigChange::None);
    }

    #[test]
    fn visual_change_is_cosmetic() {
        let a = GraphConfig::default();
        let mut b = GraphConfig::default();
        b.node.color = "#000000".into();
        assert_eq!(a.diff(&b), ConfigChange::Cosmetic);
    }

    #[test]
    fn physics_change_wins_over_cosmetic() {
        let a = GraphConfig::default();
        let mut b = GraphConfig::default();
        b.node.color = "#000000".into();
        b.physics.gravity = -250.0;
        assert_eq!(a.diff(&b), ConfigChange::Physics);

        let mut zoomed = GraphConfig::default();
        zoomed.max_zoom = 12.0;
        assert_eq!(a.diff(&zoomed), ConfigChange::Physics);
    }
}
