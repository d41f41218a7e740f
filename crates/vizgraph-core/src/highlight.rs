#![forbid(unsafe_code)]

//! Hover-driven highlight propagation and render-time relevance.
//!
//! Propagation writes `highlighted` flags onto the node map; relevance and
//! style resolution are pure reads over a snapshot. All of it runs
//! synchronously inside one event handler, so there is exactly one writer
//! and no concurrent mutation.
//!
//! # Invariants
//!
//! 1. With [`HighlightDegree::Zero`], propagation stops at the focused node.
//! 2. Otherwise the same value lands on every node in the focused node's
//!    matrix row, hidden entries included.
//! 3. Relevance never mutates anything; it only reads flags the propagator
//!    (or link hover) already wrote.

use std::collections::HashMap;

use tracing::warn;

use crate::config::{GraphConfig, HighlightDegree};
use crate::link::Link;
use crate::matrix::ConnectivityMatrix;
use crate::node::{Node, NodeId};
use crate::state::GraphSnapshot;

/// Flag `id` (and, depending on `degree`, its direct matrix neighbors)
/// with `value`. Returns the new highlighted-node id: `Some(id)` when
/// setting, `None` when clearing.
///
/// Unknown ids are a no-op (warned in debug builds).
pub fn set_highlight(
    nodes: &mut HashMap<NodeId, Node>,
    matrix: &ConnectivityMatrix,
    degree: HighlightDegree,
    id: &NodeId,
    value: bool,
) -> Option<NodeId> {
    let Some(node) = nodes.get_mut(id) else {
        if cfg!(debug_assertions) {
            warn!(id = %id, "highlight request for unknown node id");
        }
        return None;
    };
    node.highlighted = value;

    if degree != HighlightDegree::Zero {
        let neighbors: Vec<NodeId> = matrix.neighbors(id).map(|(n, _)| n.clone()).collect();
        for neighbor in neighbors {
            if let Some(n) = nodes.get_mut(&neighbor) {
                n.highlighted = value;
            }
        }
    }

    value.then(|| id.clone())
}

/// True when any highlight is active on the snapshot.
#[must_use]
pub fn highlight_active(snapshot: &GraphSnapshot) -> bool {
    snapshot.highlighted_node.is_some() || snapshot.highlighted_link.is_some()
}

/// A node is relevant when it is flagged highlighted or is an endpoint of
/// the currently highlighted link.
#[must_use]
pub fn node_is_relevant(snapshot: &GraphSnapshot, node: &Node) -> bool {
    node.highlighted
        || snapshot
            .highlighted_link
            .as_ref()
            .is_some_and(|key| key.touches(&node.id))
}

/// Link relevance, by propagation breadth:
///
/// - `Zero`: only the highlighted link itself.
/// - `Two`: the highlighted link, or any link whose both endpoints are
///   flagged. (Both-endpoint flagging covers 2-hop paths because
///   propagation already flagged both ends; it can also over-highlight a
///   link between two flagged nodes off the hover path, kept as is.)
/// - `One`: the highlighted link, a link touching the hovered node
///   directly, or one whose both endpoints are flagged.
#[must_use]
pub fn link_is_relevant(snapshot: &GraphSnapshot, link: &Link) -> bool {
    let key = link.key();
    let identity = snapshot.highlighted_link.as_ref() == Some(&key);
    let flagged = |id: &NodeId| snapshot.nodes.get(id).is_some_and(|n| n.highlighted);
    let both_flagged = flagged(&link.source) && flagged(&link.target);

    match snapshot.config.highlight_degree {
        HighlightDegree::Zero => identity,
        HighlightDegree::Two => identity || both_flagged,
        HighlightDegree::One => {
            let touches_hovered = snapshot
                .highlighted_node
                .as_ref()
                .is_some_and(|hovered| key.touches(hovered));
            identity || touches_hovered || both_flagged
        }
    }
}

/// Resolved render style for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle<'a> {
    pub relevant: bool,
    /// 1.0 for relevant elements (and for everything while no highlight is
    /// active); the configured reduced opacity otherwise.
    pub opacity: f64,
    pub color: &'a str,
}

fn resolve_opacity(relevant: bool, active: bool, config: &GraphConfig) -> f64 {
    if active && !relevant {
        config.highlight_opacity
    } else {
        1.0
    }
}

/// Style for a node under the snapshot's current highlight state.
#[must_use]
pub fn node_style<'a>(snapshot: &'a GraphSnapshot, node: &'a Node) -> ElementStyle<'a> {
    let relevant = node_is_relevant(snapshot, node);
    let base = node.color.as_deref().unwrap_or(&snapshot.config.node.color);
    let color = if relevant {
        snapshot.config.node.highlight_color.resolve(base)
    } else {
        base
    };
    ElementStyle {
        relevant,
        opacity: resolve_opacity(relevant, highlight_active(snapshot), &snapshot.config),
        color,
    }
}

/// Style for a link under the snapshot's current highlight state.
#[must_use]
pub fn link_style<'a>(snapshot: &'a GraphSnapshot, link: &'a Link) -> ElementStyle<'a> {
    let relevant = link_is_relevant(snapshot, link);
    let base = link.color.as_deref().unwrap_or(&snapshot.config.link.color);
    let color = if relevant {
        snapshot.config.link.highlight_color.resolve(base)
    } else {
        base
    };
    ElementStyle {
        relevant,
        opacity: resolve_opacity(relevant, highlight_active(snapshot), &snapshot.config),
        color,
    }
}

/// Effective stroke width for a link: per-link override or the configured
/// base, widened by the link's value when semantic stroke width is on.
#[must_use]
pub fn link_stroke_width(link: &Link, config: &GraphConfig) -> f64 {
    let mut width = link.stroke_width.unwrap_or(config.link.stroke_width);
    if config.link.semantic_stroke_width {
        width += width * link.value / 10.0;
    }
    width
}
