#![forbid(unsafe_code)]

//! Leaf computation and collapse/expand toggling over the matrix.
//!
//! Collapsing never deletes matrix keys; it flips weights between 0 and 1,
//! so applying the same toggle twice restores the original state exactly.
//! Only a clicked node's *direct* leaf neighbors toggle, never transitive
//! descendants.

use std::collections::HashMap;

use smallvec::SmallVec;
use tracing::warn;

use crate::link::{Link, LinkKey};
use crate::matrix::{ConnectivityMatrix, NodeDegrees};
use crate::node::{Node, NodeId};

/// Connection lists are almost always a handful of entries per click.
pub type Connections = SmallVec<[LinkKey; 8]>;

/// Degree semantics, selected once per graph instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeMode {
    Directed,
    Undirected,
}

impl DegreeMode {
    #[must_use]
    pub const fn from_directed(directed: bool) -> Self {
        if directed {
            Self::Directed
        } else {
            Self::Undirected
        }
    }

    /// The leaf predicate for this mode.
    ///
    /// Directed uses `out < 1` where undirected uses `out <= 1`; the
    /// asymmetry is intentional and collapse behavior depends on it.
    #[must_use]
    pub fn is_leaf(self, degrees: NodeDegrees) -> bool {
        match self {
            Self::Directed => degrees.in_degree <= 1.0 && degrees.out_degree < 1.0,
            Self::Undirected => degrees.in_degree <= 1.0 && degrees.out_degree <= 1.0,
        }
    }
}

/// For every neighbor of `root` that satisfies the leaf predicate, a
/// `{source: root, target: neighbor}` pair. A root with no adjacency row
/// (or no qualifying neighbors) yields an empty list.
///
/// Neighbors are taken from the root's matrix row, hidden entries
/// included, and returned in id order so the outcome is deterministic.
#[must_use]
pub fn target_leaf_connections(
    matrix: &ConnectivityMatrix,
    root: &NodeId,
    mode: DegreeMode,
) -> Connections {
    let mut connections: Connections = matrix
        .neighbors(root)
        .filter(|(neighbor, _)| mode.is_leaf(matrix.degrees(neighbor)))
        .map(|(neighbor, _)| LinkKey {
            source: root.clone(),
            target: neighbor.clone(),
        })
        .collect();
    connections.sort_by(|a, b| a.target.cmp(&b.target));
    connections
}

/// Flip every listed connection between hidden and visible.
pub fn toggle_connections(matrix: &mut ConnectivityMatrix, connections: &[LinkKey]) {
    for connection in connections {
        matrix.toggle(&connection.source, &connection.target);
    }
}

/// Re-derive each link's `is_hidden` flag from the current matrix weight
/// between its resolved endpoints.
pub fn refresh_hidden_flags(links: &mut [Link], matrix: &ConnectivityMatrix) {
    for link in links {
        link.is_hidden = matrix.weight(&link.source, &link.target) == 0.0;
    }
}

/// Whether a node should render.
///
/// Orphans are always visible regardless of matrix state; everyone else is
/// visible iff their total degree is non-zero. Unknown ids are reported
/// not-visible, with a warning in debug builds.
#[must_use]
pub fn is_node_visible(
    id: &NodeId,
    nodes: &HashMap<NodeId, Node>,
    matrix: &ConnectivityMatrix,
) -> bool {
    let Some(node) = nodes.get(id) else {
        if cfg!(debug_assertions) {
            warn!(id = %id, "visibility query for unknown node id");
        }
        return false;
    };
    if node.is_orphan {
        return true;
    }
    matrix.degrees(id).total() > 0.0
}

/// What a node-click collapse did.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapseOutcome {
    /// The leaf connections that were toggled.
    pub connections: Connections,
    /// True when the toggle revealed links (first affected connection's
    /// new weight is 1). Callers use this to re-attach interaction
    /// handlers to newly revealed nodes.
    pub expanding: bool,
}

impl CollapseOutcome {
    /// Outcome of a click that found nothing to toggle.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            connections: Connections::new(),
            expanding: false,
        }
    }
}

/// The node-click collapse algorithm: compute leaf connections, toggle
/// them, re-derive link hidden flags, and report the expand/collapse
/// direction.
pub fn toggle_node_collapse(
    matrix: &mut ConnectivityMatrix,
    links: &mut [Link],
    root: &NodeId,
    mode: DegreeMode,
) -> CollapseOutcome {
    let connections = target_leaf_connections(matrix, root, mode);
    toggle_connections(matrix, &connections);
    refresh_hidden_flags(links, matrix);
    let expanding = connections
        .first()
        .is_some_and(|c| matrix.weight(&c.source, &c.target) == 1.0);
    CollapseOutcome {
        connections,
        expanding,
    }
}
