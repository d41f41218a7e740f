#![forbid(unsafe_code)]

//! The graph state manager: validation, reconciliation, and the snapshot.
//!
//! [`GraphEngine`] is the single writer over the long-lived state. Every
//! operation runs synchronously to completion inside one host event, and
//! state is replaced wholesale (copy-on-write over the snapshot) rather
//! than mutated under a reader. A failed build returns an error and leaves
//! the previous snapshot untouched.
//!
//! Reconciliation is a targeted whitelist merge: incoming specs re-author
//! every attribute, while the fields owned by the external simulation
//! (`x`, `y`, `vx`, `vy`, `fx`, `fy`, `sim_index`) and by the highlight
//! propagator (`highlighted`) are carried forward for ids that survive.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, warn};

use crate::collapse::{self, CollapseOutcome, DegreeMode};
use crate::config::{ConfigChange, GraphConfig};
use crate::error::GraphError;
use crate::highlight;
use crate::link::{GraphData, Link, LinkKey, LinkSpec};
use crate::matrix::ConnectivityMatrix;
use crate::node::{Node, NodeId};

const COMPONENT: &str = "GraphEngine";

/// What an incoming data payload changed, as a single dispatch point.
///
/// Only [`Topology`](DataChange::Topology) triggers full reconciliation and
/// a matrix rebuild; [`Cosmetic`](DataChange::Cosmetic) updates reuse the
/// existing identity and physics bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataChange {
    None,
    /// Same node/link sets; some authored attribute differs.
    Cosmetic,
    /// Node/link count, id set, or (source, target) set differs.
    /// Positional fields are ignored for this comparison.
    Topology,
}

/// The render-ready projection of graph state.
///
/// Everything outside [`GraphEngine`] treats a snapshot as immutable; the
/// one sanctioned exception is the external simulation writing positions
/// between renders (see [`GraphEngine::apply_positions`]).
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSnapshot {
    pub nodes: HashMap<NodeId, Node>,
    pub links: Vec<Link>,
    pub matrix: ConnectivityMatrix,
    pub highlighted_node: Option<NodeId>,
    pub highlighted_link: Option<LinkKey>,
    pub config: GraphConfig,
}

impl GraphSnapshot {
    /// Nodes the presentation layer should draw. Collapsible graphs filter
    /// out collapsed (degree-zero, non-orphan) nodes; otherwise every node
    /// renders.
    pub fn render_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|node| {
            !self.config.collapsible
                || collapse::is_node_visible(&node.id, &self.nodes, &self.matrix)
        })
    }

    /// Links the presentation layer should draw. Collapsible graphs filter
    /// out hidden links.
    pub fn render_links(&self) -> impl Iterator<Item = &Link> {
        self.links
            .iter()
            .filter(|link| !self.config.collapsible || !link.is_hidden)
    }
}

/// Top-level orchestrator and sole owner of mutable graph state.
#[derive(Debug, Clone)]
pub struct GraphEngine {
    snapshot: GraphSnapshot,
    degree_mode: DegreeMode,
}

impl GraphEngine {
    /// Build the initial graph state.
    ///
    /// # Errors
    ///
    /// - [`GraphErrorKind::InsufficientData`](crate::error::GraphErrorKind::InsufficientData)
    ///   when no nodes are provided.
    /// - [`GraphErrorKind::InvalidLink`](crate::error::GraphErrorKind::InvalidLink)
    ///   when a link references an unknown node id.
    /// - [`GraphErrorKind::MalformedLinkValue`](crate::error::GraphErrorKind::MalformedLinkValue)
    ///   when a link value is not finite.
    pub fn new(data: &GraphData, config: GraphConfig) -> Result<Self, GraphError> {
        validate(data)?;
        let degree_mode = DegreeMode::from_directed(config.directed);
        let snapshot = build_snapshot(data, config, None, false);
        Ok(Self {
            snapshot,
            degree_mode,
        })
    }

    /// The current render-ready state.
    #[must_use]
    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.snapshot.config
    }

    /// Reconcile an incoming payload and configuration against the current
    /// state and swap in the resulting snapshot.
    ///
    /// Returns the two independent change signals: what the data did and
    /// what the configuration did. Hosts re-bind forces/drag/zoom only on
    /// [`ConfigChange::Physics`], and re-attach element handlers only on
    /// [`DataChange::Topology`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`GraphEngine::new`]; on error the current
    /// snapshot is left untouched.
    pub fn reconcile(
        &mut self,
        data: &GraphData,
        config: GraphConfig,
    ) -> Result<(DataChange, ConfigChange), GraphError> {
        validate(data)?;

        let data_change = detect_data_change(&self.snapshot, data);
        let config_change = self.snapshot.config.diff(&config);
        let directed_flipped = self.snapshot.config.directed != config.directed;
        let collapse_turned_off = self.snapshot.config.collapsible && !config.collapsible;
        let force_visible = directed_flipped || collapse_turned_off;

        debug!(
            ?data_change,
            ?config_change,
            force_visible,
            "reconciling graph state"
        );

        if data_change == DataChange::Topology || force_visible {
            self.snapshot = build_snapshot(data, config, Some(&self.snapshot), force_visible);
        } else {
            let mut next = self.snapshot.clone();
            if data_change == DataChange::Cosmetic {
                apply_cosmetics(&mut next, data);
            }
            next.config = config;
            self.snapshot = next;
        }

        self.degree_mode = DegreeMode::from_directed(self.snapshot.config.directed);
        Ok((data_change, config_change))
    }

    /// Node-click collapse/expand: toggle the clicked node's direct leaf
    /// connections and swap in the updated snapshot.
    ///
    /// A no-op (with an unchanged snapshot) when the graph is not
    /// collapsible or the node has no leaf-qualifying neighbors.
    pub fn toggle_node_collapse(&mut self, id: &NodeId) -> CollapseOutcome {
        if !self.snapshot.config.collapsible {
            debug!(id = %id, "ignoring collapse toggle on non-collapsible graph");
            return CollapseOutcome::noop();
        }
        let mut next = self.snapshot.clone();
        let outcome =
            collapse::toggle_node_collapse(&mut next.matrix, &mut next.links, id, self.degree_mode);
        self.snapshot = next;
        outcome
    }

    /// Node-hover highlight set/unset, with propagation per the configured
    /// highlight degree.
    pub fn set_node_highlight(&mut self, id: &NodeId, value: bool) {
        let mut next = self.snapshot.clone();
        next.highlighted_node = highlight::set_highlight(
            &mut next.nodes,
            &next.matrix,
            next.config.highlight_degree,
            id,
            value,
        );
        self.snapshot = next;
    }

    /// Link-hover highlight set/unset.
    pub fn set_link_highlight(&mut self, source: &NodeId, target: &NodeId, value: bool) {
        let mut next = self.snapshot.clone();
        next.highlighted_link = value.then(|| LinkKey {
            source: source.clone(),
            target: target.clone(),
        });
        self.snapshot = next;
    }

    /// Clear every highlight flag and both highlight descriptors.
    pub fn clear_highlights(&mut self) {
        let mut next = self.snapshot.clone();
        for node in next.nodes.values_mut() {
            node.highlighted = false;
        }
        next.highlighted_node = None;
        next.highlighted_link = None;
        self.snapshot = next;
    }

    /// Accept position writes from the external simulation.
    ///
    /// This is the producer boundary: the simulation owns `x`/`y` between
    /// snapshots, so these writes land directly on the current snapshot.
    /// Unknown ids are skipped.
    pub fn apply_positions<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = (NodeId, f64, f64)>,
    {
        for (id, x, y) in positions {
            if let Some(node) = self.snapshot.nodes.get_mut(&id) {
                node.x = x;
                node.y = y;
            }
        }
    }

    /// Whether a node should render right now. Always true when the graph
    /// is not collapsible.
    #[must_use]
    pub fn is_node_visible(&self, id: &NodeId) -> bool {
        if !self.snapshot.config.collapsible {
            return true;
        }
        collapse::is_node_visible(id, &self.snapshot.nodes, &self.snapshot.matrix)
    }
}

/// Fatal input validation. Runs before any state is touched.
fn validate(data: &GraphData) -> Result<(), GraphError> {
    if data.nodes.is_empty() {
        return Err(GraphError::insufficient_data(COMPONENT));
    }
    let ids: HashSet<&NodeId> = data.nodes.iter().map(|spec| &spec.id).collect();
    for link in links_of(data) {
        if !ids.contains(&link.source) {
            return Err(GraphError::invalid_link(COMPONENT, link.source.clone()));
        }
        if !ids.contains(&link.target) {
            return Err(GraphError::invalid_link(COMPONENT, link.target.clone()));
        }
        if !link.weight().is_finite() {
            return Err(GraphError::malformed_link_value(
                COMPONENT,
                link.source.clone(),
                link.target.clone(),
                link.weight(),
            ));
        }
    }
    Ok(())
}

fn links_of(data: &GraphData) -> &[LinkSpec] {
    data.links.as_deref().unwrap_or(&[])
}

/// Build a complete snapshot from validated input, merging forward the
/// previous snapshot's retained fields where ids/keys survive.
fn build_snapshot(
    data: &GraphData,
    config: GraphConfig,
    previous: Option<&GraphSnapshot>,
    force_visible: bool,
) -> GraphSnapshot {
    if data.links.is_none() {
        warn!("no links array provided; defaulting to an empty link list");
    }
    let link_specs = links_of(data);

    // Nodes: authored attributes from the spec, simulation-owned fields
    // from the previous incarnation when one exists.
    let mut nodes: HashMap<NodeId, Node> = HashMap::with_capacity(data.nodes.len());
    for spec in &data.nodes {
        let node = match previous.and_then(|p| p.nodes.get(&spec.id)) {
            Some(prev) => Node::merged(spec, prev),
            None => Node::seeded(spec),
        };
        nodes.insert(node.id.clone(), node);
    }

    // Links: retain sequence index and hidden flag for (source, target)
    // matches; parallel links match in order of appearance.
    let mut retained: HashMap<LinkKey, VecDeque<&Link>> = HashMap::new();
    if let Some(p) = previous {
        for link in &p.links {
            retained.entry(link.key()).or_default().push_back(link);
        }
    }
    let mut next_seq = previous
        .map(|p| p.links.iter().map(|l| l.seq + 1).max().unwrap_or(0))
        .unwrap_or(0);
    let mut links: Vec<Link> = Vec::with_capacity(link_specs.len());
    for spec in link_specs {
        let prev = retained.get_mut(&spec.key()).and_then(VecDeque::pop_front);
        let link = match prev {
            Some(prev) => {
                let mut link = Link::from_spec(spec, prev.seq);
                link.is_hidden = !force_visible && prev.is_hidden;
                link
            }
            None => {
                let link = Link::from_spec(spec, next_seq);
                next_seq += 1;
                link
            }
        };
        links.push(link);
    }

    // Orphan status is derived from the full link list, hidden included.
    for node in nodes.values_mut() {
        node.is_orphan = !links.iter().any(|l| l.source == node.id || l.target == node.id);
    }

    let node_ids: Vec<NodeId> = nodes.keys().cloned().collect();
    let matrix = ConnectivityMatrix::from_links(links.iter(), node_ids.iter(), config.directed);

    // Highlight descriptors survive only while their subjects do.
    let highlighted_node = previous
        .and_then(|p| p.highlighted_node.clone())
        .filter(|id| nodes.contains_key(id));
    let highlighted_link = previous
        .and_then(|p| p.highlighted_link.clone())
        .filter(|key| links.iter().any(|l| l.key() == *key));

    GraphSnapshot {
        nodes,
        links,
        matrix,
        highlighted_node,
        highlighted_link,
        config,
    }
}

/// Two independent questions, answered in order: did the topology change
/// (counts, id set, (source, target) set; positions ignored)? If not, did
/// any authored attribute change?
fn detect_data_change(current: &GraphSnapshot, data: &GraphData) -> DataChange {
    let incoming_ids: HashSet<&NodeId> = data.nodes.iter().map(|spec| &spec.id).collect();
    if incoming_ids.len() != current.nodes.len()
        || incoming_ids.iter().any(|id| !current.nodes.contains_key(*id))
    {
        return DataChange::Topology;
    }

    let link_specs = links_of(data);
    if link_specs.len() != current.links.len() {
        return DataChange::Topology;
    }
    let mut current_keys: HashMap<LinkKey, usize> = HashMap::new();
    for link in &current.links {
        *current_keys.entry(link.key()).or_insert(0) += 1;
    }
    for spec in link_specs {
        match current_keys.get_mut(&spec.key()) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return DataChange::Topology,
        }
    }

    let node_cosmetics = data.nodes.iter().any(|spec| {
        current
            .nodes
            .get(&spec.id)
            .is_some_and(|node| node.cosmetics_differ(spec))
    });
    if node_cosmetics {
        return DataChange::Cosmetic;
    }

    let mut remaining: HashMap<LinkKey, VecDeque<&Link>> = HashMap::new();
    for link in &current.links {
        remaining.entry(link.key()).or_default().push_back(link);
    }
    for spec in link_specs {
        if let Some(link) = remaining.get_mut(&spec.key()).and_then(VecDeque::pop_front)
            && link.cosmetics_differ(spec)
        {
            return DataChange::Cosmetic;
        }
    }

    DataChange::None
}

/// Apply a cosmetic-only payload in place: authored attributes refresh,
/// identity and simulation bindings stay.
fn apply_cosmetics(snapshot: &mut GraphSnapshot, data: &GraphData) {
    for spec in &data.nodes {
        if let Some(node) = snapshot.nodes.get_mut(&spec.id) {
            node.apply_cosmetics(spec);
        }
    }
    let mut by_key: HashMap<LinkKey, VecDeque<usize>> = HashMap::new();
    for (idx, link) in snapshot.links.iter().enumerate() {
        by_key.entry(link.key()).or_default().push_back(idx);
    }
    for spec in links_of(data) {
        if let Some(idx) = by_key.get_mut(&spec.key()).and_then(VecDeque::pop_front) {
            snapshot.links[idx].apply_cosmetics(spec);
        }
    }
}
