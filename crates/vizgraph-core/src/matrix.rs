#![forbid(unsafe_code)]

//! Sparse connectivity matrix: node id → neighbor id → edge weight.
//!
//! A weight of 0 means "present but currently hidden/collapsed", not
//! absence; keys are never deleted by collapse operations, which is what
//! makes expansion always possible. Undirected matrices are mirrored
//! (`m[u][v] == m[v][u]` for all u, v); directed ones are asymmetric.

use std::collections::HashMap;

use crate::link::Link;
use crate::node::NodeId;

/// In/out degree pair for one node.
///
/// Degrees are weight sums, so a link with value 2 contributes 2.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeDegrees {
    pub in_degree: f64,
    pub out_degree: f64,
}

impl NodeDegrees {
    /// Combined degree; zero exactly for nodes with no live connections.
    #[must_use]
    pub fn total(self) -> f64 {
        self.in_degree + self.out_degree
    }
}

/// The adjacency structure behind degree queries, collapse toggling, and
/// highlight propagation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectivityMatrix {
    adjacency: HashMap<NodeId, HashMap<NodeId, f64>>,
    directed: bool,
}

impl ConnectivityMatrix {
    /// An empty matrix with the given orientation.
    #[must_use]
    pub fn new(directed: bool) -> Self {
        Self {
            adjacency: HashMap::new(),
            directed,
        }
    }

    /// Build from render-ready links.
    ///
    /// Every id in `nodes` gets at least an empty adjacency row so degree
    /// queries never fail on link-less nodes. Hidden links contribute
    /// weight 0; visible ones their value. Undirected builds mirror every
    /// entry.
    #[must_use]
    pub fn from_links<'a, L, N>(links: L, nodes: N, directed: bool) -> Self
    where
        L: IntoIterator<Item = &'a Link>,
        N: IntoIterator<Item = &'a NodeId>,
    {
        let mut matrix = Self::new(directed);
        for id in nodes {
            matrix.adjacency.entry(id.clone()).or_default();
        }
        for link in links {
            let weight = if link.is_hidden { 0.0 } else { link.value };
            matrix.set(&link.source, &link.target, weight);
        }
        matrix
    }

    /// Whether this matrix uses directed semantics.
    #[must_use]
    pub const fn directed(&self) -> bool {
        self.directed
    }

    /// Number of nodes with an adjacency row.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// True when the node has an adjacency row (even an empty one).
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// The weight between two nodes; 0 when the entry is absent or hidden.
    #[must_use]
    pub fn weight(&self, source: &NodeId, target: &NodeId) -> f64 {
        self.adjacency
            .get(source)
            .and_then(|row| row.get(target))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set an entry, mirroring when undirected. Rows are created on demand
    /// for both endpoints, so the target always has at least an empty row.
    pub fn set(&mut self, source: &NodeId, target: &NodeId, weight: f64) {
        self.adjacency
            .entry(source.clone())
            .or_default()
            .insert(target.clone(), weight);
        let mirror = self.adjacency.entry(target.clone()).or_default();
        if !self.directed {
            mirror.insert(source.clone(), weight);
        }
    }

    /// Flip one connection between hidden (0) and visible (1), mirroring
    /// when undirected. Absent entries are initialized to 0 first, so the
    /// first toggle of a never-seen pair reveals it.
    ///
    /// This is the sole collapse/expand mutation primitive; applying it
    /// twice with the same pair restores the original state.
    pub fn toggle(&mut self, source: &NodeId, target: &NodeId) {
        let entry = self
            .adjacency
            .entry(source.clone())
            .or_default()
            .entry(target.clone())
            .or_insert(0.0);
        let flipped = if *entry == 0.0 { 1.0 } else { 0.0 };
        *entry = flipped;
        if !self.directed {
            self.adjacency
                .entry(target.clone())
                .or_default()
                .insert(source.clone(), flipped);
        }
    }

    /// Iterate a node's row: (neighbor, weight) pairs, hidden included.
    pub fn neighbors(&self, id: &NodeId) -> impl Iterator<Item = (&NodeId, f64)> {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(|row| row.iter().map(|(n, w)| (n, *w)))
    }

    /// Sum of the node's row weights.
    #[must_use]
    pub fn out_degree(&self, id: &NodeId) -> f64 {
        self.adjacency
            .get(id)
            .map(|row| row.values().sum())
            .unwrap_or(0.0)
    }

    /// Sum of the node's column weights across all rows.
    #[must_use]
    pub fn in_degree(&self, id: &NodeId) -> f64 {
        self.adjacency
            .values()
            .filter_map(|row| row.get(id))
            .sum()
    }

    /// Both degrees at once. Equal when undirected, by construction.
    #[must_use]
    pub fn degrees(&self, id: &NodeId) -> NodeDegrees {
        NodeDegrees {
            in_degree: self.in_degree(id),
            out_degree: self.out_degree(id),
        }
    }

    /// `m[u][v] == m[v][u]` for every entry. Always true for undirected
    /// matrices; exposed so tests and debug assertions can verify it.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.adjacency.iter().all(|(u, row)| {
            row.iter().all(|(v, w)| self.weight(v, u) == *w)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ConnectivityMatrix;
    use crate::link::{Link, LinkSpec};
    use crate::node::NodeId;

    fn id(s: &str) -> NodeId {
        NodeId::new(s)
    }

    /// Star Control ships: Androsynth fields seven escorts and receives
    /// nothing; the Eluder harasses the Chenjesu.
    fn fleet_links() -> Vec<Link> {
        let pairs = [
            ("Androsynth", "Guardian"),
            ("Androsynth", "Chenjesu"),
            ("Androsynth", "Broodhome"),
            ("Androsynth", "Mycon"),
            ("Androsynth", "Podship"),
            ("Androsynth", "Ilwrath"),
            ("Androsynth", "Avenger"),
            ("Eluder", "Chenjesu"),
        ];
        pairs
            .iter()
            .enumerate()
            .map(|(seq, (s, t))| Link::from_spec(&LinkSpec::new(*s, *t), seq))
            .collect()
    }

    fn fleet_ids() -> Vec<NodeId> {
        [
            "Androsynth",
            "Guardian",
            "Chenjesu",
            "Broodhome",
            "Mycon",
            "Podship",
            "Ilwrath",
            "Avenger",
            "Eluder",
            "Spathi",
        ]
        .iter()
        .map(|s| id(s))
        .collect()
    }

    fn fleet_matrix(directed: bool) -> ConnectivityMatrix {
        let links = fleet_links();
        let ids = fleet_ids();
        ConnectivityMatrix::from_links(links.iter(), ids.iter(), directed)
    }

    // --- degrees ---

    #[test]
    fn androsynth_degrees_directed() {
        let m = fleet_matrix(true);
        let d = m.degrees(&id("Androsynth"));
        assert_eq!(d.in_degree, 0.0);
        assert_eq!(d.out_degree, 7.0);
    }

    #[test]
    fn androsynth_degrees_undirected() {
        let m = fleet_matrix(false);
        let d = m.degrees(&id("Androsynth"));
        assert_eq!(d.in_degree, 7.0);
        assert_eq!(d.out_degree, 7.0);
    }

    #[test]
    fn chenjesu_counts_both_attackers() {
        let m = fleet_matrix(true);
        let d = m.degrees(&id("Chenjesu"));
        assert_eq!(d.in_degree, 2.0);
        assert_eq!(d.out_degree, 0.0);
    }

    #[test]
    fn linkless_node_has_an_empty_row() {
        let m = fleet_matrix(true);
        assert!(m.contains(&id("Spathi")));
        assert_eq!(m.degrees(&id("Spathi")).total(), 0.0);
    }

    // --- symmetry ---

    #[test]
    fn undirected_matrix_is_mirrored() {
        let m = fleet_matrix(false);
        assert!(m.is_symmetric());
        assert_eq!(
            m.weight(&id("Guardian"), &id("Androsynth")),
            m.weight(&id("Androsynth"), &id("Guardian")),
        );
    }

    #[test]
    fn directed_matrix_keeps_one_way_edges() {
        let m = fleet_matrix(true);
        assert_eq!(m.weight(&id("Androsynth"), &id("Guardian")), 1.0);
        assert_eq!(m.weight(&id("Guardian"), &id("Androsynth")), 0.0);
    }

    // --- hidden links ---

    #[test]
    fn hidden_links_contribute_zero_weight() {
        let mut links = fleet_links();
        links[0].is_hidden = true;
        let ids = fleet_ids();
        let m = ConnectivityMatrix::from_links(links.iter(), ids.iter(), true);
        assert_eq!(m.weight(&id("Androsynth"), &id("Guardian")), 0.0);
        assert_eq!(m.out_degree(&id("Androsynth")), 6.0);
    }

    #[test]
    fn weighted_links_sum_into_degrees() {
        let spec = LinkSpec {
            value: Some(3.0),
            ..LinkSpec::new("a", "b")
        };
        let links = vec![Link::from_spec(&spec, 0)];
        let ids = vec![id("a"), id("b")];
        let m = ConnectivityMatrix::from_links(links.iter(), ids.iter(), false);
        assert_eq!(m.out_degree(&id("a")), 3.0);
        assert_eq!(m.in_degree(&id("b")), 3.0);
    }

    // --- toggle ---

    #[test]
    fn toggle_is_an_involution() {
        let mut m = fleet_matrix(false);
        let before = m.clone();
        m.toggle(&id("Androsynth"), &id("Guardian"));
        assert_eq!(m.weight(&id("Androsynth"), &id("Guardian")), 0.0);
        m.toggle(&id("Androsynth"), &id("Guardian"));
        assert_eq!(m, before);
    }

    #[test]
    fn toggle_mirrors_when_undirected() {
        let mut m = fleet_matrix(false);
        m.toggle(&id("Androsynth"), &id("Guardian"));
        assert_eq!(m.weight(&id("Guardian"), &id("Androsynth")), 0.0);
        assert!(m.is_symmetric());
    }

    #[test]
    fn toggle_initializes_absent_entries() {
        let mut m = ConnectivityMatrix::new(true);
        m.toggle(&id("a"), &id("b"));
        // Absent → initialized to 0 → flipped to 1.
        assert_eq!(m.weight(&id("a"), &id("b")), 1.0);
    }
}
