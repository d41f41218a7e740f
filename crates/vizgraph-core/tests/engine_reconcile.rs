//! End-to-end flows through [`GraphEngine`]: build, collapse, highlight,
//! and reconcile against a fixed fleet of Star Control ships.

use vizgraph_core::{
    ConfigChange, DataChange, GraphConfig, GraphData, GraphEngine, HighlightDegree, LinkSpec,
    NodeId, NodeSpec,
};

fn id(s: &str) -> NodeId {
    NodeId::new(s)
}

const SHIPS: [&str; 10] = [
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
];

const ENGAGEMENTS: [(&str, &str); 8] = [
    ("Androsynth", "Guardian"),
    ("Androsynth", "Chenjesu"),
    ("Androsynth", "Broodhome"),
    ("Androsynth", "Mycon"),
    ("Androsynth", "Podship"),
    ("Androsynth", "Ilwrath"),
    ("Androsynth", "Avenger"),
    ("Eluder", "Chenjesu"),
];

fn fleet_data() -> GraphData {
    GraphData::new(
        SHIPS.iter().map(|s| NodeSpec::new(*s)).collect(),
        ENGAGEMENTS
            .iter()
            .map(|(s, t)| LinkSpec::new(*s, *t))
            .collect(),
    )
}

fn fleet_config() -> GraphConfig {
    GraphConfig {
        directed: true,
        collapsible: true,
        ..GraphConfig::default()
    }
}

#[test]
fn degrees_follow_the_configured_orientation() {
    let directed = GraphEngine::new(&fleet_data(), fleet_config()).unwrap();
    let d = directed.snapshot().matrix.degrees(&id("Androsynth"));
    assert_eq!((d.in_degree, d.out_degree), (0.0, 7.0));

    let undirected = GraphEngine::new(&fleet_data(), GraphConfig::default()).unwrap();
    let d = undirected.snapshot().matrix.degrees(&id("Androsynth"));
    assert_eq!((d.in_degree, d.out_degree), (7.0, 7.0));
    assert!(undirected.snapshot().matrix.is_symmetric());
}

#[test]
fn collapse_expand_cycle_reports_direction_and_restores_state() {
    let mut engine = GraphEngine::new(&fleet_data(), fleet_config()).unwrap();
    let links_before = engine.snapshot().links.clone();
    let matrix_before = engine.snapshot().matrix.clone();

    let collapsed = engine.toggle_node_collapse(&id("Androsynth"));
    assert!(!collapsed.expanding);
    assert_eq!(collapsed.connections.len(), 6);
    assert_eq!(engine.snapshot().render_links().count(), 2);
    assert!(!engine.is_node_visible(&id("Guardian")));
    assert!(engine.is_node_visible(&id("Androsynth")));
    // Orphans render through any amount of collapsing.
    assert!(engine.is_node_visible(&id("Spathi")));

    let expanded = engine.toggle_node_collapse(&id("Androsynth"));
    assert!(expanded.expanding);
    assert_eq!(engine.snapshot().links, links_before);
    assert_eq!(engine.snapshot().matrix, matrix_before);
}

#[test]
fn collapsed_state_survives_cosmetic_reconciles() {
    let mut engine = GraphEngine::new(&fleet_data(), fleet_config()).unwrap();
    engine.toggle_node_collapse(&id("Androsynth"));
    let hidden_before: usize = engine.snapshot().links.iter().filter(|l| l.is_hidden).count();
    assert_eq!(hidden_before, 6);

    let mut recolored = fleet_data();
    recolored.nodes[0].color = Some("#224466".into());
    let (change, _) = engine.reconcile(&recolored, fleet_config()).unwrap();
    assert_eq!(change, DataChange::Cosmetic);
    let hidden_after: usize = engine.snapshot().links.iter().filter(|l| l.is_hidden).count();
    assert_eq!(hidden_after, 6);
}

#[test]
fn topology_rebuild_retains_hidden_flags_for_surviving_links() {
    let mut engine = GraphEngine::new(&fleet_data(), fleet_config()).unwrap();
    engine.toggle_node_collapse(&id("Androsynth"));

    // A new engagement appears; the collapsed wing stays collapsed.
    let mut extended = fleet_data();
    extended.nodes.push(NodeSpec::new("Kohr-Ah"));
    extended
        .links
        .as_mut()
        .unwrap()
        .push(LinkSpec::new("Kohr-Ah", "Eluder"));
    let (change, _) = engine.reconcile(&extended, fleet_config()).unwrap();
    assert_eq!(change, DataChange::Topology);

    let hidden: usize = engine.snapshot().links.iter().filter(|l| l.is_hidden).count();
    assert_eq!(hidden, 6);
    let fresh = engine
        .snapshot()
        .links
        .iter()
        .find(|l| l.source == id("Kohr-Ah"))
        .unwrap();
    assert!(!fresh.is_hidden);
}

#[test]
fn sequence_indices_are_retained_and_extended() {
    let mut engine = GraphEngine::new(&fleet_data(), fleet_config()).unwrap();
    let seq_of = |engine: &GraphEngine, s: &str, t: &str| {
        engine
            .snapshot()
            .links
            .iter()
            .find(|l| l.source == id(s) && l.target == id(t))
            .map(|l| l.seq)
            .unwrap()
    };
    let eluder_seq = seq_of(&engine, "Eluder", "Chenjesu");

    let mut extended = fleet_data();
    extended.nodes.push(NodeSpec::new("Kohr-Ah"));
    extended
        .links
        .as_mut()
        .unwrap()
        .push(LinkSpec::new("Kohr-Ah", "Eluder"));
    engine.reconcile(&extended, fleet_config()).unwrap();

    assert_eq!(seq_of(&engine, "Eluder", "Chenjesu"), eluder_seq);
    assert_eq!(seq_of(&engine, "Kohr-Ah", "Eluder"), 8);
}

#[test]
fn hover_propagation_matches_configured_degree() {
    let zero_config = GraphConfig {
        highlight_degree: HighlightDegree::Zero,
        ..fleet_config()
    };
    let mut engine = GraphEngine::new(&fleet_data(), zero_config).unwrap();
    engine.set_node_highlight(&id("Androsynth"), true);
    let flagged: usize = engine
        .snapshot()
        .nodes
        .values()
        .filter(|n| n.highlighted)
        .count();
    assert_eq!(flagged, 1);

    let mut engine = GraphEngine::new(&fleet_data(), fleet_config()).unwrap();
    engine.set_node_highlight(&id("Androsynth"), true);
    let flagged: usize = engine
        .snapshot()
        .nodes
        .values()
        .filter(|n| n.highlighted)
        .count();
    // The hovered node plus its seven escorts.
    assert_eq!(flagged, 8);
}

#[test]
fn highlight_state_survives_reconcile_until_subject_disappears() {
    let mut engine = GraphEngine::new(&fleet_data(), fleet_config()).unwrap();
    engine.set_node_highlight(&id("Eluder"), true);
    assert_eq!(engine.snapshot().highlighted_node, Some(id("Eluder")));

    let mut extended = fleet_data();
    extended.nodes.push(NodeSpec::new("Kohr-Ah"));
    engine.reconcile(&extended, fleet_config()).unwrap();
    assert_eq!(engine.snapshot().highlighted_node, Some(id("Eluder")));

    // Drop the Eluder entirely; its highlight descriptor goes with it.
    let survivors: Vec<NodeSpec> = SHIPS
        .iter()
        .filter(|s| **s != "Eluder")
        .map(|s| NodeSpec::new(*s))
        .collect();
    let links: Vec<LinkSpec> = ENGAGEMENTS
        .iter()
        .filter(|(s, _)| *s != "Eluder")
        .map(|(s, t)| LinkSpec::new(*s, *t))
        .collect();
    engine
        .reconcile(&GraphData::new(survivors, links), fleet_config())
        .unwrap();
    assert_eq!(engine.snapshot().highlighted_node, None);
}

#[test]
fn physics_config_change_is_reported_without_touching_topology() {
    let mut engine = GraphEngine::new(&fleet_data(), fleet_config()).unwrap();
    let matrix_before = engine.snapshot().matrix.clone();

    let mut tuned = fleet_config();
    tuned.physics.gravity = -300.0;
    let (data_change, config_change) = engine.reconcile(&fleet_data(), tuned).unwrap();
    assert_eq!(data_change, DataChange::None);
    assert_eq!(config_change, ConfigChange::Physics);
    assert_eq!(engine.snapshot().matrix, matrix_before);
}
