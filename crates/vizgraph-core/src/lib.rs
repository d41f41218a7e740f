#![forbid(unsafe_code)]

//! Host-agnostic node-link graph engine: topology, collapse, highlight,
//! and reconciliation.
//!
//! This crate owns everything about an interactive graph view that is not
//! drawing: the connectivity matrix, degree/leaf computation and
//! collapse/expand toggling, hover-driven highlight propagation, and the
//! validated, reconciled snapshot a presentation layer renders from. The
//! physics simulation, gesture capture, and SVG/DOM construction live in
//! the host; the engine's contracts with them are the snapshot it hands
//! out and the position write-back it accepts between renders.
//!
//! The companion `vizgraph-geometry` crate turns snapshots into drawable
//! link paths and marker identifiers.

pub mod collapse;
pub mod config;
pub mod error;
pub mod highlight;
pub mod link;
pub mod matrix;
pub mod node;
pub mod state;

pub use collapse::{CollapseOutcome, DegreeMode};
pub use config::{
    ConfigChange, GraphConfig, HighlightColor, HighlightDegree, LinkConfig, NodeConfig,
    PhysicsConfig,
};
pub use error::{GraphError, GraphErrorKind};
pub use link::{GraphData, Link, LinkCurveType, LinkKey, LinkSpec};
pub use matrix::{ConnectivityMatrix, NodeDegrees};
pub use node::{Node, NodeId, NodeSpec, SymbolType, ViewBox};
pub use state::{DataChange, GraphEngine, GraphSnapshot};
