#![forbid(unsafe_code)]

//! Node identity and the two node representations.
//!
//! Callers author [`NodeSpec`]s; the engine turns them into render-ready
//! [`Node`]s. The split matters for reconciliation: specs carry what the
//! caller is allowed to say, nodes additionally carry the simulation-owned
//! fields (`x`, `y`, `vx`, `vy`, `fx`, `fy`, `sim_index`, `highlighted`)
//! that survive data updates via a whitelist merge.

use std::fmt;

/// A node identifier.
///
/// Ids are stringified consistently at the boundary; under the `serde`
/// feature, numeric ids in the input are coerced to their decimal string
/// form so that `1` and `"1"` name the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NodeId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = NodeId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or numeric node id")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<NodeId, E> {
                Ok(NodeId::new(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<NodeId, E> {
                Ok(NodeId::new(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<NodeId, E> {
                Ok(NodeId::new(v.to_string()))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<NodeId, E> {
                Ok(NodeId::new(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Node shape vocabulary.
///
/// Only [`Circle`](SymbolType::Circle) (and rectangular custom views, see
/// [`ViewBox`]) support optimized link-endpoint positioning; the geometry
/// layer falls back to untrimmed coordinates for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SymbolType {
    #[default]
    Circle,
    Square,
    Triangle,
    Diamond,
    Star,
    Cross,
    Wye,
}

impl SymbolType {
    /// String form used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::Diamond => "diamond",
            Self::Star => "star",
            Self::Cross => "cross",
            Self::Wye => "wye",
        }
    }
}

/// Dimensions of a rectangular custom node view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewBox {
    pub width: f64,
    pub height: f64,
}

/// A caller-authored node description.
///
/// `fx`/`fy` pin the node for the external simulation and take precedence
/// over `x`/`y` when seeding an unseen node's position.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NodeSpec {
    pub id: NodeId,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub fx: Option<f64>,
    pub fy: Option<f64>,
    /// Area-based size override (see the circle-trim derivation in the
    /// geometry crate).
    pub size: Option<f64>,
    pub color: Option<String>,
    pub symbol_type: Option<SymbolType>,
    /// Custom image, rendered by the host. Requires `view_box` for
    /// optimized link trimming.
    pub svg: Option<String>,
    pub view_box: Option<ViewBox>,
    pub label_text: Option<String>,
}

impl NodeSpec {
    /// A spec with only an id; everything else defaults.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self(String::new())
    }
}

/// A render-ready node.
///
/// `x`, `y`, `vx`, `vy`, `fx`, `fy` and `sim_index` are jointly owned with
/// the external physics simulation, which writes them between snapshots;
/// `highlighted` is owned by the highlight propagator. All of these survive
/// reconciliation when a node with the same id reappears.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub fx: Option<f64>,
    pub fy: Option<f64>,
    pub highlighted: bool,
    /// Derived at build time: true iff the node has zero total degree.
    /// Orphans are always visible regardless of matrix state.
    pub is_orphan: bool,
    /// Insertion index assigned by the external simulation, if any.
    pub sim_index: Option<usize>,
    pub size: Option<f64>,
    pub color: Option<String>,
    pub symbol_type: Option<SymbolType>,
    pub svg: Option<String>,
    pub view_box: Option<ViewBox>,
    pub label_text: Option<String>,
}

impl Node {
    /// Seed a node from a spec, with no prior state to merge.
    ///
    /// Unseen nodes start at (0, 0) unless the spec supplies coordinates;
    /// forced (`fx`/`fy`) coordinates win over plain ones.
    #[must_use]
    pub fn seeded(spec: &NodeSpec) -> Self {
        Self {
            id: spec.id.clone(),
            x: spec.fx.or(spec.x).unwrap_or(0.0),
            y: spec.fy.or(spec.y).unwrap_or(0.0),
            vx: 0.0,
            vy: 0.0,
            fx: spec.fx,
            fy: spec.fy,
            highlighted: false,
            is_orphan: false,
            sim_index: None,
            size: spec.size,
            color: spec.color.clone(),
            symbol_type: spec.symbol_type,
            svg: spec.svg.clone(),
            view_box: spec.view_box,
            label_text: spec.label_text.clone(),
        }
    }

    /// Rebuild a node from a fresh spec, carrying forward the
    /// simulation-owned fields of its previous incarnation.
    ///
    /// This is a targeted whitelist merge, not identity sharing: the new
    /// node takes every authored attribute from `spec` and only
    /// `{x, y, vx, vy, fx, fy, sim_index, highlighted}` from `previous`.
    #[must_use]
    pub(crate) fn merged(spec: &NodeSpec, previous: &Node) -> Self {
        Self {
            x: previous.x,
            y: previous.y,
            vx: previous.vx,
            vy: previous.vy,
            fx: previous.fx,
            fy: previous.fy,
            highlighted: previous.highlighted,
            sim_index: previous.sim_index,
            ..Self::seeded(spec)
        }
    }

    /// True when the spec differs from this node in any non-positional,
    /// non-simulation-owned field.
    #[must_use]
    pub(crate) fn cosmetics_differ(&self, spec: &NodeSpec) -> bool {
        self.size != spec.size
            || self.color != spec.color
            || self.symbol_type != spec.symbol_type
            || self.svg != spec.svg
            || self.view_box != spec.view_box
            || self.label_text != spec.label_text
    }

    /// Overwrite the authored attributes from a spec, leaving the
    /// simulation-owned fields alone.
    pub(crate) fn apply_cosmetics(&mut self, spec: &NodeSpec) {
        self.size = spec.size;
        self.color = spec.color.clone();
        self.symbol_type = spec.symbol_type;
        self.svg = spec.svg.clone();
        self.view_box = spec.view_box;
        self.label_text = spec.label_text.clone();
    }
}
