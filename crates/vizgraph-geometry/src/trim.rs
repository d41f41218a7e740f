#![forbid(unsafe_code)]

//! Link-endpoint trimming.
//!
//! A raw link runs center to center. Drawing it that way buries the line
//! (and any arrowhead) under the node glyphs, so the endpoints are pulled
//! to each node's visual boundary: outward from the source, inward toward
//! the target, with extra clearance at the target for the arrow marker on
//! directed graphs.
//!
//! Only two shapes support optimized positioning: circles (radius derived
//! from the area-based size attribute) and rectangular custom views. Any
//! other shape skips trimming for that endpoint and keeps the raw
//! coordinate, a deliberate safe fallback rather than a failure.

use std::f64::consts::PI;

use vizgraph_core::{GraphConfig, Link, Node};

use crate::vector::{Point, point_in_rect, unit_vector};

/// Circle trim is shrunk slightly so the line visually touches the
/// boundary instead of stopping a hair short of it.
const CIRCLE_TRIM_RATIO: f64 = 0.95;

/// Trimmed endpoints for one link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkEnds {
    pub source: Point,
    pub target: Point,
}

/// Shape resolution for trimming purposes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TrimShape {
    /// A circle with the given area-based size.
    Circle { size: f64 },
    /// A rectangular custom view with explicit dimensions.
    Rect { width: f64, height: f64 },
    /// No optimized positioning; keep raw coordinates.
    Unsupported,
}

fn resolve_trim_shape(node: &Node, config: &GraphConfig) -> TrimShape {
    if node.svg.is_some() || node.view_box.is_some() {
        // Custom views trim as rectangles, but only when their dimensions
        // are known.
        return match node.view_box {
            Some(vb) => TrimShape::Rect {
                width: vb.width,
                height: vb.height,
            },
            None => TrimShape::Unsupported,
        };
    }
    match node.symbol_type.unwrap_or(config.node.symbol_type) {
        vizgraph_core::SymbolType::Circle => TrimShape::Circle {
            size: node.size.unwrap_or(config.node.size),
        },
        _ => TrimShape::Unsupported,
    }
}

/// Distance from the shape's center to its boundary along `direction`,
/// or `None` for unsupported shapes.
fn trim_distance(shape: TrimShape, direction: (f64, f64)) -> Option<f64> {
    match shape {
        TrimShape::Circle { size } => Some(CIRCLE_TRIM_RATIO * (size / PI).sqrt()),
        TrimShape::Rect { width, height } => {
            // Ray-box intersection from the center: the nearest edge wins.
            let tx = if direction.0 == 0.0 {
                f64::INFINITY
            } else {
                (width / 2.0) / direction.0.abs()
            };
            let ty = if direction.1 == 0.0 {
                f64::INFINITY
            } else {
                (height / 2.0) / direction.1.abs()
            };
            let t = tx.min(ty);
            t.is_finite().then_some(t)
        }
        TrimShape::Unsupported => None,
    }
}

/// Clearance left at a directed link's target so the arrow marker does not
/// overlap the node. Markers render in stroke-width units.
#[must_use]
pub fn arrow_clearance(config: &GraphConfig, stroke_width: f64) -> f64 {
    config.link.marker_width * stroke_width
}

/// Trim a link's endpoints to the node boundaries.
///
/// When the link carries break points, each endpoint trims against its
/// nearest adjacent point instead of the opposite raw endpoint, so
/// per-segment geometry stays correct. The total inward offset at the
/// target is clamped to the segment length, and a target that would land
/// inside a rectangular node snaps back to the raw target.
#[must_use]
pub fn normalize_endpoints(
    source: &Node,
    target: &Node,
    link: &Link,
    config: &GraphConfig,
    stroke_width: f64,
) -> LinkEnds {
    let raw_source = Point::new(source.x, source.y);
    let raw_target = Point::new(target.x, target.y);

    let source_toward: Point = link
        .break_points
        .first()
        .map(|&p| Point::from(p))
        .unwrap_or(raw_target);
    let target_from: Point = link
        .break_points
        .last()
        .map(|&p| Point::from(p))
        .unwrap_or(raw_source);

    let mut ends = LinkEnds {
        source: raw_source,
        target: raw_target,
    };

    // Source: move outward along the first segment.
    let source_dir = unit_vector(raw_source, source_toward);
    if source_dir != (0.0, 0.0)
        && let Some(trim) = trim_distance(resolve_trim_shape(source, config), source_dir)
    {
        ends.source = raw_source.advanced(source_dir, trim);
    }

    // Target: move inward along the last segment, plus arrow clearance
    // when directed.
    let target_dir = unit_vector(target_from, raw_target);
    let target_shape = resolve_trim_shape(target, config);
    if target_dir != (0.0, 0.0)
        && let Some(trim) = trim_distance(target_shape, target_dir)
    {
        let clearance = if config.directed {
            arrow_clearance(config, stroke_width)
        } else {
            0.0
        };
        let segment = target_from.distance_to(raw_target);
        let offset = (trim + clearance).min(segment);
        let trimmed = raw_target.advanced(target_dir, -offset);
        ends.target = match target_shape {
            TrimShape::Rect { width, height }
                if point_in_rect(trimmed, raw_target, width, height) =>
            {
                raw_target
            }
            _ => trimmed,
        };
    }

    ends
}
