#![forbid(unsafe_code)]

//! Arrow-marker resolution.
//!
//! Marker glyphs come in three sizes so arrowheads stay legible across the
//! zoom range, plus a highlighted variant of each. The id for a given
//! (highlighted, zoom, max-zoom) tuple never changes, and identical zoom
//! levels recur continuously while the user pans and zooms, so resolution
//! is memoized per instance.

use std::collections::HashMap;

use vizgraph_core::GraphConfig;

/// Marker size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerSize {
    Small,
    Medium,
    Large,
}

impl MarkerSize {
    /// Bucket a zoom transform against the configured maximum zoom:
    /// below `max_zoom / 4` is small, below `max_zoom / 2` is medium,
    /// anything past that is large.
    #[must_use]
    pub fn from_zoom(transform: f64, max_zoom: f64) -> Self {
        if transform < max_zoom / 4.0 {
            Self::Small
        } else if transform < max_zoom / 2.0 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MarkerKey {
    highlighted: bool,
    transform_bits: u64,
    max_zoom_bits: u64,
}

/// Instance-scoped memo cache for marker ids.
#[derive(Debug, Clone, Default)]
pub struct MarkerCache {
    cache: HashMap<MarkerKey, String>,
}

impl MarkerCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the marker id for the current zoom and highlight state,
    /// e.g. `"marker-medium"` or `"marker-large-highlighted"`.
    pub fn marker_id(
        &mut self,
        highlighted: bool,
        transform: f64,
        config: &GraphConfig,
    ) -> &str {
        let key = MarkerKey {
            highlighted,
            transform_bits: transform.to_bits(),
            max_zoom_bits: config.max_zoom.to_bits(),
        };
        self.cache
            .entry(key)
            .or_insert_with(|| {
                let size = MarkerSize::from_zoom(transform, config.max_zoom);
                if highlighted {
                    format!("marker-{}-highlighted", size.as_str())
                } else {
                    format!("marker-{}", size.as_str())
                }
            })
            .as_str()
    }

    /// Number of memoized entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
