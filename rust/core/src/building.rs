// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building footprints as produced by the OSM import stage.

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One building footprint polygon.
///
/// `nodes` is an open ring: the last vertex connects back to the first when
/// the outline is drawn, but the closing vertex is not repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// OSM way id, unique within a dataset.
    pub id: String,
    /// "Street, housenumber" when the source had address tags.
    #[serde(default)]
    pub address: Option<String>,
    /// Vertical extent in scene units.
    pub height: f64,
    pub nodes: Vec<Coordinate>,
}

impl Building {
    pub fn new(
        id: impl Into<String>,
        address: Option<String>,
        height: f64,
        nodes: Vec<Coordinate>,
    ) -> Self {
        Self {
            id: id.into(),
            address,
            height,
            nodes,
        }
    }

    /// Whether any vertex lies within `radius` of `position` (inclusive).
    ///
    /// This is a vertex test, not containment: a footprint that surrounds
    /// `position` without a vertex in range does not match.
    #[inline]
    pub fn has_vertex_within(&self, position: &Coordinate, radius: f64) -> bool {
        self.nodes
            .iter()
            .any(|node| node.distance_to(position) <= radius)
    }

    /// Fewer than two vertices; cannot form an outline.
    pub fn is_degenerate(&self) -> bool {
        self.nodes.len() < 2
    }

    /// Check the invariants the import stage promises.
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(Error::InvalidBuilding {
                id: self.id.clone(),
                reason: format!("height must be a non-negative number, got {}", self.height),
            });
        }

        if let Some(bad) = self.nodes.iter().find(|node| !node.is_finite()) {
            return Err(Error::InvalidCoordinate {
                context: format!("building '{}'", self.id),
                x: bad.x,
                z: bad.z,
            });
        }

        Ok(())
    }
}
