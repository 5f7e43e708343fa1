// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proximity Query Engine
//!
//! Answers "which buildings should the viewer draw around this point".
//!
//! A building is relevant when at least one of its vertices lies within the
//! query radius. Buildings assigned to a model group are replaced by that
//! group's external model, and the model is emitted once per query no matter
//! how many footprints back it.
//!
//! The scan is a plain O(buildings × vertices) loop. One city block is a few
//! hundred footprints; past a few thousand a uniform grid or R-tree over the
//! vertices would be the natural next step.

use crate::building::Building;
use crate::coordinate::Coordinate;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::models::{GroupId, ModelGroup, ModelSubstitution};
use rustc_hash::FxHashSet;
use serde::Serialize;

/// A validated query: a viewpoint and a non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    position: Coordinate,
    distance: f64,
}

impl ProximityQuery {
    pub fn new(position: Coordinate, distance: f64) -> Result<Self> {
        if !position.is_finite() {
            return Err(Error::InvalidQuery(
                "position must have finite x and z".into(),
            ));
        }
        if !distance.is_finite() {
            return Err(Error::InvalidQuery("distance must be a finite number".into()));
        }
        if distance < 0.0 {
            return Err(Error::InvalidQuery("distance must be non-negative".into()));
        }
        Ok(Self { position, distance })
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }
}

/// One entry of a query result.
///
/// Geometry buildings carry their footprint. Substituted buildings carry an
/// empty `nodes` list plus `modelId`/`modelUrl`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseBuilding<'a> {
    pub address: Option<&'a str>,
    pub height: f64,
    pub nodes: &'a [Coordinate],
    #[serde(flatten)]
    pub model: Option<&'a ModelGroup>,
}

impl<'a> ResponseBuilding<'a> {
    fn geometry(building: &'a Building) -> Self {
        Self {
            address: building.address.as_deref(),
            height: building.height,
            nodes: &building.nodes,
            model: None,
        }
    }

    fn substituted(building: &'a Building, model: &'a ModelGroup) -> Self {
        Self {
            address: building.address.as_deref(),
            height: building.height,
            nodes: &[],
            model: Some(model),
        }
    }

    pub fn is_substituted(&self) -> bool {
        self.model.is_some()
    }
}

/// Read-only query context: the loaded dataset and its substitution rules.
///
/// Built once at startup and shared between requests without locking.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    dataset: Dataset,
    models: ModelSubstitution,
}

impl QueryEngine {
    pub fn new(dataset: Dataset, models: ModelSubstitution) -> Self {
        Self { dataset, models }
    }

    /// Buildings with a vertex within `query.distance()` of
    /// `query.position()`, in dataset order, after model substitution.
    pub fn query(&self, query: &ProximityQuery) -> Vec<ResponseBuilding<'_>> {
        let position = query.position();
        let radius = query.distance();

        // Scoped to this call; never shared between queries.
        let mut seen: FxHashSet<GroupId> = FxHashSet::default();

        self.dataset
            .buildings()
            .iter()
            .filter(|building| building.has_vertex_within(&position, radius))
            .filter_map(|building| match self.models.group_for(&building.id) {
                None => Some(ResponseBuilding::geometry(building)),
                Some((group_id, group)) => seen
                    .insert(group_id)
                    .then(|| ResponseBuilding::substituted(building, group)),
            })
            .collect()
    }

    /// The reference point, unchanged.
    pub fn center(&self) -> Coordinate {
        self.dataset.center()
    }

    pub fn building_count(&self) -> usize {
        self.dataset.len()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn models(&self) -> &ModelSubstitution {
        &self.models
    }

    /// Assigned building ids that are not present in the dataset.
    ///
    /// Harmless for queries, but usually a sign of a stale definition.
    pub fn dangling_assignments(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .models
            .assigned_buildings()
            .filter(|id| !self.dataset.contains(id))
            .collect();
        missing.sort_unstable();
        missing
    }
}
