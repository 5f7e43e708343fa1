// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model Substitution
//!
//! Some structures in the block have a curated 3D model that looks better
//! than an extruded footprint. Those structures are often split across
//! several OSM ways, so the definition maps any number of building ids to a
//! single model group:
//!
//! ```json
//! {
//!   "groups": [{ "modelId": "1", "modelUrl": "/itc.fbx" }],
//!   "assignments": { "49181742": "1", "49181743": "1" }
//! }
//! ```
//!
//! The mapping is validated once at startup and never changes afterwards.

use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// An external 3D asset that replaces one or more footprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelGroup {
    pub model_id: String,
    pub model_url: String,
}

impl ModelGroup {
    pub fn new(model_id: impl Into<String>, model_url: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            model_url: model_url.into(),
        }
    }
}

/// Index of a group inside a [`ModelSubstitution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

/// On-disk shape of the substitution definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelDefinition {
    #[serde(default)]
    pub groups: Vec<ModelGroup>,
    /// `(building id, modelId)` pairs in file order.
    ///
    /// Kept as a list so a building listed twice is reported instead of the
    /// later entry silently replacing the earlier one.
    #[serde(default, deserialize_with = "assignment_pairs")]
    pub assignments: Vec<(String, String)>,
}

impl ModelDefinition {
    pub fn assign(&mut self, building: impl Into<String>, model_id: impl Into<String>) {
        self.assignments.push((building.into(), model_id.into()));
    }
}

fn assignment_pairs<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of building id to modelId")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, String>()? {
                pairs.push(entry);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

/// Validated building id -> model group mapping.
#[derive(Debug, Clone, Default)]
pub struct ModelSubstitution {
    groups: Vec<ModelGroup>,
    by_building: FxHashMap<String, GroupId>,
}

impl ModelSubstitution {
    /// No substitutions; every building keeps its footprint.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate a definition.
    ///
    /// Fails if two groups share a `modelId`, a building is assigned more
    /// than once, or an assignment names a group that does not exist.
    pub fn from_definition(definition: ModelDefinition) -> Result<Self> {
        let mut index: FxHashMap<&str, GroupId> = FxHashMap::default();
        for (i, group) in definition.groups.iter().enumerate() {
            if index.insert(group.model_id.as_str(), GroupId(i)).is_some() {
                return Err(Error::DuplicateModelGroup(group.model_id.clone()));
            }
        }

        let mut by_building = FxHashMap::default();
        by_building.reserve(definition.assignments.len());
        for (building, model_id) in &definition.assignments {
            let group = index.get(model_id.as_str()).copied().ok_or_else(|| {
                Error::UndefinedModelGroup {
                    building: building.clone(),
                    model_id: model_id.clone(),
                }
            })?;
            if by_building.insert(building.clone(), group).is_some() {
                return Err(Error::DuplicateAssignment(building.clone()));
            }
        }

        Ok(Self {
            groups: definition.groups,
            by_building,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let definition: ModelDefinition =
            serde_json::from_str(json).map_err(|e| Error::parse("model definition", e))?;
        Self::from_definition(definition)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let definition: ModelDefinition = serde_json::from_str(&json)
            .map_err(|e| Error::parse(path.display().to_string(), e))?;
        Self::from_definition(definition)
    }

    /// Group assigned to a building, if any.
    #[inline]
    pub fn group_for(&self, building_id: &str) -> Option<(GroupId, &ModelGroup)> {
        self.by_building
            .get(building_id)
            .map(|&id| (id, &self.groups[id.0]))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn assignment_count(&self) -> usize {
        self.by_building.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_building.is_empty()
    }

    /// Assigned building ids, in no particular order.
    pub fn assigned_buildings(&self) -> impl Iterator<Item = &str> {
        self.by_building.keys().map(String::as_str)
    }
}
