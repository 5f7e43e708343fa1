// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dataset Loader
//!
//! Reads the two records written by the import stage:
//!
//! - `buildings.json`: `{ "buildings": [{ "id", "address", "height", "nodes" }] }`
//! - `center.json`: `{ "center": { "x", "z" } }`
//!
//! Loading happens once, before the server accepts traffic. Any problem with
//! either record is an error; there is no partial dataset.

use crate::building::Building;
use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct BuildingsRecord {
    buildings: Vec<Building>,
}

#[derive(Debug, Deserialize)]
struct CenterRecord {
    center: Coordinate,
}

/// Immutable building list plus reference point.
#[derive(Debug, Clone)]
pub struct Dataset {
    buildings: Vec<Building>,
    center: Coordinate,
}

impl Dataset {
    /// Build a dataset from already-parsed parts, enforcing its invariants.
    pub fn new(buildings: Vec<Building>, center: Coordinate) -> Result<Self> {
        if !center.is_finite() {
            return Err(Error::InvalidCoordinate {
                context: "reference point".into(),
                x: center.x,
                z: center.z,
            });
        }

        {
            let mut ids: FxHashSet<&str> = FxHashSet::default();
            for building in &buildings {
                building.validate()?;
                if !ids.insert(building.id.as_str()) {
                    return Err(Error::DuplicateBuilding(building.id.clone()));
                }
            }
        }

        Ok(Self { buildings, center })
    }

    /// Load both records from disk.
    pub fn load(buildings_path: impl AsRef<Path>, center_path: impl AsRef<Path>) -> Result<Self> {
        let buildings_path = buildings_path.as_ref();
        let center_path = center_path.as_ref();

        let buildings_json = std::fs::read_to_string(buildings_path)
            .map_err(|e| Error::io(buildings_path, e))?;
        let center_json =
            std::fs::read_to_string(center_path).map_err(|e| Error::io(center_path, e))?;

        let buildings = parse_buildings(&buildings_json, &buildings_path.display().to_string())?;
        let center = parse_center(&center_json, &center_path.display().to_string())?;

        Self::new(buildings, center)
    }

    /// Parse both records from in-memory JSON.
    pub fn from_json(buildings_json: &str, center_json: &str) -> Result<Self> {
        let buildings = parse_buildings(buildings_json, "building record")?;
        let center = parse_center(center_json, "reference point record")?;
        Self::new(buildings, center)
    }

    /// Buildings in source order.
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// The reference point.
    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Number of buildings with fewer than two vertices.
    pub fn degenerate_count(&self) -> usize {
        self.buildings.iter().filter(|b| b.is_degenerate()).count()
    }

    /// Whether a building with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.buildings.iter().any(|b| b.id == id)
    }
}

fn parse_buildings(json: &str, origin: &str) -> Result<Vec<Building>> {
    serde_json::from_str::<BuildingsRecord>(json)
        .map(|record| record.buildings)
        .map_err(|e| Error::parse(origin, e))
}

fn parse_center(json: &str, origin: &str) -> Result<Coordinate> {
    serde_json::from_str::<CenterRecord>(json)
        .map(|record| record.center)
        .map_err(|e| Error::parse(origin, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: &str = r#"{"center": {"x": -326.31, "z": 668.04}}"#;

    #[test]
    fn test_from_json_preserves_order() {
        let buildings = r#"{"buildings": [
            {"id": "b", "address": null, "height": 3, "nodes": [{"x": 0, "z": 0}, {"x": 1, "z": 0}]},
            {"id": "a", "address": "Main St, 1", "height": 9, "nodes": [{"x": 2, "z": 2}, {"x": 3, "z": 2}]}
        ]}"#;

        let dataset = Dataset::from_json(buildings, CENTER).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.buildings()[0].id, "b");
        assert_eq!(dataset.buildings()[1].id, "a");
        assert_eq!(dataset.buildings()[1].address.as_deref(), Some("Main St, 1"));
        assert_eq!(dataset.center(), Coordinate::new(-326.31, 668.04));
    }

    #[test]
    fn test_empty_building_list_is_valid() {
        let dataset = Dataset::from_json(r#"{"buildings": []}"#, CENTER).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.degenerate_count(), 0);
    }

    #[test]
    fn test_missing_buildings_key_is_rejected() {
        let err = Dataset::from_json(r#"{"ways": []}"#, CENTER).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_missing_center_key_is_rejected() {
        let err = Dataset::from_json(r#"{"buildings": []}"#, r#"{"x": 1, "z": 2}"#).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let buildings = r#"{"buildings": [
            {"id": "1", "height": 3, "nodes": []},
            {"id": "1", "height": 3, "nodes": []}
        ]}"#;
        let err = Dataset::from_json(buildings, CENTER).unwrap_err();
        assert!(matches!(err, Error::DuplicateBuilding(ref id) if id == "1"));
    }

    #[test]
    fn test_degenerate_buildings_are_kept() {
        let buildings = r#"{"buildings": [
            {"id": "1", "height": 3, "nodes": [{"x": 0, "z": 0}]},
            {"id": "2", "height": 3, "nodes": [{"x": 0, "z": 0}, {"x": 1, "z": 1}]}
        ]}"#;
        let dataset = Dataset::from_json(buildings, CENTER).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.degenerate_count(), 1);
        assert!(dataset.contains("1"));
        assert!(!dataset.contains("3"));
    }

    #[test]
    fn test_non_finite_center_is_rejected() {
        let err = Dataset::new(vec![], Coordinate::new(f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dataset::load("/nonexistent/buildings.json", "/nonexistent/center.json")
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/buildings.json"));
    }
}
