// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use crate::error::ApiError;
use cityblock_core::{Coordinate, ProximityQuery};
use serde::Deserialize;

/// Body of `POST /api/v1/buildings`.
///
/// Every field is optional at the serde level so that a missing field
/// produces a `MISSING_FIELD` error naming it, instead of a generic
/// deserialization message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildingsRequest {
    #[serde(default)]
    pub position: Option<PositionInput>,
    #[serde(default)]
    pub distance: Option<f64>,
}

/// Viewer position as sent by the client.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PositionInput {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub z: Option<f64>,
}

impl BuildingsRequest {
    /// Check required fields and build a validated query.
    pub fn into_query(self) -> Result<ProximityQuery, ApiError> {
        let position = self.position.ok_or(ApiError::MissingField("position"))?;
        let x = position.x.ok_or(ApiError::MissingField("position.x"))?;
        let z = position.z.ok_or(ApiError::MissingField("position.z"))?;
        let distance = self.distance.ok_or(ApiError::MissingField("distance"))?;

        Ok(ProximityQuery::new(Coordinate::new(x, z), distance)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<ProximityQuery, ApiError> {
        serde_json::from_str::<BuildingsRequest>(json)
            .expect("valid JSON")
            .into_query()
    }

    #[test]
    fn test_valid_request() {
        let query = parse(r#"{"position": {"x": 1.5, "z": -2}, "distance": 25}"#).unwrap();
        assert_eq!(query.position(), Coordinate::new(1.5, -2.0));
        assert_eq!(query.distance(), 25.0);
    }

    #[test]
    fn test_missing_fields_are_named() {
        let cases = [
            (r#"{"distance": 1}"#, "position"),
            (r#"{"position": {"z": 0}, "distance": 1}"#, "position.x"),
            (r#"{"position": {"x": 0}, "distance": 1}"#, "position.z"),
            (r#"{"position": {"x": 0, "z": 0}}"#, "distance"),
            (r#"{"position": {"x": 0, "z": 0}, "distance": null}"#, "distance"),
        ];
        for (json, field) in cases {
            match parse(json) {
                Err(ApiError::MissingField(name)) => assert_eq!(name, field, "{}", json),
                other => panic!("expected MissingField for {}, got {:?}", json, other),
            }
        }
    }

    #[test]
    fn test_negative_distance() {
        let err = parse(r#"{"position": {"x": 0, "z": 0}, "distance": -5}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuery(_)));
    }

    #[test]
    fn test_non_numeric_values_fail_to_deserialize() {
        assert!(serde_json::from_str::<BuildingsRequest>(
            r#"{"position": {"x": "a", "z": 0}, "distance": 1}"#
        )
        .is_err());
        assert!(serde_json::from_str::<BuildingsRequest>(
            r#"{"position": {"x": 0, "z": 0}, "distance": "far"}"#
        )
        .is_err());
    }
}
