// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use cityblock_core::{Coordinate, ResponseBuilding};
use serde::Serialize;

/// Proximity query result.
#[derive(Debug, Serialize)]
pub struct BuildingsResponse<'a> {
    pub buildings: Vec<ResponseBuilding<'a>>,
}

/// Liveness and dataset status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    /// Always true once the server is listening; loading is fatal otherwise.
    pub loaded: bool,
    pub building_count: usize,
    pub model_groups: usize,
    pub center: Coordinate,
    pub version: &'static str,
}
