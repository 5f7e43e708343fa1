// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reference point endpoint.

use crate::AppState;
use axum::{extract::State, Json};
use cityblock_core::Coordinate;

/// GET /api/v1/center - Reference point of the served area.
pub async fn get_center(State(state): State<AppState>) -> Json<Coordinate> {
    Json(state.engine.center())
}
