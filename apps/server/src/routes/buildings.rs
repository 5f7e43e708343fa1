// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proximity query endpoint.

use crate::error::ApiError;
use crate::types::{BuildingsRequest, BuildingsResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};

/// POST /api/v1/buildings - Buildings near a position.
///
/// The response borrows from the shared dataset, so it is serialized here
/// rather than handed back as an owned value.
pub async fn query_buildings(
    State(state): State<AppState>,
    payload: Result<Json<BuildingsRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let query = request.into_query()?;

    let buildings = state.engine.query(&query);
    let substituted = buildings.iter().filter(|b| b.is_substituted()).count();

    tracing::debug!(
        x = query.position().x,
        z = query.position().z,
        distance = query.distance(),
        matched = buildings.len(),
        substituted,
        "Proximity query"
    );

    Ok(Json(BuildingsResponse { buildings }).into_response())
}
