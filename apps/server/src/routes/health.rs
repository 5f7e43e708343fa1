// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check and API information endpoints.

use crate::types::HealthResponse;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /api/v1/health - Liveness and dataset status.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        loaded: true,
        building_count: state.engine.building_count(),
        model_groups: state.engine.models().group_count(),
        center: state.engine.center(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "cityblock-server",
        version: env!("CARGO_PKG_VERSION"),
        description: "Building footprints for the city block walkthrough viewer",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/api/v1/health",
                description: "Dataset status and building count",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/center",
                description: "Reference point of the served area",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/buildings",
                description: "Buildings with a vertex within distance of a position",
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{app, send};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_health_reports_dataset() {
        let (status, body) = send(app(), Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["loaded"], true);
        assert_eq!(body["buildingCount"], 3);
        assert_eq!(body["modelGroups"], 1);
        assert_eq!(body["center"]["x"], -326.31);
        assert_eq!(body["center"]["z"], 668.04);
    }

    #[tokio::test]
    async fn test_info_lists_endpoints() {
        let (status, body) = send(app(), Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "cityblock-server");
        assert_eq!(body["endpoints"].as_array().map(Vec::len), Some(3));
    }
}
