// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP route handlers.

pub mod buildings;
pub mod center;
pub mod health;

use crate::error::ApiError;
use axum::http::Uri;

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}


#[cfg(test)]
mod tests {
    use super::test_support::{app, send};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = send(app(), Method::GET, "/api/v1/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
