// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for dataset loading and querying.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading the dataset or validating a query.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate building id '{0}'")]
    DuplicateBuilding(String),

    #[error("building '{id}': {reason}")]
    InvalidBuilding { id: String, reason: String },

    #[error("invalid coordinate in {context}: ({x}, {z})")]
    InvalidCoordinate { context: String, x: f64, z: f64 },

    #[error("building '{building}' references undefined model group '{model_id}'")]
    UndefinedModelGroup { building: String, model_id: String },

    #[error("model group '{0}' is defined more than once")]
    DuplicateModelGroup(String),

    #[error("building '{0}' is assigned to a model group more than once")]
    DuplicateAssignment(String),

    #[error("{0}")]
    InvalidQuery(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Parse {
            origin: origin.into(),
            source,
        }
    }

    /// Whether this error was caused by client input rather than the data on disk.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidQuery(_))
    }
}
