// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Cityblock Core
//!
//! In-memory building dataset and proximity queries for one city block.
//!
//! ## Overview
//!
//! - **Dataset**: building footprints and a reference point, loaded once from
//!   the JSON records written by the OSM import stage
//! - **Model Substitution**: maps selected buildings to curated 3D models
//! - **Query Engine**: finds buildings with a vertex near a viewpoint
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cityblock_core::{Coordinate, Dataset, ModelSubstitution, ProximityQuery, QueryEngine};
//!
//! let dataset = Dataset::load("data/buildings.json", "data/center.json")?;
//! let models = ModelSubstitution::load("data/models.json")?;
//! let engine = QueryEngine::new(dataset, models);
//!
//! let query = ProximityQuery::new(engine.center(), 150.0)?;
//! for building in engine.query(&query) {
//!     println!("{:?} ({} nodes)", building.address, building.nodes.len());
//! }
//! ```

pub mod building;
pub mod coordinate;
pub mod dataset;
pub mod error;
pub mod models;
pub mod query;

pub use building::Building;
pub use coordinate::Coordinate;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use models::{GroupId, ModelDefinition, ModelGroup, ModelSubstitution};
pub use query::{ProximityQuery, QueryEngine, ResponseBuilding};
