// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar coordinates in the pre-scaled block space.
//!
//! Coordinates are not latitude/longitude. The import stage has already
//! projected and scaled them, so `x` and `z` are unit-less and plain
//! Euclidean distance applies.

use serde::{Deserialize, Serialize};

/// A point on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub z: f64,
}

impl Coordinate {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Euclidean distance to another coordinate.
    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Both components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, z): (f64, f64)) -> Self {
        Self::new(x, z)
    }
}
