use std::fmt;

use serde::{Deserialize, Serialize};

/// Latitude and longitude in degrees. Stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords(pub f64, pub f64);

impl Coords {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.0, self.1)
    }
}
