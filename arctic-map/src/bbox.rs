//! Geographic bounding box of the glacier query.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use crate::validate::is_valid_lat_lon;

/// Rectangular geographic filter used in the glacier query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern latitude limit.
    pub south: f64,
    /// Western longitude limit.
    pub west: f64,
    /// Northern latitude limit.
    pub north: f64,
    /// Eastern longitude limit.
    pub east: f64,
}

impl BoundingBox {
    /// Creates a new bounding box, checking that the limits are valid coordinates and
    /// `south <= north`.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self, BoundingBoxError> {
        if !is_valid_lat_lon(south, west) || !is_valid_lat_lon(north, east) {
            return Err(BoundingBoxError::OutOfRange);
        }

        if south > north {
            return Err(BoundingBoxError::Inverted);
        }

        Ok(Self {
            south,
            west,
            north,
            east,
        })
    }
}

impl Default for BoundingBox {
    /// The Arctic region: 65°N to the pole, 30°E to 180°E.
    fn default() -> Self {
        Self {
            south: 65.0,
            west: 30.0,
            north: 90.0,
            east: 180.0,
        }
    }
}

impl Display for BoundingBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

impl FromStr for BoundingBox {
    type Err = BoundingBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|_| BoundingBoxError::NotANumber(part.trim().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [south, west, north, east] = parts.as_slice() else {
            return Err(BoundingBoxError::WrongArity(parts.len()));
        };

        Self::new(*south, *west, *north, *east)
    }
}

/// Error parsing or constructing a [`BoundingBox`].
#[derive(Debug, Error, PartialEq)]
pub enum BoundingBoxError {
    /// Not exactly four components.
    #[error("expected 4 comma separated values (south,west,north,east), got {0}")]
    WrongArity(usize),
    /// A component is not a number.
    #[error("'{0}' is not a number")]
    NotANumber(String),
    /// A limit is outside of geographic bounds.
    #[error("bounding box limits are outside of geographic bounds")]
    OutOfRange,
    /// South limit is north of the north limit.
    #[error("south limit is greater than north limit")]
    Inverted,
}
