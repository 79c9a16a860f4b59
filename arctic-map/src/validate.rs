//! Coordinate validation.

use crate::model::Candidate;

/// Returns true if `lat` and `lon` are numbers forming a valid geographic position.
///
/// Numeric-looking strings are not accepted: the API is expected to send numbers, and a string
/// there means the record is not what we think it is.
pub fn is_valid_coordinate(lat: &Candidate, lon: &Candidate) -> bool {
    let valid = match (lat, lon) {
        (Candidate::Number(lat), Candidate::Number(lon)) => is_valid_lat_lon(*lat, *lon),
        _ => false,
    };

    if !valid {
        log::debug!(
            "Coordinate validation failed: lat={lat} ({}), lon={lon} ({})",
            lat.type_name(),
            lon.type_name()
        );
    }

    valid
}

/// Numeric part of [`is_valid_coordinate`].
pub fn is_valid_lat_lon(lat: f64, lon: f64) -> bool {
    !lat.is_nan()
        && !lon.is_nan()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
}
