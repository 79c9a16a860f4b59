//! Mapping of loosely-typed API records onto the canonical [`model`](crate::model) shapes.
//!
//! The backend is not consistent about field casing (`latitude`, `Latitude`, `lat`...). All the
//! variants are resolved here, once, so that nothing downstream has to know about them.

use serde_json::{Map, Value};

use crate::error::FetchError;
use crate::model::{Candidate, GlacierRecord, VesselRecord};

const LATITUDE_KEYS: &[&str] = &["latitude", "Latitude", "lat", "Lat"];
const LONGITUDE_KEYS: &[&str] = &["longitude", "Longitude", "lon", "Lon", "lng"];
const NAME_KEYS: &[&str] = &["name", "Name"];
const MMSI_KEYS: &[&str] = &["mmsi", "MMSI", "Mmsi"];
const ID_KEYS: &[&str] = &["id", "ID", "Id"];
const TYPE_KEYS: &[&str] = &["type", "Type"];

/// Converts a response body into vessel records.
///
/// Fails if the body is not an array. Array items that are not objects become records without
/// any fields, which are rejected later by validation.
pub fn vessels(resource: &str, body: Value) -> Result<Vec<VesselRecord>, FetchError> {
    Ok(records(resource, body)?
        .iter()
        .map(|item| vessel(item.as_object()))
        .collect())
}

/// Converts a response body into glacier records.
pub fn glaciers(resource: &str, body: Value) -> Result<Vec<GlacierRecord>, FetchError> {
    Ok(records(resource, body)?
        .iter()
        .map(|item| glacier(item.as_object()))
        .collect())
}

fn records(resource: &str, body: Value) -> Result<Vec<Value>, FetchError> {
    match body {
        Value::Array(items) => Ok(items),
        other => Err(FetchError::UnexpectedShape {
            resource: resource.to_string(),
            found: json_type(&other),
        }),
    }
}

fn vessel(object: Option<&Map<String, Value>>) -> VesselRecord {
    let Some(object) = object else {
        return VesselRecord::default();
    };

    VesselRecord {
        mmsi: text(object, MMSI_KEYS),
        name: text(object, NAME_KEYS),
        latitude: coordinate(object, LATITUDE_KEYS),
        longitude: coordinate(object, LONGITUDE_KEYS),
    }
}

fn glacier(object: Option<&Map<String, Value>>) -> GlacierRecord {
    let Some(object) = object else {
        return GlacierRecord::default();
    };

    GlacierRecord {
        id: text(object, ID_KEYS),
        name: text(object, NAME_KEYS),
        kind: text(object, TYPE_KEYS),
        latitude: coordinate(object, LATITUDE_KEYS),
        longitude: coordinate(object, LONGITUDE_KEYS),
    }
}

/// First of `keys` that is present and not `null`.
fn lookup<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

fn coordinate(object: &Map<String, Value>, keys: &[&str]) -> Candidate {
    match lookup(object, keys) {
        // serde_json numbers are always finite, `as_f64` only fails for arbitrary precision
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Candidate::Number)
            .unwrap_or_else(|| Candidate::Other(Value::Number(n.clone()))),
        Some(other) => Candidate::Other(other.clone()),
        None => Candidate::Missing,
    }
}

fn text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let value = match lookup(object, keys)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };

    (!value.is_empty()).then_some(value)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn capitalized_coordinates_match_lowercase_ones() {
        let lower = vessels(
            "ships",
            json!([{"name": "Yamal", "latitude": 71.5, "longitude": 52.25}]),
        )
        .unwrap();
        let upper = vessels(
            "ships",
            json!([{"Name": "Yamal", "Latitude": 71.5, "Longitude": 52.25}]),
        )
        .unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower[0].latitude, Candidate::Number(71.5));
    }

    #[test]
    fn short_coordinate_keys_are_recognized() {
        let records = glaciers(
            "glaciers",
            json!([{"id": 12, "lat": 78.1, "lon": 15.4, "type": "way"}]),
        )
        .unwrap();

        assert_eq!(
            records[0],
            GlacierRecord {
                id: Some("12".into()),
                name: None,
                kind: Some("way".into()),
                latitude: Candidate::Number(78.1),
                longitude: Candidate::Number(15.4),
            }
        );
    }

    #[test]
    fn zero_coordinate_is_kept() {
        let records = vessels("points", json!([{"lat": 0, "Latitude": 10, "lon": 0}])).unwrap();
        assert_eq!(records[0].latitude, Candidate::Number(10.0));
        assert_eq!(records[0].longitude, Candidate::Number(0.0));

        let records = vessels("points", json!([{"latitude": 0, "longitude": 0}])).unwrap();
        assert_eq!(records[0].latitude, Candidate::Number(0.0));
    }

    #[test]
    fn null_falls_through_to_next_variant() {
        let records = vessels(
            "ships",
            json!([{"latitude": null, "Latitude": 70.0, "longitude": 30.0}]),
        )
        .unwrap();
        assert_eq!(records[0].latitude, Candidate::Number(70.0));
    }

    #[test]
    fn string_coordinates_stay_strings() {
        let records = vessels("ships", json!([{"latitude": "45", "longitude": 0}])).unwrap();
        assert_eq!(records[0].latitude, Candidate::Other(json!("45")));
    }

    #[test]
    fn non_object_items_become_empty_records() {
        let records = vessels("ships", json!([42, "ship", null])).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|v| *v == VesselRecord::default()));
    }

    #[test]
    fn identifiers_accept_numbers_and_strings() {
        let records = vessels(
            "ships",
            json!([{"mmsi": 273312000}, {"MMSI": "257000000"}, {"mmsi": ""}]),
        )
        .unwrap();
        assert_eq!(records[0].mmsi.as_deref(), Some("273312000"));
        assert_eq!(records[1].mmsi.as_deref(), Some("257000000"));
        assert_eq!(records[2].mmsi, None);
    }

    #[test]
    fn non_array_body_is_rejected() {
        let result = vessels("points", json!({"error": "overpass timeout"}));
        assert_matches!(
            result,
            Err(FetchError::UnexpectedShape { found: "object", .. })
        );
    }
}
