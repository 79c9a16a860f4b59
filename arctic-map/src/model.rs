//! Canonical record shapes produced by [`normalize`](crate::normalize).

use std::fmt::{Display, Formatter};

use serde_json::Value;

/// A coordinate value as it was received from the API.
///
/// Records are loosely typed, so a coordinate can be a number, a numeric-looking string or
/// anything else. Only [`Candidate::Number`] can ever pass validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Candidate {
    /// A JSON number.
    Number(f64),
    /// Any other JSON value.
    Other(Value),
    /// The field is absent or `null`.
    #[default]
    Missing,
}

impl Candidate {
    /// Returns the numeric value, if the candidate is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Candidate::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Short name of the candidate type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Candidate::Number(_) => "number",
            Candidate::Other(Value::String(_)) => "string",
            Candidate::Other(Value::Bool(_)) => "boolean",
            Candidate::Other(Value::Array(_)) => "array",
            Candidate::Other(Value::Object(_)) => "object",
            Candidate::Other(_) => "other",
            Candidate::Missing => "missing",
        }
    }
}

impl From<f64> for Candidate {
    fn from(value: f64) -> Self {
        Candidate::Number(value)
    }
}

impl Display for Candidate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Candidate::Number(v) => write!(f, "{v}"),
            Candidate::Other(v) => write!(f, "{v}"),
            Candidate::Missing => write!(f, "undefined"),
        }
    }
}

/// Ship position report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VesselRecord {
    /// Maritime Mobile Service Identity.
    pub mmsi: Option<String>,
    /// Ship name.
    pub name: Option<String>,
    /// Latitude in degrees.
    pub latitude: Candidate,
    /// Longitude in degrees.
    pub longitude: Candidate,
}

impl VesselRecord {
    /// Name to show, falling back to an MMSI based label.
    pub fn display_name(&self) -> String {
        match (&self.name, &self.mmsi) {
            (Some(name), _) => name.clone(),
            (None, Some(mmsi)) => format!("Vessel {mmsi}"),
            (None, None) => "Unknown vessel".to_string(),
        }
    }
}

/// Glacier location.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlacierRecord {
    /// Source identifier.
    pub id: Option<String>,
    /// Glacier name.
    pub name: Option<String>,
    /// Type classification (e.g. the OSM element type it came from).
    pub kind: Option<String>,
    /// Latitude in degrees.
    pub latitude: Candidate,
    /// Longitude in degrees.
    pub longitude: Candidate,
}

impl GlacierRecord {
    /// Name to show, falling back to an id based label.
    pub fn display_name(&self) -> String {
        match (&self.name, &self.id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => format!("Glacier {id}"),
            (None, None) => "Unnamed glacier".to_string(),
        }
    }

    /// Type classification, `Unknown` if not given.
    pub fn display_kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("Unknown")
    }
}

/// Everything one load cycle fetched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    /// Ships (or generic points).
    pub vessels: Vec<VesselRecord>,
    /// Glaciers.
    pub glaciers: Vec<GlacierRecord>,
}

/// Kind of entity a marker represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A ship.
    Vessel,
    /// A glacier.
    Glacier,
}

impl EntityKind {
    /// Human readable name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Vessel => "Ships",
            EntityKind::Glacier => "Glaciers",
        }
    }
}
