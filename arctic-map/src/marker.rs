//! Markers and their text content.

use std::fmt::{Display, Formatter};

use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::GeoPoint;
use galileo_types::latlon;

use crate::model::{Candidate, EntityKind, GlacierRecord, VesselRecord};
use crate::validate::is_valid_coordinate;

const NOT_AVAILABLE: &str = "N/A";

/// Identifier of a marker, unique within a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

impl Display for MarkerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A titled list of labeled values. Used both for marker popups and for the selected-info panel.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoCard {
    /// Heading, usually the entity name.
    pub title: String,
    /// `(label, value)` rows.
    pub rows: Vec<(String, String)>,
}

impl InfoCard {
    fn new(title: String) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn row(mut self, label: &str, value: impl Into<String>) -> Self {
        self.rows.push((label.to_string(), value.into()));
        self
    }
}

impl Display for InfoCard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)?;
        for (label, value) in &self.rows {
            write!(f, "\n{label}: {value}")?;
        }

        Ok(())
    }
}

/// A pin on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Marker id.
    pub id: MarkerId,
    /// What the marker shows; selects the icon.
    pub kind: EntityKind,
    /// Validated position.
    pub position: GeoPoint2d,
    /// Popup content, positions with 4 decimals.
    pub popup: InfoCard,
    /// Selected-info content, positions with 6 decimals.
    pub details: InfoCard,
}

/// Record that can be shown as a [`Marker`].
pub trait MapEntity {
    /// Marker kind of this entity type.
    const KIND: EntityKind;

    /// Raw `(latitude, longitude)` of the record.
    fn coordinates(&self) -> (&Candidate, &Candidate);

    /// Name used in logs and card titles.
    fn display_name(&self) -> String;

    /// Popup content for a record at a validated `position`.
    fn popup(&self, position: &GeoPoint2d) -> InfoCard;

    /// Selected-info content for a record at a validated `position`.
    fn details(&self, position: &GeoPoint2d) -> InfoCard;

    /// Validated position of the record, if it has one.
    fn position(&self) -> Option<GeoPoint2d> {
        let (lat, lon) = self.coordinates();
        if !is_valid_coordinate(lat, lon) {
            return None;
        }

        Some(latlon!(lat.as_f64()?, lon.as_f64()?))
    }

    /// Builds a marker with the given id, or `None` if the record has no valid position.
    fn to_marker(&self, id: MarkerId) -> Option<Marker> {
        let position = self.position()?;
        Some(Marker {
            id,
            kind: Self::KIND,
            position,
            popup: self.popup(&position),
            details: self.details(&position),
        })
    }
}

impl MapEntity for VesselRecord {
    const KIND: EntityKind = EntityKind::Vessel;

    fn coordinates(&self) -> (&Candidate, &Candidate) {
        (&self.latitude, &self.longitude)
    }

    fn display_name(&self) -> String {
        VesselRecord::display_name(self)
    }

    fn popup(&self, position: &GeoPoint2d) -> InfoCard {
        InfoCard::new(self.display_name())
            .row("Position", format_position(position))
            .row("MMSI", self.mmsi.as_deref().unwrap_or(NOT_AVAILABLE))
    }

    fn details(&self, position: &GeoPoint2d) -> InfoCard {
        InfoCard::new(self.display_name())
            .row("MMSI", self.mmsi.as_deref().unwrap_or(NOT_AVAILABLE))
            .row("Latitude", format!("{:.6}", position.lat()))
            .row("Longitude", format!("{:.6}", position.lon()))
    }
}

impl MapEntity for GlacierRecord {
    const KIND: EntityKind = EntityKind::Glacier;

    fn coordinates(&self) -> (&Candidate, &Candidate) {
        (&self.latitude, &self.longitude)
    }

    fn display_name(&self) -> String {
        GlacierRecord::display_name(self)
    }

    fn popup(&self, position: &GeoPoint2d) -> InfoCard {
        InfoCard::new(self.display_name())
            .row("Type", self.display_kind())
            .row("Position", format_position(position))
            .row("ID", self.id.as_deref().unwrap_or(NOT_AVAILABLE))
    }

    fn details(&self, position: &GeoPoint2d) -> InfoCard {
        InfoCard::new(self.display_name())
            .row("Type", self.display_kind())
            .row("ID", self.id.as_deref().unwrap_or(NOT_AVAILABLE))
            .row("Latitude", format!("{:.6}", position.lat()))
            .row("Longitude", format!("{:.6}", position.lon()))
    }
}

fn format_position(position: &GeoPoint2d) -> String {
    format!("{:.4}, {:.4}", position.lat(), position.lon())
}
