use crate::marker::{InfoCard, Marker, MarkerId};
use crate::model::EntityKind;
use crate::surface::MapSurface;
use crate::viewport::GeoBounds;

/// Text shown in the selected-info panel when nothing is selected.
pub const SELECTED_PLACEHOLDER: &str = "Click on a ship or glacier for details";

/// Content of the selected-info panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectedInfo {
    /// Nothing selected, the panel shows [`SELECTED_PLACEHOLDER`].
    #[default]
    Placeholder,
    /// Details of the clicked marker.
    Marker {
        /// Kind of the selected marker.
        kind: EntityKind,
        /// High precision details.
        card: InfoCard,
    },
}

impl SelectedInfo {
    /// Panel text.
    pub fn text(&self) -> String {
        match self {
            SelectedInfo::Placeholder => SELECTED_PLACEHOLDER.to_string(),
            SelectedInfo::Marker { card, .. } => card.to_string(),
        }
    }
}

/// Markers currently on the map and the selected-info panel state.
///
/// Only one generation of markers exists at a time: [`Session::clear_markers`] is called at the
/// start of every load cycle.
#[derive(Debug, Default)]
pub struct Session {
    ships: Vec<Marker>,
    glaciers: Vec<Marker>,
    selected: SelectedInfo,
    next_id: u64,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ship markers in the order they were added.
    pub fn ships(&self) -> &[Marker] {
        &self.ships
    }

    /// Glacier markers in the order they were added.
    pub fn glaciers(&self) -> &[Marker] {
        &self.glaciers
    }

    /// Whether no markers are tracked.
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty() && self.glaciers.is_empty()
    }

    /// Current selected-info panel content.
    pub fn selected(&self) -> &SelectedInfo {
        &self.selected
    }

    /// Finds a tracked marker.
    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.ships
            .iter()
            .chain(self.glaciers.iter())
            .find(|marker| marker.id == id)
    }

    /// Bounds of all tracked markers.
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(
            self.ships
                .iter()
                .chain(self.glaciers.iter())
                .map(|marker| &marker.position),
        )
    }

    /// Shows the details of the marker in the selected-info panel.
    ///
    /// Returns the marker, or `None` (leaving the panel untouched) if it is not tracked.
    pub fn select(&mut self, id: MarkerId) -> Option<&Marker> {
        let marker = self.marker(id)?;
        self.selected = SelectedInfo::Marker {
            kind: marker.kind,
            card: marker.details.clone(),
        };

        self.marker(id)
    }

    /// Removes every tracked marker from the surface and resets the selected-info panel.
    ///
    /// Removal failures are logged and do not stop the clearing; the collections are always
    /// emptied.
    pub fn clear_markers<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        for marker in self.ships.drain(..).chain(self.glaciers.drain(..)) {
            if let Err(err) = surface.remove_marker(marker.id) {
                log::warn!(
                    "Error removing {} marker {}: {err}",
                    marker.kind.label(),
                    marker.id
                );
            }
        }

        self.selected = SelectedInfo::Placeholder;
        log::debug!("All markers cleared");
    }

    pub(crate) fn next_marker_id(&mut self) -> MarkerId {
        self.next_id += 1;
        MarkerId(self.next_id)
    }

    pub(crate) fn track(&mut self, marker: Marker) {
        match marker.kind {
            EntityKind::Vessel => self.ships.push(marker),
            EntityKind::Glacier => self.glaciers.push(marker),
        }
    }
}

#[cfg(test)]
mod tests {
    use galileo_types::latlon;

    use super::*;
    use crate::error::SurfaceError;
    use crate::testing::RecordingSurface;

    fn marker(session: &mut Session, kind: EntityKind, lat: f64, lon: f64) -> Marker {
        let id = session.next_marker_id();
        let card = InfoCard {
            title: format!("marker {id}"),
            rows: vec![("Latitude".into(), format!("{lat:.6}"))],
        };
        Marker {
            id,
            kind,
            position: latlon!(lat, lon),
            popup: card.clone(),
            details: card,
        }
    }

    fn populated(surface: &mut RecordingSurface) -> Session {
        let mut session = Session::new();
        for (kind, lat, lon) in [
            (EntityKind::Vessel, 70.0, 30.0),
            (EntityKind::Glacier, 78.0, 15.0),
            (EntityKind::Vessel, 72.0, 50.0),
        ] {
            let marker = marker(&mut session, kind, lat, lon);
            surface.add_marker(&marker).unwrap();
            session.track(marker);
        }

        session
    }

    #[test]
    fn tracks_markers_by_kind() {
        let mut surface = RecordingSurface::default();
        let session = populated(&mut surface);

        assert_eq!(session.ships().len(), 2);
        assert_eq!(session.glaciers().len(), 1);
        assert_eq!(
            session.bounds(),
            Some(GeoBounds {
                min_lat: 70.0,
                min_lon: 15.0,
                max_lat: 78.0,
                max_lon: 50.0,
            })
        );
    }

    #[test]
    fn select_replaces_panel_content() {
        let mut surface = RecordingSurface::default();
        let mut session = populated(&mut surface);
        assert_eq!(session.selected().text(), SELECTED_PLACEHOLDER);

        let id = session.glaciers()[0].id;
        session.select(id).unwrap();
        assert_eq!(session.selected().text(), "marker #2\nLatitude: 78.000000");

        assert!(session.select(MarkerId(100)).is_none());
        assert_eq!(session.selected().text(), "marker #2\nLatitude: 78.000000");
    }

    #[test]
    fn marker_lookup_covers_both_kinds() {
        let mut surface = RecordingSurface::default();
        let session = populated(&mut surface);

        assert_eq!(
            session.marker(MarkerId(2)).map(|marker| marker.kind),
            Some(EntityKind::Glacier)
        );
        assert_eq!(
            session.marker(MarkerId(3)).map(|marker| marker.kind),
            Some(EntityKind::Vessel)
        );
        assert!(session.marker(MarkerId(4)).is_none());
    }

    #[test]
    fn clear_removes_everything_and_resets_panel() {
        let mut surface = RecordingSurface::default();
        let mut session = populated(&mut surface);
        session.select(MarkerId(1));

        session.clear_markers(&mut surface);

        assert!(session.is_empty());
        assert!(surface.markers.is_empty());
        assert_eq!(session.selected(), &SelectedInfo::Placeholder);
        assert_eq!(session.bounds(), None);
    }

    #[test]
    fn clear_tolerates_removal_failures() {
        let mut surface = RecordingSurface::default();
        let mut session = populated(&mut surface);
        surface.fail_removal = Some(SurfaceError::Rejected("layer locked".into()));

        session.clear_markers(&mut surface);

        assert!(session.is_empty());
        assert_eq!(surface.removal_attempts, 3);
        assert_eq!(session.selected(), &SelectedInfo::Placeholder);
    }

    #[test]
    fn clear_of_empty_session_resets_panel() {
        let mut surface = RecordingSurface::default();
        let mut session = Session::new();

        session.clear_markers(&mut surface);

        assert!(session.ships().is_empty());
        assert!(session.glaciers().is_empty());
        assert_eq!(session.selected().text(), SELECTED_PLACEHOLDER);
    }

    #[test]
    fn marker_ids_are_not_reused_after_clear() {
        let mut surface = RecordingSurface::default();
        let mut session = populated(&mut surface);
        session.clear_markers(&mut surface);

        assert_eq!(session.next_marker_id(), MarkerId(4));
    }
}
