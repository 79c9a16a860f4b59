use crate::error::SurfaceError;
use crate::marker::{Marker, MarkerId};
use crate::viewport::GeoBounds;

/// Interactive map that markers are drawn on.
///
/// This is the boundary between loading logic and the map widget. The application implements it
/// over a Galileo feature layer; tests use an in-memory recorder.
pub trait MapSurface {
    /// Places the marker on the map.
    fn add_marker(&mut self, marker: &Marker) -> Result<(), SurfaceError>;

    /// Removes a previously added marker.
    fn remove_marker(&mut self, id: MarkerId) -> Result<(), SurfaceError>;

    /// Changes the view so that all of `bounds` is visible. `padding` is a fraction of the bounds
    /// size added on every side.
    fn fit_bounds(&mut self, bounds: &GeoBounds, padding: f64);
}
