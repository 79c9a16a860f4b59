use arctic_map::{fit_view, GeoBounds, MapSurface, Marker, MarkerId, SurfaceError};
use galileo::Map;
use galileo_types::cartesian::Size;

use crate::layer::MarkerLayer;

/// [`MapSurface`] backed by a Galileo map and its marker layer.
///
/// Borrows both for the duration of one controller call.
pub struct GalileoSurface<'a> {
    markers: &'a mut MarkerLayer,
    map: &'a mut Map,
}

impl<'a> GalileoSurface<'a> {
    /// Creates a surface over the map. The marker layer must be one of the map layers.
    pub fn new(markers: &'a mut MarkerLayer, map: &'a mut Map) -> Self {
        Self { markers, map }
    }
}

impl MapSurface for GalileoSurface<'_> {
    fn add_marker(&mut self, marker: &Marker) -> Result<(), SurfaceError> {
        self.markers.insert(marker)?;
        self.map.redraw();
        Ok(())
    }

    fn remove_marker(&mut self, id: MarkerId) -> Result<(), SurfaceError> {
        self.markers.remove(id)?;
        self.map.redraw();
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: &GeoBounds, padding: f64) {
        let view = self.map.view();
        let size = view.size();
        let screen = Size::new(size.width(), size.height());

        let Some(fitted) = fit_view(bounds, padding, screen) else {
            log::warn!("Cannot fit the map view to {bounds:?}");
            return;
        };

        log::debug!(
            "Fitting view to {bounds:?}: resolution {:.1}",
            fitted.resolution
        );
        self.map.set_view(
            view.with_position(&fitted.center)
                .with_resolution(fitted.resolution),
        );
        self.map.redraw();
    }
}
