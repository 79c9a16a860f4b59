//! Geographic bounds of markers and the map view that shows them.

use galileo_types::cartesian::{CartesianPoint2d, Point2, Rect, Size};
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{Crs, GeoPoint};
use galileo_types::latlon;

/// Default fraction of the bounds size added around fitted markers.
pub const DEFAULT_FIT_PADDING: f64 = 0.1;

/// Web Mercator cannot show the poles; latitudes are clamped to this value before projecting.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Smallest resolution (meters per pixel) a fitted view can have, roughly zoom level 16.
/// Prevents zooming into a single marker without bound.
pub const MIN_FIT_RESOLUTION: f64 = 2.388_657_133_911_758;

/// Axis-aligned box in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Southern limit.
    pub min_lat: f64,
    /// Western limit.
    pub min_lon: f64,
    /// Northern limit.
    pub max_lat: f64,
    /// Eastern limit.
    pub max_lon: f64,
}

impl GeoBounds {
    /// Degenerate bounds containing a single point.
    pub fn from_point(point: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            min_lat: point.lat(),
            min_lon: point.lon(),
            max_lat: point.lat(),
            max_lon: point.lon(),
        }
    }

    /// Smallest bounds containing all the points, `None` if there are none.
    pub fn from_points<'a, P: GeoPoint<Num = f64> + 'a>(
        points: impl IntoIterator<Item = &'a P>,
    ) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bounds = Self::from_point(points.next()?);
        for point in points {
            bounds.extend(point);
        }

        Some(bounds)
    }

    /// Grows the bounds to include the point.
    pub fn extend(&mut self, point: &impl GeoPoint<Num = f64>) {
        self.min_lat = self.min_lat.min(point.lat());
        self.min_lon = self.min_lon.min(point.lon());
        self.max_lat = self.max_lat.max(point.lat());
        self.max_lon = self.max_lon.max(point.lon());
    }

    /// Whether the point is inside (or on the border of) the bounds.
    pub fn contains(&self, point: &impl GeoPoint<Num = f64>) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat())
            && (self.min_lon..=self.max_lon).contains(&point.lon())
    }

    /// Bounds grown by `fraction` of their size on every side, limited to geographic range.
    pub fn pad(&self, fraction: f64) -> Self {
        let lat_pad = (self.max_lat - self.min_lat) * fraction;
        let lon_pad = (self.max_lon - self.min_lon) * fraction;

        Self {
            min_lat: (self.min_lat - lat_pad).max(-90.0),
            min_lon: (self.min_lon - lon_pad).max(-180.0),
            max_lat: (self.max_lat + lat_pad).min(90.0),
            max_lon: (self.max_lon + lon_pad).min(180.0),
        }
    }
}

/// Map position and resolution, in the units of Web Mercator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Geographic center of the view.
    pub center: GeoPoint2d,
    /// Map meters per screen pixel.
    pub resolution: f64,
}

impl Viewport {
    /// Whether `point` is visible on a screen of the given size.
    pub fn contains(&self, point: &GeoPoint2d, screen: Size<f64>) -> bool {
        let (Some(center), Some(point)) = (project(&self.center), project(point)) else {
            return false;
        };

        let half_width = screen.width() / 2.0 * self.resolution;
        let half_height = screen.height() / 2.0 * self.resolution;

        Rect::new(
            center.x() - half_width,
            center.y() - half_height,
            center.x() + half_width,
            center.y() + half_height,
        )
        .contains(&point)
    }
}

/// Computes the view that shows all of `bounds` with the given padding on a screen of the given
/// size.
///
/// Returns `None` if the screen has no area or the bounds cannot be projected.
pub fn fit_view(bounds: &GeoBounds, padding: f64, screen: Size<f64>) -> Option<Viewport> {
    if screen.width() <= 0.0 || screen.height() <= 0.0 {
        return None;
    }

    let padded = bounds.pad(padding);
    let south_west = project(&latlon!(padded.min_lat, padded.min_lon))?;
    let north_east = project(&latlon!(padded.max_lat, padded.max_lon))?;

    let rect = Rect::new(
        south_west.x(),
        south_west.y(),
        north_east.x(),
        north_east.y(),
    );
    let center = unproject(&rect.center())?;
    let resolution = (rect.width() / screen.width())
        .max(rect.height() / screen.height())
        .max(MIN_FIT_RESOLUTION);

    Some(Viewport { center, resolution })
}

/// Projects a geographic point to Web Mercator, the CRS the map is drawn in.
///
/// Latitudes beyond [`MAX_MERCATOR_LAT`] are clamped.
pub fn project(point: &GeoPoint2d) -> Option<Point2> {
    let projection = Crs::EPSG3857.get_projection::<GeoPoint2d, Point2>()?;
    let clamped = latlon!(
        point.lat().clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT),
        point.lon()
    );
    projection.project(&clamped)
}

fn unproject(point: &Point2) -> Option<GeoPoint2d> {
    let projection = Crs::EPSG3857.get_projection::<GeoPoint2d, Point2>()?;
    projection.unproject(point)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn screen() -> Size<f64> {
        Size::new(1024.0, 768.0)
    }

    #[test]
    fn bounds_of_points() {
        let points = [
            latlon!(70.0, 30.0),
            latlon!(78.5, 15.0),
            latlon!(72.0, 60.0),
        ];
        let bounds = GeoBounds::from_points(&points).unwrap();

        assert_eq!(
            bounds,
            GeoBounds {
                min_lat: 70.0,
                min_lon: 15.0,
                max_lat: 78.5,
                max_lon: 60.0,
            }
        );
        assert!(points.iter().all(|p| bounds.contains(p)));

        let empty: [GeoPoint2d; 0] = [];
        assert_eq!(GeoBounds::from_points(&empty), None);
    }

    #[test]
    fn padding_grows_and_clamps() {
        let bounds = GeoBounds {
            min_lat: 80.0,
            min_lon: 170.0,
            max_lat: 89.0,
            max_lon: 179.0,
        }
        .pad(0.5);

        assert_abs_diff_eq!(bounds.min_lat, 75.5);
        assert_abs_diff_eq!(bounds.min_lon, 165.5);
        assert_abs_diff_eq!(bounds.max_lat, 90.0);
        assert_abs_diff_eq!(bounds.max_lon, 180.0);
    }

    #[test]
    fn fitted_view_contains_all_points() {
        let points = [
            latlon!(69.1, 33.4),
            latlon!(78.2, 15.6),
            latlon!(73.5, 80.7),
            latlon!(64.5, 40.5),
        ];
        let bounds = GeoBounds::from_points(&points).unwrap();
        let view = fit_view(&bounds, DEFAULT_FIT_PADDING, screen()).unwrap();

        for point in &points {
            assert!(view.contains(point, screen()), "{point:?} not visible");
        }
        assert!(!view.contains(&latlon!(0.0, 0.0), screen()));
    }

    #[test]
    fn fitted_view_is_centered_on_bounds() {
        let bounds = GeoBounds {
            min_lat: -10.0,
            min_lon: -20.0,
            max_lat: 10.0,
            max_lon: 20.0,
        };
        let view = fit_view(&bounds, 0.0, screen()).unwrap();

        assert_abs_diff_eq!(view.center.lat(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(view.center.lon(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn single_point_does_not_zoom_infinitely() {
        let bounds = GeoBounds::from_point(&latlon!(75.0, 40.0));
        let view = fit_view(&bounds, DEFAULT_FIT_PADDING, screen()).unwrap();

        assert_abs_diff_eq!(view.resolution, MIN_FIT_RESOLUTION);
        assert!(view.contains(&latlon!(75.0, 40.0), screen()));
    }

    #[test]
    fn empty_screen_has_no_view() {
        let bounds = GeoBounds::from_point(&latlon!(75.0, 40.0));
        assert_eq!(fit_view(&bounds, 0.1, Size::new(0.0, 768.0)), None);
    }
}
