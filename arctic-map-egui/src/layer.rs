//! Feature layer holding the ship and glacier markers.

use std::sync::Arc;

use ahash::{HashMap, HashMapExt};
use arctic_map::viewport::project;
use arctic_map::{EntityKind, Marker, MarkerId, SurfaceError};
use galileo::layer::feature_layer::Feature;
use galileo::layer::{FeatureId, FeatureLayer};
use galileo::render::point_paint::PointPaint;
use galileo::render::render_bundle::RenderBundle;
use galileo::symbol::Symbol;
use galileo::Color;
use galileo_types::cartesian::{Point2, Point3};
use galileo_types::geo::Crs;
use galileo_types::geometry::Geom;
use galileo_types::geometry_type::CartesianSpace2d;
use parking_lot::RwLock;

/// Shared handle to the layer, as it is added to the map.
pub type MarkerFeatureLayer =
    Arc<RwLock<FeatureLayer<Point2, MarkerFeature, MarkerSymbol, CartesianSpace2d>>>;

/// A marker in the layer, positioned in Web Mercator.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerFeature {
    /// Id of the marker the feature shows.
    pub id: MarkerId,
    /// Selects the icon.
    pub kind: EntityKind,
    /// Projected position.
    pub position: Point2,
}

impl Feature for MarkerFeature {
    type Geom = Point2;

    fn geometry(&self) -> &Self::Geom {
        &self.position
    }
}

/// Draws ships as navy circles and glaciers as light blue squares.
#[derive(Debug, Clone, Copy)]
pub struct MarkerSymbol {
    /// Diameter of the ship circle in pixels.
    pub ship_size: f32,
    /// Side of the glacier square in pixels.
    pub glacier_size: f32,
}

const NAVY: Color = Color::rgba(0, 0, 128, 255);
const LIGHT_BLUE: Color = Color::rgba(135, 206, 250, 255);
const DARK_BLUE: Color = Color::rgba(0, 51, 102, 255);

impl Default for MarkerSymbol {
    fn default() -> Self {
        Self {
            ship_size: 12.0,
            glacier_size: 12.0,
        }
    }
}

impl MarkerSymbol {
    fn paint(&self, kind: EntityKind) -> PointPaint<'static> {
        match kind {
            EntityKind::Vessel => {
                PointPaint::circle(NAVY, self.ship_size).with_outline(Color::WHITE, 2.0)
            }
            EntityKind::Glacier => {
                PointPaint::square(LIGHT_BLUE, self.glacier_size).with_outline(DARK_BLUE, 1.5)
            }
        }
    }
}

impl Symbol<MarkerFeature> for MarkerSymbol {
    fn render(
        &self,
        feature: &MarkerFeature,
        geometry: &Geom<Point3>,
        min_resolution: f64,
        bundle: &mut RenderBundle,
    ) {
        let Geom::Point(point) = geometry else {
            return;
        };

        bundle.add_point(point, &self.paint(feature.kind), min_resolution);
    }
}

/// The marker layer and the mapping from marker ids to layer features.
pub struct MarkerLayer {
    layer: MarkerFeatureLayer,
    features: HashMap<MarkerId, FeatureId>,
}

impl MarkerLayer {
    /// Creates an empty layer in Web Mercator.
    pub fn new() -> Self {
        let layer = FeatureLayer::new(vec![], MarkerSymbol::default(), Crs::EPSG3857);
        Self {
            layer: Arc::new(RwLock::new(layer)),
            features: HashMap::new(),
        }
    }

    /// Handle to add to the map.
    pub fn handle(&self) -> MarkerFeatureLayer {
        self.layer.clone()
    }

    /// Number of markers in the layer.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the layer has no markers.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Adds a feature for the marker.
    pub fn insert(&mut self, marker: &Marker) -> Result<(), SurfaceError> {
        if self.features.contains_key(&marker.id) {
            return Err(SurfaceError::Rejected(format!(
                "marker {} is already on the map",
                marker.id
            )));
        }

        let position = project(&marker.position).ok_or_else(|| {
            SurfaceError::Rejected(format!("cannot project position of marker {}", marker.id))
        })?;

        let mut layer = self.layer.write();
        let feature_id = layer.features_mut().add(MarkerFeature {
            id: marker.id,
            kind: marker.kind,
            position,
        });
        layer.update_feature(feature_id);
        self.features.insert(marker.id, feature_id);

        Ok(())
    }

    /// Removes the feature of the marker.
    pub fn remove(&mut self, id: MarkerId) -> Result<(), SurfaceError> {
        let feature_id = self
            .features
            .remove(&id)
            .ok_or(SurfaceError::UnknownMarker(id))?;

        let mut layer = self.layer.write();
        layer.features_mut().remove(feature_id);
        layer.update_feature(feature_id);

        Ok(())
    }

    /// Marker within `tolerance` map units of the position, if any.
    pub fn marker_at(&self, position: &Point2, tolerance: f64) -> Option<MarkerId> {
        hit_test(&self.layer, position, tolerance)
    }
}

impl Default for MarkerLayer {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn hit_test(
    layer: &MarkerFeatureLayer,
    position: &Point2,
    tolerance: f64,
) -> Option<MarkerId> {
    layer
        .read()
        .get_features_at(position, tolerance)
        .map(|(_, feature)| feature.id)
        .next()
}
