//! Marker clicks.
//!
//! The map widget reports clicks to event handlers while it renders. The handler created by
//! [`click_handler`] resolves the clicked marker and leaves the result in a [`ClickQueue`] that
//! the application drains after the map is drawn.

use std::sync::Arc;

use arctic_map::MarkerId;
use galileo::control::{EventPropagation, MouseButton, UserEvent, UserEventHandler};
use galileo::Map;
use galileo_types::cartesian::CartesianPoint2d;
use parking_lot::Mutex;

use crate::layer::{hit_test, MarkerFeatureLayer};

/// Distance in pixels from a marker center within which a click selects the marker.
pub const CLICK_TOLERANCE_PX: f64 = 8.0;

/// A left click on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapClick {
    /// Clicked marker, `None` for a click on empty map.
    pub marker: Option<MarkerId>,
    /// Click position relative to the top left corner of the map widget.
    pub screen: [f32; 2],
}

/// Clicks waiting to be processed by the application.
#[derive(Debug, Clone, Default)]
pub struct ClickQueue(Arc<Mutex<Vec<MapClick>>>);

impl ClickQueue {
    /// Adds a click.
    pub fn push(&self, click: MapClick) {
        self.0.lock().push(click);
    }

    /// Removes and returns the pending clicks in the order they happened.
    pub fn drain(&self) -> Vec<MapClick> {
        std::mem::take(&mut *self.0.lock())
    }
}

/// Creates the handler that resolves clicks against the marker layer.
pub fn click_handler(layer: MarkerFeatureLayer, queue: ClickQueue) -> impl UserEventHandler {
    move |ev: &UserEvent, map: &mut Map| {
        let UserEvent::Click(MouseButton::Left, event) = ev else {
            return EventPropagation::Propagate;
        };

        let screen = event.screen_pointer_position;
        let marker = map
            .view()
            .screen_to_map(screen)
            .and_then(|position| {
                hit_test(
                    &layer,
                    &position,
                    map.view().resolution() * CLICK_TOLERANCE_PX,
                )
            });

        log::debug!("Map click at {screen:?}, marker {marker:?}");
        queue.push(MapClick {
            marker,
            screen: [screen.x() as f32, screen.y() as f32],
        });

        match marker {
            Some(_) => EventPropagation::Stop,
            None => EventPropagation::Propagate,
        }
    }
}
