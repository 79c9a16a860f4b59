//! Desktop front end of Arctic Map.
//!
//! Shows the markers managed by [`arctic_map::LoadController`] on a Galileo map inside an egui
//! application. The map is drawn by `galileo-egui`; this crate provides the marker layer, a
//! [`MapSurface`](arctic_map::MapSurface) over it, click handling and the side panel.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod app;
pub mod click;
pub mod layer;
mod surface;

pub use app::{app_builder, ArcticMapApp, WINDOW_TITLE};
pub use click::{click_handler, ClickQueue, MapClick};
pub use layer::{MarkerFeature, MarkerLayer, MarkerSymbol};
pub use surface::GalileoSurface;
