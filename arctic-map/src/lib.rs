//! Arctic Map loads ship positions and glacier locations from a backend API and manages the
//! markers that show them on an interactive map.
//!
//! The crate knows nothing about rendering. Everything that touches the map goes through the
//! [`MapSurface`] trait, which the `arctic-map-egui` application implements on top of a Galileo
//! feature layer, and tests implement in memory.
//!
//! # Load cycle
//!
//! A [`LoadController`] owns the [`Session`] (markers currently shown and the selected-info
//! panel) and runs a cycle in three steps:
//!
//! * [`LoadController::begin_load`] disables the trigger button and clears the map,
//! * [`LoadRequest::fetch`] asks the API for the data using a [`FetchStrategy`] and normalizes
//!   the loosely typed records into [`VesselRecord`]s and [`GlacierRecord`]s,
//! * [`LoadController::finish_load`] places a marker for every record with valid coordinates,
//!   updates the counts and fits the map view to the markers.
//!
//! The fetch step owns its inputs, so an application can run it on a background task while
//! the UI keeps drawing frames.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod bbox;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod marker;
pub mod model;
pub mod normalize;
mod render;
mod session;
mod surface;
pub mod validate;
pub mod viewport;

#[cfg(test)]
mod testing;

pub use bbox::BoundingBox;
pub use config::AppConfig;
pub use controller::{LoadController, LoadPhase, LoadRequest, Status, TriggerControl};
pub use error::{FetchError, SurfaceError};
pub use fetch::{FetchStrategy, HttpFetcher, JsonSource};
pub use marker::{InfoCard, MapEntity, Marker, MarkerId};
pub use model::{Candidate, Dataset, EntityKind, GlacierRecord, VesselRecord};
pub use render::{render_entities, RenderSummary};
pub use session::{SelectedInfo, Session, SELECTED_PLACEHOLDER};
pub use surface::MapSurface;
pub use viewport::{fit_view, GeoBounds, Viewport};

// Reexport galileo_types
pub use galileo_types;
