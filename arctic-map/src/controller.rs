//! Load cycle of the application.

use std::fmt::{Display, Formatter};

use crate::config::AppConfig;
use crate::error::FetchError;
use crate::fetch::{FetchStrategy, JsonSource};
use crate::marker::{Marker, MarkerId};
use crate::model::Dataset;
use crate::render::render_entities;
use crate::session::Session;
use crate::surface::MapSurface;

/// Label of the trigger control while idle.
pub const LOAD_LABEL: &str = "Load Ships & Glaciers";
/// Label of the trigger control during a load cycle.
pub const LOADING_LABEL: &str = "Loading...";

/// Phase of the load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Waiting for the user.
    #[default]
    Idle,
    /// Markers are cleared and the data is being fetched.
    Loading,
}

/// State of the button that starts a load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerControl {
    /// Whether the button can be clicked.
    pub enabled: bool,
    /// Text of the button.
    pub label: &'static str,
}

impl Default for TriggerControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: LOAD_LABEL,
        }
    }
}

/// Outcome of the last load cycle, shown in the status region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    /// No load was started yet.
    #[default]
    Ready,
    /// A load cycle is in progress.
    Loading,
    /// The last cycle finished.
    Loaded {
        /// Ship markers on the map.
        ships: usize,
        /// Glacier markers on the map.
        glaciers: usize,
    },
    /// The last cycle failed with the given message.
    Failed(String),
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ready => write!(f, "Ready"),
            Status::Loading => write!(f, "{LOADING_LABEL}"),
            Status::Loaded { ships, glaciers } => {
                write!(f, "Loaded {ships} ships and {glaciers} glaciers")
            }
            Status::Failed(message) => write!(f, "{message}"),
        }
    }
}

/// The fetch part of a load cycle.
///
/// Owns everything it needs, so it can be moved to another task while the UI keeps running.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    strategy: FetchStrategy,
}

impl LoadRequest {
    /// Requests and normalizes the collections.
    pub async fn fetch<J: JsonSource + ?Sized>(&self, source: &J) -> Result<Dataset, FetchError> {
        self.strategy.fetch(source).await
    }
}

/// Drives load cycles and owns the markers shown on the map.
///
/// A cycle is split in three steps so that the UI thread never waits for the network:
/// [`LoadController::begin_load`], [`LoadRequest::fetch`] and [`LoadController::finish_load`].
/// [`LoadController::load`] chains them.
#[derive(Debug)]
pub struct LoadController {
    session: Session,
    phase: LoadPhase,
    trigger: TriggerControl,
    status: Status,
    strategy: FetchStrategy,
    fit_padding: f64,
}

impl LoadController {
    /// Creates an idle controller.
    pub fn new(strategy: FetchStrategy, fit_padding: f64) -> Self {
        Self {
            session: Session::new(),
            phase: LoadPhase::Idle,
            trigger: TriggerControl::default(),
            status: Status::Ready,
            strategy,
            fit_padding,
        }
    }

    /// Creates an idle controller using the strategy and padding of the config.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.strategy.clone(), config.fit_padding)
    }

    /// Markers and the selected-info panel.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current phase.
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// State of the trigger button.
    pub fn trigger(&self) -> &TriggerControl {
        &self.trigger
    }

    /// Status region content.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Starts a load cycle: disables the trigger and removes the current markers.
    ///
    /// Returns `None` if a cycle is already in progress.
    pub fn begin_load<S: MapSurface + ?Sized>(&mut self, surface: &mut S) -> Option<LoadRequest> {
        if self.phase == LoadPhase::Loading {
            log::info!("Load already in progress, ignoring request");
            return None;
        }

        log::info!("Starting load cycle");
        self.phase = LoadPhase::Loading;
        self.trigger = TriggerControl {
            enabled: false,
            label: LOADING_LABEL,
        };
        self.status = Status::Loading;

        self.session.clear_markers(surface);

        Some(LoadRequest {
            strategy: self.strategy.clone(),
        })
    }

    /// Completes the cycle with the fetch result.
    ///
    /// On success the records are rendered and the view is fitted to the markers. The trigger
    /// is re-enabled in any case.
    pub fn finish_load<S: MapSurface + ?Sized>(
        &mut self,
        result: Result<Dataset, FetchError>,
        surface: &mut S,
    ) -> Status {
        if self.phase != LoadPhase::Loading {
            log::warn!("Load result received while no load was in progress");
        }

        self.status = match result {
            Ok(dataset) => {
                log::info!(
                    "Received {} ships and {} glaciers",
                    dataset.vessels.len(),
                    dataset.glaciers.len()
                );

                render_entities(&dataset.vessels, &mut self.session, surface);
                render_entities(&dataset.glaciers, &mut self.session, surface);

                match self.session.bounds() {
                    Some(bounds) => surface.fit_bounds(&bounds, self.fit_padding),
                    None => log::info!("No markers to fit the view to"),
                }

                let status = Status::Loaded {
                    ships: self.session.ships().len(),
                    glaciers: self.session.glaciers().len(),
                };
                log::info!("Load cycle finished: {status}");
                status
            }
            Err(err) => {
                log::error!("Error loading data: {err}");
                Status::Failed(format!("Error loading data: {err}"))
            }
        };

        self.phase = LoadPhase::Idle;
        self.trigger = TriggerControl::default();

        self.status.clone()
    }

    /// Runs a whole load cycle.
    ///
    /// Returns `None` without doing anything if a cycle is already in progress.
    pub async fn load<J, S>(&mut self, source: &J, surface: &mut S) -> Option<Status>
    where
        J: JsonSource + ?Sized,
        S: MapSurface + ?Sized,
    {
        let request = self.begin_load(surface)?;
        let result = request.fetch(source).await;
        Some(self.finish_load(result, surface))
    }

    /// Shows the details of the clicked marker in the selected-info panel.
    ///
    /// Returns the marker so that its popup can be shown, or `None` if the id is unknown.
    pub fn select_marker(&mut self, id: MarkerId) -> Option<&Marker> {
        let marker = self.session.select(id);
        if marker.is_none() {
            log::debug!("Click on unknown marker {id}");
        }

        marker
    }
}

impl Default for LoadController {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
