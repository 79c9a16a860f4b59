//! In-memory test doubles for the map surface and the API.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use galileo_types::cartesian::Size;
use serde_json::Value;

use crate::error::{FetchError, SurfaceError};
use crate::fetch::{resource_name, JsonSource};
use crate::marker::{Marker, MarkerId};
use crate::surface::MapSurface;
use crate::viewport::{fit_view, GeoBounds, Viewport};

pub(crate) struct RecordingSurface {
    pub markers: Vec<Marker>,
    pub screen: Size<f64>,
    pub view: Option<Viewport>,
    pub fit_calls: usize,
    pub removal_attempts: usize,
    pub fail_removal: Option<SurfaceError>,
    pub reject_titled: Option<String>,
    pub add_errors: Vec<SurfaceError>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            screen: Size::new(1024.0, 768.0),
            view: None,
            fit_calls: 0,
            removal_attempts: 0,
            fail_removal: None,
            reject_titled: None,
            add_errors: Vec::new(),
        }
    }
}

impl MapSurface for RecordingSurface {
    fn add_marker(&mut self, marker: &Marker) -> Result<(), SurfaceError> {
        if self.reject_titled.as_deref() == Some(marker.popup.title.as_str()) {
            let err = SurfaceError::Rejected(marker.popup.title.clone());
            self.add_errors.push(err.clone());
            return Err(err);
        }

        self.markers.push(marker.clone());
        Ok(())
    }

    fn remove_marker(&mut self, id: MarkerId) -> Result<(), SurfaceError> {
        self.removal_attempts += 1;
        if let Some(err) = &self.fail_removal {
            return Err(err.clone());
        }

        let index = self
            .markers
            .iter()
            .position(|marker| marker.id == id)
            .ok_or(SurfaceError::UnknownMarker(id))?;
        self.markers.remove(index);
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: &GeoBounds, padding: f64) {
        self.fit_calls += 1;
        self.view = fit_view(bounds, padding, self.screen);
    }
}

/// Serves canned responses by path and records the requests it got, with commas in query
/// values percent-encoded as `reqwest` sends them.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    responses: HashMap<String, Result<Value, u16>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn respond(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, path: &str, status: u16) -> Self {
        self.responses.insert(path.to_string(), Err(status));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("poisoned lock").clone()
    }
}

#[async_trait]
impl JsonSource for ScriptedSource {
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let query = query
            .iter()
            .map(|(key, value)| format!("{key}={}", value.replace(',', "%2C")))
            .collect::<Vec<_>>()
            .join("&");
        let request = if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        };
        self.requests.lock().expect("poisoned lock").push(request);

        match self.responses.get(path) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                resource: resource_name(path).to_string(),
                status: *status,
            }),
            None => Err(FetchError::Transport {
                resource: resource_name(path).to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}
