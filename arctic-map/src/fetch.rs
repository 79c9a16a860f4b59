//! Loading of ship and glacier collections from the backend API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::bbox::BoundingBox;
use crate::error::FetchError;
use crate::model::Dataset;
use crate::normalize;

/// Path of the combined points collection.
pub const POINTS_PATH: &str = "/api/points";
/// Path of the ships collection.
pub const SHIPS_PATH: &str = "/api/ships";
/// Path of the glaciers collection.
pub const GLACIERS_PATH: &str = "/api/glaciers";

const USER_AGENT: &str = concat!("arctic-map/", env!("CARGO_PKG_VERSION"));

/// Source of JSON documents addressed by an API path.
#[async_trait]
pub trait JsonSource: Send + Sync {
    /// Performs a single GET of `path` with the given query parameters and returns the parsed
    /// body.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError>;
}

/// [`JsonSource`] talking to the backend over HTTP.
///
/// Every call is one best-effort request: there are no retries and no timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base: String,
}

impl HttpFetcher {
    /// Creates a fetcher for the API at `base`, e.g. `http://localhost:8080`.
    pub fn new(base: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| FetchError::Transport {
                resource: "client".to_string(),
                message: err.to_string(),
            })?;

        Ok(Self {
            client,
            base: base.into(),
        })
    }

    /// Full URL of the API path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl JsonSource for HttpFetcher {
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let resource = resource_name(path);
        let url = self.url(path);
        log::info!("Fetching {resource} from {url}");

        let transport_error = |err: reqwest::Error| FetchError::Transport {
            resource: resource.to_string(),
            message: err.to_string(),
        };

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;
        check_status(resource, response.status())?;

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|err| FetchError::Decode {
            resource: resource.to_string(),
            message: err.to_string(),
        })
    }
}

fn check_status(resource: &str, status: StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status {
            resource: resource.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Last path segment, used to name the resource in messages.
pub(crate) fn resource_name(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}

/// Which endpoints a load cycle requests.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStrategy {
    /// One request to the combined points collection. All records are shown as ships.
    Combined,
    /// Ships first, then glaciers inside the bounding box.
    Split {
        /// Glacier query area.
        bbox: BoundingBox,
    },
}

impl Default for FetchStrategy {
    fn default() -> Self {
        Self::Split {
            bbox: BoundingBox::default(),
        }
    }
}

impl FetchStrategy {
    /// Requests the collections sequentially and normalizes them.
    ///
    /// The first failed request aborts the fetch; later requests are not made.
    pub async fn fetch<S: JsonSource + ?Sized>(&self, source: &S) -> Result<Dataset, FetchError> {
        match self {
            FetchStrategy::Combined => {
                let points = source.get_json(POINTS_PATH, &[]).await?;
                Ok(Dataset {
                    vessels: normalize::vessels(resource_name(POINTS_PATH), points)?,
                    glaciers: Vec::new(),
                })
            }
            FetchStrategy::Split { bbox } => {
                let ships = source.get_json(SHIPS_PATH, &[]).await?;
                let vessels = normalize::vessels(resource_name(SHIPS_PATH), ships)?;

                let glaciers = source
                    .get_json(GLACIERS_PATH, &[("bbox", bbox.to_string())])
                    .await?;
                let glaciers = normalize::glaciers(resource_name(GLACIERS_PATH), glaciers)?;

                Ok(Dataset { vessels, glaciers })
            }
        }
    }
}
