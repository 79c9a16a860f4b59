//! Application settings.

use crate::bbox::BoundingBox;
use crate::fetch::FetchStrategy;
use crate::viewport::DEFAULT_FIT_PADDING;

/// API base used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Settings of the map application.
///
/// [`AppConfig::default`] uses built-in constants. The API location and query can be changed at
/// build time with the `ARCTIC_MAP_API_BASE`, `ARCTIC_MAP_STRATEGY` (`split` or `combined`) and
/// `ARCTIC_MAP_BBOX` (`south,west,north,east`) environment variables, see
/// [`AppConfig::from_build_env`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the backend API.
    pub api_base: String,
    /// Endpoints requested by a load cycle.
    pub strategy: FetchStrategy,
    /// Fraction of the marker bounds added around them when fitting the view.
    pub fit_padding: f64,
    /// `(lat, lon)` the map is centered on at start.
    pub initial_center: (f64, f64),
    /// Zoom level of the map at start.
    pub initial_zoom: u32,
    /// Folder for cached map tiles.
    pub tile_cache: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            strategy: FetchStrategy::default(),
            fit_padding: DEFAULT_FIT_PADDING,
            initial_center: (75.0, 40.0),
            initial_zoom: 4,
            tile_cache: ".tile_cache".to_string(),
        }
    }
}

impl AppConfig {
    /// Default configuration with the overrides given at build time.
    pub fn from_build_env() -> Self {
        Self::default().with_overrides(
            option_env!("ARCTIC_MAP_API_BASE"),
            option_env!("ARCTIC_MAP_STRATEGY"),
            option_env!("ARCTIC_MAP_BBOX"),
        )
    }

    /// Applies textual overrides. Invalid values are logged and ignored.
    pub fn with_overrides(
        mut self,
        api_base: Option<&str>,
        strategy: Option<&str>,
        bbox: Option<&str>,
    ) -> Self {
        if let Some(api_base) = api_base.map(str::trim).filter(|s| !s.is_empty()) {
            self.api_base = api_base.to_string();
        }

        let bbox = match bbox.map(str::parse::<BoundingBox>) {
            Some(Ok(bbox)) => Some(bbox),
            Some(Err(err)) => {
                log::warn!("Ignoring glacier bounding box override: {err}");
                None
            }
            None => None,
        };

        match (strategy.map(str::trim), bbox) {
            (Some("combined"), _) => self.strategy = FetchStrategy::Combined,
            (Some("split"), bbox) => {
                let bbox = match (bbox, &self.strategy) {
                    (Some(bbox), _) => bbox,
                    (None, FetchStrategy::Split { bbox }) => *bbox,
                    (None, FetchStrategy::Combined) => BoundingBox::default(),
                };
                self.strategy = FetchStrategy::Split { bbox };
            }
            (None, Some(bbox)) => {
                if let FetchStrategy::Split { bbox: current } = &mut self.strategy {
                    *current = bbox;
                }
            }
            (None, None) => {}
            (Some(other), _) => log::warn!("Unknown fetch strategy '{other}', using default"),
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(
            config.strategy,
            FetchStrategy::Split {
                bbox: BoundingBox::default()
            }
        );
        assert_eq!(config.initial_center, (75.0, 40.0));
        assert_eq!(config.initial_zoom, 4);
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::default().with_overrides(
            Some("http://ice.example:9000"),
            Some("split"),
            Some("70,0,85,90"),
        );

        assert_eq!(config.api_base, "http://ice.example:9000");
        assert_eq!(
            config.strategy,
            FetchStrategy::Split {
                bbox: BoundingBox::new(70.0, 0.0, 85.0, 90.0).unwrap()
            }
        );

        let config = AppConfig::default().with_overrides(None, Some("combined"), None);
        assert_eq!(config.strategy, FetchStrategy::Combined);
    }

    #[test]
    fn split_override_replaces_combined_strategy() {
        let combined = AppConfig {
            strategy: FetchStrategy::Combined,
            ..AppConfig::default()
        };

        let config = combined.clone().with_overrides(None, Some("split"), None);
        assert_eq!(config.strategy, FetchStrategy::default());

        let config = combined
            .clone()
            .with_overrides(None, Some("split"), Some("70,0,85,90"));
        assert_eq!(
            config.strategy,
            FetchStrategy::Split {
                bbox: BoundingBox::new(70.0, 0.0, 85.0, 90.0).unwrap()
            }
        );

        let config = combined.with_overrides(None, None, Some("70,0,85,90"));
        assert_eq!(config.strategy, FetchStrategy::Combined);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let config =
            AppConfig::default().with_overrides(Some("  "), Some("parallel"), Some("north pole"));
        assert_eq!(config, AppConfig::default());
    }
}
