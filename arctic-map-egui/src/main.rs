//! Arctic Map desktop application.

use arctic_map::AppConfig;
use arctic_map_egui::{app_builder, click_handler, ClickQueue, MarkerLayer, WINDOW_TITLE};
use galileo::control::UserEventHandler;
use galileo::layer::raster_tile_layer::RasterTileLayerBuilder;
use galileo::{Map, MapBuilder};

fn main() {
    let config = AppConfig::from_build_env();

    let markers = MarkerLayer::new();
    let clicks = ClickQueue::default();
    let handler = click_handler(markers.handle(), clicks.clone());
    let map = create_map(&config, &markers);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    galileo_egui::InitBuilder::new(map)
        .with_native_options(native_options)
        .with_handlers([Box::new(handler) as Box<dyn UserEventHandler>])
        .with_app_builder(app_builder(markers, clicks, config))
        .init()
        .expect("failed to initialize");
}

fn create_map(config: &AppConfig, markers: &MarkerLayer) -> Map {
    let tiles = RasterTileLayerBuilder::new_osm()
        .with_file_cache_checked(&config.tile_cache)
        .build()
        .expect("failed to create tile layer");

    let (lat, lon) = config.initial_center;
    MapBuilder::default()
        .with_latlon(lat, lon)
        .with_z_level(config.initial_zoom)
        .with_layer(tiles)
        .with_layer(markers.handle())
        .build()
}
