//! Egui application hosting the map and the side panel.

use arctic_map::{
    AppConfig, Dataset, EntityKind, FetchError, HttpFetcher, InfoCard, LoadController, MarkerId,
    SelectedInfo, Status,
};
use egui::{Color32, Pos2, RichText, Vec2};
use galileo_egui::{EguiMap, EguiMapState};
use tokio::sync::oneshot;

use crate::click::{ClickQueue, MapClick};
use crate::layer::MarkerLayer;
use crate::surface::GalileoSurface;

/// Title of the application window.
pub const WINDOW_TITLE: &str = "Arctic Map";

type LoadResult = Result<Dataset, FetchError>;

/// Returns the closure that `galileo_egui::InitBuilder::with_app_builder` calls once the map
/// state is created.
pub fn app_builder(
    markers: MarkerLayer,
    clicks: ClickQueue,
    config: AppConfig,
) -> impl FnOnce(EguiMapState) -> Box<dyn eframe::App> + 'static {
    move |map| Box::new(ArcticMapApp::new(map, markers, clicks, &config))
}

/// Popup shown next to a clicked marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Marker the popup belongs to.
    pub marker: MarkerId,
    /// Marker kind, selects the heading color.
    pub kind: EntityKind,
    /// Popup content.
    pub card: InfoCard,
    /// Screen position of the click.
    pub anchor: Pos2,
}

/// The application: a side panel with the load button, counts, selected marker details and
/// status, and the map with the markers.
pub struct ArcticMapApp {
    map: EguiMapState,
    markers: MarkerLayer,
    clicks: ClickQueue,
    controller: LoadController,
    fetcher: Option<HttpFetcher>,
    pending: Option<oneshot::Receiver<LoadResult>>,
    popup: Option<Popup>,
    map_origin: Pos2,
}

impl ArcticMapApp {
    /// Creates the application. `markers` must already be a layer of the map, and `clicks` must
    /// be filled by the handler of the map.
    pub fn new(
        map: EguiMapState,
        markers: MarkerLayer,
        clicks: ClickQueue,
        config: &AppConfig,
    ) -> Self {
        log::info!(
            "Using API at {} with {:?} strategy",
            config.api_base,
            config.strategy
        );

        let fetcher = match HttpFetcher::new(config.api_base.clone()) {
            Ok(fetcher) => Some(fetcher),
            Err(err) => {
                log::error!("Failed to create HTTP client: {err}");
                None
            }
        };

        Self {
            map,
            markers,
            clicks,
            controller: LoadController::from_config(config),
            fetcher,
            pending: None,
            popup: None,
            map_origin: Pos2::ZERO,
        }
    }

    fn start_load(&mut self, ctx: &egui::Context) {
        let mut surface = GalileoSurface::new(&mut self.markers, self.map.map_mut());
        let Some(request) = self.controller.begin_load(&mut surface) else {
            return;
        };
        self.popup = None;

        let Some(fetcher) = self.fetcher.clone() else {
            let err = FetchError::Transport {
                resource: "client".to_string(),
                message: "HTTP client is not available".to_string(),
            };
            let mut surface = GalileoSurface::new(&mut self.markers, self.map.map_mut());
            self.controller.finish_load(Err(err), &mut surface);
            return;
        };

        let (sender, receiver) = oneshot::channel();
        let ctx = ctx.clone();
        tokio::spawn(async move {
            let result = request.fetch(&fetcher).await;
            if sender.send(result).is_err() {
                log::warn!("Load result was dropped");
            }
            ctx.request_repaint();
        });

        self.pending = Some(receiver);
    }

    fn poll_load(&mut self) {
        let Some(receiver) = &mut self.pending else {
            return;
        };

        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(FetchError::Transport {
                resource: "data".to_string(),
                message: "load task stopped without a result".to_string(),
            }),
        };
        self.pending = None;

        let mut surface = GalileoSurface::new(&mut self.markers, self.map.map_mut());
        self.controller.finish_load(result, &mut surface);
    }

    fn handle_clicks(&mut self) {
        for MapClick { marker, screen } in self.clicks.drain() {
            let anchor = self.map_origin + Vec2::new(screen[0], screen[1]);
            self.popup = marker
                .and_then(|id| self.controller.select_marker(id))
                .map(|marker| Popup {
                    marker: marker.id,
                    kind: marker.kind,
                    card: marker.popup.clone(),
                    anchor,
                });
        }
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) -> bool {
        ui.heading(WINDOW_TITLE);
        ui.add_space(8.0);

        let trigger = self.controller.trigger();
        let load_clicked = ui
            .add_enabled(trigger.enabled, egui::Button::new(trigger.label))
            .clicked();

        ui.separator();
        let session = self.controller.session();
        ui.label(format!("Ships: {}", session.ships().len()));
        ui.label(format!("Glaciers: {}", session.glaciers().len()));

        ui.separator();
        match session.selected() {
            SelectedInfo::Placeholder => {
                ui.label(RichText::new(session.selected().text()).italics());
            }
            SelectedInfo::Marker { kind, card } => show_card(ui, *kind, card),
        }

        ui.separator();
        match self.controller.status() {
            Status::Failed(message) => {
                ui.colored_label(ui.visuals().error_fg_color, message);
            }
            status => {
                ui.label(status.to_string());
            }
        }

        load_clicked
    }

    fn popup_window(&mut self, ctx: &egui::Context) {
        let Some(popup) = &self.popup else {
            return;
        };

        let mut open = true;
        egui::Window::new(RichText::new(&popup.card.title).color(kind_color(popup.kind)))
            .id(egui::Id::new("marker_popup").with(popup.marker.0))
            .collapsible(false)
            .resizable(false)
            .fixed_pos(popup.anchor)
            .open(&mut open)
            .show(ctx, |ui| {
                for (label, value) in &popup.card.rows {
                    ui.label(format!("{label}: {value}"));
                }
            });

        if !open {
            self.popup = None;
        }
    }
}

impl eframe::App for ArcticMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load();

        let load_clicked = egui::SidePanel::left("controls")
            .resizable(false)
            .min_width(240.0)
            .show(ctx, |ui| self.side_panel(ui))
            .inner;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.map_origin = ui.available_rect_before_wrap().min;
                EguiMap::new(&mut self.map).show_ui(ui);
            });

        self.handle_clicks();
        self.popup_window(ctx);

        if load_clicked {
            self.start_load(ctx);
        }
    }
}

fn kind_color(kind: EntityKind) -> Color32 {
    match kind {
        EntityKind::Vessel => Color32::from_rgb(0, 0, 128),
        EntityKind::Glacier => Color32::from_rgb(0, 102, 153),
    }
}

fn show_card(ui: &mut egui::Ui, kind: EntityKind, card: &InfoCard) {
    ui.label(RichText::new(&card.title).strong().color(kind_color(kind)));
    egui::Grid::new("selected_info")
        .num_columns(2)
        .show(ui, |ui| {
            for (label, value) in &card.rows {
                ui.label(label);
                ui.label(value);
                ui.end_row();
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_builder_takes_map_state_only() {
        let builder: Box<dyn FnOnce(EguiMapState) -> Box<dyn eframe::App>> = Box::new(
            app_builder(MarkerLayer::new(), ClickQueue::default(), AppConfig::default()),
        );
        drop(builder);
    }

    #[test]
    fn marker_colors_differ_by_kind() {
        assert_ne!(
            kind_color(EntityKind::Vessel),
            kind_color(EntityKind::Glacier)
        );
    }
}
