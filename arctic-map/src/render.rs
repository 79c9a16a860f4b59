use crate::marker::MapEntity;
use crate::session::Session;
use crate::surface::MapSurface;

/// Individually logged rejections per batch; the rest are only counted.
const LOGGED_REJECTIONS: usize = 5;

/// Outcome of rendering a batch of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    /// Records that got a marker.
    pub valid: usize,
    /// Records skipped because of invalid coordinates or a failure to place the marker.
    pub invalid: usize,
}

/// Places a marker for every record with a valid position and tracks it in the session.
///
/// A bad record never aborts the batch: it is counted in [`RenderSummary::invalid`] and the
/// remaining records are still rendered.
pub fn render_entities<E, S>(entities: &[E], session: &mut Session, surface: &mut S) -> RenderSummary
where
    E: MapEntity,
    S: MapSurface + ?Sized,
{
    let mut summary = RenderSummary::default();
    let label = E::KIND.label();

    for (index, entity) in entities.iter().enumerate() {
        let id = session.next_marker_id();
        let Some(marker) = entity.to_marker(id) else {
            summary.invalid += 1;
            if summary.invalid <= LOGGED_REJECTIONS {
                let (lat, lon) = entity.coordinates();
                log::warn!(
                    "Invalid coordinates in {label} record {index}: {} ({lat}, {lon})",
                    entity.display_name()
                );
            }
            continue;
        };

        match surface.add_marker(&marker) {
            Ok(()) => {
                log::debug!("Added {label} marker {id}: {}", marker.popup.title);
                session.track(marker);
                summary.valid += 1;
            }
            Err(err) => {
                summary.invalid += 1;
                log::error!("Error adding {label} marker {}: {err}", marker.popup.title);
            }
        }
    }

    log::info!(
        "{label} summary: {} valid, {} invalid",
        summary.valid,
        summary.invalid
    );

    summary
}
