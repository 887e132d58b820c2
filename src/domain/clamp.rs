use crate::domain::models::{ClippedEvent, Event, WorkWindow};

/// Keeps events that overlap the half-open window and clips them to it.
pub fn clamp_to_window(events: &[Event], window: &WorkWindow) -> Vec<ClippedEvent> {
    events
        .iter()
        .filter(|event| {
            event.start_minute < window.end_minute && event.end_minute > window.start_minute
        })
        .filter_map(|event| {
            let start_minute = event.start_minute.max(window.start_minute);
            let end_minute = event.end_minute.min(window.end_minute);
            (end_minute > start_minute).then(|| ClippedEvent {
                id: event.id.clone(),
                start_minute,
                end_minute,
                title: event.title.clone(),
            })
        })
        .collect()
}
