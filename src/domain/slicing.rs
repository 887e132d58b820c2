use crate::domain::models::{ClippedEvent, TimeSlice, WorkWindow};

/// Partitions the window at every event boundary. Each slice lists the
/// clipped events that fully cover it; the slices tile the window exactly.
pub fn build_slices(window: &WorkWindow, events: &[ClippedEvent]) -> Vec<TimeSlice> {
    if window.is_degenerate() {
        return Vec::new();
    }

    let mut boundaries = Vec::with_capacity(events.len() * 2 + 2);
    boundaries.push(window.start_minute);
    boundaries.push(window.end_minute);
    for event in events {
        boundaries.push(event.start_minute);
        boundaries.push(event.end_minute);
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    boundaries
        .windows(2)
        .map(|pair| {
            let (start_minute, end_minute) = (pair[0], pair[1]);
            TimeSlice {
                start_minute,
                end_minute,
                covering_events: events
                    .iter()
                    .filter(|event| event.covers(start_minute, end_minute))
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}
