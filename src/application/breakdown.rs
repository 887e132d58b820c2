use crate::domain::aggregation::{allocate_slice, assemble_breakdown};
use crate::domain::categorizer::EventCategorizer;
use crate::domain::clamp::clamp_to_window;
use crate::domain::models::{CategoryBreakdown, Event, EventInput, SliceAllocation, WorkWindow};
use crate::domain::slicing::build_slices;
use crate::domain::time::{normalize_wraparound, to_minutes, TimeParseError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRequest {
    pub events: Vec<EventInput>,
    pub work_start_time: String,
    pub work_end_time: String,
}

pub fn parse_work_window(start: &str, end: &str) -> Result<WorkWindow, TimeParseError> {
    Ok(WorkWindow {
        start_minute: to_minutes(start)?,
        end_minute: to_minutes(end)?,
    })
}

/// Converts wall-clock inputs to minute offsets. Midnight wraparound is
/// resolved here and nowhere else.
pub fn ingest_events(inputs: &[EventInput]) -> Result<Vec<Event>, TimeParseError> {
    inputs
        .iter()
        .map(|input| -> Result<Event, TimeParseError> {
            let (start_minute, end_minute) =
                normalize_wraparound(to_minutes(&input.start_time)?, to_minutes(&input.end_time)?);
            Ok(Event {
                id: input.id.clone(),
                start_minute,
                end_minute,
                title: input.title.clone(),
            })
        })
        .collect()
}

pub fn allocate_window(
    events: &[Event],
    window: &WorkWindow,
    categorizer: &EventCategorizer,
) -> Vec<SliceAllocation> {
    let clipped = clamp_to_window(events, window);
    let slices = build_slices(window, &clipped);
    log::debug!(
        "work window {}-{}: {} of {} events clipped into {} slices",
        window.start_minute,
        window.end_minute,
        clipped.len(),
        events.len(),
        slices.len()
    );
    slices
        .iter()
        .map(|slice| allocate_slice(slice, categorizer))
        .collect()
}

/// Per-slice allocations for timeline display.
pub fn compute_timeline(
    request: &BreakdownRequest,
    categorizer: &EventCategorizer,
) -> Result<Vec<SliceAllocation>, TimeParseError> {
    let window = parse_work_window(&request.work_start_time, &request.work_end_time)?;
    let events = ingest_events(&request.events)?;
    Ok(allocate_window(&events, &window, categorizer))
}

pub fn compute_breakdown(
    request: &BreakdownRequest,
    categorizer: &EventCategorizer,
) -> Result<CategoryBreakdown, TimeParseError> {
    let allocations = compute_timeline(request, categorizer)?;
    Ok(assemble_breakdown(&allocations))
}
