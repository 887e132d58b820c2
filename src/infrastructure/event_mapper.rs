use crate::domain::models::EventInput;
use crate::infrastructure::error::InfraError;
use chrono::DateTime;
use chrono_tz::Tz;

const STATUS_CANCELLED: &str = "cancelled";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct CalendarEventDateTime {
    #[serde(rename = "dateTime", skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct GoogleCalendarEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub start: CalendarEventDateTime,
    pub end: CalendarEventDateTime,
}

/// Converts a fetched calendar event into wall-clock times in `timezone`.
/// Cancelled and all-day events are not part of the timesheet.
pub fn decode_report_event(
    event: &GoogleCalendarEvent,
    timezone: Tz,
) -> Result<Option<EventInput>, InfraError> {
    if event
        .status
        .as_deref()
        .is_some_and(|status| status.trim().eq_ignore_ascii_case(STATUS_CANCELLED))
    {
        return Ok(None);
    }

    let (Some(start_raw), Some(end_raw)) =
        (event.start.date_time.as_deref(), event.end.date_time.as_deref())
    else {
        return Ok(None);
    };

    let start_time = to_wall_clock(start_raw, timezone, "start.dateTime")?;
    let end_time = to_wall_clock(end_raw, timezone, "end.dateTime")?;
    let id = event
        .id
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| InfraError::InvalidEvent("event id is required".to_string()))?
        .to_string();

    Ok(Some(EventInput {
        id,
        start_time,
        end_time,
        title: event.summary.clone().unwrap_or_default(),
    }))
}

pub fn decode_report_events(
    events: &[GoogleCalendarEvent],
    timezone: Tz,
) -> Result<Vec<EventInput>, InfraError> {
    let mut decoded = Vec::with_capacity(events.len());
    for event in events {
        if let Some(input) = decode_report_event(event, timezone)? {
            decoded.push(input);
        }
    }
    Ok(decoded)
}

fn to_wall_clock(value: &str, timezone: Tz, field_name: &str) -> Result<String, InfraError> {
    DateTime::parse_from_rfc3339(value)
        .map(|value| value.with_timezone(&timezone).format("%H:%M").to_string())
        .map_err(|error| {
            InfraError::InvalidEvent(format!(
                "invalid calendar event {field_name} '{value}': {error}"
            ))
        })
}
