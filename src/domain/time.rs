use chrono::{NaiveTime, Timelike};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;
pub const DEFAULT_WORK_START: &str = "09:00";
pub const DEFAULT_WORK_END: &str = "18:00";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("time '{value}' must be HH:MM")]
    Malformed { value: String },
    #[error("time '{value}' is out of range")]
    OutOfRange { value: String },
}

/// Parses a strict `HH:MM` wall-clock time into minutes since midnight.
pub fn to_minutes(value: &str) -> Result<u32, TimeParseError> {
    let malformed = || TimeParseError::Malformed {
        value: value.to_string(),
    };

    let mut split = value.split(':');
    let Some(hour_str) = split.next() else {
        return Err(malformed());
    };
    let Some(minute_str) = split.next() else {
        return Err(malformed());
    };
    if split.next().is_some() {
        return Err(malformed());
    }
    if !is_ascii_number(hour_str) || !is_ascii_number(minute_str) {
        return Err(malformed());
    }

    let hour = hour_str.parse::<u32>().map_err(|_| malformed())?;
    let minute = minute_str.parse::<u32>().map_err(|_| malformed())?;
    if hour > 23 || minute > 59 {
        return Err(TimeParseError::OutOfRange {
            value: value.to_string(),
        });
    }
    Ok(hour * 60 + minute)
}

/// Formats minutes as zero-padded `HH:MM`, wrapping modulo one day.
pub fn to_time_string(minutes: i64) -> String {
    let wrapped = minutes.rem_euclid(i64::from(MINUTES_PER_DAY));
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Moves an end that precedes its start onto the following day.
/// Applied exactly once when events are ingested.
pub fn normalize_wraparound(start_minute: u32, end_minute: u32) -> (u32, u32) {
    if end_minute < start_minute {
        (start_minute, end_minute + MINUTES_PER_DAY)
    } else {
        (start_minute, end_minute)
    }
}

/// Upstream normalizer for user-entered times. Accepts `HH:MM`, `H:MM`,
/// `HH:MM:SS` and `H時M分` / `H時`; anything else yields `default`.
pub fn normalize_time_input(raw: Option<&str>, default: &str) -> String {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return default.to_string();
    };

    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M:%S") {
        return format!("{:02}:{:02}", time.hour(), time.minute());
    }
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return format!("{:02}:{:02}", time.hour(), time.minute());
    }
    if let Some(normalized) = parse_japanese_time(raw) {
        return normalized;
    }

    log::warn!("unrecognized time input '{raw}', falling back to {default}");
    default.to_string()
}

fn parse_japanese_time(raw: &str) -> Option<String> {
    let (hour_str, rest) = raw.split_once('時')?;
    let minute_str = rest.strip_suffix('分').unwrap_or(rest);
    if !is_ascii_number(hour_str) {
        return None;
    }
    let hour = hour_str.parse::<u32>().ok()?;
    let minute = if minute_str.is_empty() {
        0
    } else if is_ascii_number(minute_str) {
        minute_str.parse::<u32>().ok()?
    } else {
        return None;
    };
    (hour <= 23 && minute <= 59).then(|| format!("{hour:02}:{minute:02}"))
}

fn is_ascii_number(value: &str) -> bool {
    !value.is_empty() && value.len() <= 2 && value.bytes().all(|byte| byte.is_ascii_digit())
}
