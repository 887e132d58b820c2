use crate::domain::categorizer::ExportCategorizer;
use crate::domain::models::{Category, CategoryBreakdown, Event};
use crate::domain::time::to_time_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationStyle {
    /// `1時間30分`
    Japanese,
    /// `1h30m`
    Compact,
}

/// Rounds to whole minutes and formats. Each value is rounded on its own,
/// so formatted parts need not add up to a formatted total.
pub fn format_minutes(minutes: f64, style: DurationStyle) -> String {
    let rounded = minutes.max(0.0).round() as u64;
    let hours = rounded / 60;
    let remainder = rounded % 60;

    match style {
        DurationStyle::Japanese => match (hours, remainder) {
            (0, minutes) => format!("{minutes}分"),
            (hours, 0) => format!("{hours}時間"),
            (hours, minutes) => format!("{hours}時間{minutes}分"),
        },
        DurationStyle::Compact => match (hours, remainder) {
            (0, minutes) => format!("{minutes}m"),
            (hours, 0) => format!("{hours}h"),
            (hours, minutes) => format!("{hours}h{minutes}m"),
        },
    }
}

/// Category summary for the daily report body. Categories with no time are
/// omitted; idle and break always come last, followed by the totals.
pub fn render_breakdown_text(breakdown: &CategoryBreakdown, style: DurationStyle) -> String {
    let mut lines = breakdown
        .entries()
        .filter(|(category, _)| !matches!(category, Category::Break | Category::Idle))
        .filter(|(_, minutes)| *minutes > 0.0)
        .map(|(category, minutes)| {
            format!("{}: {}", category.label_ja(), format_minutes(minutes, style))
        })
        .collect::<Vec<_>>();

    for category in [Category::Break, Category::Idle] {
        lines.push(format!(
            "{}: {}",
            category.label_ja(),
            format_minutes(breakdown.get(category), style)
        ));
    }
    lines.push(format!(
        "稼働時間: {}",
        format_minutes(breakdown.total_work, style)
    ));
    lines.push(format!(
        "合計: {}",
        format_minutes(breakdown.total_scheduled, style)
    ));
    lines.join("\n")
}

/// One line per event for the exported report, labelled with the export
/// keyword table rather than the on-screen categories.
pub fn render_export_lines(events: &[Event], categorizer: &ExportCategorizer) -> Vec<String> {
    let mut sorted = events.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|event| (event.start_minute, event.end_minute));
    sorted
        .into_iter()
        .map(|event| {
            format!(
                "{}-{} [{}] {}",
                to_time_string(i64::from(event.start_minute)),
                to_time_string(i64::from(event.end_minute)),
                categorizer.categorize(&event.title),
                event.title
            )
        })
        .collect()
}
