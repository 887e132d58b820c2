use crate::application::bootstrap::bootstrap_workspace;
use crate::application::breakdown::{
    allocate_window, ingest_events, parse_work_window, BreakdownRequest,
};
use crate::application::report::{render_breakdown_text, render_export_lines, DurationStyle};
use crate::domain::aggregation::assemble_breakdown;
use crate::domain::models::{CategoryBreakdown, EventInput, SliceAllocation};
use crate::domain::time::normalize_time_input;
use crate::infrastructure::config::{load_categories, load_policies, CategoriesConfig, PoliciesConfig};
use crate::infrastructure::error::InfraError;
use crate::infrastructure::event_mapper::{decode_report_events, GoogleCalendarEvent};
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const COMMANDS_LOG: &str = "commands.log";

pub struct ReportState {
    workspace_root: PathBuf,
    config_dir: PathBuf,
    logs_dir: PathBuf,
    log_guard: Mutex<()>,
}

impl ReportState {
    pub fn new(workspace_root: PathBuf) -> Result<Self, InfraError> {
        let bootstrap = bootstrap_workspace(&workspace_root)?;
        Ok(Self {
            workspace_root: bootstrap.workspace_root,
            config_dir: bootstrap.config_dir,
            logs_dir: bootstrap.logs_dir,
            log_guard: Mutex::new(()),
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_info(&self, command: &str, message: &str) {
        self.append_log("info", command, message);
    }

    pub fn log_error(&self, command: &str, message: &str) {
        self.append_log("error", command, message);
    }

    fn append_log(&self, level: &str, command: &str, message: &str) {
        let Ok(_guard) = self.log_guard.lock() else {
            return;
        };
        let path = self.logs_dir.join(COMMANDS_LOG);
        let payload = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "level": level,
            "command": command,
            "message": message,
        });

        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(file, "{}", payload);
        }
    }

    fn load_settings(&self) -> Result<(CategoriesConfig, PoliciesConfig), InfraError> {
        Ok((
            load_categories(&self.config_dir)?,
            load_policies(&self.config_dir)?,
        ))
    }
}

/// Fills in work hours the caller left out from `policies.json`, then the
/// built-in 09:00/18:00.
fn resolve_request(
    events: Vec<EventInput>,
    work_start: Option<String>,
    work_end: Option<String>,
    policies: &PoliciesConfig,
) -> BreakdownRequest {
    let (default_start, default_end) = policies.work_hours();
    BreakdownRequest {
        events,
        work_start_time: normalize_time_input(work_start.as_deref(), &default_start),
        work_end_time: normalize_time_input(work_end.as_deref(), &default_end),
    }
}

fn run_timeline(
    state: &ReportState,
    command: &str,
    events: Vec<EventInput>,
    work_start: Option<String>,
    work_end: Option<String>,
) -> Result<Vec<SliceAllocation>, InfraError> {
    let (categories, policies) = state.load_settings()?;
    let request = resolve_request(events, work_start, work_end, &policies);
    let window = parse_work_window(&request.work_start_time, &request.work_end_time)?;
    let events = ingest_events(&request.events)?;
    let timeline = allocate_window(&events, &window, &categories.event_categorizer());
    state.log_info(
        command,
        &format!(
            "{} events in {}-{} -> {} slices",
            events.len(),
            request.work_start_time,
            request.work_end_time,
            timeline.len()
        ),
    );
    Ok(timeline)
}

pub fn compute_breakdown_impl(
    state: &ReportState,
    events: Vec<EventInput>,
    work_start: Option<String>,
    work_end: Option<String>,
) -> Result<CategoryBreakdown, InfraError> {
    let command = "compute_breakdown";
    run_timeline(state, command, events, work_start, work_end)
        .map(|timeline| assemble_breakdown(&timeline))
        .map_err(|error| {
            state.log_error(command, &error.to_string());
            error
        })
}

pub fn compute_timeline_impl(
    state: &ReportState,
    events: Vec<EventInput>,
    work_start: Option<String>,
    work_end: Option<String>,
) -> Result<Vec<SliceAllocation>, InfraError> {
    let command = "compute_timeline";
    run_timeline(state, command, events, work_start, work_end).map_err(|error| {
        state.log_error(command, &error.to_string());
        error
    })
}

pub fn import_calendar_events_impl(
    state: &ReportState,
    events: Vec<GoogleCalendarEvent>,
) -> Result<Vec<EventInput>, InfraError> {
    let command = "import_calendar_events";
    let result = load_policies(state.config_dir())
        .and_then(|policies| policies.timezone())
        .and_then(|timezone| decode_report_events(&events, timezone));
    match &result {
        Ok(decoded) => state.log_info(
            command,
            &format!("decoded {} of {} calendar events", decoded.len(), events.len()),
        ),
        Err(error) => state.log_error(command, &error.to_string()),
    }
    result
}

pub fn export_report_text_impl(
    state: &ReportState,
    events: Vec<EventInput>,
    work_start: Option<String>,
    work_end: Option<String>,
    style: DurationStyle,
) -> Result<String, InfraError> {
    let command = "export_report_text";
    let result = build_report_text(state, command, events, work_start, work_end, style);
    if let Err(error) = &result {
        state.log_error(command, &error.to_string());
    }
    result
}

fn build_report_text(
    state: &ReportState,
    command: &str,
    events: Vec<EventInput>,
    work_start: Option<String>,
    work_end: Option<String>,
    style: DurationStyle,
) -> Result<String, InfraError> {
    let categories = load_categories(state.config_dir())?;
    let ingested = ingest_events(&events)?;
    let timeline = run_timeline(state, command, events, work_start, work_end)?;
    let breakdown = assemble_breakdown(&timeline);

    let mut sections = vec![render_breakdown_text(&breakdown, style)];
    let lines = render_export_lines(&ingested, &categories.export_categorizer());
    if !lines.is_empty() {
        sections.push(lines.join("\n"));
    }
    Ok(sections.join("\n\n"))
}
