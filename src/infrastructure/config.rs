use crate::domain::categorizer::{
    default_category_rules, default_export_rules, CategoryRule, EventCategorizer,
    ExportCategorizer, DEFAULT_EXPORT_FALLBACK,
};
use crate::domain::models::Category;
use crate::domain::time::{normalize_time_input, DEFAULT_WORK_END, DEFAULT_WORK_START};
use crate::infrastructure::error::InfraError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CATEGORIES_JSON: &str = "categories.json";
const POLICIES_JSON: &str = "policies.json";
const SCHEMA_VERSION: u64 = 1;
const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesConfig {
    pub schema: u64,
    pub rules: Vec<CategoryRule<Category>>,
    pub export_rules: Vec<CategoryRule<String>>,
    pub export_fallback: String,
}

impl CategoriesConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.rules.is_empty() {
            return Err("rules must not be empty".to_string());
        }
        for rule in &self.rules {
            if matches!(rule.label, Category::Idle) {
                return Err("rules must not assign events to idle".to_string());
            }
            validate_keywords(&rule.keywords, rule.label.as_str())?;
        }
        for rule in &self.export_rules {
            if rule.label.trim().is_empty() {
                return Err("exportRules[].label must not be empty".to_string());
            }
            validate_keywords(&rule.keywords, &rule.label)?;
        }
        if self.export_fallback.trim().is_empty() {
            return Err("exportFallback must not be empty".to_string());
        }
        Ok(())
    }

    pub fn event_categorizer(&self) -> EventCategorizer {
        EventCategorizer::new(self.rules.clone(), Category::Other)
    }

    pub fn export_categorizer(&self) -> ExportCategorizer {
        ExportCategorizer::new(self.export_rules.clone(), self.export_fallback.clone())
    }
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            schema: SCHEMA_VERSION,
            rules: default_category_rules(),
            export_rules: default_export_rules(),
            export_fallback: DEFAULT_EXPORT_FALLBACK.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkHoursConfig {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PoliciesConfig {
    pub schema: u64,
    pub work_hours: WorkHoursConfig,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Default for PoliciesConfig {
    fn default() -> Self {
        Self {
            schema: SCHEMA_VERSION,
            work_hours: WorkHoursConfig {
                start: Some(DEFAULT_WORK_START.to_string()),
                end: Some(DEFAULT_WORK_END.to_string()),
            },
            timezone: Some(DEFAULT_TIMEZONE.to_string()),
        }
    }
}

impl PoliciesConfig {
    /// Work hours as strict `HH:MM`, defaulting anything unusable.
    pub fn work_hours(&self) -> (String, String) {
        (
            normalize_time_input(self.work_hours.start.as_deref(), DEFAULT_WORK_START),
            normalize_time_input(self.work_hours.end.as_deref(), DEFAULT_WORK_END),
        )
    }

    pub fn timezone(&self) -> Result<chrono_tz::Tz, InfraError> {
        let name = self
            .timezone
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_TIMEZONE);
        name.parse::<chrono_tz::Tz>()
            .map_err(|error| InfraError::InvalidConfig(format!("invalid timezone '{name}': {error}")))
    }
}

pub fn ensure_default_configs(config_dir: &Path) -> Result<(), InfraError> {
    write_if_missing(&config_dir.join(CATEGORIES_JSON), &CategoriesConfig::default())?;
    write_if_missing(&config_dir.join(POLICIES_JSON), &PoliciesConfig::default())?;
    Ok(())
}

pub fn load_categories(config_dir: &Path) -> Result<CategoriesConfig, InfraError> {
    let path = config_dir.join(CATEGORIES_JSON);
    let config: CategoriesConfig = serde_json::from_value(read_config(&path)?)?;
    config
        .validate()
        .map_err(|message| InfraError::InvalidConfig(format!("{message} in {}", path.display())))?;
    Ok(config)
}

pub fn load_policies(config_dir: &Path) -> Result<PoliciesConfig, InfraError> {
    let path = config_dir.join(POLICIES_JSON);
    Ok(serde_json::from_value(read_config(&path)?)?)
}

fn write_if_missing<T: Serialize>(path: &Path, value: &T) -> Result<(), InfraError> {
    if !path.exists() {
        let formatted = serde_json::to_string_pretty(value)?;
        fs::write(path, format!("{formatted}\n"))?;
    }
    Ok(())
}

fn read_config(path: &Path) -> Result<serde_json::Value, InfraError> {
    let raw = fs::read_to_string(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    let schema = parsed
        .get("schema")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| InfraError::InvalidConfig(format!("missing schema in {}", path.display())))?;
    if schema != SCHEMA_VERSION {
        return Err(InfraError::InvalidConfig(format!(
            "unsupported schema {} in {}",
            schema,
            path.display()
        )));
    }
    Ok(parsed)
}

fn validate_keywords(keywords: &[String], label: &str) -> Result<(), String> {
    if keywords.iter().any(|keyword| keyword.is_empty()) {
        return Err(format!("keywords for {label} must not contain empty strings"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_TEMP_DIR: AtomicUsize = AtomicUsize::new(0);

    struct TempConfigDir {
        path: PathBuf,
    }

    impl TempConfigDir {
        fn new() -> Self {
            let sequence = NEXT_TEMP_DIR.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir().join(format!(
                "nippo-config-tests-{}-{}",
                std::process::id(),
                sequence
            ));
            fs::create_dir_all(&path).expect("create temp config dir");
            Self { path }
        }
    }

    impl Drop for TempConfigDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    #[test]
    fn default_configs_are_written_and_loadable() {
        let dir = TempConfigDir::new();
        ensure_default_configs(&dir.path).expect("write defaults");

        let categories = load_categories(&dir.path).expect("load categories");
        assert_eq!(categories, CategoriesConfig::default());
        assert_eq!(categories.rules[0].label, Category::Meeting);

        let policies = load_policies(&dir.path).expect("load policies");
        assert_eq!(policies.work_hours(), ("09:00".to_string(), "18:00".to_string()));
        assert_eq!(policies.timezone().expect("timezone"), chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn existing_configs_are_not_overwritten() {
        let dir = TempConfigDir::new();
        let custom = serde_json::json!({
            "schema": 1,
            "workHours": { "start": "10:00", "end": "19:00" }
        });
        fs::write(dir.path.join(POLICIES_JSON), custom.to_string()).expect("write policies");
        ensure_default_configs(&dir.path).expect("write defaults");

        let policies = load_policies(&dir.path).expect("load policies");
        assert_eq!(policies.work_hours(), ("10:00".to_string(), "19:00".to_string()));
        assert_eq!(policies.timezone, None);
    }

    #[test]
    fn malformed_work_hours_fall_back_to_defaults() {
        let policies = PoliciesConfig {
            schema: 1,
            work_hours: WorkHoursConfig {
                start: Some("morning".to_string()),
                end: None,
            },
            timezone: None,
        };
        assert_eq!(policies.work_hours(), ("09:00".to_string(), "18:00".to_string()));
    }

    #[test]
    fn category_rules_keep_file_order() {
        let dir = TempConfigDir::new();
        let custom = serde_json::json!({
            "schema": 1,
            "rules": [
                { "category": "sales", "keywords": ["営業"] },
                { "category": "meeting", "keywords": ["会議"] }
            ],
            "exportRules": [],
            "exportFallback": "Misc"
        });
        fs::write(dir.path.join(CATEGORIES_JSON), custom.to_string()).expect("write categories");

        let config = load_categories(&dir.path).expect("load categories");
        let categorizer = config.event_categorizer();
        assert_eq!(categorizer.categorize("営業会議"), Category::Sales);
        assert_eq!(config.export_categorizer().categorize("営業会議"), "Misc");
    }

    #[test]
    fn empty_keyword_is_rejected() {
        let dir = TempConfigDir::new();
        let custom = serde_json::json!({
            "schema": 1,
            "rules": [{ "category": "travel", "keywords": [""] }],
            "exportRules": [],
            "exportFallback": "Other"
        });
        fs::write(dir.path.join(CATEGORIES_JSON), custom.to_string()).expect("write categories");

        match load_categories(&dir.path) {
            Err(InfraError::InvalidConfig(message)) => assert!(message.contains("travel")),
            other => panic!("expected invalid config error, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_schema_is_rejected() {
        let dir = TempConfigDir::new();
        fs::write(
            dir.path.join(POLICIES_JSON),
            serde_json::json!({ "schema": 2, "workHours": {} }).to_string(),
        )
        .expect("write policies");
        assert!(matches!(
            load_policies(&dir.path),
            Err(InfraError::InvalidConfig(_))
        ));
    }

    #[test]
    fn invalid_timezone_is_reported() {
        let mut policies = PoliciesConfig::default();
        policies.timezone = Some("Mars/Olympus".to_string());
        assert!(policies.timezone().is_err());
    }
}
