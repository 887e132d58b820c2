use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Meeting,
    Sales,
    Document,
    OnlineTraining,
    StoreTraining,
    Recruitment,
    Travel,
    Break,
    Idle,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Meeting,
        Category::Sales,
        Category::Document,
        Category::OnlineTraining,
        Category::StoreTraining,
        Category::Recruitment,
        Category::Travel,
        Category::Break,
        Category::Idle,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Meeting => "meeting",
            Category::Sales => "sales",
            Category::Document => "document",
            Category::OnlineTraining => "onlineTraining",
            Category::StoreTraining => "storeTraining",
            Category::Recruitment => "recruitment",
            Category::Travel => "travel",
            Category::Break => "break",
            Category::Idle => "idle",
            Category::Other => "other",
        }
    }

    pub fn label_ja(self) -> &'static str {
        match self {
            Category::Meeting => "会議",
            Category::Sales => "営業",
            Category::Document => "資料作成",
            Category::OnlineTraining => "オンライン研修",
            Category::StoreTraining => "店舗研修",
            Category::Recruitment => "採用",
            Category::Travel => "移動",
            Category::Break => "休憩",
            Category::Idle => "空き時間",
            Category::Other => "その他",
        }
    }
}

/// An event as handed over by the calendar layer: wall-clock `HH:MM` strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub title: String,
}

/// An ingested event. `end_minute` may exceed one day after wraparound
/// normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub start_minute: u32,
    pub end_minute: u32,
    pub title: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkWindow {
    pub start_minute: u32,
    pub end_minute: u32,
}

impl WorkWindow {
    pub fn is_degenerate(&self) -> bool {
        self.end_minute <= self.start_minute
    }

    pub fn length_minutes(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }
}

/// An event intersected with the work window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClippedEvent {
    pub id: String,
    pub start_minute: u32,
    pub end_minute: u32,
    pub title: String,
}

impl ClippedEvent {
    pub fn covers(&self, start_minute: u32, end_minute: u32) -> bool {
        self.start_minute <= start_minute && self.end_minute >= end_minute
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlice {
    pub start_minute: u32,
    pub end_minute: u32,
    pub covering_events: Vec<ClippedEvent>,
}

impl TimeSlice {
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute - self.start_minute
    }
}

/// Minutes a single slice contributes to each category.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SliceAllocation {
    pub start_minute: u32,
    pub end_minute: u32,
    pub shares: Vec<CategoryShare>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: Category,
    pub event_id: Option<String>,
    pub minutes: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub meeting: f64,
    pub sales: f64,
    pub document: f64,
    pub online_training: f64,
    pub store_training: f64,
    pub recruitment: f64,
    pub travel: f64,
    #[serde(rename = "break")]
    pub break_time: f64,
    pub idle: f64,
    pub other: f64,
    pub total_scheduled: f64,
    pub total_work: f64,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Meeting => self.meeting,
            Category::Sales => self.sales,
            Category::Document => self.document,
            Category::OnlineTraining => self.online_training,
            Category::StoreTraining => self.store_training,
            Category::Recruitment => self.recruitment,
            Category::Travel => self.travel,
            Category::Break => self.break_time,
            Category::Idle => self.idle,
            Category::Other => self.other,
        }
    }

    pub fn add(&mut self, category: Category, minutes: f64) {
        let slot = match category {
            Category::Meeting => &mut self.meeting,
            Category::Sales => &mut self.sales,
            Category::Document => &mut self.document,
            Category::OnlineTraining => &mut self.online_training,
            Category::StoreTraining => &mut self.store_training,
            Category::Recruitment => &mut self.recruitment,
            Category::Travel => &mut self.travel,
            Category::Break => &mut self.break_time,
            Category::Idle => &mut self.idle,
            Category::Other => &mut self.other,
        };
        *slot += minutes;
    }

    pub fn entries(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_serializes_break_under_its_category_name() {
        let mut breakdown = CategoryBreakdown::default();
        breakdown.add(Category::Break, 30.0);
        breakdown.add(Category::OnlineTraining, 15.0);

        let value = serde_json::to_value(&breakdown).expect("serialize breakdown");
        assert_eq!(value["break"], serde_json::json!(30.0));
        assert_eq!(value["onlineTraining"], serde_json::json!(15.0));
        assert!(value.get("breakTime").is_none());
    }

    #[test]
    fn category_names_match_serde_names() {
        for category in Category::ALL {
            let serialized = serde_json::to_value(category).expect("serialize category");
            assert_eq!(serialized, serde_json::json!(category.as_str()));
        }
    }

    #[test]
    fn event_input_uses_camel_case_fields() {
        let raw = r#"{"id":"e1","startTime":"09:00","endTime":"10:00","title":"MTG"}"#;
        let parsed: EventInput = serde_json::from_str(raw).expect("deserialize event");
        assert_eq!(parsed.start_time, "09:00");
        assert_eq!(parsed.end_time, "10:00");
    }

    #[test]
    fn degenerate_window_has_zero_length() {
        let window = WorkWindow {
            start_minute: 600,
            end_minute: 540,
        };
        assert!(window.is_degenerate());
        assert_eq!(window.length_minutes(), 0);
    }
}
