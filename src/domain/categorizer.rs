use crate::domain::models::Category;
use serde::{Deserialize, Serialize};

/// One entry of an ordered keyword table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRule<L> {
    #[serde(alias = "category")]
    pub label: L,
    pub keywords: Vec<String>,
}

impl<L> CategoryRule<L> {
    pub fn new(label: L, keywords: &[&str]) -> Self {
        Self {
            label,
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        }
    }
}

/// Maps a title to a label by ordered, case-sensitive substring matching.
/// Earlier rules win when a title matches several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCategorizer<L> {
    rules: Vec<CategoryRule<L>>,
    fallback: L,
}

impl<L: Clone> KeywordCategorizer<L> {
    pub fn new(rules: Vec<CategoryRule<L>>, fallback: L) -> Self {
        Self { rules, fallback }
    }

    pub fn categorize(&self, title: &str) -> L {
        self.rules
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|keyword| title.contains(keyword.as_str()))
            })
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn rules(&self) -> &[CategoryRule<L>] {
        &self.rules
    }

    pub fn fallback(&self) -> &L {
        &self.fallback
    }
}

pub type EventCategorizer = KeywordCategorizer<Category>;

/// Label set used by the text export. Kept apart from the on-screen table
/// because exported reports use their own wording.
pub type ExportCategorizer = KeywordCategorizer<String>;

pub fn default_category_rules() -> Vec<CategoryRule<Category>> {
    vec![
        CategoryRule::new(
            Category::Meeting,
            &["会議", "ミーティング", "MTG", "打ち合わせ", "打合せ", "定例"],
        ),
        CategoryRule::new(Category::Sales, &["営業", "商談", "訪問", "アポ"]),
        CategoryRule::new(Category::Document, &["資料", "書類", "レポート", "報告書"]),
        CategoryRule::new(
            Category::OnlineTraining,
            &["オンライン研修", "eラーニング", "ウェビナー", "Web研修"],
        ),
        CategoryRule::new(Category::StoreTraining, &["店舗研修", "OJT", "店舗"]),
        CategoryRule::new(Category::Recruitment, &["採用", "面接", "説明会"]),
        CategoryRule::new(Category::Travel, &["移動", "出張"]),
        CategoryRule::new(Category::Break, &["休憩", "昼食", "ランチ"]),
    ]
}

pub fn default_export_rules() -> Vec<CategoryRule<String>> {
    vec![
        CategoryRule::new("Meeting".to_string(), &["会議", "MTG", "打ち合わせ"]),
        CategoryRule::new("Sales".to_string(), &["営業", "商談"]),
        CategoryRule::new("Document".to_string(), &["資料", "書類"]),
        CategoryRule::new("研修".to_string(), &["研修", "OJT"]),
        CategoryRule::new("採用".to_string(), &["採用", "面接"]),
        CategoryRule::new("Travel".to_string(), &["移動", "出張"]),
        CategoryRule::new("Break".to_string(), &["休憩", "昼食"]),
    ]
}

pub const DEFAULT_EXPORT_FALLBACK: &str = "Other";

impl Default for EventCategorizer {
    fn default() -> Self {
        Self::new(default_category_rules(), Category::Other)
    }
}

impl Default for ExportCategorizer {
    fn default() -> Self {
        Self::new(default_export_rules(), DEFAULT_EXPORT_FALLBACK.to_string())
    }
}
