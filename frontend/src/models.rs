use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub display_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Bills,
    #[default]
    Other,
    Custom(String),
}

impl Category {
    /// Categories offered by the add form, in display order.
    pub const PRESETS: [Category; 5] = [
        Category::Food,
        Category::Travel,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    pub fn from_label(raw: &str) -> Self {
        match raw.trim() {
            // records saved without a category are grouped under Other
            // everywhere, so the two are intentionally indistinguishable
            "" | "Other" => Category::Other,
            "Food" => Category::Food,
            "Travel" => Category::Travel,
            "Shopping" => Category::Shopping,
            "Bills" => Category::Bills,
            other => Category::Custom(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Other => "Other",
            Category::Custom(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::from_label(&raw)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Category,
    #[serde(rename = "userId", default)]
    pub owner_id: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A record as typed into the add form, before the backend assigns an id.
/// `category: None` leaves categorisation to the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: f64,
    pub category: Option<Category>,
}

impl ExpenseDraft {
    pub fn create_request<'a>(&'a self, owner_id: &'a str) -> CreateExpenseRequest<'a> {
        CreateExpenseRequest {
            title: &self.title,
            amount: self.amount,
            category: self.category.as_ref().map(Category::label).unwrap_or(""),
            user_id: owner_id,
        }
    }

    pub fn analyze_request(&self) -> AnalyzeRequest {
        AnalyzeRequest {
            category: self.category.clone().unwrap_or(Category::Other),
            current_spend: self.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateExpenseRequest<'a> {
    pub title: &'a str,
    pub amount: f64,
    pub category: &'a str,
    #[serde(rename = "userId")]
    pub user_id: &'a str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub category: Category,
    pub current_spend: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub alert: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PredictionResponse {
    pub next_month_prediction: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_labels_become_custom() {
        assert_eq!(Category::from_label("Food"), Category::Food);
        assert_eq!(Category::from_label("  Bills "), Category::Bills);
        assert_eq!(
            Category::from_label("Gifts"),
            Category::Custom("Gifts".to_string())
        );
        assert_eq!(Category::from_label(""), Category::Other);
    }

    #[test]
    fn expense_decodes_backend_shape() {
        let raw = r#"{
            "_id": "65f0c1",
            "title": "Lunch",
            "amount": 120.5,
            "category": "Food",
            "userId": "uid-1",
            "createdAt": "2024-03-05T10:00:00.000Z",
            "__v": 0
        }"#;
        let expense: Expense = serde_json::from_str(raw).expect("decode");
        assert_eq!(expense.id, "65f0c1");
        assert_eq!(expense.category, Category::Food);
        assert_eq!(expense.owner_id, "uid-1");
        assert!(expense.created_at.is_some());
    }

    #[test]
    fn expense_without_category_or_timestamp_still_decodes() {
        let raw = r#"{"_id": "a", "title": "Taxi", "amount": 40}"#;
        let expense: Expense = serde_json::from_str(raw).expect("decode");
        assert_eq!(expense.category, Category::Other);
        assert_eq!(expense.created_at, None);
    }

    #[test]
    fn blank_category_is_sent_empty_but_analyzed_as_other() {
        let draft = ExpenseDraft {
            title: "Mystery".to_string(),
            amount: 10.0,
            category: None,
        };
        let body = serde_json::to_value(draft.create_request("uid-9")).expect("encode");
        assert_eq!(body["category"], "");
        assert_eq!(body["userId"], "uid-9");

        let analyze = serde_json::to_value(draft.analyze_request()).expect("encode");
        assert_eq!(analyze["category"], "Other");
        assert_eq!(analyze["current_spend"], 10.0);
    }
}
