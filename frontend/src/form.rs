use crate::error::ApiResult;
use crate::models::{Category, ExpenseDraft};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Amount must be a number")]
    InvalidAmount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

/// Raw text of the add-expense form. An empty `category` is the
/// "leave blank for AI" option.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: String,
    pub category: String,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            category: Category::Food.label().to_string(),
        }
    }
}

impl ExpenseForm {
    pub fn to_draft(&self) -> Result<ExpenseDraft, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or(FormError::InvalidAmount)?;
        let category = if self.category.trim().is_empty() {
            None
        } else {
            Some(Category::from_label(&self.category))
        };
        Ok(ExpenseDraft {
            title: title.to_string(),
            amount,
            category,
        })
    }

    /// Fields to show once a submit finishes: cleared on success, kept as
    /// typed on any failure.
    pub fn after_submit(&self, outcome: &ApiResult<()>) -> ExpenseForm {
        match outcome {
            Ok(()) => ExpenseForm::default(),
            Err(_) => self.clone(),
        }
    }
}
