use chrono::{DateTime, Datelike, Utc};
use std::collections::HashMap;

use crate::models::{Category, Expense};

pub const TREND_MONTHS: usize = 6;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    pub label: &'static str,
    pub spend: f64,
}

/// Per-category sums in first-seen order. Categories without records never
/// appear.
pub fn category_totals(records: &[Expense]) -> Vec<CategoryTotal> {
    let mut slots: HashMap<&Category, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for record in records {
        match slots.get(&record.category) {
            Some(&idx) => totals[idx].total += record.amount,
            None => {
                slots.insert(&record.category, totals.len());
                totals.push(CategoryTotal {
                    category: record.category.clone(),
                    total: record.amount,
                });
            }
        }
    }
    totals
}

pub fn total_spend(records: &[Expense]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Spend per calendar month (UTC) for the six months ending with the month of
/// `reference`, oldest first. Undated records and records outside the window
/// do not contribute.
pub fn monthly_series(records: &[Expense], reference: DateTime<Utc>) -> Vec<MonthlyPoint> {
    let mut points: Vec<MonthlyPoint> = Vec::with_capacity(TREND_MONTHS);
    let (mut year, mut month) = (reference.year(), reference.month());
    for _ in 0..TREND_MONTHS {
        points.push(MonthlyPoint {
            year,
            month,
            label: MONTH_LABELS[(month - 1) as usize],
            spend: 0.0,
        });
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    points.reverse();

    for record in records {
        let Some(at) = record.created_at else {
            continue;
        };
        if let Some(point) = points
            .iter_mut()
            .find(|p| p.year == at.year() && p.month == at.month())
        {
            point.spend += record.amount;
        }
    }
    points
}
