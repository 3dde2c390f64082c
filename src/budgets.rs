// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::BudgetError;
use crate::metrics;
use crate::models::{ALL_CATEGORIES, Budgets, Period, Transaction};
use crate::store;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Percentage points a budget may drift from the elapsed share of the month.
pub const PACE_TOLERANCE: Decimal = Decimal::TEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pace {
    /// Consumed faster than the month is passing.
    TooFast,
    OnPace,
    /// Consumed slower than the month is passing.
    Ahead,
}

impl Pace {
    pub fn label(self) -> &'static str {
        match self {
            Pace::TooFast => "too fast",
            Pace::OnPace => "on pace",
            Pace::Ahead => "ahead",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    /// Capped at 100; overspend shows in `spent` vs `limit`.
    pub pct: Decimal,
    pub remaining: Decimal,
    pub pace: Pace,
}

impl BudgetStatus {
    pub fn is_over(&self) -> bool {
        self.spent > self.limit
    }
}

pub fn pace(pct: Decimal, expected_pct: Decimal) -> Pace {
    if pct > expected_pct + PACE_TOLERANCE {
        Pace::TooFast
    } else if pct < expected_pct - PACE_TOLERANCE {
        Pace::Ahead
    } else {
        Pace::OnPace
    }
}

/// Amount charged against `category` in `period`; "All" means every outflow.
pub fn spent_in(txs: &[Transaction], period: Period, category: &str) -> Decimal {
    let month = store::in_period(txs, period);
    if category == ALL_CATEGORIES {
        metrics::total(month.filter(|t| t.r#type.is_outflow()).map(|t| t.amount))
    } else {
        metrics::total(month.filter(|t| t.category == category).map(|t| t.amount))
    }
}

pub fn status(
    category: &str,
    limit: Decimal,
    spent: Decimal,
    expected_pct: Decimal,
) -> BudgetStatus {
    let pct = metrics::ratio_pct(spent, limit).min(Decimal::ONE_HUNDRED);
    BudgetStatus {
        category: category.to_string(),
        limit,
        spent,
        pct,
        remaining: limit.saturating_sub(spent).max(Decimal::ZERO),
        pace: pace(pct, expected_pct),
    }
}

/// Status of every configured budget for `period`, in category order.
pub fn evaluate(
    budgets: &Budgets,
    txs: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> Vec<BudgetStatus> {
    let expected = metrics::expected_pct(today);
    budgets
        .iter()
        .map(|(cat, limit)| status(cat, *limit, spent_in(txs, period, cat), expected))
        .collect()
}

/// Adds or overwrites a limit; returns the previous one.
pub fn set_limit(
    budgets: &mut Budgets,
    category: &str,
    limit: Decimal,
) -> Result<Option<Decimal>, BudgetError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(BudgetError::EmptyCategory);
    }
    if limit < Decimal::ZERO {
        return Err(BudgetError::NegativeLimit(limit));
    }
    Ok(budgets.insert(category.to_string(), limit))
}

pub fn remove_limit(budgets: &mut Budgets, category: &str) -> Option<Decimal> {
    budgets.remove(category.trim())
}
