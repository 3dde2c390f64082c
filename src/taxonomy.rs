// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Static category configuration.
//!
//! Which categories exist lives in the tables below; how a category behaves
//! is decided only by its [`CategoryKind`] and optional [`NeedWant`] tag.

use crate::models::{ALL_CATEGORIES, TxType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Income,
    FixedExpense,
    DiscretionarySpending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeedWant {
    Need,
    Want,
}

#[derive(Debug, Clone, Copy)]
pub struct CategoryInfo {
    pub kind: CategoryKind,
    pub need_want: Option<NeedWant>,
    pub color: &'static str,
}

pub const FALLBACK_COLOR: &str = "#64748b";

pub const INCOME_CATEGORIES: &[&str] = &["Paycheck", "Other Income", "Gift", "Refund", "Bonus"];

// Emergency Fund and Savings are booked as fixed expenses: they leave the
// spendable pool and reduce safe-to-spend.
pub const FIXED_EXPENSE_CATEGORIES: &[&str] = &[
    "Rent",
    "Electricity",
    "Wifi",
    "Gas",
    "Phone Bill",
    "Student Loans",
    "Emergency Fund",
    "Savings",
];

pub const DISCRETIONARY_CATEGORIES: &[&str] = &[
    "Groceries",
    "Public Trans.",
    "Lyft/Ubers",
    "Subscriptions",
    "Eating Out",
    "Personal Stuff",
    "Credits",
    "Shopping",
    "Health",
    "Entertainment",
];

pub const NEEDS: &[&str] = &[
    "Rent",
    "Electricity",
    "Wifi",
    "Gas",
    "Phone Bill",
    "Student Loans",
    "Groceries",
    "Health",
];

pub const WANTS: &[&str] = &[
    "Eating Out",
    "Entertainment",
    "Shopping",
    "Personal Stuff",
    "Subscriptions",
];

const COLORS: &[(&str, &str)] = &[
    ("Rent", "#8b5cf6"),
    ("Electricity", "#f59e0b"),
    ("Wifi", "#06b6d4"),
    ("Gas", "#ef4444"),
    ("Phone Bill", "#f97316"),
    ("Student Loans", "#d946ef"),
    ("Groceries", "#10b981"),
    ("Public Trans.", "#a855f7"),
    ("Lyft/Ubers", "#8b5cf6"),
    ("Subscriptions", "#f59e0b"),
    ("Eating Out", "#fb7185"),
    ("Personal Stuff", "#ec4899"),
    ("Credits", "#22c55e"),
    ("Emergency Fund", "#14b8a6"),
    ("Savings", "#06b6d4"),
    ("Shopping", "#f472b6"),
    ("Health", "#ef4444"),
    ("Entertainment", "#a78bfa"),
    ("Paycheck", "#10b981"),
    ("Other Income", "#34d399"),
    ("Gift", "#fbbf24"),
    ("Refund", "#06b6d4"),
    ("Bonus", "#f43f5e"),
];

static TABLE: Lazy<HashMap<&'static str, CategoryInfo>> = Lazy::new(|| {
    let colors: HashMap<&str, &str> = COLORS.iter().copied().collect();
    let tag = |name: &str| {
        if NEEDS.contains(&name) {
            Some(NeedWant::Need)
        } else if WANTS.contains(&name) {
            Some(NeedWant::Want)
        } else {
            None
        }
    };
    let mut table = HashMap::new();
    for (names, kind) in [
        (INCOME_CATEGORIES, CategoryKind::Income),
        (FIXED_EXPENSE_CATEGORIES, CategoryKind::FixedExpense),
        (DISCRETIONARY_CATEGORIES, CategoryKind::DiscretionarySpending),
    ] {
        for &name in names {
            table.insert(
                name,
                CategoryInfo {
                    kind,
                    need_want: tag(name),
                    color: colors.get(name).copied().unwrap_or(FALLBACK_COLOR),
                },
            );
        }
    }
    table
});

pub fn lookup(category: &str) -> Option<CategoryInfo> {
    TABLE.get(category).copied()
}

pub fn kind_of(category: &str) -> Option<CategoryKind> {
    lookup(category).map(|c| c.kind)
}

pub fn is_fixed(category: &str) -> bool {
    kind_of(category) == Some(CategoryKind::FixedExpense)
}

pub fn need_want(category: &str) -> Option<NeedWant> {
    lookup(category).and_then(|c| c.need_want)
}

pub fn is_known(category: &str) -> bool {
    TABLE.contains_key(category)
}

pub fn color_for(category: &str) -> &'static str {
    lookup(category).map(|c| c.color).unwrap_or(FALLBACK_COLOR)
}

/// Category choices offered when entering a transaction of the given type.
pub fn categories_for(r#type: TxType) -> &'static [&'static str] {
    match r#type {
        TxType::Income => INCOME_CATEGORIES,
        TxType::Spending => DISCRETIONARY_CATEGORIES,
        TxType::Expense => FIXED_EXPENSE_CATEGORIES,
    }
}

/// Categories a monthly limit can be set on, including the "All" sentinel.
pub fn budgetable_categories() -> Vec<&'static str> {
    let mut out = vec![ALL_CATEGORIES];
    out.extend_from_slice(FIXED_EXPENSE_CATEGORIES);
    out.extend_from_slice(DISCRETIONARY_CATEGORIES);
    out
}

/// Type assigned to a spreadsheet row by its category label.
pub fn infer_type(category: &str) -> TxType {
    if category == "INCOME" {
        return TxType::Income;
    }
    match kind_of(category) {
        Some(CategoryKind::Income) => TxType::Income,
        Some(CategoryKind::DiscretionarySpending) => TxType::Spending,
        _ => TxType::Expense,
    }
}
