// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Merchant stamped on rows manufactured by the spreadsheet-matrix importer.
pub const SYNTHETIC_MERCHANT: &str = "Budget 2025";

/// Budget key meaning "all expense and spending transactions".
pub const ALL_CATEGORIES: &str = "All";

/// Monthly limit per category name (or [`ALL_CATEGORIES`]).
pub type Budgets = BTreeMap<String, Decimal>;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    Income,
    Expense,
    Spending,
}

impl TxType {
    pub const ALL: [TxType; 3] = [TxType::Expense, TxType::Spending, TxType::Income];

    /// Money leaving the spendable pool.
    pub fn is_outflow(self) -> bool {
        matches!(self, TxType::Expense | TxType::Spending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TxType::Income => "Income",
            TxType::Expense => "Expense",
            TxType::Spending => "Spending",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            "spending" => Ok(TxType::Spending),
            other => Err(format!(
                "unknown transaction type '{}', expected income|expense|spending",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub r#type: TxType,
    pub category: String,
    #[serde(default)]
    pub merchant: String,
    #[serde(default)]
    pub notes: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        r#type: TxType,
        category: impl Into<String>,
        merchant: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            date,
            amount,
            r#type,
            category: category.into(),
            merchant: merchant.into(),
            notes: notes.into(),
        }
    }

    pub fn period(&self) -> Period {
        Period::of(self.date)
    }

    pub fn is_synthetic(&self) -> bool {
        self.merchant == SYNTHETIC_MERCHANT
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    #[serde(alias = "target")]
    pub target_amount: Decimal,
    #[serde(alias = "current")]
    pub current_amount: Decimal,
}

/// A calendar year + month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Long label, e.g. "January 2025".
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(d) => d.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
        let year: i32 = y
            .parse()
            .map_err(|_| format!("Invalid year in '{}'", s))?;
        let month: u32 = m
            .parse()
            .map_err(|_| format!("Invalid month number in '{}'", s))?;
        Period::new(year, month).ok_or_else(|| format!("Invalid month '{}'", s))
    }
}
