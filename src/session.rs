// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budgets::{self, BudgetStatus};
use crate::db;
use crate::error::SkipReason;
use crate::metrics::{self, MonthMetrics, YtdMetrics};
use crate::models::{Budgets, Goal, Period, Transaction};
use crate::recurring::{self, RecurringCharge};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Everything one user's views are computed from, as a plain value.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: String,
    pub transactions: Vec<Transaction>,
    pub budgets: Budgets,
    pub goals: Vec<Goal>,
    pub as_of: NaiveDate,
    /// Stored rows that could not be used, by load position.
    pub skipped: Vec<(usize, SkipReason)>,
}

impl Session {
    pub fn new(user: &str, as_of: NaiveDate) -> Self {
        Self {
            user: user.to_string(),
            transactions: Vec::new(),
            budgets: Budgets::new(),
            goals: Vec::new(),
            as_of,
            skipped: Vec::new(),
        }
    }

    pub fn load(conn: &Connection, user: &str, as_of: NaiveDate) -> Result<Self> {
        let report = db::load_transactions(conn, user)?;
        Ok(Self {
            user: user.to_string(),
            transactions: report.transactions,
            budgets: db::load_budgets(conn, user)?,
            goals: db::load_goals(conn, user)?,
            as_of,
            skipped: report.skipped,
        })
    }

    pub fn save_transactions(&self, conn: &mut Connection) -> Result<()> {
        db::save_transactions(conn, &self.user, &self.transactions)
    }

    pub fn save_budgets(&self, conn: &mut Connection) -> Result<()> {
        db::save_budgets(conn, &self.user, &self.budgets)
    }

    pub fn save_goals(&self, conn: &mut Connection) -> Result<()> {
        db::save_goals(conn, &self.user, &self.goals)
    }

    pub fn current_period(&self) -> Period {
        Period::of(self.as_of)
    }

    pub fn month_metrics(&self, period: Period) -> MonthMetrics {
        metrics::month_metrics(&self.transactions, period, self.as_of)
    }

    pub fn ytd(&self, year: i32) -> YtdMetrics {
        metrics::ytd_metrics(&self.transactions, year)
    }

    pub fn budget_report(&self, period: Period) -> Vec<BudgetStatus> {
        budgets::evaluate(&self.budgets, &self.transactions, period, self.as_of)
    }

    pub fn recurring(&self) -> Vec<RecurringCharge> {
        recurring::detect(&self.transactions)
    }
}
