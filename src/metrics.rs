// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly and yearly summary figures.
//!
//! Every function here is a pure function of the transaction collection and
//! an injected `today`. Sums never fail: empty input gives zeros, and every
//! ratio has an explicit fallback instead of dividing by zero.

use crate::models::{Period, Transaction, TxType};
use crate::store;
use crate::taxonomy::{self, NeedWant};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthMetrics {
    pub period: Period,
    pub income: Decimal,
    pub expenses: Decimal,
    pub fixed_spend: Decimal,
    pub flex_spend: Decimal,
    pub needs: Decimal,
    pub wants: Decimal,
    pub net: Decimal,
    pub savings_rate: Decimal,
    pub fixed_pct: Decimal,
    pub avg_tx: Decimal,
    pub tx_count: usize,
    pub safe_to_spend: Decimal,
    pub daily_safe: Decimal,
    pub daily_spend: Decimal,
    pub projected_month: Decimal,
    pub expected_pct: Decimal,
    pub day_of_month: u32,
    pub days_in_month: u32,
    pub days_remaining: u32,
}

impl MonthMetrics {
    /// How far the projected month total overshoots income, if it does.
    pub fn overspend(&self) -> Option<Decimal> {
        if self.projected_month > self.income {
            Some(self.projected_month - self.income)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YtdMetrics {
    pub year: i32,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub savings_rate: Decimal,
    pub tx_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    pub period: Period,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Decimal,
    pub color: &'static str,
}

/// Length of the month containing `date`.
///
/// Day 28 plus four days always lands in the following month; stepping back
/// by that landing day gives the last day of the original month.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let Some(day28) = date.with_day(28) else {
        return 28;
    };
    let next = day28 + Duration::days(4);
    (next - Duration::days(i64::from(next.day()))).day()
}

/// Share of the month elapsed as of `today`, in percent; the pace baseline.
pub fn expected_pct(today: NaiveDate) -> Decimal {
    Decimal::from(today.day()) / Decimal::from(days_in_month(today)) * HUNDRED
}

/// `num / den` in percent; 0 when `den` is not positive. Results too large
/// for a `Decimal` saturate toward the sign of `num`.
pub fn ratio_pct(num: Decimal, den: Decimal) -> Decimal {
    if den <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    num.checked_div(den)
        .and_then(|r| r.checked_mul(HUNDRED))
        .unwrap_or(if num.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Sum that saturates at `Decimal::MAX` instead of panicking.
pub fn total<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a))
}

pub fn savings_rate(income: Decimal, expenses: Decimal) -> Decimal {
    ratio_pct(income - expenses, income)
}

fn income_and_expenses<'a, I>(txs: I) -> (Decimal, Decimal, usize)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut count = 0;
    for t in txs {
        count += 1;
        if t.r#type == TxType::Income {
            income = income.saturating_add(t.amount);
        } else if t.r#type.is_outflow() {
            expenses = expenses.saturating_add(t.amount);
        }
    }
    (income, expenses, count)
}

pub fn month_metrics(txs: &[Transaction], period: Period, today: NaiveDate) -> MonthMetrics {
    let month: Vec<&Transaction> = store::in_period(txs, period).collect();
    let (income, expenses, tx_count) = income_and_expenses(month.iter().copied());

    let mut fixed_spend = Decimal::ZERO;
    let mut needs = Decimal::ZERO;
    let mut wants = Decimal::ZERO;
    for t in &month {
        if taxonomy::is_fixed(&t.category) {
            fixed_spend = fixed_spend.saturating_add(t.amount);
        }
        match taxonomy::need_want(&t.category) {
            Some(NeedWant::Need) => needs = needs.saturating_add(t.amount),
            Some(NeedWant::Want) => wants = wants.saturating_add(t.amount),
            None => {}
        }
    }
    let flex_spend = expenses - fixed_spend;

    let avg_tx = if tx_count > 0 {
        expenses / Decimal::from(tx_count)
    } else {
        Decimal::ZERO
    };

    let days_in_month = days_in_month(today);
    let day_of_month = today.day();
    let days_remaining = days_in_month.saturating_sub(day_of_month).max(1);

    let safe_to_spend = income
        .saturating_sub(fixed_spend)
        .saturating_sub(flex_spend)
        .max(Decimal::ZERO);
    let daily_safe = safe_to_spend / Decimal::from(days_remaining);

    let days_elapsed = day_of_month.max(1);
    let daily_spend = expenses / Decimal::from(days_elapsed);
    let projected_month = daily_spend.saturating_mul(Decimal::from(days_in_month));
    let expected_pct = expected_pct(today);

    MonthMetrics {
        period,
        income,
        expenses,
        fixed_spend,
        flex_spend,
        needs,
        wants,
        net: income - expenses,
        savings_rate: savings_rate(income, expenses),
        fixed_pct: ratio_pct(fixed_spend, income),
        avg_tx,
        tx_count,
        safe_to_spend,
        daily_safe,
        daily_spend,
        projected_month,
        expected_pct,
        day_of_month,
        days_in_month,
        days_remaining,
    }
}

pub fn ytd_metrics(txs: &[Transaction], year: i32) -> YtdMetrics {
    let (income, expenses, tx_count) = income_and_expenses(store::in_year(txs, year));
    YtdMetrics {
        year,
        income,
        expenses,
        net: income - expenses,
        savings_rate: savings_rate(income, expenses),
        tx_count,
    }
}

/// Income and outflow per month of `year`, chronological, months with data only.
pub fn monthly_breakdown(txs: &[Transaction], year: i32) -> Vec<MonthlyRow> {
    let mut by_month: BTreeMap<Period, (Decimal, Decimal)> = BTreeMap::new();
    for t in store::in_year(txs, year) {
        let entry = by_month
            .entry(t.period())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if t.r#type == TxType::Income {
            entry.0 = entry.0.saturating_add(t.amount);
        } else if t.r#type.is_outflow() {
            entry.1 = entry.1.saturating_add(t.amount);
        }
    }
    by_month
        .into_iter()
        .map(|(period, (income, expenses))| MonthlyRow {
            period,
            income,
            expenses,
            net: income - expenses,
        })
        .collect()
}

/// Outflow per category for one month, largest first.
pub fn spend_by_category(txs: &[Transaction], period: Period) -> Vec<CategorySpend> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for t in store::in_period(txs, period).filter(|t| t.r#type.is_outflow()) {
        let slot = agg.entry(t.category.as_str()).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(t.amount);
    }
    let mut items: Vec<CategorySpend> = agg
        .into_iter()
        .map(|(category, amount)| CategorySpend {
            category: category.to_string(),
            amount,
            color: taxonomy::color_for(category),
        })
        .collect();
    items.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    items
}
