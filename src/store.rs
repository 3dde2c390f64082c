// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::TxError;
use crate::models::{Period, Transaction, TxType};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashSet};

/// Replacement values for an edited transaction; the id is kept.
#[derive(Debug, Clone)]
pub struct TxEdit {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub r#type: TxType,
    pub category: String,
    pub merchant: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    pub period: Option<Period>,
    pub category: Option<String>,
    pub r#type: Option<TxType>,
    pub merchant: Option<String>,
    pub limit: Option<usize>,
}

fn check_amount(amount: Decimal) -> Result<(), TxError> {
    if amount < Decimal::ZERO {
        return Err(TxError::NegativeAmount(amount));
    }
    Ok(())
}

pub fn add(txs: &mut Vec<Transaction>, tx: Transaction) -> Result<(), TxError> {
    check_amount(tx.amount)?;
    if txs.iter().any(|t| t.id == tx.id) {
        return Err(TxError::DuplicateId(tx.id));
    }
    txs.push(tx);
    Ok(())
}

pub fn edit(txs: &mut [Transaction], id: &str, e: TxEdit) -> Result<(), TxError> {
    check_amount(e.amount)?;
    let tx = txs
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| TxError::NotFound(id.to_string()))?;
    tx.date = e.date;
    tx.amount = e.amount;
    tx.r#type = e.r#type;
    tx.category = e.category;
    tx.merchant = e.merchant;
    tx.notes = e.notes;
    Ok(())
}

pub fn delete(txs: &mut Vec<Transaction>, id: &str) -> Result<Transaction, TxError> {
    let pos = txs
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| TxError::NotFound(id.to_string()))?;
    Ok(txs.remove(pos))
}

/// Removes every transaction dated inside `period`; returns how many went.
pub fn delete_period(txs: &mut Vec<Transaction>, period: Period) -> usize {
    let before = txs.len();
    txs.retain(|t| !period.contains(t.date));
    before - txs.len()
}

/// Removes stored sheet rows that an incoming sheet row covers, matched on
/// month date and category; returns how many went.
pub fn drop_superseded_synthetic(txs: &mut Vec<Transaction>, incoming: &[Transaction]) -> usize {
    let covered: HashSet<(NaiveDate, &str)> = incoming
        .iter()
        .filter(|t| t.is_synthetic())
        .map(|t| (t.date, t.category.as_str()))
        .collect();
    let before = txs.len();
    txs.retain(|t| !(t.is_synthetic() && covered.contains(&(t.date, t.category.as_str()))));
    before - txs.len()
}

/// Swaps in `incoming` wholesale; returns how many old rows were dropped.
pub fn replace_all(txs: &mut Vec<Transaction>, incoming: Vec<Transaction>) -> Result<usize, TxError> {
    let mut ids = HashSet::new();
    for t in &incoming {
        check_amount(t.amount)?;
        if !ids.insert(t.id.as_str()) {
            return Err(TxError::DuplicateId(t.id.clone()));
        }
    }
    let dropped = txs.len();
    *txs = incoming;
    Ok(dropped)
}

pub fn in_period(txs: &[Transaction], period: Period) -> impl Iterator<Item = &Transaction> {
    txs.iter().filter(move |t| period.contains(t.date))
}

pub fn in_year(txs: &[Transaction], year: i32) -> impl Iterator<Item = &Transaction> {
    txs.iter().filter(move |t| t.date.year() == year)
}

/// Matching transactions, newest first; later entries win date ties.
pub fn filter<'a>(txs: &'a [Transaction], f: &TxFilter) -> Vec<&'a Transaction> {
    let needle = f.merchant.as_ref().map(|m| m.to_lowercase());
    let mut out: Vec<(usize, &Transaction)> = txs
        .iter()
        .enumerate()
        .filter(|(_, t)| f.period.is_none_or(|p| p.contains(t.date)))
        .filter(|(_, t)| f.category.as_ref().is_none_or(|c| &t.category == c))
        .filter(|(_, t)| f.r#type.is_none_or(|ty| t.r#type == ty))
        .filter(|(_, t)| {
            needle
                .as_ref()
                .is_none_or(|n| t.merchant.to_lowercase().contains(n.as_str()))
        })
        .collect();
    out.sort_by(|a, b| (b.1.date, b.0).cmp(&(a.1.date, a.0)));
    let mut out: Vec<&Transaction> = out.into_iter().map(|(_, t)| t).collect();
    if let Some(limit) = f.limit {
        out.truncate(limit);
    }
    out
}

/// Months with data plus the month of `today`, newest first.
pub fn available_months(txs: &[Transaction], today: NaiveDate) -> Vec<Period> {
    let mut set: BTreeSet<Period> = txs.iter().map(|t| t.period()).collect();
    set.insert(Period::of(today));
    set.into_iter().rev().collect()
}

pub fn available_years(txs: &[Transaction], today: NaiveDate) -> Vec<i32> {
    let mut set: BTreeSet<i32> = txs.iter().map(|t| t.date.year()).collect();
    set.insert(today.year());
    set.into_iter().rev().collect()
}
