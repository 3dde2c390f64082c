// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Best-effort row ingestion: every malformed row becomes a counted
//! [`SkipReason`] instead of aborting the batch.

use crate::error::SkipReason;
use crate::models::{Transaction, TxType, new_id};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A transaction as it arrives from a file or database row, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default, alias = "ID", alias = "Id")]
    pub id: Option<Value>,
    #[serde(default, alias = "Date")]
    pub date: Option<Value>,
    #[serde(default, alias = "Amount")]
    pub amount: Option<Value>,
    #[serde(default, rename = "type", alias = "Type")]
    pub r#type: Option<Value>,
    #[serde(default, alias = "Category")]
    pub category: Option<Value>,
    #[serde(default, alias = "Merchant")]
    pub merchant: Option<Value>,
    #[serde(default, alias = "Notes")]
    pub notes: Option<Value>,
}

impl RawTransaction {
    pub fn from_text(
        id: Option<&str>,
        date: &str,
        amount: &str,
        r#type: &str,
        category: &str,
        merchant: &str,
        notes: &str,
    ) -> Self {
        let text = |s: &str| Some(Value::String(s.to_string()));
        Self {
            id: id.and_then(text),
            date: text(date),
            amount: text(amount),
            r#type: text(r#type),
            category: text(category),
            merchant: text(merchant),
            notes: text(notes),
        }
    }

    /// Trimmed id, if the row carries a non-blank one.
    pub fn id_text(&self) -> Option<String> {
        text_of(&self.id)
    }
}

#[derive(Debug, Default)]
pub struct ParseReport {
    pub transactions: Vec<Transaction>,
    /// Zero-based input index and the reason the row was left out.
    pub skipped: Vec<(usize, SkipReason)>,
}

fn text_of(v: &Option<Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) => {
            let t = s.trim();
            if t.is_empty() { None } else { Some(t.to_string()) }
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| s.get(..10).and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()))
}

pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

pub fn parse_row(raw: &RawTransaction) -> Result<Transaction, SkipReason> {
    let date_s = text_of(&raw.date).ok_or(SkipReason::Missing("date"))?;
    let date = parse_iso_date(&date_s).ok_or(SkipReason::BadDate(date_s))?;

    let amount_s = text_of(&raw.amount).ok_or(SkipReason::Missing("amount"))?;
    let amount = parse_amount(&amount_s).ok_or(SkipReason::BadAmount(amount_s))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(SkipReason::NegativeAmount(amount));
    }

    let r#type = match text_of(&raw.r#type) {
        Some(t) => t.parse::<TxType>().map_err(SkipReason::BadType)?,
        None => TxType::Expense,
    };

    Ok(Transaction {
        id: text_of(&raw.id).unwrap_or_else(new_id),
        date,
        amount,
        r#type,
        category: text_of(&raw.category).unwrap_or_else(|| "Other".to_string()),
        merchant: text_of(&raw.merchant).unwrap_or_default(),
        notes: text_of(&raw.notes).unwrap_or_default(),
    })
}

pub fn parse_rows<'a, I>(rows: I) -> ParseReport
where
    I: IntoIterator<Item = &'a RawTransaction>,
{
    let mut report = ParseReport::default();
    for (idx, raw) in rows.into_iter().enumerate() {
        match parse_row(raw) {
            Ok(tx) => report.transactions.push(tx),
            Err(reason) => {
                tracing::warn!(row = idx, %reason, "skipping unusable transaction row");
                report.skipped.push((idx, reason));
            }
        }
    }
    if !report.skipped.is_empty() {
        tracing::info!(
            kept = report.transactions.len(),
            skipped = report.skipped.len(),
            "ingested rows"
        );
    }
    report
}
