// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Subscription detection: a merchant seen in two or more distinct calendar
//! months is reported. Amounts are not compared.

use crate::metrics;
use crate::models::{Period, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

pub const MIN_MONTHS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringCharge {
    pub merchant: String,
    pub months_seen: usize,
    /// Mean over every occurrence, not only the qualifying months.
    pub avg_amount: Decimal,
    pub occurrences: usize,
}

#[derive(Default)]
struct MerchantSeen {
    months: BTreeSet<Period>,
    total: Decimal,
    count: usize,
}

/// Recurring merchants, most months first; ties keep first-seen order.
pub fn detect(txs: &[Transaction]) -> Vec<RecurringCharge> {
    let mut order: Vec<&str> = Vec::new();
    let mut seen: HashMap<&str, MerchantSeen> = HashMap::new();
    for t in txs {
        let merchant = t.merchant.as_str();
        if merchant.trim().is_empty() || t.is_synthetic() {
            continue;
        }
        let entry = seen.entry(merchant).or_insert_with(|| {
            order.push(merchant);
            MerchantSeen::default()
        });
        entry.months.insert(t.period());
        entry.total = entry.total.saturating_add(t.amount);
        entry.count += 1;
    }

    let mut out: Vec<RecurringCharge> = order
        .into_iter()
        .filter_map(|m| {
            let s = seen.get(m)?;
            if s.months.len() < MIN_MONTHS {
                return None;
            }
            Some(RecurringCharge {
                merchant: m.to_string(),
                months_seen: s.months.len(),
                avg_amount: s.total / Decimal::from(s.count),
                occurrences: s.count,
            })
        })
        .collect();
    out.sort_by(|a, b| b.months_seen.cmp(&a.months_seen));
    out
}

/// Estimated monthly cost of everything [`detect`] reported.
pub fn recurring_total(charges: &[RecurringCharge]) -> Decimal {
    metrics::total(charges.iter().map(|c| c.avg_amount))
}
