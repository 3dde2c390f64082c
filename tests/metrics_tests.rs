// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyhub::metrics::{self, days_in_month, expected_pct, month_metrics, savings_rate};
use moneyhub::models::{Period, Transaction, TxType};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(day: &str, amount: &str, ty: TxType, category: &str) -> Transaction {
    Transaction::new(date(day), d(amount), ty, category, "", "")
}

fn january() -> Vec<Transaction> {
    vec![
        tx("2025-01-01", "3000", TxType::Income, "Paycheck"),
        tx("2025-01-02", "1500", TxType::Expense, "Rent"),
        tx("2025-01-05", "200", TxType::Spending, "Groceries"),
    ]
}

#[test]
fn month_snapshot_matches_hand_computed_values() {
    let m = month_metrics(&january(), Period::new(2025, 1).unwrap(), date("2025-01-20"));
    assert_eq!(m.income, d("3000"));
    assert_eq!(m.expenses, d("1700"));
    assert_eq!(m.fixed_spend, d("1500"));
    assert_eq!(m.flex_spend, d("200"));
    assert_eq!(m.net, d("1300"));
    assert_eq!(m.savings_rate.round_dp(1), d("43.3"));
    assert_eq!(m.fixed_pct, d("50"));
    assert_eq!(m.safe_to_spend, d("1300"));
    assert_eq!(m.days_in_month, 31);
    assert_eq!(m.day_of_month, 20);
    assert_eq!(m.days_remaining, 11);
    assert_eq!(m.daily_safe.round_dp(2), d("118.18"));
    assert_eq!(m.daily_spend, d("85"));
    assert_eq!(m.projected_month, d("2635"));
    assert_eq!(m.tx_count, 3);
    assert_eq!(m.needs, d("1700"));
    assert_eq!(m.wants, Decimal::ZERO);
    assert_eq!(m.overspend(), None);
}

#[test]
fn other_months_do_not_leak_into_the_snapshot() {
    let mut txs = january();
    txs.push(tx("2025-02-01", "999", TxType::Spending, "Shopping"));
    txs.push(tx("2024-01-15", "50", TxType::Spending, "Shopping"));
    let m = month_metrics(&txs, Period::new(2025, 1).unwrap(), date("2025-01-20"));
    assert_eq!(m.expenses, d("1700"));
    assert_eq!(m.tx_count, 3);
}

#[test]
fn empty_month_is_all_zero() {
    let m = month_metrics(&[], Period::new(2025, 3).unwrap(), date("2025-03-10"));
    assert_eq!(m.income, Decimal::ZERO);
    assert_eq!(m.expenses, Decimal::ZERO);
    assert_eq!(m.savings_rate, Decimal::ZERO);
    assert_eq!(m.fixed_pct, Decimal::ZERO);
    assert_eq!(m.avg_tx, Decimal::ZERO);
    assert_eq!(m.safe_to_spend, Decimal::ZERO);
    assert_eq!(m.daily_safe, Decimal::ZERO);
}

#[test]
fn safe_to_spend_never_goes_negative() {
    let txs = vec![
        tx("2025-01-01", "1000", TxType::Income, "Paycheck"),
        tx("2025-01-02", "1500", TxType::Expense, "Rent"),
    ];
    let m = month_metrics(&txs, Period::new(2025, 1).unwrap(), date("2025-01-10"));
    assert_eq!(m.safe_to_spend, Decimal::ZERO);
    assert_eq!(m.net, d("-500"));
    assert!(m.savings_rate < Decimal::ZERO);
}

#[test]
fn last_day_still_leaves_one_day() {
    let m = month_metrics(&january(), Period::new(2025, 1).unwrap(), date("2025-01-31"));
    assert_eq!(m.days_remaining, 1);
    assert_eq!(m.daily_safe, d("1300"));
}

#[test]
fn projection_flags_overspend() {
    let txs = vec![
        tx("2025-01-01", "1000", TxType::Income, "Paycheck"),
        tx("2025-01-02", "500", TxType::Spending, "Shopping"),
    ];
    let m = month_metrics(&txs, Period::new(2025, 1).unwrap(), date("2025-01-05"));
    assert_eq!(m.projected_month, d("3100"));
    assert_eq!(m.overspend(), Some(d("2100")));
}

#[test]
fn days_in_month_handles_every_length() {
    assert_eq!(days_in_month(date("2024-02-10")), 29);
    assert_eq!(days_in_month(date("2023-02-10")), 28);
    assert_eq!(days_in_month(date("2025-04-30")), 30);
    assert_eq!(days_in_month(date("2025-12-01")), 31);
    assert_eq!(days_in_month(date("2025-01-31")), 31);
}

#[test]
fn expected_pct_is_elapsed_share() {
    assert_eq!(expected_pct(date("2025-04-15")), d("50"));
    assert_eq!(expected_pct(date("2025-04-30")), d("100"));
}

#[test]
fn savings_rate_zero_without_income() {
    assert_eq!(savings_rate(Decimal::ZERO, d("100")), Decimal::ZERO);
    assert_eq!(savings_rate(d("200"), d("50")), d("75"));
}

#[test]
fn ytd_covers_only_the_requested_year() {
    let mut txs = january();
    txs.push(tx("2025-06-10", "1000", TxType::Income, "Bonus"));
    txs.push(tx("2024-12-31", "400", TxType::Spending, "Shopping"));
    let y = metrics::ytd_metrics(&txs, 2025);
    assert_eq!(y.income, d("4000"));
    assert_eq!(y.expenses, d("1700"));
    assert_eq!(y.net, d("2300"));
    assert_eq!(y.tx_count, 4);
}

#[test]
fn breakdown_lists_months_with_data_in_order() {
    let mut txs = january();
    txs.push(tx("2025-03-02", "80", TxType::Spending, "Eating Out"));
    let rows = metrics::monthly_breakdown(&txs, 2025);
    let months: Vec<String> = rows.iter().map(|r| r.period.to_string()).collect();
    assert_eq!(months, vec!["2025-01", "2025-03"]);
    assert_eq!(rows[1].expenses, d("80"));
    assert_eq!(rows[1].net, d("-80"));
}

#[test]
fn category_spend_excludes_income_and_uses_palette() {
    let mut txs = january();
    txs.push(tx("2025-01-09", "20", TxType::Spending, "Mystery"));
    let data = metrics::spend_by_category(&txs, Period::new(2025, 1).unwrap());
    assert!(data.iter().all(|c| c.category != "Paycheck"));
    let rent = data.iter().find(|c| c.category == "Rent").unwrap();
    assert_eq!(rent.amount, d("1500"));
    assert_eq!(rent.color, "#8b5cf6");
    let other = data.iter().find(|c| c.category == "Mystery").unwrap();
    assert_eq!(other.color, moneyhub::taxonomy::FALLBACK_COLOR);
}

const HUGE: &str = "50000000000000000000000000000";

#[test]
fn huge_amounts_saturate_instead_of_panicking() {
    let txs = vec![
        tx("2025-01-02", HUGE, TxType::Spending, "Shopping"),
        tx("2025-01-03", HUGE, TxType::Spending, "Shopping"),
        tx("2025-01-04", "0.01", TxType::Income, "Paycheck"),
    ];
    let period = Period::new(2025, 1).unwrap();
    let m = month_metrics(&txs, period, date("2025-01-20"));
    assert_eq!(m.expenses, Decimal::MAX);
    assert_eq!(m.safe_to_spend, Decimal::ZERO);
    assert_eq!(m.savings_rate, Decimal::MIN);

    let y = metrics::ytd_metrics(&txs, 2025);
    assert_eq!(y.expenses, Decimal::MAX);
    let rows = metrics::monthly_breakdown(&txs, 2025);
    assert_eq!(rows[0].expenses, Decimal::MAX);
    let cats = metrics::spend_by_category(&txs, period);
    assert_eq!(cats[0].amount, Decimal::MAX);
}

#[test]
fn ratio_pct_saturates_on_tiny_denominators() {
    assert_eq!(metrics::ratio_pct(d(HUGE), d("0.01")), Decimal::MAX);
    assert_eq!(metrics::ratio_pct(d("1"), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(metrics::total([d(HUGE), d(HUGE)]), Decimal::MAX);
}
