// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Why an ingested row was left out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("unparseable date '{0}'")]
    BadDate(String),
    #[error("unparseable amount '{0}'")]
    BadAmount(String),
    #[error("negative amount {0}")]
    NegativeAmount(Decimal),
    #[error("{0}")]
    BadType(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    #[error("transaction '{0}' not found")]
    NotFound(String),
    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("transaction id '{0}' is already stored")]
    DuplicateId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalError {
    #[error("goal name cannot be empty")]
    EmptyName,
    #[error("goal target must be greater than zero, got {0}")]
    NonPositiveTarget(Decimal),
    #[error("goal current amount cannot be negative, got {0}")]
    NegativeCurrent(Decimal),
    #[error("goal '{0}' not found")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("remote mirror is not configured")]
    NotConfigured,
    #[error("remote mirror request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote mirror rejected row with status {0}")]
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("budget limit must be non-negative, got {0}")]
    NegativeLimit(Decimal),
    #[error("budget category cannot be empty")]
    EmptyCategory,
}
