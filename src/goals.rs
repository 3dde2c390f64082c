// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::GoalError;
use crate::metrics;
use crate::models::{Goal, new_id};
use rust_decimal::Decimal;

impl Goal {
    pub fn completion_pct(&self) -> Decimal {
        metrics::ratio_pct(self.current_amount, self.target_amount).min(Decimal::ONE_HUNDRED)
    }
}

pub fn create(
    goals: &mut Vec<Goal>,
    name: &str,
    target: Decimal,
    current: Decimal,
) -> Result<Goal, GoalError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GoalError::EmptyName);
    }
    if target <= Decimal::ZERO {
        return Err(GoalError::NonPositiveTarget(target));
    }
    if current < Decimal::ZERO {
        return Err(GoalError::NegativeCurrent(current));
    }
    let goal = Goal {
        id: new_id(),
        name: name.to_string(),
        target_amount: target,
        current_amount: current,
    };
    goals.push(goal.clone());
    Ok(goal)
}

pub fn update_current(goals: &mut [Goal], id: &str, current: Decimal) -> Result<(), GoalError> {
    if current < Decimal::ZERO {
        return Err(GoalError::NegativeCurrent(current));
    }
    let goal = goals
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(|| GoalError::NotFound(id.to_string()))?;
    goal.current_amount = current;
    Ok(())
}

pub fn delete(goals: &mut Vec<Goal>, id: &str) -> Result<Goal, GoalError> {
    let pos = goals
        .iter()
        .position(|g| g.id == id)
        .ok_or_else(|| GoalError::NotFound(id.to_string()))?;
    Ok(goals.remove(pos))
}
