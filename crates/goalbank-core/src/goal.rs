//! Savings goals and the tracker that owns them.
//!
//! A goal only ever grows: contributions add to `current_amount` and there
//! is no withdrawal path. `current_amount` may overshoot `target_amount`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, EntityKind, Result, ValidationError};

/// A named savings target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub current_amount: u64,
    pub target_amount: u64,
    pub target_date: NaiveDate,
    pub created_on: NaiveDate,
}

/// How progress behaves once a goal is overfunded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressMode {
    /// Progress stops at 100%.
    #[default]
    Capped,
    /// Progress keeps climbing past 100%.
    Uncapped,
}

impl std::str::FromStr for ProgressMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "capped" => Ok(ProgressMode::Capped),
            "uncapped" => Ok(ProgressMode::Uncapped),
            other => Err(format!("unknown progress mode: {other}")),
        }
    }
}

impl Goal {
    /// Create an empty goal. Fails on a blank title or a zero target.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        target_amount: u64,
        target_date: NaiveDate,
        created_on: NaiveDate,
    ) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title".into()).into());
        }
        if target_amount == 0 {
            return Err(ValidationError::NonPositiveAmount {
                field: "target_amount".into(),
            }
            .into());
        }
        Ok(Self {
            id: id.into(),
            title: title.trim().to_string(),
            current_amount: 0,
            target_amount,
            target_date,
            created_on,
        })
    }

    /// Builder used by seed data for goals that already hold savings.
    pub fn with_current_amount(mut self, current_amount: u64) -> Self {
        self.current_amount = current_amount;
        self
    }

    /// Whole-number percentage of the target reached, rounded half up.
    pub fn progress(&self, mode: ProgressMode) -> u32 {
        let current = match mode {
            ProgressMode::Capped => self.current_amount.min(self.target_amount),
            ProgressMode::Uncapped => self.current_amount,
        };
        let target = self.target_amount.max(1) as u128;
        let pct = (200 * current as u128 + target) / (2 * target);
        u32::try_from(pct).unwrap_or(u32::MAX)
    }

    /// Calendar days between today and the target date, ignoring direction.
    ///
    /// A past target date still yields a positive count; check
    /// [`Goal::is_overdue`] to tell the two apart.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.target_date - today).num_days().abs()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.target_date < today
    }

    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn amount_left(&self) -> u64 {
        self.target_amount.saturating_sub(self.current_amount)
    }
}

/// Owns the session's goals in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTracker {
    goals: Vec<Goal>,
}

impl GoalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_goals(goals: Vec<Goal>) -> Self {
        Self { goals }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, goal_id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == goal_id)
    }

    pub fn contains(&self, goal_id: &str) -> bool {
        self.get(goal_id).is_some()
    }

    /// Create a goal with a fresh id and no savings yet.
    pub fn add_goal(
        &mut self,
        title: &str,
        target_amount: u64,
        target_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Goal> {
        let goal = Goal::new(
            Uuid::new_v4().to_string(),
            title,
            target_amount,
            target_date,
            today,
        )?;
        self.goals.push(goal.clone());
        Ok(goal)
    }

    /// Insert a prepared goal. Ids must stay unique.
    pub fn insert(&mut self, goal: Goal) -> Result<()> {
        if self.contains(&goal.id) {
            return Err(ValidationError::InvalidValue {
                field: "id".into(),
                message: format!("goal '{}' already exists", goal.id),
            }
            .into());
        }
        self.goals.push(goal);
        Ok(())
    }

    /// Add `amount` to the goal and return the updated goal.
    ///
    /// The amount is expected to be positive; the engine checks that before
    /// calling in.
    pub fn record_contribution(&mut self, goal_id: &str, amount: u64) -> Result<Goal> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Goal, goal_id))?;
        goal.current_amount = goal.current_amount.saturating_add(amount);
        Ok(goal.clone())
    }

    pub fn remove(&mut self, goal_id: &str) -> Result<Goal> {
        let idx = self
            .goals
            .iter()
            .position(|g| g.id == goal_id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Goal, goal_id))?;
        Ok(self.goals.remove(idx))
    }

    /// Sum of savings across every goal.
    pub fn total_saved(&self) -> u64 {
        self.goals
            .iter()
            .fold(0u64, |acc, g| acc.saturating_add(g.current_amount))
    }
}

/// A friend's goal shown next to the user's own. Read-only: friends' goals
/// never receive contributions and do not count towards milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendGoal {
    pub friend: String,
    pub goal: Goal,
}

impl FriendGoal {
    pub fn new(friend: impl Into<String>, goal: Goal) -> Self {
        Self {
            friend: friend.into(),
            goal,
        }
    }
}
