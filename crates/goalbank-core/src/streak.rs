//! Consecutive-day savings streak.
//!
//! A streak grows by one when a contribution lands exactly one calendar day
//! after the previous one and falls back to 1 on any gap. What happens on a
//! second contribution within the same day is governed by [`SameDayPolicy`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a repeat contribution on the same calendar day affects the streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameDayPolicy {
    /// Treat it like any non-consecutive day: the streak restarts at 1.
    #[default]
    Reset,
    /// Keep the current streak (at least 1).
    Preserve,
}

impl SameDayPolicy {
    pub fn description(&self) -> &'static str {
        match self {
            SameDayPolicy::Reset => "Same-day contributions restart the streak",
            SameDayPolicy::Preserve => "Same-day contributions keep the streak",
        }
    }
}

impl std::str::FromStr for SameDayPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reset" => Ok(SameDayPolicy::Reset),
            "preserve" => Ok(SameDayPolicy::Preserve),
            other => Err(format!("unknown same-day policy: {other}")),
        }
    }
}

/// Snapshot of the streak.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    pub last_contribution_date: Option<NaiveDate>,
}

/// Tracks the streak across contributions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakTracker {
    state: StreakState,
    #[serde(default)]
    same_day: SameDayPolicy,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(same_day: SameDayPolicy) -> Self {
        Self {
            state: StreakState::default(),
            same_day,
        }
    }

    /// Start from an existing streak.
    pub fn with_state(mut self, state: StreakState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &StreakState {
        &self.state
    }

    pub fn current_streak(&self) -> u32 {
        self.state.current_streak
    }

    /// Register a contribution on `date` and return the new state.
    pub fn update(&mut self, date: NaiveDate) -> &StreakState {
        let next = match self.state.last_contribution_date {
            None => self.state.current_streak.saturating_add(1),
            Some(last) => match (date - last).num_days() {
                1 => self.state.current_streak.saturating_add(1),
                0 if self.same_day == SameDayPolicy::Preserve => self.state.current_streak.max(1),
                _ => 1,
            },
        };

        self.state.current_streak = next;
        self.state.longest_streak = self.state.longest_streak.max(next);
        self.state.last_contribution_date = Some(date);
        &self.state
    }
}
