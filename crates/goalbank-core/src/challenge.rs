//! Savings challenges.
//!
//! A challenge watches one goal (or whichever goal is being funded when it
//! is unscoped). Its `current_amount` mirrors that goal's savings and it
//! completes once the goal reaches `target_amount`, plus an optional streak
//! requirement. Completion is permanent.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::criteria::{Progress, UnlockCriteria};
use crate::goal::Goal;
use crate::streak::StreakState;

/// What a completed challenge grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payout {
    /// Bonus points credited to the ledger on completion.
    Points { points: u64 },
    /// Preferential interest rate, in basis points.
    BonusRate { basis_points: u32 },
}

impl Payout {
    /// Points to credit, if any.
    pub fn points(&self) -> u64 {
        match self {
            Payout::Points { points } => *points,
            Payout::BonusRate { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Goal this challenge follows. `None` follows any funded goal.
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub current_amount: u64,
    pub target_amount: u64,
    pub payout: Payout,
    #[serde(default)]
    pub required_streak: Option<u32>,
    #[serde(default)]
    pub is_completed: bool,
}

impl Challenge {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        target_amount: u64,
        payout: Payout,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            goal_id: None,
            current_amount: 0,
            target_amount,
            payout,
            required_streak: None,
            is_completed: false,
        }
    }

    pub fn for_goal(mut self, goal_id: impl Into<String>) -> Self {
        self.goal_id = Some(goal_id.into());
        self
    }

    pub fn requires_streak(mut self, days: u32) -> Self {
        self.required_streak = Some(days);
        self
    }

    pub fn with_current_amount(mut self, amount: u64) -> Self {
        self.current_amount = amount;
        self
    }

    pub fn follows(&self, goal_id: &str) -> bool {
        self.goal_id.as_deref().map_or(true, |id| id == goal_id)
    }

    /// Amount and streak must both hold.
    pub fn criteria(&self) -> UnlockCriteria {
        UnlockCriteria {
            min_amount: Some(self.target_amount),
            min_streak: self.required_streak,
            ..UnlockCriteria::all()
        }
    }

    /// Whole-number percent towards the target, capped at 100.
    pub fn progress(&self) -> u32 {
        if self.is_completed || self.current_amount >= self.target_amount {
            return 100;
        }
        let target = self.target_amount.max(1) as u128;
        ((200 * self.current_amount as u128 + target) / (2 * target)) as u32
    }
}

/// Re-evaluates challenges after a goal changed.
pub struct ChallengeEngine;

impl ChallengeEngine {
    /// Sync and complete the challenges following `goal`.
    ///
    /// Returns clones of the challenges completed by this call.
    pub fn reevaluate(
        goal: &Goal,
        streak: &StreakState,
        challenges: &mut [Challenge],
    ) -> Vec<Challenge> {
        let mut completed = Vec::new();
        for challenge in challenges
            .iter_mut()
            .filter(|c| !c.is_completed && c.follows(&goal.id))
        {
            challenge.current_amount = goal.current_amount;
            let progress = Progress {
                amount: goal.current_amount,
                streak: streak.current_streak,
                points: 0,
            };
            if challenge.criteria().is_met(&progress) {
                challenge.is_completed = true;
                info!(challenge = %challenge.id, goal = %goal.id, "challenge completed");
                completed.push(challenge.clone());
            } else {
                debug!(
                    challenge = %challenge.id,
                    current = challenge.current_amount,
                    target = challenge.target_amount,
                    "challenge still open"
                );
            }
        }
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn goal(id: &str, current: u64) -> Goal {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        Goal::new(id, "Goal", 10_000_000, d, d)
            .unwrap()
            .with_current_amount(current)
    }

    fn streak(days: u32) -> StreakState {
        StreakState {
            current_streak: days,
            longest_streak: days,
            last_contribution_date: None,
        }
    }

    #[test]
    fn completes_when_goal_amount_reaches_target() {
        let mut challenges = vec![Challenge::new(
            "first-million",
            "First million",
            "Save 1,000,000 won",
            1_000_000,
            Payout::Points { points: 50 },
        )];

        let done = ChallengeEngine::reevaluate(&goal("car", 999_999), &streak(1), &mut challenges);
        assert!(done.is_empty());
        assert_eq!(challenges[0].current_amount, 999_999);

        let done = ChallengeEngine::reevaluate(&goal("car", 1_000_000), &streak(1), &mut challenges);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].payout.points(), 50);
        assert!(challenges[0].is_completed);
    }

    #[test]
    fn scoped_challenge_ignores_other_goals() {
        let mut challenges = vec![Challenge::new(
            "car",
            "Car",
            "",
            100,
            Payout::BonusRate { basis_points: 50 },
        )
        .for_goal("car")];

        let done = ChallengeEngine::reevaluate(&goal("house", 5_000), &streak(1), &mut challenges);
        assert!(done.is_empty());
        assert_eq!(challenges[0].current_amount, 0);
    }

    #[test]
    fn streak_requirement_must_also_hold() {
        let mut challenges = vec![Challenge::new(
            "steady",
            "Steady",
            "",
            100,
            Payout::Points { points: 10 },
        )
        .requires_streak(3)];

        assert!(ChallengeEngine::reevaluate(&goal("g", 500), &streak(2), &mut challenges).is_empty());
        assert_eq!(ChallengeEngine::reevaluate(&goal("g", 500), &streak(3), &mut challenges).len(), 1);
    }

    #[test]
    fn completion_is_permanent_and_stops_syncing() {
        let mut challenges = vec![Challenge::new("c", "C", "", 100, Payout::Points { points: 1 })];
        ChallengeEngine::reevaluate(&goal("g", 150), &streak(1), &mut challenges);
        let again = ChallengeEngine::reevaluate(&goal("g", 300), &streak(0), &mut challenges);
        assert!(again.is_empty());
        assert!(challenges[0].is_completed);
        assert_eq!(challenges[0].current_amount, 150);
    }

    #[test]
    fn progress_percent() {
        let c = Challenge::new("c", "C", "", 1_000, Payout::Points { points: 1 }).with_current_amount(250);
        assert_eq!(c.progress(), 25);
        assert_eq!(c.with_current_amount(5_000).progress(), 100);
    }

    #[test]
    fn bonus_rate_pays_no_points() {
        assert_eq!(Payout::BonusRate { basis_points: 30 }.points(), 0);
    }
}
