//! Unlockable rewards (badges) tied to streak and point thresholds.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::criteria::{Progress, UnlockCriteria};
use crate::points::PointsState;
use crate::streak::StreakState;

/// A one-time badge. `is_unlocked` only ever goes from false to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub required_streak: Option<u32>,
    #[serde(default)]
    pub required_points: Option<u64>,
    #[serde(default)]
    pub is_unlocked: bool,
}

impl Reward {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            required_streak: None,
            required_points: None,
            is_unlocked: false,
        }
    }

    pub fn requires_streak(mut self, days: u32) -> Self {
        self.required_streak = Some(days);
        self
    }

    pub fn requires_points(mut self, points: u64) -> Self {
        self.required_points = Some(points);
        self
    }

    /// Either threshold unlocks the reward.
    pub fn criteria(&self) -> UnlockCriteria {
        UnlockCriteria {
            min_streak: self.required_streak,
            min_points: self.required_points,
            ..UnlockCriteria::any()
        }
    }
}

/// Re-evaluates the reward catalog after every contribution.
pub struct RewardEngine;

impl RewardEngine {
    /// Unlock every reward whose thresholds are now met.
    ///
    /// Returns the ids that were unlocked by this call.
    pub fn reevaluate(
        streak: &StreakState,
        points: &PointsState,
        rewards: &mut [Reward],
    ) -> Vec<String> {
        let progress = Progress {
            amount: 0,
            streak: streak.current_streak,
            points: points.total_points,
        };

        let mut unlocked = Vec::new();
        for reward in rewards.iter_mut().filter(|r| !r.is_unlocked) {
            if reward.criteria().is_met(&progress) {
                reward.is_unlocked = true;
                info!(reward = %reward.id, "reward unlocked");
                unlocked.push(reward.id.clone());
            }
        }
        unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streak(days: u32) -> StreakState {
        StreakState {
            current_streak: days,
            longest_streak: days,
            last_contribution_date: None,
        }
    }

    fn points(total: u64) -> PointsState {
        PointsState { total_points: total }
    }

    fn catalog() -> Vec<Reward> {
        vec![
            Reward::new("week", "Week streak", "Save 7 days in a row").requires_streak(7),
            Reward::new("hundred", "Hundred", "Earn 100 points").requires_points(100),
            Reward::new("either", "Either", "7 days or 500 points")
                .requires_streak(7)
                .requires_points(500),
        ]
    }

    #[test]
    fn unlocks_on_streak_or_points() {
        let mut rewards = catalog();
        let unlocked = RewardEngine::reevaluate(&streak(7), &points(0), &mut rewards);
        assert_eq!(unlocked, vec!["week".to_string(), "either".to_string()]);
        assert!(!rewards[1].is_unlocked);

        let unlocked = RewardEngine::reevaluate(&streak(1), &points(100), &mut rewards);
        assert_eq!(unlocked, vec!["hundred".to_string()]);
    }

    #[test]
    fn unlock_is_one_way() {
        let mut rewards = catalog();
        RewardEngine::reevaluate(&streak(7), &points(0), &mut rewards);
        let unlocked = RewardEngine::reevaluate(&streak(1), &points(0), &mut rewards);
        assert!(unlocked.is_empty());
        assert!(rewards[0].is_unlocked);
    }

    #[test]
    fn reward_without_thresholds_stays_locked() {
        let mut rewards = vec![Reward::new("none", "None", "")];
        let unlocked = RewardEngine::reevaluate(&streak(365), &points(1_000_000), &mut rewards);
        assert!(unlocked.is_empty());
        assert!(!rewards[0].is_unlocked);
    }
}
