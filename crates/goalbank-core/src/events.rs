use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::challenge::Payout;

/// Every state change in the engine produces an Event.
/// The UI renders from snapshots; events describe what just changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    GoalAdded {
        goal_id: String,
        title: String,
        target_amount: u64,
        target_date: NaiveDate,
    },
    ContributionRecorded {
        goal_id: String,
        amount: u64,
        new_amount: u64,
        at: NaiveDate,
    },
    StreakUpdated {
        current_streak: u32,
        longest_streak: u32,
        at: NaiveDate,
    },
    PointsEarned {
        earned: u64,
        total_points: u64,
    },
    ChallengeCompleted {
        challenge_id: String,
        payout: Payout,
    },
    RewardUnlocked {
        reward_id: String,
    },
    MilestoneAchieved {
        milestone_id: String,
        total_saved: u64,
    },
    FavoriteToggled {
        product_id: String,
        is_favorite: bool,
    },
    GoalDeleted {
        goal_id: String,
    },
    ProductDeleted {
        product_id: String,
    },
    BudgetSpent {
        amount: u64,
        category: String,
        remaining: u64,
    },
    IncomeRecorded {
        label: String,
        amount: u64,
    },
    BudgetToppedUp {
        amount: u64,
        remaining: u64,
    },
}

impl Event {
    /// Short machine-friendly name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::GoalAdded { .. } => "goal_added",
            Event::ContributionRecorded { .. } => "contribution_recorded",
            Event::StreakUpdated { .. } => "streak_updated",
            Event::PointsEarned { .. } => "points_earned",
            Event::ChallengeCompleted { .. } => "challenge_completed",
            Event::RewardUnlocked { .. } => "reward_unlocked",
            Event::MilestoneAchieved { .. } => "milestone_achieved",
            Event::FavoriteToggled { .. } => "favorite_toggled",
            Event::GoalDeleted { .. } => "goal_deleted",
            Event::ProductDeleted { .. } => "product_deleted",
            Event::BudgetSpent { .. } => "budget_spent",
            Event::IncomeRecorded { .. } => "income_recorded",
            Event::BudgetToppedUp { .. } => "budget_topped_up",
        }
    }
}
