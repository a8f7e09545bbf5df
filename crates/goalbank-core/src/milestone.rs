//! Cumulative savings milestones.
//!
//! Milestone status is derived from the goals on every read and never
//! stored.

use serde::{Deserialize, Serialize};

use crate::goal::Goal;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    /// Compared against the sum of savings across all goals.
    pub target_amount: u64,
    pub reward_points: u64,
}

impl Milestone {
    pub fn new(id: impl Into<String>, title: impl Into<String>, target_amount: u64, reward_points: u64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            target_amount,
            reward_points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneStatus {
    pub milestone: Milestone,
    pub is_achieved: bool,
    pub remaining: u64,
}

pub struct MilestoneView;

impl MilestoneView {
    pub fn total_saved(goals: &[Goal]) -> u64 {
        goals
            .iter()
            .fold(0u64, |acc, g| acc.saturating_add(g.current_amount))
    }

    pub fn evaluate(goals: &[Goal], milestones: &[Milestone]) -> Vec<MilestoneStatus> {
        Self::evaluate_total(Self::total_saved(goals), milestones)
    }

    pub fn evaluate_total(total_saved: u64, milestones: &[Milestone]) -> Vec<MilestoneStatus> {
        milestones
            .iter()
            .map(|m| MilestoneStatus {
                milestone: m.clone(),
                is_achieved: total_saved >= m.target_amount,
                remaining: m.target_amount.saturating_sub(total_saved),
            })
            .collect()
    }

    /// Milestones reached at `after` that were not reached at `before`.
    pub fn newly_achieved<'a>(before: u64, after: u64, milestones: &'a [Milestone]) -> Vec<&'a Milestone> {
        milestones
            .iter()
            .filter(|m| before < m.target_amount && after >= m.target_amount)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn goal(id: &str, current: u64) -> Goal {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        Goal::new(id, id, 5_000_000, d, d)
            .unwrap()
            .with_current_amount(current)
    }

    #[test]
    fn achieved_when_total_crosses_target() {
        let goals = vec![goal("a", 700_000), goal("b", 500_000)];
        let milestones = vec![
            Milestone::new("1m", "First million", 1_000_000, 100),
            Milestone::new("5m", "Five million", 5_000_000, 300),
        ];
        let status = MilestoneView::evaluate(&goals, &milestones);
        assert!(status[0].is_achieved);
        assert_eq!(status[0].remaining, 0);
        assert!(!status[1].is_achieved);
        assert_eq!(status[1].remaining, 3_800_000);
    }

    #[test]
    fn empty_goals_total_zero() {
        let milestones = vec![Milestone::new("1m", "First million", 1_000_000, 100)];
        let status = MilestoneView::evaluate(&[], &milestones);
        assert!(!status[0].is_achieved);
        assert_eq!(status[0].remaining, 1_000_000);
    }

    #[test]
    fn newly_achieved_only_reports_crossings() {
        let milestones = vec![
            Milestone::new("1m", "", 1_000_000, 0),
            Milestone::new("2m", "", 2_000_000, 0),
        ];
        let crossed = MilestoneView::newly_achieved(1_500_000, 2_100_000, &milestones);
        assert_eq!(crossed.len(), 1);
        assert_eq!(crossed[0].id, "2m");
        assert!(MilestoneView::newly_achieved(2_100_000, 2_200_000, &milestones).is_empty());
    }
}
