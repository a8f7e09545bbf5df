//! Reward points ledger.
//!
//! Points are earned from contributions (one point per `won_per_point` won)
//! and from challenge payouts. The total never decreases.

use serde::{Deserialize, Serialize};

/// Default number of won that earns one point.
pub const DEFAULT_WON_PER_POINT: u64 = 10_000;
/// Default number of points needed per profile level.
pub const DEFAULT_POINTS_PER_LEVEL: u64 = 100;

/// Accumulated points for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsState {
    pub total_points: u64,
}

/// Converts contributions into points and keeps the running total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsLedger {
    state: PointsState,
    won_per_point: u64,
    points_per_level: u64,
}

impl PointsLedger {
    pub fn new() -> Self {
        Self::with_rates(DEFAULT_WON_PER_POINT, DEFAULT_POINTS_PER_LEVEL)
    }

    /// Rates of zero are treated as one to keep the divisions defined.
    pub fn with_rates(won_per_point: u64, points_per_level: u64) -> Self {
        Self {
            state: PointsState::default(),
            won_per_point: won_per_point.max(1),
            points_per_level: points_per_level.max(1),
        }
    }

    /// Start from an existing balance.
    pub fn with_total(mut self, total_points: u64) -> Self {
        self.state.total_points = total_points;
        self
    }

    pub fn state(&self) -> &PointsState {
        &self.state
    }

    pub fn total_points(&self) -> u64 {
        self.state.total_points
    }

    /// Points a contribution of `amount` is worth, without crediting them.
    pub fn points_for(&self, amount: u64) -> u64 {
        amount / self.won_per_point
    }

    /// Credit the points for a contribution and return how many were earned.
    pub fn earn(&mut self, amount: u64) -> u64 {
        let earned = self.points_for(amount);
        self.state.total_points = self.state.total_points.saturating_add(earned);
        earned
    }

    /// Credit bonus points (challenge payouts).
    pub fn award(&mut self, points: u64) {
        self.state.total_points = self.state.total_points.saturating_add(points);
    }

    /// Profile level, starting at 1.
    pub fn level(&self) -> u64 {
        self.state.total_points / self.points_per_level + 1
    }

    /// Points still needed to reach the next level.
    pub fn points_to_next_level(&self) -> u64 {
        self.points_per_level - self.state.total_points % self.points_per_level
    }
}

impl Default for PointsLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earn_uses_floor_division() {
        let mut ledger = PointsLedger::new();
        assert_eq!(ledger.earn(250_000), 25);
        assert_eq!(ledger.earn(9_999), 0);
        assert_eq!(ledger.earn(19_999), 1);
        assert_eq!(ledger.total_points(), 26);
    }

    #[test]
    fn award_adds_bonus_points() {
        let mut ledger = PointsLedger::new().with_total(40);
        ledger.award(50);
        assert_eq!(ledger.total_points(), 90);
    }

    #[test]
    fn custom_rate() {
        let mut ledger = PointsLedger::with_rates(1_000, 10);
        assert_eq!(ledger.earn(5_500), 5);
        assert_eq!(ledger.level(), 1);
        ledger.award(5);
        assert_eq!(ledger.level(), 2);
    }

    #[test]
    fn zero_rates_do_not_divide_by_zero() {
        let mut ledger = PointsLedger::with_rates(0, 0);
        assert_eq!(ledger.earn(7), 7);
        assert_eq!(ledger.level(), 8);
    }

    #[test]
    fn level_progression() {
        let ledger = PointsLedger::new();
        assert_eq!(ledger.level(), 1);
        assert_eq!(ledger.points_to_next_level(), 100);

        let ledger = PointsLedger::new().with_total(99);
        assert_eq!(ledger.level(), 1);
        assert_eq!(ledger.points_to_next_level(), 1);

        let ledger = PointsLedger::new().with_total(100);
        assert_eq!(ledger.level(), 2);
        assert_eq!(ledger.points_to_next_level(), 100);
    }

    #[test]
    fn level_near_max_balance() {
        let ledger = PointsLedger::new().with_total(u64::MAX);
        assert_eq!(ledger.level(), u64::MAX / 100 + 1);
        assert_eq!(ledger.points_to_next_level(), 100 - u64::MAX % 100);

        let mut ledger = PointsLedger::with_rates(1, 100).with_total(u64::MAX - 10);
        ledger.earn(u64::MAX);
        ledger.award(500);
        assert_eq!(ledger.total_points(), u64::MAX);
        assert_eq!(ledger.points_to_next_level(), 85);
    }
}
