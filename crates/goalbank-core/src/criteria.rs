//! Threshold predicate shared by the reward and challenge catalogs.
//!
//! Catalog entries carry their unlock rule as data. One function decides
//! whether the rule holds for the current progress.

use serde::{Deserialize, Serialize};

/// How individual thresholds combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Any configured threshold suffices.
    #[default]
    Any,
    /// Every configured threshold must hold.
    All,
}

/// Values the thresholds are compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub amount: u64,
    pub streak: u32,
    pub points: u64,
}

/// Set of optional minimums. Unset fields do not take part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockCriteria {
    #[serde(default)]
    pub min_amount: Option<u64>,
    #[serde(default)]
    pub min_streak: Option<u32>,
    #[serde(default)]
    pub min_points: Option<u64>,
    #[serde(default)]
    pub mode: MatchMode,
}

impl UnlockCriteria {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            mode: MatchMode::All,
            ..Self::default()
        }
    }

    pub fn amount(mut self, min: u64) -> Self {
        self.min_amount = Some(min);
        self
    }

    pub fn streak(mut self, min: u32) -> Self {
        self.min_streak = Some(min);
        self
    }

    pub fn points(mut self, min: u64) -> Self {
        self.min_points = Some(min);
        self
    }

    /// Check the thresholds against `progress`.
    ///
    /// Criteria without any threshold are never met.
    pub fn is_met(&self, progress: &Progress) -> bool {
        let checks = [
            self.min_amount.map(|min| progress.amount >= min),
            self.min_streak.map(|min| progress.streak >= min),
            self.min_points.map(|min| progress.points >= min),
        ];
        let mut configured = checks.iter().flatten().peekable();
        if configured.peek().is_none() {
            return false;
        }
        match self.mode {
            MatchMode::Any => configured.any(|ok| *ok),
            MatchMode::All => configured.all(|ok| *ok),
        }
    }
}
