//! Append-only log of accepted contributions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub goal_id: String,
    pub amount: u64,
    pub date: NaiveDate,
    #[serde(default)]
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionHistory {
    records: Vec<ContributionRecord>,
}

impl ContributionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ContributionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Newest first: by date, ties broken by the later insertion.
    pub fn recent(&self, limit: usize) -> Vec<ContributionRecord> {
        let mut indexed: Vec<(usize, &ContributionRecord)> = self.records.iter().enumerate().collect();
        indexed.sort_by(|(ia, a), (ib, b)| b.date.cmp(&a.date).then(ib.cmp(ia)));
        indexed
            .into_iter()
            .take(limit)
            .map(|(_, r)| r.clone())
            .collect()
    }

    pub fn total_for(&self, goal_id: &str) -> u64 {
        self.records
            .iter()
            .filter(|r| r.goal_id == goal_id)
            .fold(0u64, |acc, r| acc.saturating_add(r.amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(goal: &str, amount: u64, d: u32, memo: &str) -> ContributionRecord {
        ContributionRecord {
            goal_id: goal.into(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 12, d).unwrap(),
            memo: Some(memo.into()),
        }
    }

    #[test]
    fn recent_is_newest_first() {
        let mut history = ContributionHistory::new();
        history.push(record("car", 300_000, 18, "transfer"));
        history.push(record("car", 500_000, 25, "salary"));
        history.push(record("car", 200_000, 22, "from a friend"));
        history.push(record("car", 10_000, 25, "change"));

        let recent = history.recent(3);
        let memos: Vec<_> = recent.iter().map(|r| r.memo.as_deref().unwrap()).collect();
        assert_eq!(memos, vec!["change", "salary", "from a friend"]);
    }

    #[test]
    fn total_per_goal() {
        let mut history = ContributionHistory::new();
        history.push(record("car", 300_000, 18, ""));
        history.push(record("trip", 50_000, 19, ""));
        history.push(record("car", 200_000, 22, ""));
        assert_eq!(history.total_for("car"), 500_000);
        assert_eq!(history.total_for("house"), 0);
        assert_eq!(history.len(), 3);
    }
}
