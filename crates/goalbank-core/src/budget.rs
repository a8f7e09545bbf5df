//! Monthly spending budget and transaction log.
//!
//! `spent` is the running total checked against the budget. Every expense
//! accepted through [`Budget::spend`] is also logged as a [`Transaction`], and
//! incomes are logged without touching the budget. The log feeds the spending
//! ranking by category and the recent-transactions list.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Category used when an expense does not name one.
pub const DEFAULT_CATEGORY: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    /// Sign shown in front of the amount.
    pub fn sign(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "-",
            TransactionKind::Income => "+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub label: String,
    pub category: String,
    pub amount: u64,
    pub date: NaiveDate,
    pub kind: TransactionKind,
}

/// One row of the monthly spending ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: u64,
    /// Share of all logged expenses, rounded half up.
    pub share_percent: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Display label, e.g. "2024-12".
    pub month: String,
    pub total: u64,
    pub spent: u64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Budget {
    pub fn new(month: impl Into<String>, total: u64) -> Self {
        Self {
            month: month.into(),
            total,
            spent: 0,
            transactions: Vec::new(),
        }
    }

    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.spent)
    }

    /// Percent of the budget used, capped at 100.
    pub fn usage_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.spent.min(self.total) as u128 * 100) / self.total as u128;
        pct as u32
    }

    /// Record an expense and return what is left.
    ///
    /// A blank category falls back to [`DEFAULT_CATEGORY`].
    pub fn spend(&mut self, label: &str, category: &str, amount: u64, date: NaiveDate) -> Result<u64> {
        if amount == 0 {
            return Err(ValidationError::NonPositiveAmount {
                field: "amount".into(),
            }
            .into());
        }
        let available = self.remaining();
        if amount > available {
            return Err(ValidationError::InsufficientBalance {
                requested: amount,
                available,
            }
            .into());
        }
        let category = match category.trim() {
            "" => DEFAULT_CATEGORY,
            c => c,
        };
        self.spent += amount;
        self.transactions.push(Transaction {
            label: label.trim().to_string(),
            category: category.to_string(),
            amount,
            date,
            kind: TransactionKind::Expense,
        });
        Ok(self.remaining())
    }

    /// Log an income. The budget itself is unchanged.
    pub fn record_income(&mut self, label: &str, amount: u64, date: NaiveDate) -> Result<()> {
        if amount == 0 {
            return Err(ValidationError::NonPositiveAmount {
                field: "amount".into(),
            }
            .into());
        }
        if label.trim().is_empty() {
            return Err(ValidationError::EmptyField("label".into()).into());
        }
        self.transactions.push(Transaction {
            label: label.trim().to_string(),
            category: "Income".into(),
            amount,
            date,
            kind: TransactionKind::Income,
        });
        Ok(())
    }

    pub fn deposit(&mut self, amount: u64) -> Result<u64> {
        if amount == 0 {
            return Err(ValidationError::NonPositiveAmount {
                field: "amount".into(),
            }
            .into());
        }
        self.total = self.total.saturating_add(amount);
        Ok(self.remaining())
    }

    /// Newest first: by date, ties broken by the later insertion.
    pub fn recent_transactions(&self, limit: usize) -> Vec<Transaction> {
        let mut indexed: Vec<(usize, &Transaction)> = self.transactions.iter().enumerate().collect();
        indexed.sort_by(|(ia, a), (ib, b)| b.date.cmp(&a.date).then(ib.cmp(ia)));
        indexed
            .into_iter()
            .take(limit)
            .map(|(_, t)| t.clone())
            .collect()
    }

    /// Logged expenses grouped by category, largest first.
    ///
    /// Equal amounts keep alphabetical category order.
    pub fn spending_ranking(&self) -> Vec<CategorySpending> {
        let mut by_category: BTreeMap<&str, u64> = BTreeMap::new();
        for tx in self.transactions.iter().filter(|t| t.kind == TransactionKind::Expense) {
            let entry = by_category.entry(tx.category.as_str()).or_default();
            *entry = entry.saturating_add(tx.amount);
        }
        let total: u128 = by_category.values().map(|&a| a as u128).sum();

        let mut ranking: Vec<CategorySpending> = by_category
            .into_iter()
            .map(|(category, amount)| CategorySpending {
                category: category.to_string(),
                amount,
                share_percent: if total == 0 {
                    0
                } else {
                    ((200 * amount as u128 + total) / (2 * total)) as u32
                },
            })
            .collect();
        ranking.sort_by(|a, b| b.amount.cmp(&a.amount));
        ranking
    }

    /// Month-end spending projected linearly from the pace so far.
    ///
    /// Assumes `today` falls in the budget month. Never below `spent`.
    pub fn forecast(&self, today: NaiveDate) -> u64 {
        let elapsed = today.day() as u128;
        let month_days = days_in_month(today) as u128;
        let projected = (self.spent as u128 * month_days * 2 + elapsed) / (2 * elapsed);
        u64::try_from(projected).unwrap_or(u64::MAX).max(self.spent)
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}
