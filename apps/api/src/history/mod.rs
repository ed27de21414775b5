// In-memory analysis history.
// Bounded FIFO of recent outcomes; nothing survives a restart.

pub mod handlers;

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::features::orchestrator::AnalysisOutcome;
use crate::features::Feature;

/// Compact listing row for `GET /api/v1/history`.
#[derive(Debug, Clone, Serialize)]
pub struct HistorySummary {
    pub id: Uuid,
    pub feature: Feature,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub has_text: bool,
}

impl From<&AnalysisOutcome> for HistorySummary {
    fn from(outcome: &AnalysisOutcome) -> Self {
        Self {
            id: outcome.id,
            feature: outcome.feature,
            label: outcome.label.clone(),
            created_at: outcome.created_at,
            has_text: outcome.text.is_some(),
        }
    }
}

/// Shared across handlers as `Arc<AnalysisHistory>`.
pub struct AnalysisHistory {
    capacity: usize,
    entries: RwLock<VecDeque<AnalysisOutcome>>,
}

impl AnalysisHistory {
    /// `capacity == 0` disables recording.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Appends an outcome, evicting the oldest once full.
    pub async fn record(&self, outcome: AnalysisOutcome) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.write().await;
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(outcome);
    }

    /// Newest first.
    pub async fn list(&self) -> Vec<HistorySummary> {
        let entries = self.entries.read().await;
        entries.iter().rev().map(HistorySummary::from).collect()
    }

    pub async fn get(&self, id: Uuid) -> Option<AnalysisOutcome> {
        let entries = self.entries.read().await;
        entries.iter().find(|o| o.id == id).cloned()
    }

    /// Returns how many entries were dropped.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(feature: Feature, text: Option<&str>) -> AnalysisOutcome {
        AnalysisOutcome {
            id: Uuid::new_v4(),
            feature,
            label: feature.label().to_string(),
            created_at: Utc::now(),
            text: text.map(str::to_string),
            model: None,
            usage: None,
            keyword_report: None,
            layout_report: None,
            latency_ms: 0,
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let history = AnalysisHistory::new(10);
        let first = outcome(Feature::CoverLetter, Some("a"));
        let second = outcome(Feature::LayoutAnalysis, None);
        history.record(first.clone()).await;
        history.record(second.clone()).await;

        let listed = history.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert!(!listed[0].has_text);
        assert_eq!(listed[1].id, first.id);
        assert!(listed[1].has_text);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let history = AnalysisHistory::new(2);
        let a = outcome(Feature::JobMatch, Some("a"));
        let b = outcome(Feature::JobMatch, Some("b"));
        let c = outcome(Feature::JobMatch, Some("c"));
        history.record(a.clone()).await;
        history.record(b.clone()).await;
        history.record(c.clone()).await;

        assert!(history.get(a.id).await.is_none());
        assert!(history.get(b.id).await.is_some());
        assert_eq!(history.get(c.id).await.unwrap().text.as_deref(), Some("c"));
        assert_eq!(history.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_capacity_records_nothing() {
        let history = AnalysisHistory::new(0);
        history.record(outcome(Feature::AtsCheck, Some("x"))).await;
        assert!(history.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_reports_removed_count() {
        let history = AnalysisHistory::new(5);
        history.record(outcome(Feature::AtsCheck, Some("x"))).await;
        history.record(outcome(Feature::AtsCheck, Some("y"))).await;
        assert_eq!(history.clear().await, 2);
        assert!(history.list().await.is_empty());
    }
}
