//! Insight value types and ranking

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Positive,
    Negative,
    Neutral,
}

impl InsightType {
    /// Ranking order: problems first
    fn priority(self) -> u8 {
        match self {
            InsightType::Negative => 0,
            InsightType::Positive => 1,
            InsightType::Neutral => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    fn priority(self) -> u8 {
        match self {
            Confidence::High => 0,
            Confidence::Medium => 1,
            Confidence::Low => 2,
        }
    }
}

/// Headline number attached to an insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightMetric {
    pub label: String,
    pub value: f64,
    pub unit: String,
}

/// A human-readable finding for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationInsight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<InsightMetric>,
}

impl CorrelationInsight {
    pub fn new(
        insight_type: InsightType,
        confidence: Confidence,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            insight_type,
            title: title.into(),
            description: description.into(),
            confidence,
            metric: None,
        }
    }

    pub fn with_metric(mut self, label: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        self.metric = Some(InsightMetric {
            label: label.into(),
            value,
            unit: unit.into(),
        });
        self
    }
}

/// Sort most important first: negative before positive before neutral,
/// then high before medium before low. Ties keep their input order.
pub fn rank_insights(mut insights: Vec<CorrelationInsight>) -> Vec<CorrelationInsight> {
    insights.sort_by_key(|i| (i.insight_type.priority(), i.confidence.priority()));
    insights
}

/// Confidence for a correlation that already cleared the reporting bar
pub(crate) fn correlation_confidence(r: f64, strong: f64) -> Confidence {
    if r.abs() >= strong {
        Confidence::High
    } else {
        Confidence::Medium
    }
}
