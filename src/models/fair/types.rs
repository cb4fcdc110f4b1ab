use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gateway::Draft;
use crate::models::RiskLevel;
use crate::stats;

/// A FAIR risk scenario as the backend serves it. Factor scores are on a
/// 1–10 scale; frequency and loss figures are min / most-likely / max
/// estimates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairRisk {
    pub id: i64,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub threat_actor: Option<String>,
    #[serde(default)]
    pub threat_capability: f64,
    #[serde(default)]
    pub threat_motivation: f64,
    #[serde(default)]
    pub control_strength: f64,
    #[serde(default)]
    pub vulnerability_score: f64,
    #[serde(default)]
    pub loss_event_frequency_min: f64,
    #[serde(default)]
    pub loss_event_frequency_most_likely: f64,
    #[serde(default)]
    pub loss_event_frequency_max: f64,
    #[serde(default)]
    pub primary_loss_min: f64,
    #[serde(default)]
    pub primary_loss_most_likely: f64,
    #[serde(default)]
    pub primary_loss_max: f64,
    #[serde(default)]
    pub secondary_loss_min: f64,
    #[serde(default)]
    pub secondary_loss_most_likely: f64,
    #[serde(default)]
    pub secondary_loss_max: f64,
    /// Stored ALE as of the last save; `ale()` recomputes from factors
    /// when the backend sends zero.
    #[serde(default)]
    pub annual_loss_expectancy: f64,
    #[serde(default)]
    pub risk_tolerance: f64,
    #[serde(default)]
    pub treatment_plan: Option<String>,
    #[serde(default = "default_treatment_status")]
    pub treatment_status: String,
    #[serde(default)]
    pub treatment_due_date: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn default_treatment_status() -> String {
    "identified".to_string()
}

impl FairRisk {
    /// ALE = most-likely event frequency × (primary + secondary most-likely loss).
    pub fn computed_ale(&self) -> f64 {
        self.loss_event_frequency_most_likely
            * (self.primary_loss_most_likely + self.secondary_loss_most_likely)
    }

    pub fn ale(&self) -> f64 {
        if self.annual_loss_expectancy > 0.0 {
            self.annual_loss_expectancy
        } else {
            self.computed_ale()
        }
    }

    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_ale(self.ale())
    }

    pub fn exceeds_tolerance(&self) -> bool {
        self.risk_tolerance > 0.0 && self.ale() > self.risk_tolerance
    }
}

/// Draft for create/update; the backend derives id, code, and timestamps.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewFairRisk {
    pub title: String,
    pub description: Option<String>,
    pub asset_id: Option<String>,
    pub threat_actor: Option<String>,
    pub threat_capability: f64,
    pub threat_motivation: f64,
    pub control_strength: f64,
    pub vulnerability_score: f64,
    pub loss_event_frequency_min: f64,
    pub loss_event_frequency_most_likely: f64,
    pub loss_event_frequency_max: f64,
    pub primary_loss_min: f64,
    pub primary_loss_most_likely: f64,
    pub primary_loss_max: f64,
    pub secondary_loss_min: f64,
    pub secondary_loss_most_likely: f64,
    pub secondary_loss_max: f64,
    pub annual_loss_expectancy: f64,
    pub risk_tolerance: f64,
    pub treatment_plan: Option<String>,
    pub treatment_status: String,
    pub treatment_due_date: Option<String>,
}

impl Draft for NewFairRisk {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.title.trim().is_empty() {
            problems.push("Title is required".to_string());
        }
        for (label, value) in [
            ("Loss event frequency", self.loss_event_frequency_most_likely),
            ("Primary loss", self.primary_loss_most_likely),
            ("Secondary loss", self.secondary_loss_most_likely),
        ] {
            if value < 0.0 {
                problems.push(format!("{label} cannot be negative"));
            }
        }
        problems
    }
}

/// Summary-card figures derived client-side from the unfiltered register.
#[derive(Debug, Clone)]
pub struct FairStats {
    pub total: usize,
    pub total_ale: f64,
    pub level_counts: stats::BucketCounts,
    pub status_counts: stats::BucketCounts,
    pub frequency_buckets: stats::BucketCounts,
    /// Top 5 risk ids by loss expectancy, descending.
    pub top_by_ale: Vec<i64>,
}

impl FairStats {
    pub fn compute(risks: &[FairRisk]) -> FairStats {
        FairStats {
            total: risks.len(),
            total_ale: stats::sum_by(risks, |r| r.ale()),
            level_counts: stats::count_by(risks, |r| r.level().label().to_string()),
            status_counts: stats::count_by(risks, |r| r.treatment_status.clone()),
            frequency_buckets: stats::bucket_counts(
                risks,
                |r| r.loss_event_frequency_most_likely,
                &[1.0, 5.0, 10.0],
                &["<=1/yr", "1-5/yr", "5-10/yr", ">10/yr"],
            ),
            top_by_ale: stats::top_n_by(risks, 5, |r| r.ale())
                .into_iter()
                .map(|r| r.id)
                .collect(),
        }
    }
}

/// Treatment-plan aggregates precomputed by the backend and sent along
/// the list payload. Decoded from the envelope's `stats` when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreatmentStats {
    #[serde(default)]
    pub total_ale_before: f64,
    #[serde(default)]
    pub total_ale_after: f64,
    #[serde(default)]
    pub total_risk_reduction: f64,
}

impl TreatmentStats {
    pub fn decode(stats: &Value) -> Option<TreatmentStats> {
        serde_json::from_value(stats.clone()).ok()
    }

    pub fn reduction_percentage(&self) -> f64 {
        if self.total_ale_before > 0.0 {
            self.total_risk_reduction / self.total_ale_before * 100.0
        } else {
            0.0
        }
    }
}
