//! Technology risk register: qualitative 5×5 scoring over infrastructure,
//! application, and data risks, with inherent and residual views.

use serde::{Deserialize, Serialize};

use crate::gateway::Draft;
use crate::listview::{FieldValue, ListView, Record, SortSpec};
use crate::models::RiskLevel;
use crate::stats;

pub const TECHNOLOGY_CATEGORIES: &[&str] = &[
    "Infrastructure",
    "Applications",
    "Data",
    "Cloud",
    "Network",
    "End User Computing",
];

pub const STATUSES: &[&str] = &["open", "in_treatment", "mitigated", "accepted", "closed"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyRisk {
    pub id: i64,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technology_category: String,
    #[serde(default = "one")]
    pub likelihood: i64,
    #[serde(default = "one")]
    pub impact: i64,
    #[serde(default = "one")]
    pub residual_likelihood: i64,
    #[serde(default = "one")]
    pub residual_impact: i64,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub action_owner: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn one() -> i64 {
    1
}

fn default_status() -> String {
    "open".to_string()
}

impl TechnologyRisk {
    pub fn score(&self) -> i64 {
        self.likelihood * self.impact
    }

    pub fn residual_score(&self) -> i64 {
        self.residual_likelihood * self.residual_impact
    }

    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score())
    }

    pub fn residual_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.residual_score())
    }
}

impl Record for TechnologyRisk {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "code" => FieldValue::Text(self.code.clone()),
            "title" => FieldValue::Text(self.title.clone()),
            "category" => FieldValue::Text(self.technology_category.clone()),
            "level" => FieldValue::Text(self.level().label().to_string()),
            "score" => FieldValue::Number(self.score() as f64),
            "residual_score" => FieldValue::Number(self.residual_score() as f64),
            "status" => FieldValue::Text(self.status.clone()),
            "owner" => match &self.owner {
                Some(o) => FieldValue::Text(o.clone()),
                None => FieldValue::Missing,
            },
            "created_at" => FieldValue::Date(self.created_at.clone()),
            "updated_at" => FieldValue::Date(self.updated_at.clone()),
            _ => FieldValue::Missing,
        }
    }

    fn search_fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.title.clone()),
            FieldValue::Text(self.code.clone()),
            match &self.description {
                Some(d) => FieldValue::Text(d.clone()),
                None => FieldValue::Missing,
            },
        ]
    }
}

pub const FILTERS: &[&str] = &["category", "level", "status", "owner"];

#[derive(Debug, Clone, Serialize)]
pub struct NewTechnologyRisk {
    pub title: String,
    pub description: Option<String>,
    pub technology_category: String,
    pub likelihood: i64,
    pub impact: i64,
    pub residual_likelihood: i64,
    pub residual_impact: i64,
    pub owner: Option<String>,
    pub status: String,
    pub action_owner: Option<String>,
}

impl Default for NewTechnologyRisk {
    fn default() -> Self {
        NewTechnologyRisk {
            title: String::new(),
            description: None,
            technology_category: "Infrastructure".to_string(),
            likelihood: 1,
            impact: 1,
            residual_likelihood: 1,
            residual_impact: 1,
            owner: None,
            status: "open".to_string(),
            action_owner: None,
        }
    }
}

impl Draft for NewTechnologyRisk {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.title.trim().is_empty() {
            problems.push("Title is required".to_string());
        }
        for (label, value) in [
            ("Likelihood", self.likelihood),
            ("Impact", self.impact),
            ("Residual likelihood", self.residual_likelihood),
            ("Residual impact", self.residual_impact),
        ] {
            if !(1..=5).contains(&value) {
                problems.push(format!("{label} must be between 1 and 5"));
            }
        }
        if !STATUSES.contains(&self.status.as_str()) {
            problems.push(format!("Unknown status: {}", self.status));
        }
        problems
    }
}

#[derive(Debug, Clone)]
pub struct TechRiskStats {
    pub total: usize,
    pub level_counts: stats::BucketCounts,
    pub category_counts: stats::BucketCounts,
    pub status_counts: stats::BucketCounts,
}

impl TechRiskStats {
    pub fn compute(risks: &[TechnologyRisk]) -> TechRiskStats {
        TechRiskStats {
            total: risks.len(),
            level_counts: stats::count_by(risks, |r| r.level().label().to_string()),
            category_counts: stats::count_by(risks, |r| r.technology_category.clone()),
            status_counts: stats::count_by(risks, |r| r.status.clone()),
        }
    }
}

pub fn list_view(per_page: usize) -> ListView<TechnologyRisk> {
    let mut view = ListView::new(per_page);
    view.set_sort(SortSpec::from_params(Some("score"), Some("desc")));
    view
}
