//! NIST CSF risk templates: qualitative likelihood × impact scoring on a
//! 5×5 matrix, with inherent and residual views, a maturity level, and
//! the framework's implementation tiers.

use serde::{Deserialize, Serialize};

use crate::gateway::Draft;
use crate::listview::{FieldValue, ListView, Record, SortSpec};
use crate::models::RiskLevel;
use crate::stats;

/// CSF 2.0 function taxonomy, used as a categorical filter.
pub const CSF_FUNCTIONS: &[&str] =
    &["Govern", "Identify", "Protect", "Detect", "Respond", "Recover"];

/// Implementation tiers 1–4.
pub const IMPLEMENTATION_TIERS: &[&str] =
    &["Partial", "Risk Informed", "Repeatable", "Adaptive"];

pub fn tier_name(tier_level: i64) -> &'static str {
    IMPLEMENTATION_TIERS
        .get((tier_level - 1).max(0) as usize)
        .copied()
        .unwrap_or("Partial")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskTemplate {
    pub id: i64,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// One of [`CSF_FUNCTIONS`].
    #[serde(default)]
    pub csf_function: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "one")]
    pub default_likelihood: i64,
    #[serde(default = "one")]
    pub default_impact: i64,
    #[serde(default = "one")]
    pub residual_likelihood: i64,
    #[serde(default = "one")]
    pub residual_impact: i64,
    /// 1–5 self-assessed maturity.
    #[serde(default = "one")]
    pub maturity_level: i64,
    #[serde(default = "one")]
    pub tier_level: i64,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn one() -> i64 {
    1
}

impl RiskTemplate {
    pub fn inherent_score(&self) -> i64 {
        self.default_likelihood * self.default_impact
    }

    pub fn residual_score(&self) -> i64 {
        self.residual_likelihood * self.residual_impact
    }

    pub fn inherent_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.inherent_score())
    }

    pub fn residual_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.residual_score())
    }

    pub fn tier_name(&self) -> &'static str {
        tier_name(self.tier_level)
    }
}

impl Record for RiskTemplate {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "code" => FieldValue::Text(self.code.clone()),
            "title" => FieldValue::Text(self.title.clone()),
            "function" => FieldValue::Text(self.csf_function.clone()),
            "category" => match &self.category {
                Some(c) => FieldValue::Text(c.clone()),
                None => FieldValue::Missing,
            },
            "level" => FieldValue::Text(self.inherent_level().label().to_string()),
            "residual_level" => FieldValue::Text(self.residual_level().label().to_string()),
            "score" => FieldValue::Number(self.inherent_score() as f64),
            "residual_score" => FieldValue::Number(self.residual_score() as f64),
            "maturity" => FieldValue::Number(self.maturity_level as f64),
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

/// Dropdown filters offered by the templates screen.
pub const FILTERS: &[&str] = &["function", "level"];

#[derive(Debug, Clone, Serialize)]
pub struct NewRiskTemplate {
    pub title: String,
    pub description: Option<String>,
    pub csf_function: String,
    pub category: Option<String>,
    pub default_likelihood: i64,
    pub default_impact: i64,
    pub residual_likelihood: i64,
    pub residual_impact: i64,
    pub maturity_level: i64,
    pub tier_level: i64,
    pub owner: Option<String>,
}

impl Default for NewRiskTemplate {
    fn default() -> Self {
        NewRiskTemplate {
            title: String::new(),
            description: None,
            csf_function: "Identify".to_string(),
            category: None,
            default_likelihood: 1,
            default_impact: 1,
            residual_likelihood: 1,
            residual_impact: 1,
            maturity_level: 1,
            tier_level: 1,
            owner: None,
        }
    }
}

impl Draft for NewRiskTemplate {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.title.trim().is_empty() {
            problems.push("Title is required".to_string());
        }
        if !CSF_FUNCTIONS.contains(&self.csf_function.as_str()) {
            problems.push(format!("Unknown CSF function: {}", self.csf_function));
        }
        for (label, value) in [
            ("Likelihood", self.default_likelihood),
            ("Impact", self.default_impact),
            ("Residual likelihood", self.residual_likelihood),
            ("Residual impact", self.residual_impact),
        ] {
            if !(1..=5).contains(&value) {
                problems.push(format!("{label} must be between 1 and 5"));
            }
        }
        if !(1..=5).contains(&self.maturity_level) {
            problems.push("Maturity level must be between 1 and 5".to_string());
        }
        if !(1..=4).contains(&self.tier_level) {
            problems.push("Implementation tier must be between 1 and 4".to_string());
        }
        problems
    }
}

/// Summary cards for the templates screen.
#[derive(Debug, Clone)]
pub struct TemplateStats {
    pub total: usize,
    pub level_counts: stats::BucketCounts,
    pub function_counts: stats::BucketCounts,
    pub top_by_score: Vec<i64>,
}

impl TemplateStats {
    pub fn compute(templates: &[RiskTemplate]) -> TemplateStats {
        TemplateStats {
            total: templates.len(),
            level_counts: stats::count_by(templates, |t| t.inherent_level().label().to_string()),
            function_counts: stats::count_by(templates, |t| t.csf_function.clone()),
            top_by_score: stats::top_n_by(templates, 5, |t| t.inherent_score() as f64)
                .into_iter()
                .map(|t| t.id)
                .collect(),
        }
    }
}

/// View-model for the templates screen, sorted by inherent score
/// descending by default.
pub fn list_view(per_page: usize) -> ListView<RiskTemplate> {
    let mut view = ListView::new(per_page);
    view.set_sort(SortSpec::from_params(Some("score"), Some("desc")));
    view
}
