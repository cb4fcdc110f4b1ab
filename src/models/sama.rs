//! SAMA cyber-security framework compliance: remediation tracking against
//! assessed requirements, with maturity ratings and overdue detection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::gateway::Draft;
use crate::listview::{FieldValue, ListView, Record, SortSpec};
use crate::stats;

pub const STATUSES: &[&str] = &["Planned", "In Progress", "Completed", "On Hold"];

/// SAMA maturity scale, level 0–5.
pub const MATURITY_LEVELS: &[&str] = &[
    "Non-Existent",
    "Ad-Hoc",
    "Defined",
    "Structured and Formalized",
    "Managed and Measurable",
    "Adaptive",
];

pub fn maturity_name(level: i64) -> &'static str {
    MATURITY_LEVELS
        .get(level.max(0) as usize)
        .copied()
        .unwrap_or("Non-Existent")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Remediation {
    pub id: i64,
    pub code: String,
    /// SAMA control reference, e.g. "3.3.5".
    #[serde(default)]
    pub control_reference: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub maturity_level: i64,
    #[serde(default)]
    pub owner: Option<String>,
    /// YYYY-MM-DD.
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn default_status() -> String {
    "Planned".to_string()
}

impl Remediation {
    pub fn maturity_name(&self) -> &'static str {
        maturity_name(self.maturity_level)
    }

    /// Overdue when the target date has passed and the work is not done.
    /// An unparseable or absent date is never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if self.status == "Completed" {
            return false;
        }
        match &self.target_date {
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(target) => target < today,
                Err(_) => false,
            },
            None => false,
        }
    }
}

impl Record for Remediation {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "code" => FieldValue::Text(self.code.clone()),
            "control" => FieldValue::Text(self.control_reference.clone()),
            "title" => FieldValue::Text(self.title.clone()),
            "risk_level" => FieldValue::Text(self.risk_level.clone()),
            "status" => FieldValue::Text(self.status.clone()),
            "maturity" => FieldValue::Number(self.maturity_level as f64),
            "owner" => match &self.owner {
                Some(o) => FieldValue::Text(o.clone()),
                None => FieldValue::Missing,
            },
            "target_date" => match &self.target_date {
                Some(d) => FieldValue::Date(d.clone()),
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
            FieldValue::Text(self.control_reference.clone()),
            match &self.description {
                Some(d) => FieldValue::Text(d.clone()),
                None => FieldValue::Missing,
            },
        ]
    }
}

pub const FILTERS: &[&str] = &["status", "risk_level", "owner"];

#[derive(Debug, Clone, Serialize)]
pub struct NewRemediation {
    pub control_reference: String,
    pub title: String,
    pub description: Option<String>,
    pub risk_level: String,
    pub status: String,
    pub maturity_level: i64,
    pub owner: Option<String>,
    pub target_date: Option<String>,
}

impl Default for NewRemediation {
    fn default() -> Self {
        NewRemediation {
            control_reference: String::new(),
            title: String::new(),
            description: None,
            risk_level: "Low".to_string(),
            status: "Planned".to_string(),
            maturity_level: 0,
            owner: None,
            target_date: None,
        }
    }
}

impl Draft for NewRemediation {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.title.trim().is_empty() {
            problems.push("Title is required".to_string());
        }
        if self.control_reference.trim().is_empty() {
            problems.push("Control reference is required".to_string());
        }
        if !STATUSES.contains(&self.status.as_str()) {
            problems.push(format!("Unknown status: {}", self.status));
        }
        if !(0..=5).contains(&self.maturity_level) {
            problems.push("Maturity level must be between 0 and 5".to_string());
        }
        if let Some(raw) = &self.target_date {
            if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err() {
                problems.push(format!("Target date must be YYYY-MM-DD, got {raw}"));
            }
        }
        problems
    }
}

/// Tracker summary cards.
#[derive(Debug, Clone)]
pub struct RemediationStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
    pub status_counts: stats::BucketCounts,
    pub risk_counts: stats::BucketCounts,
}

impl RemediationStats {
    pub fn compute(remediations: &[Remediation], today: NaiveDate) -> RemediationStats {
        RemediationStats {
            total: remediations.len(),
            completed: remediations.iter().filter(|r| r.status == "Completed").count(),
            in_progress: remediations.iter().filter(|r| r.status == "In Progress").count(),
            overdue: remediations.iter().filter(|r| r.is_overdue(today)).count(),
            status_counts: stats::count_by(remediations, |r| r.status.clone()),
            risk_counts: stats::count_by(remediations, |r| r.risk_level.clone()),
        }
    }
}

pub fn list_view(per_page: usize) -> ListView<Remediation> {
    let mut view = ListView::new(per_page);
    view.set_sort(SortSpec::from_params(Some("target_date"), Some("asc")));
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remediation(id: i64, status: &str, target_date: Option<&str>) -> Remediation {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "code": format!("SAMA-{id:03}"),
            "control_reference": "3.3.5",
            "title": format!("Remediation {id}"),
            "status": status,
            "target_date": target_date,
        }))
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn overdue_requires_past_date_and_open_status() {
        assert!(remediation(1, "In Progress", Some("2024-01-01")).is_overdue(today()));
        assert!(!remediation(2, "Completed", Some("2024-01-01")).is_overdue(today()));
        assert!(!remediation(3, "Planned", Some("2024-12-01")).is_overdue(today()));
        assert!(!remediation(4, "Planned", None).is_overdue(today()));
        assert!(!remediation(5, "Planned", Some("soon")).is_overdue(today()));
    }

    #[test]
    fn maturity_names_clamp() {
        assert_eq!(maturity_name(0), "Non-Existent");
        assert_eq!(maturity_name(5), "Adaptive");
        assert_eq!(maturity_name(-3), "Non-Existent");
        assert_eq!(maturity_name(9), "Non-Existent");
    }

    #[test]
    fn stats_count_overdue_and_status() {
        let items = vec![
            remediation(1, "Completed", Some("2024-01-01")),
            remediation(2, "In Progress", Some("2024-01-01")),
            remediation(3, "Planned", Some("2024-12-01")),
        ];
        let s = RemediationStats::compute(&items, today());
        assert_eq!(s.total, 3);
        assert_eq!(s.completed, 1);
        assert_eq!(s.in_progress, 1);
        assert_eq!(s.overdue, 1);
    }

    #[test]
    fn draft_rejects_bad_target_date() {
        let draft = NewRemediation {
            title: "t".to_string(),
            control_reference: "3.1".to_string(),
            target_date: Some("June 2024".to_string()),
            ..Default::default()
        };
        assert_eq!(draft.validate().len(), 1);
    }
}
