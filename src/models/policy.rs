//! Policy and procedure management with version history. Versions move
//! through a fixed status workflow; rolling back to an earlier version is
//! destructive and sits behind the same confirmation gate as delete.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::api::Backend;
use crate::errors::AppError;
use crate::gateway::{Confirmation, Draft};
use crate::listview::{FieldValue, ListView, Record, SortSpec};
use crate::stats;

pub const VERSION_STATUSES: &[&str] = &["draft", "under_review", "approved", "published"];

/// Allowed status transitions: forward one step at a time, or back to
/// draft from review.
pub fn can_transition(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        ("draft", "under_review")
            | ("under_review", "approved")
            | ("under_review", "draft")
            | ("approved", "published")
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub id: i64,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Current version label, e.g. "2.1".
    #[serde(default)]
    pub version: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn default_status() -> String {
    "draft".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyVersion {
    pub id: i64,
    pub version: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub change_summary: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl Record for PolicyDocument {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "code" => FieldValue::Text(self.code.clone()),
            "title" => FieldValue::Text(self.title.clone()),
            "category" => match &self.category {
                Some(c) => FieldValue::Text(c.clone()),
                None => FieldValue::Missing,
            },
            "version" => FieldValue::Text(self.version.clone()),
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

pub const FILTERS: &[&str] = &["status", "category", "owner"];

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPolicyDocument {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub owner: Option<String>,
}

impl Draft for NewPolicyDocument {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.title.trim().is_empty() {
            problems.push("Title is required".to_string());
        }
        problems
    }
}

/// Collection path for a policy's version history.
pub fn versions_path(policy_id: i64) -> String {
    format!("policies/{policy_id}/versions")
}

pub fn rollback_path(policy_id: i64, version_id: i64) -> String {
    format!("policies/{policy_id}/versions/{version_id}/rollback")
}

/// Body for creating a version snapshot of the current policy text.
pub fn new_version_payload(change_summary: &str) -> Value {
    json!({ "change_summary": change_summary })
}

/// Roll the policy back to an earlier version. Declining the confirmation
/// issues no request, same as delete.
pub async fn rollback<B: Backend<PolicyVersion>>(
    backend: &B,
    version_id: i64,
    confirmation: Confirmation,
) -> Result<(), AppError> {
    if confirmation == Confirmation::Declined {
        log::debug!("rollback to version {version_id} declined, nothing issued");
        return Ok(());
    }
    backend.create(&json!({ "version_id": version_id })).await
}

#[derive(Debug, Clone)]
pub struct PolicyStats {
    pub total: usize,
    pub status_counts: stats::BucketCounts,
    pub category_counts: stats::BucketCounts,
}

impl PolicyStats {
    pub fn compute(policies: &[PolicyDocument]) -> PolicyStats {
        PolicyStats {
            total: policies.len(),
            status_counts: stats::count_by(policies, |p| p.status.clone()),
            category_counts: stats::count_by(policies, |p| {
                p.category.clone().unwrap_or_else(|| "Uncategorized".to_string())
            }),
        }
    }
}

pub fn list_view(per_page: usize) -> ListView<PolicyDocument> {
    let mut view = ListView::new(per_page);
    view.set_sort(SortSpec::from_params(Some("updated_at"), Some("desc")));
    view
}
