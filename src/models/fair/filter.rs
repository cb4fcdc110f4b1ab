// src/models/fair/filter.rs

use crate::listview::{FieldValue, ListView, Record};

use super::types::FairRisk;

impl Record for FairRisk {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "code" => FieldValue::Text(self.code.clone()),
            "title" => FieldValue::Text(self.title.clone()),
            "description" => opt_text(&self.description),
            "asset" => opt_text(&self.asset_id),
            "threat_actor" => opt_text(&self.threat_actor),
            "level" => FieldValue::Text(self.level().label().to_string()),
            "ale" => FieldValue::Number(self.ale()),
            "frequency" => FieldValue::Number(self.loss_event_frequency_most_likely),
            "risk_tolerance" => FieldValue::Number(self.risk_tolerance),
            "treatment_status" => FieldValue::Text(self.treatment_status.clone()),
            "treatment_due_date" => match &self.treatment_due_date {
                Some(d) => FieldValue::Date(d.clone()),
                None => FieldValue::Missing,
            },
            "treatment_plan" => opt_text(&self.treatment_plan),
            "created_at" => FieldValue::Date(self.created_at.clone()),
            "updated_at" => FieldValue::Date(self.updated_at.clone()),
            // Wire-named columns, used by CSV export so the file matches
            // the import schema
            "asset_id" => opt_text(&self.asset_id),
            "threat_capability" => FieldValue::Number(self.threat_capability),
            "threat_motivation" => FieldValue::Number(self.threat_motivation),
            "control_strength" => FieldValue::Number(self.control_strength),
            "vulnerability_score" => FieldValue::Number(self.vulnerability_score),
            "loss_event_frequency_min" => FieldValue::Number(self.loss_event_frequency_min),
            "loss_event_frequency_most_likely" => {
                FieldValue::Number(self.loss_event_frequency_most_likely)
            }
            "loss_event_frequency_max" => FieldValue::Number(self.loss_event_frequency_max),
            "primary_loss_min" => FieldValue::Number(self.primary_loss_min),
            "primary_loss_most_likely" => FieldValue::Number(self.primary_loss_most_likely),
            "primary_loss_max" => FieldValue::Number(self.primary_loss_max),
            "secondary_loss_min" => FieldValue::Number(self.secondary_loss_min),
            "secondary_loss_most_likely" => FieldValue::Number(self.secondary_loss_most_likely),
            "secondary_loss_max" => FieldValue::Number(self.secondary_loss_max),
            "annual_loss_expectancy" => FieldValue::Number(self.annual_loss_expectancy),
            _ => FieldValue::Missing,
        }
    }

    fn search_fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.title.clone()),
            FieldValue::Text(self.code.clone()),
            opt_text(&self.description),
        ]
    }
}

fn opt_text(value: &Option<String>) -> FieldValue {
    match value {
        Some(s) => FieldValue::Text(s.clone()),
        None => FieldValue::Missing,
    }
}

/// Dropdown filters offered by the FAIR register screen.
pub const FILTERS: &[&str] = &["level", "treatment_status", "asset"];

/// Sortable column keys.
pub const SORT_KEYS: &[&str] =
    &["code", "title", "ale", "level", "treatment_status", "created_at", "updated_at"];

/// Column order for CSV export. Wire field names, so an exported file is
/// accepted back by the import endpoint unchanged.
pub const EXPORT_FIELDS: &[&str] = &[
    "title",
    "description",
    "asset_id",
    "threat_actor",
    "threat_capability",
    "threat_motivation",
    "control_strength",
    "vulnerability_score",
    "loss_event_frequency_min",
    "loss_event_frequency_most_likely",
    "loss_event_frequency_max",
    "primary_loss_min",
    "primary_loss_most_likely",
    "primary_loss_max",
    "secondary_loss_min",
    "secondary_loss_most_likely",
    "secondary_loss_max",
    "annual_loss_expectancy",
    "risk_tolerance",
    "treatment_plan",
    "treatment_status",
    "treatment_due_date",
    "created_at",
    "updated_at",
];

/// Import columns coerced to numbers (empty cell → null).
pub const NUMERIC_FIELDS: &[&str] = &[
    "threat_capability",
    "threat_motivation",
    "control_strength",
    "vulnerability_score",
    "loss_event_frequency_min",
    "loss_event_frequency_most_likely",
    "loss_event_frequency_max",
    "primary_loss_min",
    "primary_loss_most_likely",
    "primary_loss_max",
    "secondary_loss_min",
    "secondary_loss_most_likely",
    "secondary_loss_max",
    "annual_loss_expectancy",
    "risk_tolerance",
];

/// View-model for the FAIR register, default-sorted by loss expectancy
/// descending.
pub fn list_view(per_page: usize) -> ListView<FairRisk> {
    let mut view = ListView::new(per_page);
    view.set_sort(crate::listview::SortSpec::from_params(Some("ale"), Some("desc")));
    view
}
