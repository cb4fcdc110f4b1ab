use std::collections::BTreeMap;

use super::{FieldValue, Record};

/// Sentinel dropdown value meaning "no constraint".
pub const ALL: &str = "all";

/// Declarative filter state for one list screen: a free-text search plus
/// any number of categorical equality filters. Applying the same criteria
/// to the same collection is deterministic and side-effect-free.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    search: String,
    selections: BTreeMap<String, String>,
}

impl FilterCriteria {
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Select a dropdown value; `"all"` clears the constraint.
    pub fn select(&mut self, name: &str, value: &str) {
        if value == ALL {
            self.selections.remove(name);
        } else {
            self.selections.insert(name.to_string(), value.to_string());
        }
    }

    pub fn selection(&self, name: &str) -> &str {
        self.selections.get(name).map(String::as_str).unwrap_or(ALL)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty() && self.selections.is_empty()
    }

    /// AND of the search predicate and every active categorical filter.
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        self.matches_search(record) && self.matches_selections(record)
    }

    fn matches_search<T: Record>(&self, record: &T) -> bool {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        record
            .search_fields()
            .iter()
            .any(|field| field.as_text().to_lowercase().contains(&term))
    }

    fn matches_selections<T: Record>(&self, record: &T) -> bool {
        self.selections.iter().all(|(name, value)| {
            match record.field(name) {
                FieldValue::Text(stored) => stored == *value,
                // Null/absent fields never satisfy an equality filter
                _ => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doc {
        title: String,
        code: String,
        description: Option<String>,
        status: Option<String>,
    }

    impl Record for Doc {
        fn field(&self, key: &str) -> FieldValue {
            match key {
                "status" => match &self.status {
                    Some(s) => FieldValue::Text(s.clone()),
                    None => FieldValue::Missing,
                },
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

    fn doc(title: &str, code: &str, description: Option<&str>, status: Option<&str>) -> Doc {
        Doc {
            title: title.into(),
            code: code.into(),
            description: description.map(String::from),
            status: status.map(String::from),
        }
    }

    #[test]
    fn empty_criteria_matches_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unconstrained());
        assert!(criteria.matches(&doc("Anything", "RISK-001", None, None)));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut criteria = FilterCriteria::default();
        criteria.set_search("PHISHING");
        assert!(criteria.matches(&doc("Data breach via phishing attack", "RISK-001", None, None)));
        assert!(!criteria.matches(&doc("Ransomware outbreak", "RISK-002", None, None)));
    }

    #[test]
    fn search_covers_code_and_description() {
        let mut criteria = FilterCriteria::default();
        criteria.set_search("risk-007");
        assert!(criteria.matches(&doc("Untitled", "RISK-007", None, None)));

        criteria.set_search("third party");
        assert!(criteria.matches(&doc("Vendor", "RISK-008", Some("Third party outage"), None)));
    }

    #[test]
    fn all_sentinel_clears_a_selection() {
        let mut criteria = FilterCriteria::default();
        criteria.select("status", "open");
        assert!(!criteria.is_unconstrained());
        criteria.select("status", ALL);
        assert!(criteria.is_unconstrained());
    }

    #[test]
    fn categorical_filter_is_exact_equality() {
        let mut criteria = FilterCriteria::default();
        criteria.select("status", "open");
        assert!(criteria.matches(&doc("a", "c", None, Some("open"))));
        assert!(!criteria.matches(&doc("a", "c", None, Some("Open"))));
        assert!(!criteria.matches(&doc("a", "c", None, Some("closed"))));
    }

    #[test]
    fn null_field_never_matches_categorical() {
        let mut criteria = FilterCriteria::default();
        criteria.select("status", "open");
        assert!(!criteria.matches(&doc("a", "c", None, None)));
    }

    #[test]
    fn search_and_filters_combine_with_and() {
        let mut criteria = FilterCriteria::default();
        criteria.set_search("breach");
        criteria.select("status", "open");
        assert!(criteria.matches(&doc("Data breach", "R1", None, Some("open"))));
        assert!(!criteria.matches(&doc("Data breach", "R1", None, Some("closed"))));
        assert!(!criteria.matches(&doc("Outage", "R2", None, Some("open"))));
    }
}
