use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::{FieldValue, Record};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// Exactly one sort specification is active per screen.
#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    pub field: String,
    pub dir: SortDir,
}

impl SortSpec {
    pub fn from_params(field: Option<&str>, dir: Option<&str>) -> Self {
        SortSpec {
            field: field.unwrap_or("").to_string(),
            dir: if dir == Some("desc") { SortDir::Desc } else { SortDir::Asc },
        }
    }

    /// Same column flips direction, a new column resets to ascending.
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.dir = match self.dir {
                SortDir::Asc => SortDir::Desc,
                SortDir::Desc => SortDir::Asc,
            };
        } else {
            self.field = field.to_string();
            self.dir = SortDir::Asc;
        }
    }

    pub fn dir_str(&self) -> &'static str {
        match self.dir {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

/// Stable, type-aware ordering of the filtered rows. Ties retain the
/// relative order of the input.
pub fn sort_records<T: Record>(rows: &mut [&T], spec: &SortSpec) {
    if spec.field.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        let ord = compare(&a.field(&spec.field), &b.field(&spec.field));
        match spec.dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
}

/// Primary comparison for two values of the same logical field.
pub fn compare(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Number(_) | FieldValue::Missing, FieldValue::Number(_))
        | (FieldValue::Number(_), FieldValue::Missing) => {
            numeric(a).total_cmp(&numeric(b))
        }
        (FieldValue::Date(_) | FieldValue::Missing, FieldValue::Date(_))
        | (FieldValue::Date(_), FieldValue::Missing) => {
            timestamp(a).cmp(&timestamp(b))
        }
        _ => a.as_text().to_lowercase().cmp(&b.as_text().to_lowercase()),
    }
}

/// Null numeric fields sort as zero.
fn numeric(v: &FieldValue) -> f64 {
    match v {
        FieldValue::Number(n) => *n,
        _ => 0.0,
    }
}

/// Unparseable or missing dates sort as the oldest possible value.
fn timestamp(v: &FieldValue) -> i64 {
    match v {
        FieldValue::Date(raw) => parse_timestamp(raw).unwrap_or(0),
        _ => 0,
    }
}

/// Accepts the timestamp shapes the backend emits: RFC 3339, bare
/// date-time, and bare date.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc().timestamp());
    }
    None
}

/// Render a number the way the backend serializes it: integers without a
/// trailing `.0`, fractions as-is.
pub fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
