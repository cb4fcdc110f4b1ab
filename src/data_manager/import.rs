use serde_json::{Map, Number, Value, json};

use super::types::{ImportResult, RowError};
use crate::errors::AppError;

/// Parse CSV text into row objects keyed by the header line.
///
/// Fields named in `numeric_fields` are coerced to numbers, with an empty
/// cell becoming null. Rows with the wrong column count or an unparseable
/// number are reported in `errors` and skipped; the batch is only
/// rejected outright when there is no header or no data row at all.
pub fn parse_csv(text: &str, numeric_fields: &[&str]) -> Result<ImportResult, AppError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines
        .next()
        .ok_or_else(|| AppError::Parse("CSV file is empty".to_string()))?;
    let headers = split_line(header_line);
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(AppError::Parse("CSV header line is empty".to_string()));
    }

    let mut result = ImportResult::default();
    for (index, line) in lines {
        let line_no = index + 1;
        let values = split_line(line);
        if values.len() != headers.len() {
            result.errors.push(RowError {
                line: line_no,
                reason: format!("expected {} columns, found {}", headers.len(), values.len()),
            });
            continue;
        }

        let mut row = Map::new();
        let mut bad_cell = None;
        for (header, value) in headers.iter().zip(values) {
            if numeric_fields.contains(&header.as_str()) {
                if value.is_empty() {
                    row.insert(header.clone(), Value::Null);
                } else {
                    match value.parse::<f64>().ok().and_then(Number::from_f64) {
                        Some(n) => {
                            row.insert(header.clone(), Value::Number(n));
                        }
                        None => {
                            bad_cell = Some(format!("{header}: not a number: {value}"));
                            break;
                        }
                    }
                }
            } else {
                row.insert(header.clone(), Value::String(value));
            }
        }

        match bad_cell {
            Some(reason) => result.errors.push(RowError { line: line_no, reason }),
            None => result.rows.push(row),
        }
    }

    if result.rows.is_empty() && result.errors.is_empty() {
        return Err(AppError::Parse(
            "CSV file must contain headers and at least one data row".to_string(),
        ));
    }
    Ok(result)
}

/// Body posted to the import endpoint.
pub fn import_payload(result: &ImportResult) -> Value {
    json!({ "data": result.rows })
}

/// Split one CSV line, honoring double-quote wrapping: a quoted field may
/// contain commas, and an embedded quote is doubled.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMERIC: &[&str] = &["annual_loss_expectancy", "risk_tolerance"];

    #[test]
    fn rows_keyed_by_header() {
        let csv = "title,annual_loss_expectancy\nPhishing,1200000\nOutage,50000\n";
        let result = parse_csv(csv, NUMERIC).unwrap();
        assert_eq!(result.parsed(), 2);
        assert!(result.errors.is_empty());
        assert_eq!(result.rows[0]["title"], "Phishing");
        assert_eq!(result.rows[0]["annual_loss_expectancy"], 1_200_000.0);
    }

    #[test]
    fn empty_numeric_cell_becomes_null() {
        let csv = "title,risk_tolerance\nPhishing,\n";
        let result = parse_csv(csv, NUMERIC).unwrap();
        assert_eq!(result.rows[0]["risk_tolerance"], Value::Null);
    }

    #[test]
    fn quoted_field_keeps_commas_and_quotes() {
        let csv = "title,note\n\"Breach, with commas\",\"He said \"\"no\"\"\"\n";
        let result = parse_csv(csv, &[]).unwrap();
        assert_eq!(result.rows[0]["title"], "Breach, with commas");
        assert_eq!(result.rows[0]["note"], "He said \"no\"");
    }

    #[test]
    fn bad_rows_are_reported_not_fatal() {
        let csv = "title,annual_loss_expectancy\nGood,100\nBad,not-a-number\nShort\n";
        let result = parse_csv(csv, NUMERIC).unwrap();
        assert_eq!(result.parsed(), 1);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].line, 3);
        assert!(result.errors[0].reason.contains("not a number"));
        assert!(result.errors[1].reason.contains("columns"));
    }

    #[test]
    fn headerless_file_is_rejected() {
        assert!(parse_csv("", NUMERIC).is_err());
        assert!(parse_csv("title,ale\n", NUMERIC).is_err());
    }

    #[test]
    fn payload_wraps_rows_in_data() {
        let csv = "title\nPhishing\n";
        let result = parse_csv(csv, &[]).unwrap();
        let payload = import_payload(&result);
        assert_eq!(payload["data"].as_array().unwrap().len(), 1);
    }
}
