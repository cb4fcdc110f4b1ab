use crate::listview::Record;

/// Render the filtered set as CSV in the given column order. Values
/// containing commas or quotes are double-quote-wrapped with embedded
/// quotes doubled; everything else is written bare.
pub fn to_csv<T: Record>(rows: &[&T], fields: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(&fields.join(","));
    out.push('\n');
    for row in rows {
        let line: Vec<String> = fields
            .iter()
            .map(|field| escape(&row.field(field).as_text()))
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Header-only CSV handed out as the import template.
pub fn csv_template(fields: &[&str]) -> String {
    format!("{}\n", fields.join(","))
}

fn escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
