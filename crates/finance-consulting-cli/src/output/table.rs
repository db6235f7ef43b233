use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::display_number;

/// Format output as tables: scalar fields first, then one table per series
/// (amortization schedule, yearly breakdown).
pub fn print_table(value: &Value, decimal_places: u32) {
    let Value::Object(envelope) = value else {
        println!("{}", value);
        return;
    };
    let result = match envelope.get("result") {
        Some(Value::Object(result)) => result,
        _ => envelope,
    };

    print_scalar_fields(result, decimal_places);

    for (key, val) in result {
        if let Value::Array(rows) = val {
            if rows.iter().all(Value::is_object) && !rows.is_empty() {
                println!("\n{}:", key);
                print_rows(rows, decimal_places);
            }
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_scalar_fields(map: &Map<String, Value>, decimal_places: u32) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val, decimal_places)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value], decimal_places: u32) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| {
                row.get(h.as_str())
                    .map(|v| format_value(v, decimal_places))
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(cells);
    }
    println!("{}", Table::from(builder));
}

fn format_value(value: &Value, decimal_places: u32) -> String {
    match value {
        Value::String(s) => display_number(s, decimal_places),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "n/a".to_string(),
        Value::Array(arr) if arr.iter().all(Value::is_object) && !arr.is_empty() => {
            format!("[{} rows]", arr.len())
        }
        Value::Array(arr) => arr
            .iter()
            .map(|v| format_value(v, decimal_places))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
