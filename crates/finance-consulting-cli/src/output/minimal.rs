use serde_json::Value;

/// Headline field of each calculation, in lookup order.
const PRIORITY_KEYS: [&str; 9] = [
    "monthly_payment",
    "final_amount",
    "months_required",
    "roi_percentage",
    "break_even_units",
    "margin_percentage",
    "payback_years",
    "current_ratio",
    "path",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if *key == "months_required" && val.is_null() {
                    println!("unreachable");
                } else {
                    println!("{}", format_minimal(val));
                }
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "n/a".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
