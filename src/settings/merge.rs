use serde_json::{json, Value};
use tracing::warn;

use super::document::{DEFAULT_SAFETY_BUFFER, DEFAULT_WEEKLY_ESSENTIALS};
use super::migrate::CURRENT_SCHEMA_VERSION;

/// Dot-separated paths that a partial update elsewhere in the system must
/// never be able to wipe. If the existing document has a value here and the
/// incoming one is empty, the existing value is restored.
pub const PROTECTED_FIELDS: &[&str] = &[
    "pay.amount",
    "pay.lastPayDate",
    "secondary.amount",
    "secondary.lastPayDate",
    "linkedAccountIds",
];

/// Outcome of validating a settings document.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Starts from `incoming`, then restores every protected field whose
/// incoming value is empty (missing, null, `""`, `[]`) while the existing
/// document still has one.
pub fn merge_safely(existing: &Value, incoming: &Value) -> Value {
    let mut merged = incoming.clone();
    for path in PROTECTED_FIELDS.iter().copied() {
        let existing_value = get_path(existing, path);
        if is_empty(existing_value) {
            continue;
        }
        if is_empty(get_path(&merged, path)) {
            warn!(path, "restoring protected settings field erased by partial update");
            set_path(
                &mut merged,
                path,
                existing_value.expect("non-empty value exists").clone(),
            );
        }
    }
    merged
}

/// Required-field presence and type checks. Validation failure is non-fatal
/// to the aggregator, since [`ensure_required_fields`] can still supply
/// defaults, but the errors are surfaced so the UI can prompt the user.
pub fn validate(doc: &Value) -> Validation {
    let mut validation = Validation::default();
    let Some(root) = doc.as_object() else {
        validation.errors.push("settings document is not an object".into());
        return validation;
    };

    match root.get("pay") {
        None => validation.errors.push("pay section is missing".into()),
        Some(pay) => {
            if !pay.is_object() {
                validation.errors.push("pay section is not an object".into());
            } else {
                match pay.get("amount") {
                    None => validation.errors.push("pay.amount is missing".into()),
                    Some(amount) if !amount.is_number() => {
                        validation.errors.push("pay.amount is not a number".into())
                    }
                    Some(_) => {}
                }
                if get_path(doc, "pay.lastPayDate").is_none() {
                    validation
                        .warnings
                        .push("pay.lastPayDate is missing; paydays cannot be projected".into());
                }
            }
        }
    }

    // A secondary earner name is required only once a secondary amount
    // exists; households without one must not be asked for a name.
    let secondary_amount = get_path(doc, "secondary.amount")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    if secondary_amount > 0.0 {
        let name_missing = get_path(doc, "secondary.name")
            .and_then(Value::as_str)
            .map(|name| name.trim().is_empty())
            .unwrap_or(true);
        if name_missing {
            validation
                .errors
                .push("secondary.name is required when a secondary pay amount is set".into());
        }
    }

    if root.get("preferences").is_none() {
        validation
            .warnings
            .push("preferences section is missing; defaults will be used".into());
    }

    validation.valid = validation.errors.is_empty();
    validation
}

/// Fills any still-missing required path with its schema default without
/// altering populated fields.
pub fn ensure_required_fields(doc: Value) -> Value {
    let mut doc = if doc.is_object() { doc } else { json!({}) };
    let defaults: &[(&str, Value)] = &[
        ("schemaVersion", json!(CURRENT_SCHEMA_VERSION)),
        ("pay.amount", json!(0.0)),
        ("pay.cadence", json!("biweekly")),
        ("preferences.safetyBuffer", json!(DEFAULT_SAFETY_BUFFER)),
        ("preferences.weeklyEssentials", json!(DEFAULT_WEEKLY_ESSENTIALS)),
        ("linkedAccountIds", json!([])),
    ];
    for (path, default) in defaults {
        if get_path(&doc, path).is_none() {
            set_path(&mut doc, path, default.clone());
        }
    }
    doc
}

fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn get_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = doc;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

fn set_path(doc: &mut Value, path: &str, value: Value) {
    let mut current = doc;
    let segments: Vec<&str> = path.split('.').collect();
    for segment in &segments[..segments.len() - 1] {
        if !current.is_object() {
            *current = json!({});
        }
        let map = current.as_object_mut().expect("object just ensured");
        current = map.entry(*segment).or_insert_with(|| json!({}));
    }
    if !current.is_object() {
        *current = json!({});
    }
    let map = current.as_object_mut().expect("object just ensured");
    map.insert(segments[segments.len() - 1].to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_fields_survive_an_erasing_update() {
        let existing = json!({ "pay": { "amount": 1000.0, "lastPayDate": "2025-11-14" } });
        let incoming = json!({ "pay": { "amount": "", "cadence": "weekly" } });
        let merged = merge_safely(&existing, &incoming);
        assert_eq!(merged["pay"]["amount"], json!(1000.0));
        assert_eq!(merged["pay"]["lastPayDate"], json!("2025-11-14"));
        assert_eq!(merged["pay"]["cadence"], json!("weekly"));
    }

    #[test]
    fn populated_incoming_values_win() {
        let existing = json!({ "pay": { "amount": 1000.0 }, "linkedAccountIds": ["a1"] });
        let incoming = json!({ "pay": { "amount": 1200.0 }, "linkedAccountIds": ["a1", "a2"] });
        let merged = merge_safely(&existing, &incoming);
        assert_eq!(merged["pay"]["amount"], json!(1200.0));
        assert_eq!(merged["linkedAccountIds"], json!(["a1", "a2"]));
    }

    #[test]
    fn secondary_name_required_only_with_secondary_amount() {
        let without_secondary = json!({ "pay": { "amount": 900.0 } });
        assert!(validate(&without_secondary).valid);

        let with_amount = json!({
            "pay": { "amount": 900.0 },
            "secondary": { "amount": 400.0 }
        });
        let validation = validate(&with_amount);
        assert!(!validation.valid);
        assert!(validation.errors[0].contains("secondary.name"));

        let named = json!({
            "pay": { "amount": 900.0 },
            "secondary": { "amount": 400.0, "name": "Sam" }
        });
        assert!(validate(&named).valid);
    }

    #[test]
    fn ensure_required_fields_fills_gaps_only() {
        let doc = json!({ "pay": { "amount": 750.0 } });
        let ensured = ensure_required_fields(doc);
        assert_eq!(ensured["pay"]["amount"], json!(750.0));
        assert_eq!(ensured["pay"]["cadence"], json!("biweekly"));
        assert_eq!(ensured["preferences"]["safetyBuffer"], json!(DEFAULT_SAFETY_BUFFER));
        assert_eq!(ensured["schemaVersion"], json!(CURRENT_SCHEMA_VERSION));
    }
}
