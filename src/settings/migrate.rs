use serde_json::{json, Map, Value};
use tracing::info;

use crate::errors::EngineError;

/// Highest settings schema this engine understands.
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

/// Applies every migration step from the document's recorded version up to
/// [`CURRENT_SCHEMA_VERSION`], in order, never skipping a step even when
/// fields already look correct. Documents without a `schemaVersion` are
/// treated as version 1. Idempotent: migrating an already-current document
/// is a no-op apart from stamping the version.
pub fn migrate(doc: Value) -> Result<Value, EngineError> {
    let Value::Object(mut root) = doc else {
        return Err(EngineError::InvalidSettings(
            "settings document is not an object".into(),
        ));
    };

    let mut version = root
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .map(|raw| raw as u32)
        .unwrap_or(1);
    if version > CURRENT_SCHEMA_VERSION {
        return Err(EngineError::UnsupportedSchemaVersion {
            found: version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    while version < CURRENT_SCHEMA_VERSION {
        match version {
            1 => migrate_v1_to_v2(&mut root),
            2 => migrate_v2_to_v3(&mut root),
            _ => unreachable!("no migration step registered for version {version}"),
        }
        version += 1;
        info!(version, "applied settings migration step");
    }
    root.insert("schemaVersion".into(), json!(CURRENT_SCHEMA_VERSION));
    Ok(Value::Object(root))
}

/// v1 stored pay fields flat at the root. v2 nests them under `pay` and
/// groups spending knobs under `preferences`.
fn migrate_v1_to_v2(root: &mut Map<String, Value>) {
    let mut pay = root
        .remove("pay")
        .and_then(as_object)
        .unwrap_or_default();
    for (old, new) in [
        ("payAmount", "amount"),
        ("payCadence", "cadence"),
        ("lastPayDate", "lastPayDate"),
    ] {
        if let Some(value) = root.remove(old) {
            pay.entry(new).or_insert(value);
        }
    }
    root.insert("pay".into(), Value::Object(pay));

    let mut preferences = root
        .remove("preferences")
        .and_then(as_object)
        .unwrap_or_default();
    for key in ["safetyBuffer", "weeklyEssentials"] {
        if let Some(value) = root.remove(key) {
            preferences.entry(key).or_insert(value);
        }
    }
    root.insert("preferences".into(), Value::Object(preferences));
}

/// v3 renames `earlyPay` to `earlyDeposit`, normalizes dashed cadence
/// spellings (the semimonthly form gains its day-of-month pair), and
/// introduces the linked-account list.
fn migrate_v2_to_v3(root: &mut Map<String, Value>) {
    if let Some(early) = root.remove("earlyPay") {
        root.entry("earlyDeposit").or_insert(early);
    }
    for section in ["pay", "secondary"] {
        if let Some(object) = root.get_mut(section).and_then(Value::as_object_mut) {
            if let Some(cadence) = object.get("cadence") {
                if let Some(normalized) = normalize_cadence(cadence) {
                    object.insert("cadence".into(), normalized);
                }
            }
        }
    }
    root.entry("linkedAccountIds").or_insert(json!([]));
}

fn normalize_cadence(cadence: &Value) -> Option<Value> {
    let raw = cadence.as_str()?;
    match raw {
        "bi-weekly" => Some(json!("biweekly")),
        "semi-monthly" | "semimonthly" => Some(json!({ "semimonthly": [1, 15] })),
        _ => None,
    }
}

fn as_object(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
