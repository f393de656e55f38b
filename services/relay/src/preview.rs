//! Reshapes the remote augmentation sample into `{origin, aug}` pairs.

use serde_json::Value;

use crate::types::AugPair;

const COL_ORIGIN: &str = "Q";
const COL_AUG: &str = "Q-AUG";

fn cell_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn column(obj: &serde_json::Map<String, Value>, name: &str) -> Result<Vec<Value>, String> {
    match obj.get(name) {
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(Value::Object(by_index)) => Ok(by_index.values().cloned().collect()),
        Some(_) => Err(format!("column '{name}' is not a list")),
        None => Err(format!("missing column '{name}'")),
    }
}

/// Accepts either a list of row objects or an object of columns.
pub fn reshape_rows(payload: &Value) -> Result<Vec<AugPair>, String> {
    match payload {
        Value::Array(rows) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| -> Result<AugPair, String> {
                let origin = row.get(COL_ORIGIN).ok_or_else(|| format!("row {i}: missing '{COL_ORIGIN}'"))?;
                let aug = row.get(COL_AUG).ok_or_else(|| format!("row {i}: missing '{COL_AUG}'"))?;
                Ok(AugPair { origin: cell_text(origin), aug: cell_text(aug) })
            })
            .collect(),
        Value::Object(cols) => {
            let origins = column(cols, COL_ORIGIN)?;
            let augs = column(cols, COL_AUG)?;
            if origins.len() != augs.len() {
                return Err(format!(
                    "column length mismatch: {} '{COL_ORIGIN}' vs {} '{COL_AUG}'",
                    origins.len(),
                    augs.len()
                ));
            }
            Ok(origins
                .iter()
                .zip(augs.iter())
                .map(|(o, a)| AugPair { origin: cell_text(o), aug: cell_text(a) })
                .collect())
        }
        _ => Err("augmentation data is not tabular".to_string()),
    }
}
