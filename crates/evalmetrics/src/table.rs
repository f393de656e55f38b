use crate::ModelMetrics;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics payload must be a JSON object keyed by model name")]
    NotAnObject,
    #[error("metrics for model '{model}' have no perplexity")]
    MissingPerplexity { model: String },
    #[error("metrics for model '{model}' are malformed: {reason}")]
    InvalidRecord { model: String, reason: String },
}

pub type Result<T> = std::result::Result<T, MetricsError>;

/// Per-model metrics in the order the service listed them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsTable {
    entries: Vec<(String, ModelMetrics)>,
}

impl MetricsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, model: impl Into<String>, metrics: ModelMetrics) {
        self.entries.push((model.into(), metrics));
    }

    /// Parse the `{model: {...}}` payload. Key order is taken from the object,
    /// which requires serde_json's `preserve_order`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or(MetricsError::NotAnObject)?;

        let mut table = Self::new();
        for (model, raw) in obj {
            let has_perplexity = raw
                .get("perplexity")
                .map(|p| !p.is_null())
                .unwrap_or(false);
            if !has_perplexity {
                return Err(MetricsError::MissingPerplexity { model: model.clone() });
            }

            let metrics: ModelMetrics = serde_json::from_value(raw.clone()).map_err(|e| {
                MetricsError::InvalidRecord {
                    model: model.clone(),
                    reason: e.to_string(),
                }
            })?;
            table.push(model.clone(), metrics);
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelMetrics)> {
        self.entries.iter().map(|(name, m)| (name.as_str(), m))
    }
}
