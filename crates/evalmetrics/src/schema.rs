use serde::{Deserialize, Serialize};

/// Raw evaluation scores reported for one model by the training service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub perplexity: f64,
    #[serde(default)]
    pub bleu: Option<f64>,
    #[serde(default)]
    pub chrf: Option<f64>,
    #[serde(default)]
    pub meteor: Option<f64>,
    #[serde(default)]
    pub rouge: Option<RougeScores>,
}

/// ROUGE variants; only `rougeLsum` is charted, the rest are carried through.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RougeScores {
    #[serde(rename = "rougeLsum", default)]
    pub rouge_lsum: Option<f64>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl ModelMetrics {
    pub fn rouge_lsum(&self) -> f64 {
        self.rouge
            .as_ref()
            .and_then(|r| r.rouge_lsum)
            .unwrap_or(0.0)
    }
}

/// Dashboard-ready row. Field names are what the chart code reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetric {
    pub name: String,
    pub perplexity: f64,
    #[serde(rename = "BLEU")]
    pub bleu: f64,
    #[serde(rename = "ROUGE")]
    pub rouge: f64,
    #[serde(rename = "METEOR")]
    pub meteor: f64,
    #[serde(rename = "chrF")]
    pub chrf: f64,
}
