use crate::{DisplayMetric, MetricsTable, ModelMetrics};

/// `ln(ln(x + 1) + 1)`, used to squeeze scores of very different ranges onto
/// one chart. Defined for `x >= 0`; callers do not get a range check.
pub fn triple_log(x: f64) -> f64 {
    ((x + 1.0).ln() + 1.0).ln()
}

/// Map one model's raw scores to its chart row.
///
/// BLEU, ROUGE-Lsum and METEOR live on 0..1 and are multiplied by 100 after
/// compression; perplexity and chrF are only compressed.
pub fn normalize_model(name: &str, m: &ModelMetrics) -> DisplayMetric {
    DisplayMetric {
        name: name.to_string(),
        perplexity: triple_log(m.perplexity),
        bleu: triple_log(m.bleu.unwrap_or(0.0)) * 100.0,
        rouge: triple_log(m.rouge_lsum()) * 100.0,
        meteor: triple_log(m.meteor.unwrap_or(0.0)) * 100.0,
        chrf: triple_log(m.chrf.unwrap_or(0.0)),
    }
}

/// One row per model, in table order.
pub fn normalize(table: &MetricsTable) -> Vec<DisplayMetric> {
    table
        .iter()
        .map(|(name, m)| normalize_model(name, m))
        .collect()
}
