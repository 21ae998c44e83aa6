use super::AuditError;
use serde::Serialize;

/// Descriptive statistics over the 30 defaulted item scores of one audit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreStatistics {
    pub min: u8,
    pub max: u8,
    pub mean: f64,
    pub std_dev: f64,
}

/// Compute min/max/mean and population standard deviation (divide by N, not
/// N-1: the 30 items of one record are a fully enumerated population, not a
/// sample). An empty input is a contract violation upstream and fails loudly.
pub fn describe(values: &[u8]) -> Result<ScoreStatistics, AuditError> {
    if values.is_empty() {
        return Err(AuditError::EmptyStatistics);
    }

    let count = values.len() as f64;
    let mean = values.iter().map(|&value| f64::from(value)).sum::<f64>() / count;
    let variance = values
        .iter()
        .map(|&value| (f64::from(value) - mean).powi(2))
        .sum::<f64>()
        / count;

    let mut min = values[0];
    let mut max = values[0];
    for &value in values {
        min = min.min(value);
        max = max.max(value);
    }

    Ok(ScoreStatistics {
        min,
        max,
        mean,
        std_dev: variance.sqrt(),
    })
}
