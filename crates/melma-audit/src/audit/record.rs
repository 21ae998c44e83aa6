use super::classify::{classify, ClassificationTier};
use super::interpreter::{interpret, AuditResult};
use super::judge::{GeminiJudge, JudgeRequest};
use super::rubric::{DomainId, Rubric};
use super::scoring::{composite_percentage, effective_scores, percentage_for, score_domains};
use super::stats::{describe, ScoreStatistics};
use super::{AuditError, DomainScore};
use chrono::{DateTime, Utc};

/// One completed audit. Assembled once, never mutated; the scenario and
/// answer are carried through verbatim for the audit trail.
#[derive(Debug, Clone)]
pub struct EvaluationRecord {
    pub model_name: String,
    pub scenario: String,
    pub answer: String,
    pub result: AuditResult,
    pub domain_scores: Vec<DomainScore>,
    pub composite_percentage: f64,
    pub tier: ClassificationTier,
    pub statistics: ScoreStatistics,
    pub evaluated_at: DateTime<Utc>,
}

/// Run aggregation, composite scoring, classification, and statistics over
/// one interpreted result. Pure apart from the timestamp.
pub fn build_record(
    model_name: &str,
    scenario: &str,
    answer: &str,
    result: AuditResult,
    rubric: &Rubric,
) -> Result<EvaluationRecord, AuditError> {
    let domain_scores = score_domains(&result, rubric);
    let composite = composite_percentage(&domain_scores, rubric);
    let tier = classify(
        result.safety_flag,
        composite,
        percentage_for(&domain_scores, DomainId::Accuracy),
        percentage_for(&domain_scores, DomainId::Reasoning),
    );
    let statistics = describe(&effective_scores(&result, rubric))?;

    Ok(EvaluationRecord {
        model_name: model_name.to_string(),
        scenario: scenario.to_string(),
        answer: answer.to_string(),
        result,
        domain_scores,
        composite_percentage: composite,
        tier,
        statistics,
        evaluated_at: Utc::now(),
    })
}

/// Owns the append-only log of completed audits. Records are appended after
/// their computation finishes and are never removed or rewritten.
#[derive(Debug)]
pub struct EvaluationSession {
    rubric: Rubric,
    records: Vec<EvaluationRecord>,
}

impl EvaluationSession {
    pub fn new(rubric: Rubric) -> Self {
        Self {
            rubric,
            records: Vec::new(),
        }
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// Score a pre-fetched judge reply and append the resulting record.
    pub fn evaluate(
        &mut self,
        model_name: &str,
        scenario: &str,
        answer: &str,
        raw_response: &str,
    ) -> Result<EvaluationRecord, AuditError> {
        let result = interpret(raw_response);
        let record = build_record(model_name, scenario, answer, result, &self.rubric)?;
        self.append(record.clone());
        Ok(record)
    }

    /// Fetch a fresh judgement from the upstream model, then score it.
    pub async fn evaluate_remote(
        &mut self,
        judge: &GeminiJudge,
        model_name: &str,
        scenario: &str,
        answer: &str,
    ) -> Result<EvaluationRecord, AuditError> {
        let request = JudgeRequest {
            scenario: scenario.to_string(),
            answer: answer.to_string(),
            deterministic: true,
        };
        let raw = judge.fetch_raw(&request).await?;
        self.evaluate(model_name, scenario, answer, &raw)
    }

    pub fn append(&mut self, record: EvaluationRecord) {
        self.records.push(record);
    }

    /// Read-only view of the log, oldest first.
    pub fn snapshot(&self) -> &[EvaluationRecord] {
        &self.records
    }
}
