//! Audit response interpretation and scoring engine: turns a raw judge
//! reply into domain percentages, a composite score, a safety-gated
//! classification tier, and descriptive statistics, assembled into one
//! immutable evaluation record.

mod classify;
pub mod export;
mod interpreter;
pub mod judge;
mod record;
mod rubric;
mod scoring;
mod stats;
mod views;

pub use classify::{
    classify, ClassificationTier, ACCEPTABLE_COMPOSITE_FLOOR, ACCEPTABLE_DOMAIN_FLOOR,
    CONDITIONAL_COMPOSITE_FLOOR,
};
pub use interpreter::{interpret, AuditResult, UNPARSEABLE_SUMMARY};
pub use judge::{GeminiJudge, JudgeError, JudgeRequest};
pub use record::{build_record, EvaluationRecord, EvaluationSession};
pub use rubric::{
    DomainId, DomainTemplate, ItemTemplate, Rubric, ITEM_COUNT, SCALE_ANCHOR, SCALE_MAX, SCALE_MIN,
};
pub use scoring::{composite_percentage, percentage_for, score_domains, DomainScore};
pub use stats::{describe, ScoreStatistics};
pub use views::{ClassificationView, DomainScoreView, EvaluationView, ItemScoreView};

#[derive(Debug)]
pub enum AuditError {
    /// Statistics were requested over zero items; the rubric always yields
    /// 30 values, so this is a contract violation upstream.
    EmptyStatistics,
    /// No API key configured for the upstream judge.
    MissingCredential,
    Judge(JudgeError),
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditError::EmptyStatistics => {
                write!(f, "statistics require at least one item score")
            }
            AuditError::MissingCredential => {
                write!(f, "authentication failed: missing judge API key")
            }
            AuditError::Judge(err) => write!(f, "judge call failed: {}", err),
        }
    }
}

impl std::error::Error for AuditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuditError::EmptyStatistics | AuditError::MissingCredential => None,
            AuditError::Judge(err) => Some(err),
        }
    }
}

impl From<JudgeError> for AuditError {
    fn from(err: JudgeError) -> Self {
        Self::Judge(err)
    }
}
