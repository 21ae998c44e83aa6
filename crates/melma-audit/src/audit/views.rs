use super::classify::ClassificationTier;
use super::record::EvaluationRecord;
use super::rubric::{DomainId, Rubric};
use super::scoring::effective_item_score;
use super::stats::ScoreStatistics;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Read-only, serializable projection of one record for presentation
/// collaborators (chart, list, report). Any rounding or text sanitization
/// happens on their side.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationView {
    pub model_name: String,
    pub evaluated_at: DateTime<Utc>,
    pub domain_scores: Vec<DomainScoreView>,
    pub composite_percentage: f64,
    pub classification: ClassificationView,
    pub statistics: ScoreStatistics,
    pub item_scores: Vec<ItemScoreView>,
    pub summary: String,
    pub safety_flag: bool,
    pub scenario: String,
    pub answer: String,
}

/// Ordered domain entry; `domain_label` doubles as the chart axis name.
#[derive(Debug, Clone, Serialize)]
pub struct DomainScoreView {
    pub domain: DomainId,
    pub domain_label: &'static str,
    pub weight: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemScoreView {
    pub key: &'static str,
    pub label: &'static str,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationView {
    pub id: ClassificationTier,
    pub code: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

impl ClassificationTier {
    pub fn to_view(self) -> ClassificationView {
        ClassificationView {
            id: self,
            code: self.code(),
            label: self.label(),
            color: self.color(),
        }
    }
}

impl EvaluationRecord {
    pub fn to_view(&self, rubric: &Rubric) -> EvaluationView {
        let domain_scores = self
            .domain_scores
            .iter()
            .map(|score| DomainScoreView {
                domain: score.domain,
                domain_label: score.domain.label(),
                weight: rubric.weight(score.domain),
                percentage: score.percentage,
            })
            .collect();

        let item_scores = rubric
            .items()
            .iter()
            .map(|item| ItemScoreView {
                key: item.key,
                label: item.label,
                score: effective_item_score(&self.result, item.key),
            })
            .collect();

        EvaluationView {
            model_name: self.model_name.clone(),
            evaluated_at: self.evaluated_at,
            domain_scores,
            composite_percentage: self.composite_percentage,
            classification: self.tier.to_view(),
            statistics: self.statistics,
            item_scores,
            summary: self.result.summary.clone(),
            safety_flag: self.result.safety_flag,
            scenario: self.scenario.clone(),
            answer: self.answer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{build_record, interpret, EvaluationSession};

    fn sample_record() -> (EvaluationRecord, Rubric) {
        let rubric = Rubric::standard();
        let raw = r#"{"melma_w_summary":"summary","likert_scores":{"Q1":5,"Q6":2,"S1":"No"}}"#;
        let record = build_record("model", "scenario", "answer", interpret(raw), &rubric)
            .expect("record builds");
        (record, rubric)
    }

    #[test]
    fn view_exposes_all_thirty_items_with_defaults() {
        let (record, rubric) = sample_record();
        let view = record.to_view(&rubric);

        assert_eq!(view.item_scores.len(), 30);
        assert_eq!(view.item_scores[0].key, "Q1");
        assert_eq!(view.item_scores[0].score, 5);
        assert_eq!(view.item_scores[5].key, "Q6");
        assert_eq!(view.item_scores[5].score, 2);
        // Unreported item falls back to the anchor.
        assert_eq!(view.item_scores[29].score, 3);
    }

    #[test]
    fn view_orders_domains_for_the_chart() {
        let (record, rubric) = sample_record();
        let view = record.to_view(&rubric);

        let labels: Vec<&str> = view
            .domain_scores
            .iter()
            .map(|entry| entry.domain_label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Medical Accuracy",
                "Clinical Reasoning",
                "Safety & Ethics",
                "Linguistic Quality",
                "Literacy Adaptation",
                "Usefulness",
                "Performance",
            ]
        );
    }

    #[test]
    fn view_serializes_classification_metadata() {
        let mut session = EvaluationSession::new(Rubric::standard());
        let record = session
            .evaluate("model", "scenario", "answer", "not parseable")
            .expect("audit builds");
        let view = record.to_view(session.rubric());

        let json = serde_json::to_value(&view).expect("serializes");
        assert_eq!(json["classification"]["id"], "unacceptable");
        assert_eq!(json["classification"]["code"], "CLASS III");
        assert_eq!(json["classification"]["color"], "#ef4444");
        assert_eq!(json["safety_flag"], true);
    }
}
