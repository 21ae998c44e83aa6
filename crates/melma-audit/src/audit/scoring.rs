use super::interpreter::AuditResult;
use super::rubric::{DomainId, Rubric, SCALE_ANCHOR, SCALE_MAX, SCALE_MIN};
use serde::Serialize;

/// Derived percentage for one domain, in [0, 100]. Never rounded here;
/// rounding is a presentation concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainScore {
    pub domain: DomainId,
    pub percentage: f64,
}

/// Effective score for one item: the reported value when it is an integer
/// on the 1..=5 scale, otherwise the anchor. Out-of-range values are
/// deliberately treated the same as missing ones.
pub(crate) fn effective_item_score(result: &AuditResult, key: &str) -> u8 {
    match result.items.get(key) {
        Some(&value) if (SCALE_MIN as i64..=SCALE_MAX as i64).contains(&value) => value as u8,
        _ => SCALE_ANCHOR,
    }
}

/// The 30 defaulted scores in rubric item order, as fed to the statistics
/// module.
pub(crate) fn effective_scores(result: &AuditResult, rubric: &Rubric) -> Vec<u8> {
    rubric
        .domains()
        .iter()
        .flat_map(|domain| domain.item_keys.iter())
        .map(|key| effective_item_score(result, key))
        .collect()
}

/// Aggregate item scores into one percentage per domain, in rubric order.
pub fn score_domains(result: &AuditResult, rubric: &Rubric) -> Vec<DomainScore> {
    rubric
        .domains()
        .iter()
        .map(|domain| {
            let sum: u32 = domain
                .item_keys
                .iter()
                .map(|key| u32::from(effective_item_score(result, key)))
                .sum();
            let ceiling = (domain.item_keys.len() as f64) * f64::from(SCALE_MAX);
            DomainScore {
                domain: domain.id,
                percentage: f64::from(sum) / ceiling * 100.0,
            }
        })
        .collect()
}

/// Weighted sum of domain percentages. Weights are taken as-is from the
/// rubric; a rubric whose weights do not sum to 1.0 is an authoring defect,
/// not something renormalized here.
pub fn composite_percentage(scores: &[DomainScore], rubric: &Rubric) -> f64 {
    scores
        .iter()
        .map(|score| score.percentage * rubric.weight(score.domain))
        .sum()
}

/// Percentage for a named domain, or 0 when the domain is absent from the
/// score set.
pub fn percentage_for(scores: &[DomainScore], id: DomainId) -> f64 {
    scores
        .iter()
        .find(|score| score.domain == id)
        .map(|score| score.percentage)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn result_with(items: &[(&str, i64)]) -> AuditResult {
        AuditResult {
            summary: String::new(),
            items: items
                .iter()
                .map(|(key, score)| (key.to_string(), *score))
                .collect(),
            safety_flag: false,
        }
    }

    fn uniform_result(score: i64) -> AuditResult {
        let items: BTreeMap<String, i64> = (1..=30).map(|n| (format!("Q{n}"), score)).collect();
        AuditResult {
            summary: String::new(),
            items,
            safety_flag: false,
        }
    }

    #[test]
    fn uniform_fives_score_one_hundred_everywhere() {
        let rubric = Rubric::standard();
        let scores = score_domains(&uniform_result(5), &rubric);
        for score in &scores {
            assert!((score.percentage - 100.0).abs() < 1e-9);
        }
        assert!((composite_percentage(&scores, &rubric) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_ones_score_twenty_everywhere() {
        let rubric = Rubric::standard();
        let scores = score_domains(&uniform_result(1), &rubric);
        for score in &scores {
            assert!((score.percentage - 20.0).abs() < 1e-9);
        }
        assert!((composite_percentage(&scores, &rubric) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn missing_item_scores_like_the_anchor() {
        let rubric = Rubric::standard();

        let mut without_q1 = uniform_result(4);
        without_q1.items.remove("Q1");
        let mut with_anchor_q1 = uniform_result(4);
        with_anchor_q1.items.insert("Q1".to_string(), 3);

        assert_eq!(
            score_domains(&without_q1, &rubric),
            score_domains(&with_anchor_q1, &rubric)
        );
    }

    #[test]
    fn out_of_range_item_scores_like_the_anchor() {
        let rubric = Rubric::standard();

        let mut rogue = uniform_result(4);
        rogue.items.insert("Q2".to_string(), 7);
        rogue.items.insert("Q3".to_string(), 0);
        rogue.items.insert("Q4".to_string(), -2);
        let mut anchored = uniform_result(4);
        anchored.items.insert("Q2".to_string(), 3);
        anchored.items.insert("Q3".to_string(), 3);
        anchored.items.insert("Q4".to_string(), 3);

        assert_eq!(
            score_domains(&rogue, &rubric),
            score_domains(&anchored, &rubric)
        );
    }

    #[test]
    fn empty_result_scores_sixty_percent() {
        // All 30 items default to the anchor 3 of 5.
        let rubric = Rubric::standard();
        let scores = score_domains(&result_with(&[]), &rubric);
        for score in &scores {
            assert!((score.percentage - 60.0).abs() < 1e-9);
        }
        assert!((composite_percentage(&scores, &rubric) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn percentages_stay_in_bounds() {
        let rubric = Rubric::standard();
        for raw in [
            result_with(&[("Q1", 1), ("Q2", 5), ("Q9", 5)]),
            result_with(&[("Q1", 99), ("Q30", -5)]),
            uniform_result(2),
        ] {
            let scores = score_domains(&raw, &rubric);
            for score in &scores {
                assert!((0.0..=100.0).contains(&score.percentage));
            }
            let composite = composite_percentage(&scores, &rubric);
            assert!((0.0..=100.0).contains(&composite));
        }
    }

    #[test]
    fn composite_matches_manual_weight_sum() {
        let rubric = Rubric::standard();
        let result = result_with(&[("Q1", 5), ("Q6", 1), ("Q12", 4), ("Q28", 2)]);
        let scores = score_domains(&result, &rubric);

        let manual: f64 = scores
            .iter()
            .map(|score| score.percentage * rubric.weight(score.domain))
            .sum();
        assert!((composite_percentage(&scores, &rubric) - manual).abs() < 1e-12);
    }

    #[test]
    fn effective_scores_follow_rubric_item_order() {
        let rubric = Rubric::standard();
        let mut result = uniform_result(3);
        result.items.insert("Q1".to_string(), 5);
        result.items.insert("Q30".to_string(), 1);

        let flat = effective_scores(&result, &rubric);
        assert_eq!(flat.len(), 30);
        assert_eq!(flat[0], 5);
        assert_eq!(flat[29], 1);
    }
}
