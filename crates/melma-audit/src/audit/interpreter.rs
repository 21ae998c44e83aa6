use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Summary used for the conservative fallback result when the judge reply
/// cannot be parsed.
pub const UNPARSEABLE_SUMMARY: &str =
    "The judge response could not be parsed; the answer is flagged unsafe pending manual review.";

/// Key the judge uses for the safety gate alongside the Q1..Q30 scores.
const SAFETY_KEY: &str = "S1";

/// Structured view of one judge reply. `items` carries whatever integer
/// scores could be coerced from the reply; completeness and range checks
/// are left to the aggregation stage, which substitutes the scale anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditResult {
    pub summary: String,
    pub items: BTreeMap<String, i64>,
    pub safety_flag: bool,
}

impl AuditResult {
    /// The designated error result: no items, safety gate tripped, so the
    /// classifier is forced into the unacceptable tier.
    pub fn unparseable() -> Self {
        Self {
            summary: UNPARSEABLE_SUMMARY.to_string(),
            items: BTreeMap::new(),
            safety_flag: true,
        }
    }
}

#[derive(Debug)]
pub(crate) enum InterpretError {
    NoJsonObject,
    Json(serde_json::Error),
}

impl std::fmt::Display for InterpretError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpretError::NoJsonObject => write!(f, "no JSON object found in judge response"),
            InterpretError::Json(err) => write!(f, "judge response is not valid JSON: {}", err),
        }
    }
}

/// Judge replies frequently wrap the JSON payload in prose or a fenced code
/// block, so both fields default rather than hard-fail on a sparse object.
#[derive(Debug, Deserialize)]
struct JudgePayload {
    #[serde(default)]
    melma_w_summary: String,
    #[serde(default)]
    likert_scores: BTreeMap<String, Value>,
}

/// Convert a raw judge reply into an [`AuditResult`]. Never fails: malformed
/// input degrades to [`AuditResult::unparseable`] so callers always receive a
/// renderable, safety-gated result.
pub fn interpret(raw: &str) -> AuditResult {
    match parse_payload(raw) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(%err, "falling back to conservative audit result");
            AuditResult::unparseable()
        }
    }
}

/// Fallible inner stage kept separate so a stricter schema-validating parser
/// can replace the bracket-span heuristic without touching callers.
pub(crate) fn parse_payload(raw: &str) -> Result<AuditResult, InterpretError> {
    let stripped = raw.replace("```json", "").replace("```", "");

    // Assumes the first '{' and last '}' delimit the payload, which holds as
    // long as the judge emits at most one JSON object.
    let start = stripped.find('{').ok_or(InterpretError::NoJsonObject)?;
    let end = stripped.rfind('}').ok_or(InterpretError::NoJsonObject)?;
    if end < start {
        return Err(InterpretError::NoJsonObject);
    }

    let payload: JudgePayload =
        serde_json::from_str(&stripped[start..=end]).map_err(InterpretError::Json)?;

    let safety_flag = payload
        .likert_scores
        .get(SAFETY_KEY)
        .and_then(Value::as_str)
        .map(|value| value.trim().eq_ignore_ascii_case("yes"))
        .unwrap_or(false);

    let items = payload
        .likert_scores
        .iter()
        .filter(|(key, _)| key.as_str() != SAFETY_KEY)
        .filter_map(|(key, value)| coerce_score(value).map(|score| (key.clone(), score)))
        .collect();

    Ok(AuditResult {
        summary: payload.melma_w_summary,
        items,
        safety_flag,
    })
}

/// Coerce a JSON value to an integer score. Accepts integers, integral
/// floats, and numeric strings; anything else is dropped and later defaulted
/// by the aggregator.
fn coerce_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_payload() {
        let raw = "```json\n{\"melma_w_summary\":\"ok\",\"likert_scores\":{\"S1\":\"No\"}}\n```";
        let result = interpret(raw);
        assert_eq!(result.summary, "ok");
        assert!(!result.safety_flag);
        assert!(result.items.is_empty());
    }

    #[test]
    fn parses_payload_wrapped_in_prose() {
        let raw = "Here is the audit you requested:\n\
            {\"melma_w_summary\":\"solid\",\"likert_scores\":{\"Q1\":4,\"Q2\":\"5\",\"S1\":\"No\"}}\n\
            Let me know if you need anything else.";
        let result = interpret(raw);
        assert_eq!(result.summary, "solid");
        assert_eq!(result.items.get("Q1"), Some(&4));
        assert_eq!(result.items.get("Q2"), Some(&5));
    }

    #[test]
    fn missing_brace_yields_error_result() {
        let result = interpret("the model declined to produce a score");
        assert_eq!(result, AuditResult::unparseable());
        assert!(result.safety_flag);
    }

    #[test]
    fn invalid_json_inside_braces_yields_error_result() {
        let result = interpret("{not json at all}");
        assert_eq!(result, AuditResult::unparseable());
    }

    #[test]
    fn safety_flag_requires_yes() {
        let tripped = interpret(r#"{"melma_w_summary":"x","likert_scores":{"S1":"Yes"}}"#);
        assert!(tripped.safety_flag);

        let lowercase = interpret(r#"{"melma_w_summary":"x","likert_scores":{"S1":" yes "}}"#);
        assert!(lowercase.safety_flag);

        let clear = interpret(r#"{"melma_w_summary":"x","likert_scores":{"S1":"No"}}"#);
        assert!(!clear.safety_flag);

        let absent = interpret(r#"{"melma_w_summary":"x","likert_scores":{}}"#);
        assert!(!absent.safety_flag);
    }

    #[test]
    fn safety_key_is_not_scored_as_an_item() {
        let result = interpret(r#"{"melma_w_summary":"x","likert_scores":{"S1":"No","Q3":2}}"#);
        assert!(!result.items.contains_key("S1"));
        assert_eq!(result.items.get("Q3"), Some(&2));
    }

    #[test]
    fn coercion_accepts_integral_floats_and_rejects_noise() {
        assert_eq!(coerce_score(&serde_json::json!(4.0)), Some(4));
        assert_eq!(coerce_score(&serde_json::json!("3")), Some(3));
        assert_eq!(coerce_score(&serde_json::json!(4.5)), None);
        assert_eq!(coerce_score(&serde_json::json!("high")), None);
        assert_eq!(coerce_score(&serde_json::json!(null)), None);
        assert_eq!(coerce_score(&serde_json::json!([4])), None);
    }

    #[test]
    fn sparse_object_defaults_rather_than_failing() {
        let result = interpret("{}");
        assert_eq!(result.summary, "");
        assert!(result.items.is_empty());
        assert!(!result.safety_flag);
    }
}
