use super::record::EvaluationRecord;
use super::rubric::DomainId;
use super::scoring::percentage_for;
use std::io::Write;

/// Write the session log as CSV, one row per audit, for spreadsheet
/// handoff. Percentages keep full precision; consumers round.
pub fn write_csv<W: Write>(writer: W, records: &[EvaluationRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![
        "model".to_string(),
        "evaluated_at".to_string(),
        "classification".to_string(),
        "composite_percentage".to_string(),
        "safety_flag".to_string(),
    ];
    header.extend(DomainId::ordered().iter().map(|id| id.key().to_string()));
    header.extend(["mean", "std_dev", "min", "max"].map(String::from));
    csv_writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.model_name.clone(),
            record.evaluated_at.to_rfc3339(),
            record.tier.code().to_string(),
            record.composite_percentage.to_string(),
            record.result.safety_flag.to_string(),
        ];
        row.extend(
            DomainId::ordered()
                .iter()
                .map(|&id| percentage_for(&record.domain_scores, id).to_string()),
        );
        row.push(record.statistics.mean.to_string());
        row.push(record.statistics.std_dev.to_string());
        row.push(record.statistics.min.to_string());
        row.push(record.statistics.max.to_string());
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{EvaluationSession, Rubric};

    #[test]
    fn exports_one_row_per_record_with_domain_columns() {
        let mut session = EvaluationSession::new(Rubric::standard());
        session
            .evaluate("model-a", "scenario", "answer", "unparseable")
            .expect("audit builds");
        session
            .evaluate(
                "model-b",
                "scenario",
                "answer",
                r#"{"melma_w_summary":"ok","likert_scores":{"Q1":5,"S1":"No"}}"#,
            )
            .expect("audit builds");

        let mut buffer = Vec::new();
        write_csv(&mut buffer, session.snapshot()).expect("export succeeds");
        let text = String::from_utf8(buffer).expect("valid utf8");

        let mut lines = text.lines();
        let header = lines.next().expect("header row");
        assert!(header.starts_with(
            "model,evaluated_at,classification,composite_percentage,safety_flag,accuracy"
        ));
        assert!(header.ends_with("mean,std_dev,min,max"));

        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("model-a,"));
        assert!(rows[0].contains("CLASS III"));
        assert!(rows[0].contains(",true,"));
        assert!(rows[1].starts_with("model-b,"));
    }

    #[test]
    fn empty_session_exports_header_only() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[]).expect("export succeeds");
        let text = String::from_utf8(buffer).expect("valid utf8");
        assert_eq!(text.lines().count(), 1);
    }
}
