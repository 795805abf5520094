use crate::domain::model::{AnalysisOutcome, RateSummary};
use crate::utils::error::Result;
use std::fmt::Write;

fn detail_line(out: &mut String, label: &str, max: f64, min: f64, average: f64, deviation: f64) {
    let _ = writeln!(
        out,
        "{} [max={}, min={}, average={}, dev={}]",
        label, max, min, average, deviation
    );
}

pub fn render_summary(summary: &RateSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Currency code {}", summary.currency_code);
    detail_line(
        &mut out,
        "Selling",
        summary.maximum.sell,
        summary.minimum.sell,
        summary.average.sell,
        summary.deviation.sell,
    );
    detail_line(
        &mut out,
        "Buying",
        summary.maximum.buy,
        summary.minimum.buy,
        summary.average.buy,
        summary.deviation.buy,
    );
    out
}

pub fn render_text(outcome: &AnalysisOutcome) -> String {
    match outcome {
        AnalysisOutcome::NoFilesInRange {
            start_date,
            end_date,
        } => format!(
            "For given dates startDate={}, endDate={} files not found.\n",
            start_date, end_date
        ),
        AnalysisOutcome::NoObservations { .. } => "No values were parsed.\n".to_string(),
        AnalysisOutcome::Completed {
            summary,
            files_requested,
            observations,
            failures,
        } => {
            let mut out = render_summary(summary);
            let _ = writeln!(
                out,
                "files={} observations={} failed={}",
                files_requested,
                observations,
                failures.len()
            );
            out
        }
    }
}

pub fn render_json(outcome: &AnalysisOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FileFailure, RatePair};
    use chrono::NaiveDate;

    fn summary() -> RateSummary {
        RateSummary {
            currency_code: "USD".to_string(),
            average: RatePair::new(4.1, 4.2),
            deviation: RatePair::new(1.0001, 1.0002),
            maximum: RatePair::new(4.2, 4.3),
            minimum: RatePair::new(4.0, 4.1),
        }
    }

    #[test]
    fn test_selling_line_comes_first() {
        let text = render_summary(&summary());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Currency code USD");
        assert_eq!(lines[1], "Selling [max=4.3, min=4.1, average=4.2, dev=1.0002]");
        assert_eq!(lines[2], "Buying [max=4.2, min=4, average=4.1, dev=1.0001]");
    }

    #[test]
    fn test_no_files_message() {
        let outcome = AnalysisOutcome::NoFilesInRange {
            start_date: NaiveDate::from_ymd_opt(2016, 1, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2016, 1, 8).unwrap(),
        };
        assert_eq!(
            render_text(&outcome),
            "For given dates startDate=2016-01-04, endDate=2016-01-08 files not found.\n"
        );
    }

    #[test]
    fn test_completed_reports_failures() {
        let outcome = AnalysisOutcome::Completed {
            summary: summary(),
            files_requested: 3,
            observations: 2,
            failures: vec![FileFailure {
                url: "http://localhost/c.xml".to_string(),
                reason: "status 500".to_string(),
            }],
        };
        assert!(render_text(&outcome).ends_with("files=3 observations=2 failed=1\n"));
    }

    #[test]
    fn test_json_is_tagged() {
        let outcome = AnalysisOutcome::NoObservations {
            files_requested: 2,
            failures: vec![],
        };
        let json: serde_json::Value = serde_json::from_str(&render_json(&outcome).unwrap()).unwrap();
        assert_eq!(json["outcome"], "no_observations");
        assert_eq!(json["files_requested"], 2);
    }
}
