use crate::infra::build_service;
use chrono::{DateTime, Utc};
use clap::Args;
use landing_compliance::config::AppConfig;
use landing_compliance::error::AppError;
use landing_compliance::workflows::landings::import::read_foreign_rows_json;
use landing_compliance::workflows::landings::router::ForeignClassificationResponse;
use landing_compliance::workflows::landings::{
    classify_foreign_document_batch, read_records_from_path, ForeignBatchOutcome, ImportError,
    LandingDay, ValidationReportItem, ValidationRule,
};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Landing query export (`.json` or CSV with JSON field names as headers)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// JSON snapshot of vessel, species and exporter base risk scores
    #[arg(long)]
    pub(crate) risk_scores: Option<PathBuf>,
    /// JSON list of vessel licences used to enrich rows before the rules run
    #[arg(long)]
    pub(crate) licences: Option<PathBuf>,
    /// Print the report as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyForeignArgs {
    /// JSON array of document rows, or `{ "rows": [...] }`
    #[arg(long)]
    pub(crate) input: PathBuf,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        input,
        risk_scores,
        licences,
        json,
    } = args;

    let config = AppConfig::load()?;
    let service = build_service(config.risk, risk_scores.as_deref(), licences.as_deref())?;
    let records = read_records_from_path(&input)?;
    let items = service.assessed_report(&records);

    if json {
        let rendered = serde_json::to_string_pretty(&items).map_err(ImportError::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_report(&items, records.len(), Utc::now()));
    }

    Ok(())
}

pub(crate) fn run_classify_foreign(args: ClassifyForeignArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let mut rows = read_foreign_rows_json(&raw)?;
    let outcome = classify_foreign_document_batch(&mut rows);
    let summary = describe_outcome(&outcome);

    let rendered = serde_json::to_string_pretty(&ForeignClassificationResponse { outcome, rows })
        .map_err(ImportError::from)?;
    println!("{rendered}");
    eprintln!("{summary}");
    Ok(())
}

pub(crate) fn render_report(
    items: &[ValidationReportItem],
    record_count: usize,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Landing validation report ({})",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(
        out,
        "- {} rows checked | {} landing groups flagged",
        record_count,
        items.len()
    );

    if items.is_empty() {
        let _ = writeln!(out, "No landing groups failed validation.");
        return out;
    }

    let _ = writeln!(out, "Failures by rule:");
    for rule in ValidationRule::ordered() {
        let count = items
            .iter()
            .filter(|item| item.failures.contains(&rule))
            .count();
        if count > 0 {
            let _ = writeln!(out, "  - {}: {}", rule.code(), count);
        }
    }

    let _ = writeln!(out, "Flagged landings:");
    for item in items {
        let failures: Vec<&str> = item.failures.iter().map(|rule| rule.code()).collect();
        let _ = writeln!(
            out,
            "  - {} | {} {}/{}/{} | {}",
            describe_day(&item.date),
            display_or_dash(&item.vessel),
            display_or_dash(&item.species),
            display_or_dash(&item.presentation),
            display_or_dash(&item.state),
            failures.join(", ")
        );
    }

    out
}

pub(crate) fn describe_outcome(outcome: &ForeignBatchOutcome) -> String {
    match outcome {
        ForeignBatchOutcome::Valid => "all rows within certificate weight".to_string(),
        ForeignBatchOutcome::Invalid { failures } => {
            let lines: Vec<String> = failures
                .iter()
                .map(|failure| format!("{} ({})", failure.certificate_number, failure.product))
                .collect();
            format!("over-allocated: {}", lines.join(", "))
        }
    }
}

fn describe_day(day: &LandingDay) -> String {
    match day {
        LandingDay::Day(date) => date.format("%Y-%m-%d").to_string(),
        LandingDay::Unparsed(raw) => format!("unreadable date '{raw}'"),
        LandingDay::Missing => "no landing date".to_string(),
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use landing_compliance::workflows::landings::{
        ForeignCertificateRow, LandingComplianceService, LicenceRegistry, RiskConfig,
        RiskScoreTable, SubmissionRecord,
    };
    use std::sync::Arc;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 7, 12, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn service() -> LandingComplianceService<RiskScoreTable, LicenceRegistry> {
        LandingComplianceService::new(
            Arc::new(RiskScoreTable::default().with_vessel("B192", 2.0)),
            Arc::new(LicenceRegistry::default()),
            RiskConfig::default(),
        )
    }

    #[test]
    fn text_report_summarises_rules_and_groups() {
        let records = vec![
            SubmissionRecord {
                document_number: "GBR-2019-CC-1".to_string(),
                pln: Some("B192".to_string()),
                vessel_name: Some("DAYBREAK".to_string()),
                species_code: Some("LBE".to_string()),
                presentation: Some("WHL".to_string()),
                state: Some("FRE".to_string()),
                date_landed: Some("2019-07-10".to_string()),
                landing_exists: true,
                species_exists: true,
                overused_this_cert: true,
                ..SubmissionRecord::default()
            },
            SubmissionRecord {
                document_number: "GBR-2019-CC-2".to_string(),
                licence_holder: Some("Holder".to_string()),
                date_landed: Some("10/07/2019".to_string()),
                landing_exists: true,
                overused_all_certs: true,
                ..SubmissionRecord::default()
            },
        ];
        let items = service().validation_report(&records);

        let text = render_report(&items, records.len(), generated_at());

        assert!(text.starts_with("Landing validation report (2019-07-12 09:00 UTC)"));
        assert!(text.contains("- 2 rows checked | 2 landing groups flagged"));
        assert!(text.contains("  - 3D: 1\n"));
        assert!(text.contains("  - 4A: 1\n"));
        assert!(text.contains("  - noLicenceHolder: 1\n"));
        assert!(!text.contains("3C:"));
        assert!(text.contains("2019-07-10 | DAYBREAK LBE/WHL/FRE | 3D, noLicenceHolder"));
        assert!(text.contains("unreadable date '10/07/2019' | - -/-/- | 4A"));
    }

    #[test]
    fn empty_report_says_nothing_failed() {
        let text = render_report(&[], 3, generated_at());
        assert!(text.contains("3 rows checked | 0 landing groups flagged"));
        assert!(text.contains("No landing groups failed validation."));
    }

    #[test]
    fn outcome_description_names_over_allocated_certificates() {
        let mut rows = vec![ForeignCertificateRow {
            certificate_number: "FCC-051".to_string(),
            product: "COD".to_string(),
            weight_on_all_documents: 120.0,
            weight_on_certificate: 100.0,
            ..ForeignCertificateRow::default()
        }];

        let outcome = classify_foreign_document_batch(&mut rows);
        assert_eq!(describe_outcome(&outcome), "over-allocated: FCC-051 (COD)");

        rows[0].weight_on_all_documents = 80.0;
        let outcome = classify_foreign_document_batch(&mut rows);
        assert_eq!(describe_outcome(&outcome), "all rows within certificate weight");
    }
}
