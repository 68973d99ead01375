use std::path::Path;
use std::process::ExitCode;

use provision_engine::{ConvergenceReport, ConvergenceResult, ResourceOutcome, SystemHost};
use tracing::error;

use super::load;
use crate::OutputFormat;

pub fn converge(
    attributes: &Path,
    config: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let loaded = load(attributes, config)?;
    let mut host = SystemHost::new(&loaded.config.host);
    let report = provision_engine::converge(&loaded.resources, &loaded.attrs, &mut host);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report_json(&report))?),
        OutputFormat::Text => print!("{}", format_report(&report)),
    }

    if report.has_failures() && loaded.config.run.fail_on_error {
        error!(failed = report.summary().failed, "convergence failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn outcome_line(outcome: &ResourceOutcome) -> String {
    match &outcome.result {
        ConvergenceResult::Failed(e) => format!("{}: failed: {e}", outcome.resource),
        other => format!("{}: {}", outcome.resource, other.label()),
    }
}

pub fn format_report(report: &ConvergenceReport) -> String {
    let mut out = String::new();
    for outcome in report.outcomes() {
        out.push_str(&outcome_line(outcome));
        out.push('\n');
    }
    let summary = report.summary();
    out.push_str(&format!(
        "{} applied, {} unchanged, {} skipped, {} failed\n",
        summary.applied, summary.unchanged, summary.skipped, summary.failed
    ));
    out
}

pub fn report_json(report: &ConvergenceReport) -> serde_json::Value {
    let outcomes: Vec<_> = report
        .outcomes()
        .iter()
        .map(|o| {
            let error = match &o.result {
                ConvergenceResult::Failed(e) => Some(e.to_string()),
                _ => None,
            };
            serde_json::json!({
                "resource": o.resource,
                "deferred": o.deferred,
                "result": o.result.label(),
                "error": error,
            })
        })
        .collect();
    serde_json::json!({
        "outcomes": outcomes,
        "summary": report.summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use provision_core::NodeAttributes;
    use provision_engine::{Guard, MemoryHost, Resource};

    fn sample_report() -> ConvergenceReport {
        let attrs = NodeAttributes::default();
        let mut host = MemoryHost::new().with_package("present").fail_on("broken");
        let resources = [
            Resource::package("present"),
            Resource::package("broken"),
            Resource::package("gated").with_guard(Guard::present(&["slurm"])),
        ];
        provision_engine::converge(&resources, &attrs, &mut host)
    }

    #[test]
    fn text_report_lists_each_resource() {
        let text = format_report(&sample_report());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "package[present]: unchanged");
        assert!(lines[1].starts_with("package[broken]: failed: apply failed:"));
        assert_eq!(lines[2], "package[gated]: skipped");
        assert_eq!(lines[3], "0 applied, 1 unchanged, 1 skipped, 1 failed");
    }

    #[test]
    fn json_report_carries_errors() {
        let json = report_json(&sample_report());
        assert_eq!(json["outcomes"][0]["result"], "unchanged");
        assert!(json["outcomes"][0]["error"].is_null());
        assert_eq!(json["outcomes"][1]["result"], "failed");
        assert!(json["outcomes"][1]["error"].as_str().unwrap().contains("broken"));
        assert_eq!(json["summary"]["failed"], 1);
    }
}
