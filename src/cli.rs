//! The verification command behind the `bhk` binary.
//!
//! Argument handling, report rendering, and the exit-code mapping live
//! here so the whole command surface is testable; `main` is a shim that
//! wires in the real process streams.

use std::io::Write;

use crate::harness::{Harness, HarnessReport};

const USAGE: &str = "usage: bhk [--json]";

/// Parse the arguments (the first element is the program name), run the
/// harness over the kernel's own table, write the report, and return
/// the process exit code.
pub fn run<I, O, E>(args: I, stdout: &mut O, stderr: &mut E) -> u8
where
    I: IntoIterator<Item = String>,
    O: Write,
    E: Write,
{
    let mut json = false;
    for arg in args.into_iter().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => {
                let _ = writeln!(stderr, "unknown argument: {arg}");
                let _ = writeln!(stderr, "{USAGE}");
                return 2;
            }
        }
    }

    let report = Harness::new().run();

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(doc) => {
                let _ = writeln!(stdout, "{doc}");
            }
            Err(err) => {
                let _ = writeln!(stderr, "failed to serialize report: {err}");
                return 1;
            }
        }
    } else {
        render_report(stdout, &report);
    }

    exit_code(&report)
}

/// Write the human-readable report: one line per rule, one per
/// provenance finding, and a closing verdict.
pub fn render_report(out: &mut impl Write, report: &HarnessReport) {
    let _ = writeln!(out, "registry fingerprint: {}", report.registry_fingerprint);

    if let Some(error) = &report.error {
        let _ = writeln!(out, "registry invalid: {error}");
        return;
    }

    for result in &report.rule_results {
        let mark = if result.passed { "ok" } else { "FAILED" };
        match &result.error {
            Some(error) => {
                let _ = writeln!(out, "{mark:>6}  {} [{}]: {error}", result.rule, result.status);
            }
            None => {
                let _ = writeln!(out, "{mark:>6}  {} [{}]", result.rule, result.status);
            }
        }
    }

    for finding in &report.provenance_findings {
        let _ = writeln!(
            out,
            "TAINTED  {} reaches {} ({}) via {}",
            finding.claimed_rule,
            finding.offending_rule,
            finding.offending_status,
            finding.reached_via.join(" -> "),
        );
    }

    let verdict = if report.success { "verified" } else { "verification failed" };
    let _ = writeln!(out, "{verdict}");
}

/// Map a report onto the exit code: 0 everything verified, 1 a failed
/// check or an invalid table, 2 provenance findings. Findings take
/// precedence over smoke failures.
pub fn exit_code(report: &HarnessReport) -> u8 {
    if !report.provenance_findings.is_empty() {
        2
    } else if report.error.is_some() || report.rule_results.iter().any(|r| !r.passed) {
        1
    } else {
        0
    }
}
