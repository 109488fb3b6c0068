//! Test artifacts: `result.json` for machines, JUnit XML for CI dashboards.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};

use ledgrid_config::{DemoKind, Scenario, StopReason};
use ledgrid_core::runner::RunOutcome;

#[derive(Debug, Serialize)]
pub struct AssertionResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct ReportConfig {
    pub script: String,
    pub demo: DemoKind,
}

#[derive(Debug, Serialize)]
pub struct TestReport {
    pub status: String,
    pub stop_reason: StopReason,
    pub ticks: u64,
    pub script_hash: String,
    pub config: ReportConfig,
    pub assertions: Vec<AssertionResult>,
}

impl TestReport {
    pub fn new(
        script: &Path,
        scenario: &Scenario,
        outcome: &RunOutcome,
        assertions: Vec<AssertionResult>,
    ) -> Result<Self> {
        let bytes = std::fs::read(script)
            .with_context(|| format!("Failed to re-read scenario script {:?}", script))?;
        let digest = Sha256::digest(&bytes);
        let script_hash: String = digest.iter().map(|b| format!("{:02x}", b)).collect();

        let passed = assertions.iter().all(|a| a.passed);
        Ok(Self {
            status: if passed { "pass" } else { "fail" }.to_string(),
            stop_reason: outcome.stop_reason,
            ticks: outcome.ticks,
            script_hash,
            config: ReportConfig {
                script: script.display().to_string(),
                demo: scenario.demo,
            },
            assertions,
        })
    }

    pub fn write_result_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write result to {:?}", path))
    }

    pub fn write_junit(&self, path: &Path) -> Result<()> {
        let failures = self.assertions.iter().filter(|a| !a.passed).count();
        let tests = self.assertions.len().max(1);

        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<testsuite name=\"ledgrid test\" tests=\"{}\" failures=\"{}\">\n",
            tests, failures
        ));
        if self.assertions.is_empty() {
            // A scenario with no assertions still reports that it completed.
            xml.push_str("  <testcase name=\"scenario completed\" />\n");
        }
        for assertion in &self.assertions {
            if assertion.passed {
                xml.push_str(&format!(
                    "  <testcase name=\"{}\" />\n",
                    escape(&assertion.name)
                ));
            } else {
                xml.push_str(&format!(
                    "  <testcase name=\"{}\">\n    <failure message=\"{}\" />\n  </testcase>\n",
                    escape(&assertion.name),
                    escape(&assertion.detail)
                ));
            }
        }
        xml.push_str("</testsuite>\n");

        std::fs::write(path, xml)
            .with_context(|| format!("Failed to write JUnit report to {:?}", path))
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
