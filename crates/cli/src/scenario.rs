//! Scenario execution: run a scripted demo, evaluate the final board state
//! against the script's assertions, and emit CI artifacts.

use anyhow::Result;
use tracing::{error, info};

use crate::report::{AssertionResult, TestReport};
use crate::{TestArgs, EXIT_ASSERT_FAIL, EXIT_CONFIG_ERROR, MAX_ALLOWED_TICKS};
use ledgrid_config::{Scenario, ScenarioAssertion, StopReason};
use ledgrid_core::peripherals::Frame;
use ledgrid_core::runner::RunOutcome;
use ledgrid_core::{setup, ClockMode, RunLimits, Runner, SimBoard};
use ledgrid_game::INDICATORS;

pub fn run_test(args: &TestArgs) -> i32 {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("Scenario run failed: {:#}", e);
            EXIT_CONFIG_ERROR
        }
    }
}

fn execute(args: &TestArgs) -> Result<i32> {
    let scenario = Scenario::from_file(&args.script)?;

    if scenario.limits.max_ticks > MAX_ALLOWED_TICKS {
        anyhow::bail!(
            "Limit 'max_ticks' {} exceeds the allowed maximum of {}",
            scenario.limits.max_ticks,
            MAX_ALLOWED_TICKS
        );
    }

    info!("Running scenario: {:?}", args.script);

    let board = SimBoard::with_layout(scenario.board, ClockMode::Virtual);
    let demo = setup::build_demo(scenario.demo, &scenario.params);
    let mut runner = Runner::new(board, demo);

    let quiet = args.quiet;
    let outcome = runner.run(
        RunLimits::from(&scenario.limits),
        &scenario.inputs,
        |tick, board| {
            if !quiet {
                println!("tick {}", tick);
                print!("{}", board.frame());
            }
        },
    );

    let frame = runner.board.frame();
    let indicators = runner.board.indicator_levels();
    let results = evaluate(&scenario.assertions, &frame, indicators, &outcome);

    for result in &results {
        if result.passed {
            info!("PASS {}", result.name);
        } else {
            error!("FAIL {}: {}", result.name, result.detail);
        }
    }

    let passed = results.iter().all(|r| r.passed);
    let report = TestReport::new(&args.script, &scenario, &outcome, results)?;

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)?;
        report.write_result_json(&dir.join("result.json"))?;
        report.write_junit(&dir.join("junit.xml"))?;
    }
    if let Some(path) = &args.junit {
        report.write_junit(path)?;
    }

    info!(
        "Scenario finished: {:?} after {} ticks, {}",
        outcome.stop_reason,
        outcome.ticks,
        if passed { "pass" } else { "fail" }
    );

    Ok(if passed { 0 } else { EXIT_ASSERT_FAIL })
}

fn evaluate(
    assertions: &[ScenarioAssertion],
    frame: &Frame,
    indicators: [bool; INDICATORS],
    outcome: &RunOutcome,
) -> Vec<AssertionResult> {
    assertions
        .iter()
        .enumerate()
        .map(|(index, assertion)| {
            let (name, passed, detail) = match assertion {
                ScenarioAssertion::RedRow(a) => row_check("red_row", a.red_row.row, a.red_row.value, frame.red[a.red_row.row]),
                ScenarioAssertion::GreenRow(a) => row_check("green_row", a.green_row.row, a.green_row.value, frame.green[a.green_row.row]),
                ScenarioAssertion::Indicator(a) => {
                    let actual = indicators[a.indicator.index];
                    (
                        format!("indicator[{}]", a.indicator.index),
                        actual == a.indicator.level,
                        format!("expected {}, got {}", a.indicator.level, actual),
                    )
                }
                ScenarioAssertion::ExpectedStopReason(a) => stop_check(a.expected_stop_reason, outcome.stop_reason),
            };
            AssertionResult {
                name: format!("assertion {}: {}", index + 1, name),
                passed,
                detail,
            }
        })
        .collect()
}

fn row_check(kind: &str, row: usize, expected: u16, actual: u16) -> (String, bool, String) {
    (
        format!("{}[{}]", kind, row),
        actual == expected,
        format!("expected {:#06x}, got {:#06x}", expected, actual),
    )
}

fn stop_check(expected: StopReason, actual: StopReason) -> (String, bool, String) {
    (
        "stop_reason".to_string(),
        actual == expected,
        format!("expected {:?}, got {:?}", expected, actual),
    )
}
