use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// The board geometry is fixed; these bound the values a script may reference.
const MATRIX_ROWS: usize = 16;
const INDICATOR_LINES: usize = 4;

/// Memory-map bases of the two I/O regions. Part of the external contract
/// with the board; overridable for boards synthesized at other addresses.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields, default)]
pub struct BoardLayout {
    pub input_base: u64,
    pub output_base: u64,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            input_base: 0x1000,
            output_base: 0x1800,
        }
    }
}

/// Steering priority applied when several direction buttons are held.
/// Two presets exist in the field; the order is policy, not physics.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    UpFirst,
    RightFirst,
}

/// Tunable demo parameters.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields, default)]
pub struct DemoParams {
    pub tick_ms: u32,
    pub blink_ms: u32,
    pub trail_len: u8,
    pub priority: PriorityOrder,
}

impl Default for DemoParams {
    fn default() -> Self {
        Self {
            tick_ms: 150,
            blink_ms: 400,
            trail_len: 8,
            priority: PriorityOrder::UpFirst,
        }
    }
}

impl DemoParams {
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            anyhow::bail!("'tick_ms' must be greater than zero");
        }
        if self.blink_ms == 0 {
            anyhow::bail!("'blink_ms' must be greater than zero");
        }
        if self.trail_len == 0 {
            anyhow::bail!("'trail_len' must be greater than zero");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DemoKind {
    Blink,
    Passthrough,
    Trail,
}

/// Configuration for the interactive run mode: board layout plus parameters.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default)]
#[serde(deny_unknown_fields, default)]
pub struct RunProfile {
    pub board: BoardLayout,
    pub params: DemoParams,
}

impl RunProfile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open run profile at {:?}", path.as_ref()))?;
        let profile: Self = serde_yaml::from_reader(f).context("Failed to parse run profile")?;
        profile.params.validate()?;
        Ok(profile)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LineId {
    Switch,
    BtnUp,
    BtnDown,
    BtnLeft,
    BtnRight,
}

/// Sets `line` to `level` immediately before the 1-based tick `tick`.
/// Lines are level-sampled, so the level persists until another event
/// changes it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct InputEvent {
    pub tick: u64,
    pub line: LineId,
    pub level: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct ScenarioLimits {
    pub max_ticks: u64,
    #[serde(default)]
    pub wall_time_ms: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    MaxTicks,
    WallTime,
    GameOver,
}

/// A row word to compare against; bit 15 is column 0.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct RowBits {
    pub row: usize,
    pub value: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct RedRowAssertion {
    pub red_row: RowBits,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct GreenRowAssertion {
    pub green_row: RowBits,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct IndicatorLevel {
    pub index: usize,
    pub level: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct IndicatorAssertion {
    pub indicator: IndicatorLevel,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct StopReasonAssertion {
    pub expected_stop_reason: StopReason,
}

/// Assertions evaluated against the final board state and run outcome.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(untagged)]
pub enum ScenarioAssertion {
    RedRow(RedRowAssertion),
    GreenRow(GreenRowAssertion),
    Indicator(IndicatorAssertion),
    ExpectedStopReason(StopReasonAssertion),
}

/// A scripted run: which demo, which inputs at which ticks, how long to run,
/// and what must hold at the end.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub schema_version: String,
    pub demo: DemoKind,
    #[serde(default)]
    pub board: BoardLayout,
    #[serde(default)]
    pub params: DemoParams,
    pub limits: ScenarioLimits,
    #[serde(default)]
    pub inputs: Vec<InputEvent>,
    #[serde(default)]
    pub assertions: Vec<ScenarioAssertion>,
}

impl Scenario {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open scenario script at {:?}", path.as_ref()))?;
        let scenario: Self =
            serde_yaml::from_reader(f).context("Failed to parse scenario YAML")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != "1.0" {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '1.0'",
                self.schema_version
            );
        }

        if self.limits.max_ticks == 0 {
            anyhow::bail!("Limit 'max_ticks' must be greater than zero");
        }

        self.params.validate()?;

        for event in &self.inputs {
            if event.tick == 0 {
                anyhow::bail!("Input ticks are 1-based; tick 0 never fires");
            }
        }

        for assertion in &self.assertions {
            match assertion {
                ScenarioAssertion::RedRow(a) => check_row(a.red_row.row)?,
                ScenarioAssertion::GreenRow(a) => check_row(a.green_row.row)?,
                ScenarioAssertion::Indicator(a) => {
                    if a.indicator.index >= INDICATOR_LINES {
                        anyhow::bail!(
                            "Indicator index {} out of range (board has {})",
                            a.indicator.index,
                            INDICATOR_LINES
                        );
                    }
                }
                ScenarioAssertion::ExpectedStopReason(_) => {}
            }
        }

        Ok(())
    }
}

fn check_row(row: usize) -> Result<()> {
    if row >= MATRIX_ROWS {
        anyhow::bail!("Row {} out of range (matrix has {} rows)", row, MATRIX_ROWS);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_scenario() {
        let yaml = r#"
schema_version: "1.0"
demo: trail
limits:
  max_ticks: 100
  wall_time_ms: 5000
inputs:
  - { tick: 3, line: btn_right, level: true }
assertions:
  - green_row: { row: 6, value: 32 }
  - expected_stop_reason: max_ticks
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert!(scenario.validate().is_ok());
        assert_eq!(scenario.demo, DemoKind::Trail);
        assert_eq!(scenario.limits.max_ticks, 100);
        assert_eq!(scenario.inputs.len(), 1);
        assert_eq!(scenario.assertions.len(), 2);
        assert_eq!(scenario.params.trail_len, 8);
    }

    #[test]
    fn test_invalid_version() {
        let yaml = r#"
schema_version: "2.0"
demo: blink
limits:
  max_ticks: 10
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("Unsupported schema_version"));
    }

    #[test]
    fn test_zero_max_ticks() {
        let yaml = r#"
schema_version: "1.0"
demo: trail
limits:
  max_ticks: 0
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("max_ticks"));
    }

    #[test]
    fn test_row_out_of_range() {
        let yaml = r#"
schema_version: "1.0"
demo: trail
limits:
  max_ticks: 10
assertions:
  - red_row: { row: 16, value: 0 }
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_zero_input_tick_rejected() {
        let yaml = r#"
schema_version: "1.0"
demo: trail
limits:
  max_ticks: 10
inputs:
  - { tick: 0, line: btn_up, level: true }
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("1-based"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
schema_version: "1.0"
demo: trail
lives: 3
limits:
  max_ticks: 10
"#;
        assert!(serde_yaml::from_str::<Scenario>(yaml).is_err());
    }

    #[test]
    fn test_params_validation() {
        let params = DemoParams {
            tick_ms: 0,
            ..DemoParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("tick_ms"));
    }

    #[test]
    fn test_board_layout_defaults() {
        let layout = BoardLayout::default();
        assert_eq!(layout.input_base, 0x1000);
        assert_eq!(layout.output_base, 0x1800);
    }

    #[test]
    fn test_run_profile_defaults() {
        let profile: RunProfile = serde_yaml::from_str("params:\n  tick_ms: 50\n").unwrap();
        assert_eq!(profile.params.tick_ms, 50);
        assert_eq!(profile.params.blink_ms, 400);
        assert_eq!(profile.board.output_base, 0x1800);
    }
}
