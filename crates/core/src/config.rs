use std::time::Duration;

/// Episodes between two mist advances.
pub const MIST_TTH: u64 = 5;

/// Per-match tuning. A default config reproduces the classic rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// `increase_mist` runs whenever the episode counter is a multiple of this. Zero disables it.
    pub mist_tth: u64,
    /// Wall-clock allowance for one `decide` call. Overruns count as `DoNothing`.
    pub decision_budget: Option<Duration>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { mist_tth: MIST_TTH, decision_budget: None }
    }
}
