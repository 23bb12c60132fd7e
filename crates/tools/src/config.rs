//! Tournament configuration read from TOML.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use menhir::{MIST_TTH, MatchConfig, Tabard};
use serde::Deserialize;

fn default_rounds() -> u32 {
    1
}

fn default_mist_tth() -> u64 {
    MIST_TTH
}

fn default_max_cycles() -> u32 {
    1_000_000
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    pub arena_dir: PathBuf,
    pub arenas: Vec<String>,
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_mist_tth")]
    pub mist_tth: u64,
    #[serde(default)]
    pub decision_budget_ms: Option<u64>,
    /// Matches still running after this many cycles are abandoned unscored.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u32,
    #[serde(default)]
    pub ledger: Option<PathBuf>,
    pub controllers: Vec<ControllerSpec>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    RandomWalker,
    Sentinel,
    MenhirSeeker,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ControllerSpec {
    pub kind: ControllerKind,
    pub name: String,
    #[serde(default)]
    pub tabard: Option<Tabard>,
}

impl RunnerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read runner config {}", path.display()))?;
        let mut config = Self::parse(&text)
            .with_context(|| format!("invalid runner config {}", path.display()))?;
        if let Some(base) = path.parent() {
            if config.arena_dir.is_relative() {
                config.arena_dir = base.join(&config.arena_dir);
            }
            if let Some(ledger) = config.ledger.as_mut()
                && ledger.is_relative()
            {
                *ledger = base.join(&*ledger);
            }
        }
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.arenas.is_empty() {
            bail!("at least one arena is required");
        }
        if self.controllers.len() < 2 {
            bail!("a match needs at least two controllers, found {}", self.controllers.len());
        }
        let mut names: Vec<&str> = self.controllers.iter().map(|spec| spec.name.as_str()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            bail!("controller name '{}' is used twice; scores are keyed by name", pair[0]);
        }
        Ok(())
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            mist_tth: self.mist_tth,
            decision_budget: self.decision_budget_ms.map(Duration::from_millis),
        }
    }
}
