//! Command-line flags and environment for the editor window.

use anyhow::{bail, Context, Result};
use clap::Parser;
use editor::EditorSettings;
use interchange::FilePlanStore;
use plan::{PlanConfig, PlanStyle};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const PLAN_ENV: &str = "BUILDMATE_PLAN";
pub const SAVE_DIR_ENV: &str = "BUILDMATE_SAVE_DIR";

/// BuildMate plan editor
#[derive(Parser, Debug, Default)]
#[command(name = "buildmate")]
#[command(about = "Draw and label the rooms of a house plan")]
pub struct Args {
    /// Plan configuration as JSON (also read from BUILDMATE_PLAN)
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Plot length in feet
    #[arg(long, requires = "width")]
    pub length: Option<u32>,

    /// Plot width in feet
    #[arg(long, requires = "length")]
    pub width: Option<u32>,

    #[arg(long)]
    pub floors: Option<u8>,

    /// modern, traditional or contemporary
    #[arg(long, value_parser = parse_style)]
    pub style: Option<PlanStyle>,

    /// Editor settings as JSON
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Directory saved plans are written to (also read from BUILDMATE_SAVE_DIR)
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Open a previously saved plan; saves go back to the same file
    #[arg(long)]
    pub open: Option<PathBuf>,

    /// Use the dark theme
    #[arg(long)]
    pub dark: bool,
}

fn parse_style(s: &str) -> Result<PlanStyle, String> {
    PlanStyle::from_str(s).map_err(|_| format!("unknown plan style '{}'", s))
}

/// Everything the window needs to start a session.
#[derive(Debug)]
pub struct Launch {
    pub plan: Option<PlanConfig>,
    pub settings: EditorSettings,
    pub store: FilePlanStore,
    pub restore: bool,
    pub dark: bool,
}

impl Args {
    pub fn into_launch(self) -> Result<Launch> {
        self.resolve(|key| std::env::var(key).ok())
    }

    fn resolve(self, env: impl Fn(&str) -> Option<String>) -> Result<Launch> {
        let plan_file = self.plan.clone().or_else(|| env(PLAN_ENV).map(PathBuf::from));
        let mut plan = match &plan_file {
            Some(path) => Some(read_plan_config(path)?),
            None => None,
        };

        if let (Some(length_ft), Some(width_ft)) = (self.length, self.width) {
            let base = plan.take().unwrap_or_default();
            plan = Some(PlanConfig {
                length_ft,
                width_ft,
                ..base
            });
        }
        if let Some(plan) = plan.as_mut() {
            if let Some(floors) = self.floors {
                plan.floors = floors;
            }
            if let Some(style) = self.style {
                plan.style = style;
            }
        }
        if let Some(plan) = &plan {
            if plan.floors == 0 {
                bail!("a plan needs at least one floor");
            }
        }

        let settings = match &self.settings {
            Some(path) => EditorSettings::from_json_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => EditorSettings::default(),
        };

        let (store, restore) = match self.open {
            Some(path) => (FilePlanStore::new(path), true),
            None => {
                let dir = self
                    .save_dir
                    .or_else(|| env(SAVE_DIR_ENV).map(PathBuf::from))
                    .unwrap_or_else(|| PathBuf::from("."));
                (FilePlanStore::in_dir(dir), false)
            }
        };

        Ok(Launch {
            plan,
            settings,
            store,
            restore,
            dark: self.dark,
        })
    }
}

fn read_plan_config(path: &Path) -> Result<PlanConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid plan config {}", path.display()))
}
