//! Reference table locations shared by every command
//!
//! Level 4 - Utilities and configuration

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use impulse_core::{ImpulseTable, PowerCurveTable, Scenario};

/// Paths to the reference data files
#[derive(Args, Clone, Debug)]
pub struct TableArgs {
    /// Ship type power curves (JSON)
    #[arg(long, value_name = "FILE", default_value = "data/ship_stats.json")]
    pub ship_stats: PathBuf,

    /// Power curve values unlocked per impulse (JSON)
    #[arg(long, value_name = "FILE", default_value = "data/impulses.json")]
    pub impulses: PathBuf,
}

/// Everything a session needs, loaded and validated
pub struct ReferenceData {
    pub curves: PowerCurveTable,
    pub impulses: Arc<ImpulseTable>,
}

impl TableArgs {
    pub fn load(&self) -> Result<ReferenceData> {
        let curves = PowerCurveTable::load(&self.ship_stats)
            .with_context(|| format!("Failed to load ship stats: {}", self.ship_stats.display()))?;
        let impulses = ImpulseTable::load(&self.impulses)
            .with_context(|| format!("Failed to load impulse table: {}", self.impulses.display()))?;

        Ok(ReferenceData {
            curves,
            impulses: Arc::new(impulses),
        })
    }
}

/// Load a scenario file with a readable error
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    Scenario::load(path).with_context(|| format!("Failed to load scenario: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_data(file: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("data").join(file)
    }

    #[test]
    fn test_load_reference_data() {
        let args = TableArgs {
            ship_stats: workspace_data("ship_stats.json"),
            impulses: workspace_data("impulses.json"),
        };
        let data = args.load().unwrap();
        assert_eq!(data.curves.len(), 4);
        assert_eq!(data.impulses.values(impulse_core::Impulse::E), vec![6]);
    }

    #[test]
    fn test_missing_file_names_path() {
        let args = TableArgs {
            ship_stats: PathBuf::from("/nonexistent/ship_stats.json"),
            impulses: workspace_data("impulses.json"),
        };
        let err = args.load().err().unwrap();
        assert!(format!("{err:#}").contains("/nonexistent/ship_stats.json"));
    }
}
