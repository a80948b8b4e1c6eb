//! Runtime configuration.
//!
//! The config is an explicit object handed down from the shell, never
//! ambient process state. Missing file means defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Token in the out-dir template replaced with the chart id.
pub const CHART_ID_PLACEHOLDER: &str = "_chartId_";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Default team power when the caller does not pass one.
    pub team_power: u32,
    /// Default AP-combo setting.
    pub ap_combo: bool,
    /// Output directory template; may contain [`CHART_ID_PLACEHOLDER`].
    pub out_dir: String,
    /// Directory holding the bundled templates and combo assets.
    pub assets_dir: PathBuf,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            team_power: 250_000,
            ap_combo: true,
            out_dir: format!("dist/{CHART_ID_PLACEHOLDER}"),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl OverlayConfig {
    /// Interpolate the chart id into the out-dir template.
    pub fn resolve_out_dir(&self, chart_id: &str) -> PathBuf {
        PathBuf::from(self.out_dir.replace(CHART_ID_PLACEHOLDER, chart_id))
    }

    /// Same interpolation for an explicit template string.
    pub fn resolve_out_dir_template(template: &str, chart_id: &str) -> PathBuf {
        PathBuf::from(template.replace(CHART_ID_PLACEHOLDER, chart_id))
    }
}
