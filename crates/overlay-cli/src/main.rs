//! Presentation shell around the overlay-core pipeline.
//!
//! Flag parsing, config defaults, and console reporting only; all real work
//! happens in overlay-core.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use overlay_core::{
    ChartRetriever, OverlayConfig, compute, detect, format_credits, write_exo_files,
    write_ped_file,
};
use owo_colors::OwoColorize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sekai-overlay")]
#[command(about = "Score overlay project generator for AviUtl", version)]
struct Args {
    /// Chart id including the source prefix (e.g. chcy-1234)
    chart_id: String,

    /// Team power for the score projection
    #[arg(long)]
    team_power: Option<u32>,

    /// Render the combo counter with the AP effect (true/false)
    #[arg(long, value_name = "BOOL")]
    ap_combo: Option<bool>,

    /// Output directory template; _chartId_ expands to the chart id
    #[arg(long)]
    out_dir: Option<String>,

    /// Directory holding the bundled overlay assets
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Config file with defaults for the flags above
    #[arg(short, long, default_value = "overlay.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("overlay_core=info".parse()?)
                .add_directive("sekai_overlay=info".parse()?),
        )
        .init();

    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args.config);
    let team_power = args.team_power.unwrap_or(config.team_power);
    let ap_combo = args.ap_combo.unwrap_or(config.ap_combo);
    let out_template = args.out_dir.unwrap_or_else(|| config.out_dir.clone());
    let assets_dir = args.assets.unwrap_or_else(|| config.assets_dir.clone());

    let source = detect(&args.chart_id)
        .context("Enter the chart id including its source prefix (e.g. chcy-...)")?;
    println!(
        "{} {}",
        "Source:".bold(),
        source
            .name
            .truecolor(source.color.r, source.color.g, source.color.b)
    );

    let retriever = ChartRetriever::new();
    let chart = retriever
        .fetch_chart(source, &args.chart_id)
        .context("Failed to fetch the chart")?;
    println!(
        "  {} / {} - {} (Lv. {})",
        chart.title.cyan(),
        chart.artists.cyan(),
        chart.author.cyan(),
        chart.rating.magenta()
    );

    let out_dir = OverlayConfig::resolve_out_dir_template(&out_template, &args.chart_id);
    println!(
        "{} {}",
        "Output directory:".bold(),
        out_dir.display().cyan()
    );

    let timeline = retriever
        .fetch_level_data(&chart)
        .context("Failed to read the chart notes")?;

    retriever
        .download_cover(&chart, &out_dir)
        .context("Failed to download the cover image")?;
    retriever
        .download_background(&chart, &out_dir)
        .context("Failed to download the background image")?;

    let breakdown = compute(&chart, &timeline, team_power, ap_combo);
    println!(
        "{} {} ({} notes, team power {})",
        "Projected score:".bold(),
        breakdown.total.to_string().green(),
        timeline.len(),
        team_power
    );

    write_ped_file(&breakdown, &assets_dir, ap_combo, &out_dir.join("data.ped"))
        .context("Failed to generate the ped file")?;

    let credits = format_credits(
        &chart.credits.composer,
        &chart.credits.vocalist,
        &chart.author,
    );
    let exo_files = write_exo_files(&assets_dir, &out_dir, &chart.title, &credits)
        .context("Failed to generate the exo files")?;

    println!(
        "{}",
        format!(
            "All done: data.ped and {} exo file(s) written under {}. Import the exo into AviUtl.",
            exo_files.len(),
            out_dir.display()
        )
        .green()
    );
    Ok(())
}

/// Load defaults from the config file; a missing file is fine, a broken one
/// falls back to defaults with a warning.
fn load_config(path: &Path) -> OverlayConfig {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                OverlayConfig::default()
            }
        },
        Err(_) => OverlayConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::parse_from(["sekai-overlay", "chcy-1234"]);
        assert_eq!(args.chart_id, "chcy-1234");
        assert!(args.team_power.is_none());
        assert!(args.ap_combo.is_none());
    }

    #[test]
    fn test_parse_full() {
        let args = Args::parse_from([
            "sekai-overlay",
            "chcy-1234",
            "--team-power",
            "300000",
            "--ap-combo",
            "false",
            "--out-dir",
            "out/_chartId_",
            "--assets",
            "custom-assets",
        ]);
        assert_eq!(args.team_power, Some(300_000));
        assert_eq!(args.ap_combo, Some(false));
        assert_eq!(args.out_dir.as_deref(), Some("out/_chartId_"));
        assert_eq!(args.assets, Some(PathBuf::from("custom-assets")));
    }

    #[test]
    fn test_load_config_missing_file_defaults() {
        let config = load_config(Path::new("/nonexistent/overlay.toml"));
        assert_eq!(config.team_power, 250_000);
    }
}
