use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ringspin_core::SpinnerOverrides;
use ringspin_tui::app::App;
use ringspin_tui::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "ringspin", version, about = "A twelve-spoke ring spinner in the terminal")]
struct Cli {
    /// Path to config file (default: ~/.config/ringspin/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme name: dark, light, matrix or a file under ~/.config/ringspin/themes
    #[arg(short, long)]
    theme: Option<String>,

    /// Color of the leading spoke
    #[arg(long)]
    active_color: Option<String>,

    /// Color of idle spokes
    #[arg(long)]
    fill_color: Option<String>,

    /// Milliseconds per full revolution
    #[arg(long)]
    cycle_time: Option<u64>,

    /// Number of fading spokes behind the leading one
    #[arg(long)]
    tail_count: Option<u32>,

    /// Spoke width, in braille dots
    #[arg(long)]
    step_width: Option<u32>,

    /// Spoke corner radius, in braille dots
    #[arg(long)]
    corner_radius: Option<u32>,

    /// Fraction of the radius left empty at the center
    #[arg(long)]
    knock_out_ratio: Option<f64>,

    /// Do not start spinning on launch
    #[arg(long)]
    no_autostart: bool,

    /// Log level for ./logs/ringspin.log (overrides config)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the effective config (file plus flags) back to the config path and exit
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    fn spinner_overrides(&self) -> SpinnerOverrides {
        SpinnerOverrides {
            active_color: self.active_color.clone(),
            fill_color: self.fill_color.clone(),
            cycle_time: self.cycle_time,
            tail_count: self.tail_count,
            step_width: self.step_width,
            corner_radius: self.corner_radius,
            knock_out_ratio: self.knock_out_ratio,
        }
    }

    /// Layer the flags over a loaded config.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(theme) = &self.theme {
            config.general.theme = theme.clone();
        }
        if let Some(level) = &self.log_level {
            config.general.log_level = level.clone();
        }
        if self.no_autostart {
            config.general.autostart = false;
        }
        config.spinner.overlay(&self.spinner_overrides());
    }
}

/// Save to `path`, or to the default location when none is given.
fn save_config(config: &AppConfig, path: Option<&Path>) -> Result<()> {
    let saved = match path {
        Some(path) => config.save_to(path),
        None => config.save(),
    };
    saved.map_err(anyhow::Error::msg)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    cli.apply_to(&mut config);

    if cli.save_config {
        save_config(&config, cli.config.as_deref())?;
        if let Some(path) = cli.config.clone().or_else(AppConfig::default_path) {
            println!("Config written to {}", path.display());
        }
        return Ok(());
    }

    // Initialize logging to ./logs/ directory
    let log_dir = PathBuf::from("./logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::File::create(log_dir.join("ringspin.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("ringspin={}", config.general.log_level).parse()?),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    info!("ringspin starting");
    if config.first_launch {
        info!("no config file found, using defaults");
    }

    let mut app = App::new(config)?;
    app.run()?;

    info!("ringspin exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "ringspin",
            "--tail-count",
            "3",
            "--active-color",
            "#ff0000",
            "--no-autostart",
        ]);
        assert!(cli.no_autostart);
        let overrides = cli.spinner_overrides();
        assert_eq!(overrides.tail_count, Some(3));
        assert_eq!(overrides.active_color.as_deref(), Some("#ff0000"));
        assert_eq!(overrides.cycle_time, None);
    }

    #[test]
    fn test_cli_without_flags_overrides_nothing() {
        let cli = Cli::parse_from(["ringspin"]);
        assert!(cli.spinner_overrides().is_empty());
        assert!(cli.config.is_none());
        assert!(!cli.save_config);
    }

    #[test]
    fn test_flags_apply_over_config() {
        let cli = Cli::parse_from(["ringspin", "--theme", "matrix", "--cycle-time", "600"]);
        let mut config = AppConfig::default();
        config.spinner.cycle_time = Some(900);
        config.spinner.tail_count = Some(2);
        cli.apply_to(&mut config);
        assert_eq!(config.general.theme, "matrix");
        assert_eq!(config.spinner.cycle_time, Some(600));
        assert_eq!(config.spinner.tail_count, Some(2));
        assert!(config.general.autostart);
    }

    #[test]
    fn test_save_config_writes_effective_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cli = Cli::parse_from(["ringspin", "--save-config", "--tail-count", "4", "--no-autostart"]);
        let mut config = AppConfig::load_from(&path);
        cli.apply_to(&mut config);
        save_config(&config, Some(&path)).unwrap();

        let saved = AppConfig::load_from(&path);
        assert!(!saved.first_launch);
        assert_eq!(saved.spinner.tail_count, Some(4));
        assert!(!saved.general.autostart);
    }
}
