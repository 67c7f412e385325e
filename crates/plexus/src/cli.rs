//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{WrapErr, bail};
use plexus_config::Config;
use plexus_core::{AnimationSpeed, ColorTheme};
use plexus_field::ConnectorKind;

/// Drifting particle network for your terminal.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Config file to read instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of particles.
    #[arg(long, value_name = "N")]
    pub particles: Option<usize>,

    /// Link particles closer than this many pixels.
    #[arg(long, value_name = "PX")]
    pub link_distance: Option<f64>,

    /// Seed for a reproducible layout.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Color theme (violet, cyan, emerald, amber, rose, mono).
    #[arg(long, value_parser = parse_theme)]
    pub theme: Option<ColorTheme>,

    /// Animation speed (slow, normal, fast).
    #[arg(long, value_parser = parse_speed)]
    pub speed: Option<AnimationSpeed>,

    /// Find links with a spatial grid instead of comparing every pair.
    #[arg(long)]
    pub grid: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Load the config file and layer the command line on top.
    pub fn load_config(&self) -> color_eyre::Result<Config> {
        let mut config = match &self.config {
            Some(path) if !path.exists() => bail!("config file {} does not exist", path.display()),
            Some(path) => Config::load(path)?,
            None => Config::load_or_default()?,
        };
        self.apply(&mut config);
        config.validate().wrap_err("invalid command line options")?;
        Ok(config)
    }

    /// Override config values with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(particles) = self.particles {
            config.particles = particles;
        }
        if let Some(distance) = self.link_distance {
            config.link_distance = distance;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if self.grid {
            config.connector = ConnectorKind::Grid;
        }
    }
}

fn parse_theme(value: &str) -> Result<ColorTheme, String> {
    ColorTheme::ALL
        .into_iter()
        .find(|theme| theme.name().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown theme `{value}`"))
}

fn parse_speed(value: &str) -> Result<AnimationSpeed, String> {
    [AnimationSpeed::Slow, AnimationSpeed::Normal, AnimationSpeed::Fast]
        .into_iter()
        .find(|speed| speed.name().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown speed `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "plexus",
            "--particles",
            "12",
            "--link-distance",
            "90",
            "--seed",
            "4",
            "--theme",
            "Rose",
            "--speed",
            "fast",
            "--grid",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.particles, 12);
        assert_eq!(config.link_distance, 90.0);
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.theme, ColorTheme::Rose);
        assert_eq!(config.speed, AnimationSpeed::Fast);
        assert_eq!(config.connector, ConnectorKind::Grid);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["plexus"]).unwrap();
        let mut config = Config {
            particles: 33,
            theme: ColorTheme::Mono,
            ..Config::default()
        };
        cli.apply(&mut config);
        assert_eq!(config.particles, 33);
        assert_eq!(config.theme, ColorTheme::Mono);
        assert_eq!(config.connector, ConnectorKind::BruteForce);
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert!(Cli::try_parse_from(["plexus", "--theme", "plaid"]).is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let cli = Cli::try_parse_from(["plexus", "--config", "/nonexistent/plexus.toml"]).unwrap();
        assert!(cli.load_config().is_err());
    }
}
