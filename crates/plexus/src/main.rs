mod app;
mod cli;
mod logging;
mod view;

use clap::Parser;

use crate::app::App;
use crate::cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = cli.load_config()?;

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    logging::init(&config.log)?;
    tracing::info!(
        particles = config.particles,
        link_distance = config.link_distance,
        connector = ?config.connector,
        "starting plexus"
    );

    let terminal = ratatui::init();
    let result = App::new(terminal, &config).and_then(App::run);
    ratatui::restore();
    result
}
