use clap::Parser;

mod cli;
mod commands;
mod config;
mod logging;
mod render;
mod shell;
mod snapshot;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = config::CliConfig::resolve(&cli)?;
    logging::init_logging(&config.log_level);
    if !config.color {
        colored::control::set_override(false);
    }
    commands::run_command(cli, &config)
}
