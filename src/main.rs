//! Command line interface of the settings smoke tester.

use anyhow::Result;
use clap::Parser;
use settings_smoke::configuration::{Cli, Commands, Configuration};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Version => {
            println!("settings-smoke version: {}", clap::crate_version!());
            Ok(())
        }
        Commands::Run { .. } => {
            let config = Configuration::get().map_err(anyhow::Error::msg)?;
            settings_smoke::setup_logging(config);
            settings_smoke::smoke::run(config)
        }
    }
}
