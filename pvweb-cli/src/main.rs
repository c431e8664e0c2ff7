mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use pvweb_format::Base64Mode;

use cli::{Cli, Command};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let options = config::load_options(cli.config.as_deref())?;

    match cli.command {
        Command::Inspect {
            scene,
            width,
            height,
            lenient,
            format,
        } => {
            let options = config::apply_overrides(options, width, height, lenient);
            commands::inspect::run(&scene, options, format)
        }
        Command::Decode {
            payload,
            lenient,
            stream,
        } => {
            let mode = if lenient {
                Base64Mode::Lenient
            } else {
                options.base64_mode()
            };
            commands::decode::run(payload, mode, stream)
        }
    }
}
