mod backend;
mod commands;
mod common;
mod engine;
mod manifest;
mod ui;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::ui::OutputFormat;

/// Declarative package installer
#[derive(Parser, Debug)]
#[command(name = "yuki", author, version, about, long_about = None)]
struct Cli {
    /// Show debug output, including full installer output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to the config file (defaults to <config dir>/yuki/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install every package listed in a manifest, in manifest order
    Apply {
        /// Path to the YAML manifest
        manifest: PathBuf,
        /// Show what would be installed without running any installer
        #[arg(long)]
        dry_run: bool,
    },

    /// Check a manifest without installing anything
    Validate {
        /// Path to the YAML manifest
        manifest: PathBuf,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Apply { manifest, dry_run }) => {
            let config = commands::load_config(config_path)?;
            commands::handle_apply(&manifest, dry_run, &config)
        }
        Some(Commands::Validate { manifest }) => {
            let config = commands::load_config(config_path)?;
            commands::handle_validate(&manifest, &config)
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => commands::handle_config_path(config_path),
            ConfigCommands::Show => {
                let config = commands::load_config(config_path)?;
                commands::handle_config_show(&config)
            }
        },
        None => {
            println!("yuki: run with --help for usage");
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    if !color {
        colored::control::set_override(false);
    }
    ui::init(cli.output, color);
    ui::set_debug_mode(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
