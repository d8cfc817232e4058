//! Main entry point for the skelanim CLI

mod cli;
mod commands;
mod utils;

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use std::io;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Verbosity flags take precedence over RUST_LOG
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose > 0 {
        logger.filter_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        logger.filter_level(log::LevelFilter::Error);
    }
    logger.init();

    match cli.command {
        Commands::BuildAnimation { input, output } => commands::build::build_animation(input, output),
        Commands::BuildSkeleton { input, output } => commands::build::build_skeleton(input, output),
        Commands::Info { file, no_color } => commands::info::execute(file, no_color),
        Commands::Sample(args) => commands::sample::execute(args),
        Commands::Blend(args) => commands::blend::execute(args),
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
