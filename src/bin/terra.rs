//! Terra - terminal client entry point

use std::path::PathBuf;

use clap::Parser;
use terrasearch::runner::{run_check, run_save_token, run_tui, AppConfig};

/// Terrasearch - Earth science data search in your terminal 🌍
#[derive(Parser, Debug)]
#[command(name = "terra")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose (trace-level) logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Path to the config file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Mount routes under a portal
    #[arg(long)]
    portal: Option<String>,

    /// Seed the current project with collection ids
    #[arg(long, value_delimiter = ',')]
    project: Vec<String>,

    /// Probe the coverage service and exit
    #[arg(long)]
    check: bool,

    /// Store a session token obtained from the login service, then exit
    #[arg(long, value_name = "TOKEN")]
    save_token: Option<String>,
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        AppConfig {
            debug: args.debug,
            verbose: args.verbose,
            config_path: args.config.clone(),
            portal: args.portal.clone(),
            project_ids: args.project.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::from(&args);

    if let Some(token) = &args.save_token {
        run_save_token(token)
    } else if args.check {
        run_check(config)
    } else {
        run_tui(config)
    }
}
