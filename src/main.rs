use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use git_bump::config;
use git_bump::git::Git2Repository;
use git_bump::ui::{self, DialoguerPrompter};
use git_bump::VersionBumper;

#[derive(clap::Parser)]
#[command(
    name = "git-bump",
    version,
    about = "Bump the semantic version tag of the current repository and push it"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::env_logger::builder()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config =
        config::load_config(args.config.as_deref()).context("Could not load configuration")?;
    let repo = Git2Repository::open(".")?;

    let bumper = VersionBumper::new(repo, DialoguerPrompter::new(), config);
    bumper.run()?;
    Ok(())
}
