use anyhow::Result;
use clap::{Parser, Subcommand};

use nextver::config;
use nextver::git::Git2Repository;
use nextver::release::{plan_release, ReleaseOptions, ReleasePlan};
use nextver::ui;

#[derive(Parser)]
#[command(
    name = "nextver",
    about = "Compute the next semantic version and changelog from conventional commits"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate the next version from Git history and print it to stdout
    Version(RunArgs),
    /// Generate a Markdown changelog from Git history and print it to stdout
    Changelog(RunArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    #[arg(long, default_value = ".", help = "Path to the project repository")]
    project_path: String,

    #[arg(long, help = "Fail if non-conventional commits are found")]
    strict: bool,

    #[arg(
        long = "ignore-pattern",
        help = "Commits containing this pattern will be ignored"
    )]
    ignore_pattern: Vec<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(help = "Mono-repo subdirectory to scope tags and commits to")]
    directory: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (run, want_changelog) = match &args.command {
        Command::Version(run) => (run, false),
        Command::Changelog(run) => (run, true),
    };

    let config = match config::load_config(run.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    // CLI flags override config file defaults.
    let options = ReleaseOptions {
        directory: run
            .directory
            .clone()
            .or_else(|| config.release.directory.clone()),
        strict: run.strict || config.release.strict,
        ignore_patterns: if run.ignore_pattern.is_empty() {
            config.release.ignore_patterns.clone()
        } else {
            run.ignore_pattern.clone()
        },
    };

    let repo = match Git2Repository::open(&run.project_path) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let plan = match plan_release(&repo, &options) {
        Ok(plan) => plan,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    report_previous(&plan);

    if want_changelog {
        ui::display_field("Next version:", &plan.next_version.to_string());
        println!("{}", plan.changelog);
    } else {
        ui::display_status("Changes:");
        eprintln!("{}", plan.changelog);
        println!("{}", plan.next_version);
    }

    Ok(())
}

fn report_previous(plan: &ReleasePlan) {
    match &plan.previous {
        Some((tag, version)) => {
            ui::display_field("Current tag:", tag);
            ui::display_field("Current version:", &version.to_string());
        }
        None => ui::display_status("No version tag found, using default first version"),
    }
}
