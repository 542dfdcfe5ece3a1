//! pupctl CLI - run, enable or disable the puppet agent
//!
//! A run prints the scrubbed agent output followed by the delta of
//! installed rpm packages across the run.

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::Parser;
use pupctl_core::{ConfigFile, Mode, Orchestrator, PuppetAgent, RunConfig, RunReport};
use pupctl_inventory::RpmDatabase;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pupctl")]
#[command(about = "pupctl - run the puppet agent and report the package delta")]
#[command(version)]
#[command(after_help = "EXIT CODES:
    0  Agent run succeeded, with or without changes
    1  Agent reported errors, or pupctl could not run it")]
struct Cli {
    /// Desired agent state: run, enable or disable
    #[arg(value_name = "STATE")]
    state: Mode,

    /// Append the installed package delta to a run (yes/no) [default: yes]
    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    package_diff: Option<bool>,

    /// Agent executable
    #[arg(long, value_name = "PATH", env = "PUPCTL_AGENT_BIN")]
    agent_bin: Option<PathBuf>,

    /// rpm executable used for package snapshots
    #[arg(long, value_name = "PATH", env = "PUPCTL_RPM_BIN")]
    rpm_bin: Option<PathBuf>,

    /// Config file (defaults to <config dir>/pupctl/config.json)
    #[arg(short, long, value_name = "PATH", env = "PUPCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            if let Err(e) = print_report(&report, cli.json) {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
            if report.failed {
                std::process::exit(1);
            }
        }
        Err(e) => {
            if cli.json {
                let failure = serde_json::json!({ "failed": true, "msg": format!("{e:#}") });
                println!("{failure:#}");
            } else {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout carries only agent output
fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Merge defaults, the config file and command-line overrides
fn build_config(cli: &Cli) -> Result<RunConfig> {
    let file = ConfigFile::discover(cli.config.as_deref())
        .context("Failed to load configuration")?
        .unwrap_or_default();

    let mut config = RunConfig::from_file(cli.state, &file);
    if let Some(package_diff) = cli.package_diff {
        config = config.inventory_diff(package_diff);
    }
    if let Some(agent_bin) = &cli.agent_bin {
        config.agent_bin.clone_from(agent_bin);
    }
    if let Some(rpm_bin) = &cli.rpm_bin {
        config.rpm_bin.clone_from(rpm_bin);
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<RunReport> {
    let config = build_config(cli)?;
    tracing::debug!(?config, "Resolved configuration");

    let agent = PuppetAgent::new(config.agent_bin.clone());
    let packages = RpmDatabase::new(config.rpm_bin.clone());
    let orchestrator = Orchestrator::new(&config, &agent, &packages, &config.exit_codes);

    orchestrator
        .execute()
        .with_context(|| format!("Failed to {} the agent", config.mode))
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(report).context("Failed to encode result")?;
        println!("{rendered}");
        return Ok(());
    }

    print!("{}", report.stdout);
    eprint!("{}", report.stderr);
    if report.failed {
        eprintln!("Error: Puppet encountered errors (rc {})", report.rc);
    }
    Ok(())
}
