//! CLI command handling
//!
//! Dispatches CLI commands and formats their output.

use std::path::PathBuf;

use colored::Colorize;

use crate::browser::detect;
use crate::commands::Commands;
use crate::common::config::{Config, EnvConfig, EnvName};
use crate::common::{Error, Result};
use crate::scenario::{runner, steps};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run { env, headed, json } => run(env, headed, json).await,
        Commands::Check { env } => check(env),
        Commands::Steps => {
            list_steps();
            Ok(())
        }
    }
}

async fn run(env_name: EnvName, headed: bool, json: bool) -> Result<()> {
    let config = Config::load()?;
    let env = EnvConfig::load(env_name)?;

    let report = runner::run_journey(&config, &env, env_name, headed).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.render();
    }

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn check(env_name: EnvName) -> Result<()> {
    let lookup = |key: &str| std::env::var(key).ok();

    println!("\n{}", "Environment:".cyan());
    let missing = EnvConfig::missing(env_name, lookup);
    for key in env_name.required_keys() {
        if missing.contains(&key) {
            println!("  {} {} (missing)", "✗".red(), key);
        } else {
            println!("  {} {}", "✓".green(), key);
        }
    }

    println!("\n{}", "Browser:".cyan());
    let config = Config::load()?;
    let driver = std::env::var("DRIVER").ok().map(PathBuf::from);
    let explicit = driver.as_deref().or(config.browser.chrome_path.as_deref());
    let detection = detect::detect_browser(explicit);
    match &detection.path {
        Some(path) => println!("  {} {}", "✓".green(), path.display()),
        None => println!(
            "  {} no browser found\n\n{}",
            "✗".red(),
            detection.install_hint.dimmed()
        ),
    }

    if missing.is_empty() && detection.path.is_some() {
        println!("\n{}\n", "Ready".green().bold());
        Ok(())
    } else {
        Err(Error::Config(format!(
            "environment check failed for '{env_name}'"
        )))
    }
}

fn list_steps() {
    println!("\n{}", "Scenario steps:".cyan());
    for (i, step) in steps::all().iter().enumerate() {
        println!("  {}. {}: {}", i + 1, step.name(), step.description());
    }
    println!();
}
