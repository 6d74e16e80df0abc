//! CLI command definitions
//!
//! Defines the clap commands for the regression suite binary.

use clap::Subcommand;

use crate::common::config::EnvName;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full regression journey against the portal
    Run {
        /// Target environment (selects URL/EMAIL/PASSWORD or their _PROD variants)
        #[arg(long, value_enum, default_value_t = EnvName::Dev)]
        env: EnvName,

        /// Show the browser window instead of running headless
        #[arg(long)]
        headed: bool,

        /// Print the run report as JSON instead of the human summary
        #[arg(long)]
        json: bool,
    },

    /// Validate environment variables and browser availability without driving the portal
    Check {
        /// Target environment to validate
        #[arg(long, value_enum, default_value_t = EnvName::Dev)]
        env: EnvName,
    },

    /// List the scenario steps in execution order
    Steps,
}
