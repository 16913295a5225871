pub mod check;
pub mod probe;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use reachr_common::config::Config;

#[derive(Parser)]
#[command(name = "reachr")]
#[command(about = "Asserts which addresses are reachable and which are not.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Reduce output, repeat for less (-qq only shows failures)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Increase log verbosity, repeat for more
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Skip the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe every address and check it against the allow/deny policy
    #[command(alias = "c")]
    Check(CheckArgs),
    /// Dial a single address and show how the attempt ended
    #[command(alias = "p")]
    Probe {
        /// Address in host:port form
        addr: String,
        /// Connection timeout in milliseconds
        #[arg(short, long, default_value_t = 1000)]
        timeout: u64,
    },
}

#[derive(Args)]
pub struct CheckArgs {
    /// Addresses that must accept a connection (repeatable, comma-separated)
    #[arg(short, long, value_name = "HOST:PORT")]
    pub allow: Vec<String>,

    /// Addresses that must refuse or drop a connection (repeatable, comma-separated)
    #[arg(short, long, value_name = "HOST:PORT")]
    pub deny: Vec<String>,

    /// JSON policy file with "allow", "deny" and optional "timeout_ms"
    #[arg(short, long, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Per-probe connection timeout in milliseconds, overrides the policy file
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Abort the whole run after this many seconds
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            quiet: self.quiet,
            json: self.json,
            no_banner: self.no_banner,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
