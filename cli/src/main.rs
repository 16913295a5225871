mod commands;
mod terminal;

use std::process::ExitCode;
use std::time::Duration;

use commands::{CommandLine, Commands, check, probe};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);
    let cfg = commands.config();
    let quiet = if cfg.json { u8::MAX } else { cfg.quiet };

    print::banner(cfg.no_banner, quiet);

    match commands.command {
        Commands::Check(args) => {
            print::header("checking reachability policy", quiet);
            check::check(args, &cfg).await
        }
        Commands::Probe { addr, timeout } => {
            print::header("single probe", quiet);
            probe::probe(&addr, Duration::from_millis(timeout), &cfg).await
        }
    }
}
