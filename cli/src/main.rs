use anyhow::Result;
use clap::Parser;

use rhino_config::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    match args.command {
        cli::Command::Completions(ref opts) => return commands::completions::run(opts),
        cli::Command::Version => {
            commands::version::run();
            return Ok(());
        }
        _ => {}
    }

    let name = args.command.log_name();
    logging::init_subscriber(args.verbose, name);
    let log = logging::Logger::new(name);

    match args.command {
        cli::Command::Enable(ref opts) => commands::enable::run(&args.global, opts, &log),
        cli::Command::Disable(ref opts) => commands::disable::run(&args.global, opts, &log),
        cli::Command::SwitchKernel(ref cmd) => {
            commands::switch_kernel::run(&args.global, cmd, &log)
        }
        cli::Command::Status => commands::status::run(&args.global, &log),
        cli::Command::Completions(_) | cli::Command::Version => Ok(()),
    }
}
