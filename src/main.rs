use anyhow::Context;
use autorespond::cli::Cli;
use autorespond::logging::init_tracing;
use autorespond::responder;
use autorespond::AutorespondError;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = init_tracing() {
        tracing::info!(
            log = %path.display(),
            timeout = cli.timeout,
            command = ?cli.command,
            "autorespond starting"
        );
    }

    let report = match responder::run(&cli) {
        Ok(report) => report,
        Err(AutorespondError::MissingCommand) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "a command to run is required")
            .exit(),
        Err(e) => return Err(e).context("could not start the command"),
    };

    tracing::info!(exit_code = report.exit_code, "exiting");
    std::process::exit(report.exit_code);
}
