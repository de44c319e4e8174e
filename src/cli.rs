use clap::Parser;
use std::time::Duration;

/// Environment variable overriding the delay before answering.
pub const TIMEOUT_ENV: &str = "AUTORESPOND_TIMEOUT";

/// Seconds to wait before answering when nothing overrides it.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Run an interactive program and answer its first prompt after a delay.
///
/// The program runs on a pseudo-terminal with its output shown live. After
/// the delay its latest output is inspected once: a prompt offering "all"
/// is answered with a select-all token, anything else with Enter. The
/// terminal is then handed back to you until the program exits.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "autorespond", version, about)]
pub struct Cli {
    /// Seconds to wait before inspecting the program's output.
    #[arg(long, value_name = "SECS", env = TIMEOUT_ENV, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Program to run, followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// The program to run and its arguments.
    pub fn program(&self) -> Option<(&str, &[String])> {
        let (command, args) = self.command.split_first()?;
        Some((command.as_str(), args))
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("autorespond").chain(args.iter().copied()))
    }

    #[test]
    fn missing_command_is_a_usage_error() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn command_and_args_are_split() {
        let cli = parse(&["codex", "--cd", "."]).unwrap();
        let (command, args) = cli.program().unwrap();
        assert_eq!(command, "codex");
        assert_eq!(args, ["--cd", "."]);
    }

    #[test]
    fn child_flags_are_not_parsed_as_ours() {
        let cli = parse(&["tool", "--timeout", "3", "--help"]).unwrap();
        assert_eq!(cli.command, ["tool", "--timeout", "3", "--help"]);
    }

    #[test]
    fn timeout_flag_before_command() {
        let cli = parse(&["--timeout", "3", "tool"]).unwrap();
        assert_eq!(cli.delay(), Duration::from_secs(3));
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let err = parse(&["--timeout", "soon", "tool"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
