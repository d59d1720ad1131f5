use crate::list::{run_list, ListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use permit_list::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Permit List Service",
    about = "Serve and inspect permit application listings from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Fetch a permit listing once and print the response envelope
    List(ListArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::List(args) => run_list(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_when_no_subcommand() {
        let cli = Cli::try_parse_from(["permit-list-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_list_arguments() {
        let cli = Cli::try_parse_from(["permit-list-api", "list", "retail_legacy", "--pretty"])
            .expect("parses");
        match cli.command {
            Some(Command::List(args)) => {
                assert_eq!(args.permit_type, "retail_legacy");
                assert!(args.pretty);
            }
            other => panic!("expected list command, got {other:?}"),
        }
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["permit-list-api", "serve", "--port", "8080"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
