use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = pdu_passwd::cli::Cli::parse();
    cli.run()
}
