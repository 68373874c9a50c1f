use std::process::ExitCode;

use clap::Parser;
use env_logger::init;
use fontinfo_cli::Cli;
use fontinfo_font_naming::Error;

fn main() -> ExitCode {
    init();
    match Cli::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<Error>() {
                Some(Error::EmptyStyle { .. }) => eprintln!("font style is empty."),
                _ => eprintln!("{e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
