use clap::{Arg, Command};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use gedfix::{fixing, output, parsing, problem};

fn main() -> ExitCode {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let matches = Command::new("gedfix")
        .version(VERSION)
        .about("Fix GEDCOM files exported by the EasyTree genealogy program.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("source")
                .required(true)
                .help("The GEDCOM file as exported from EasyTree."),
        )
        .arg(
            Arg::new("destination")
                .required(true)
                .help("The filename to write the repaired GEDCOM file to."),
        )
        .get_matches();

    let (Some(source), Some(destination)) = (
        matches.get_one::<String>("source"),
        matches.get_one::<String>("destination"),
    ) else {
        return ExitCode::FAILURE;
    };

    let source = Path::new(source);
    let destination = Path::new(destination);

    let content = match parsing::load(source) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            return ExitCode::FAILURE;
        }
    };

    let document = match fixing::repair(&content) {
        Ok(document) => document,
        Err(error) => {
            eprintln!("{}", problem::concise_repair_error(&error, source));
            return ExitCode::FAILURE;
        }
    };

    let file = match File::create(destination) {
        Ok(file) => file,
        Err(error) => {
            eprintln!("{}", problem::concise_writing_error(&error, destination));
            return ExitCode::FAILURE;
        }
    };

    let mut writer = BufWriter::new(file);

    let result = output::write(&document, &mut writer)
        .and_then(|()| writer.flush());
    if let Err(error) = result {
        eprintln!("{}", problem::concise_writing_error(&error, destination));
        return ExitCode::FAILURE;
    }

    debug!("Wrote repaired file: {}", destination.display());

    ExitCode::SUCCESS
}
