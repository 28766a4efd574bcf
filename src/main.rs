use std::{fs, path::PathBuf, process};

use clap::{ArgGroup, Parser};
use knight::{Completion, interpreter::io::StdIo};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// knight runs programs written in Knight, a tiny prefix-notation scripting
/// language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["expression", "file"])))]
struct Args {
    /// Runs the given program text.
    #[arg(short, long)]
    expression: Option<String>,

    /// Runs the program stored in a file.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Seeds RANDOM so runs are reproducible.
    #[arg(long)]
    seed: Option<u64>,
}

/// Installs a stderr logger when `RUST_LOG` is set, so program output on
/// stdout is never mixed with diagnostics.
fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let source = match (args.expression, args.file) {
        (Some(expression), _) => expression,
        (None, Some(path)) => fs::read_to_string(&path).unwrap_or_else(|_| {
                                                          eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                                                    path.display());
                                                          process::exit(1);
                                                      }),
        (None, None) => unreachable!("clap requires one program source"),
    };

    let io = args.seed.map_or_else(StdIo::new, StdIo::with_seed);

    match knight::run(&source, io) {
        Ok(Completion::Finished(_)) => {},
        Ok(Completion::Quit(status)) => process::exit(status),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}
