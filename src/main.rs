use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use clap::Parser;

/// mython runs programs written in Mython, a small indentation-structured
/// scripting language with classes and single inheritance.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a Mython source file; standard input is read when omitted.
    source: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let source = match args.source {
        Some(path) => fs::read_to_string(&path).unwrap_or_else(|_| {
                          eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                    path.display());
                          std::process::exit(1);
                      }),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).unwrap_or_else(|error| {
                                                       eprintln!("Failed to read standard input: {error}");
                                                       std::process::exit(1);
                                                   });
            buffer
        },
    };

    let mut stdout = io::stdout().lock();
    if let Err(error) = mython::run(&source, &mut stdout) {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
