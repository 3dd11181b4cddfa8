use std::io::BufRead;
use std::{fs, io};

use clap::Parser;
use kode::run_source;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// kode is a tree-walking interpreter for the Kode scripting language.
#[derive(Parser, Debug)]
#[command(about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Path to the Kode file to execute.
    #[arg(long, default_value = "main.kd")]
    run: String,

    /// Read the program from stdin until a line containing `exit`.
    #[arg(long = "runStdIn")]
    run_std_in: bool,

    /// Show the current version of Kode.
    #[arg(long)]
    version: bool,
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("Kode version: {VERSION}");
        return;
    }

    let source = if args.run_std_in {
        read_stdin()
    } else {
        fs::read_to_string(&args.run).unwrap_or_else(|_| {
                                         println!("Error: Could not find and read the file \
                                                   \"{}\".",
                                                  args.run);
                                         std::process::exit(1);
                                     })
    };

    if let Err(stack) = run_source(&source) {
        println!("{stack}");
        std::process::exit(1);
    }
}

/// Accumulates stdin lines until one reads `exit` once its spaces are
/// removed.
fn read_stdin() -> String {
    let mut code = String::new();
    for line in io::stdin().lock().lines() {
        let Ok(text) = line else { break };
        if text.replace(' ', "") == "exit" {
            break;
        }
        if !text.is_empty() {
            code.push_str(&text);
            code.push('\n');
        }
    }
    code
}
