//! Demo CLI: read one value of the named type from stdin and echo it.
//!
//! Exit codes: 0 success, 1 wrong argument count, 2 unknown type name,
//! 3 the getter returned its sentinel, 4 output failure.

mod error;
mod types;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use crate::error::DemoError;
use crate::types::{TypeName, usage};

/// Read one value of a chosen type through stdprompt.
#[derive(Debug, Parser)]
#[command(name = "stdprompt-demo")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Print the table of type names.
    #[arg(long)]
    help: bool,
    /// Type to read (see --help).
    #[arg(value_name = "TYPE")]
    types: Vec<String>,
}

fn main() -> ExitCode {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "stdprompt-demo".to_string());

    match run(&program) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&program, &err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(program: &str) -> Result<(), DemoError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => return Err(unparsed_args(program)),
    };

    let name = match (cli.help, cli.types.as_slice()) {
        (true, []) => {
            let mut out = std::io::stdout();
            out.write_all(usage(program).as_bytes())?;
            out.flush()?;
            return Ok(());
        }
        (false, [name]) => name,
        _ => {
            return Err(DemoError::Usage {
                program: program.to_string(),
            });
        }
    };

    let type_name = TypeName::from_name(name).ok_or_else(|| DemoError::UnknownType {
        name: name.clone(),
    })?;

    let mut out = std::io::stdout();
    writeln!(out, "\nType  : {}", type_name.name())?;
    // Failure messages go to stdout, right under the prompt.
    let rendered = match type_name.read_and_render() {
        Ok(rendered) => rendered,
        Err(err @ DemoError::Sentinel { .. }) => {
            writeln!(out, "Error: {err}\n")?;
            out.flush()?;
            return Err(err);
        }
        Err(err) => return Err(err),
    };
    out.write_all(b"Output: ")?;
    out.write_all(&rendered)?;
    out.write_all(b"\n\n")?;
    out.flush()?;
    Ok(())
}

/// Arguments clap refused (e.g. an unknown `-x` flag) are judged by count
/// alone: a single one is an unknown type name.
fn unparsed_args(program: &str) -> DemoError {
    let mut args = std::env::args().skip(1);
    match (args.next(), args.next()) {
        (Some(name), None) => DemoError::UnknownType { name },
        _ => DemoError::Usage {
            program: program.to_string(),
        },
    }
}

fn report(program: &str, err: &DemoError) {
    match err {
        // Already printed on stdout.
        DemoError::Sentinel { .. } => {}
        DemoError::Usage { .. } => {
            eprintln!("\n{err}");
        }
        DemoError::UnknownType { .. } => {
            eprintln!("\nError: {err}");
        }
        DemoError::Io(_) => {
            eprintln!("stdprompt-demo: {err}");
        }
    }
    if err.wants_help_hint() {
        eprintln!("Run '{program} --help' for list of types.\n");
    }
}
