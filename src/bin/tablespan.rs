//! tablespan CLI - pandoc JSON filter expanding HTML colspan/rowspan
//!
//! Typical use is as a pandoc filter:
//!
//! ```text
//! pandoc input.html --filter tablespan -o output.pdf
//! ```

#[cfg(feature = "cli")]
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::process;
use tablespan::{expand_document, ConversionResult, ConversionWarning, ExpanderOptions};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tablespan")]
#[command(version)]
#[command(about = "Pandoc filter that expands HTML colspan/rowspan into plain cells", long_about = None)]
struct Cli {
    /// Target output format; pandoc passes it to every filter and the
    /// expansion does not depend on it
    #[allow(dead_code)]
    target_format: Option<String>,

    /// Read the pandoc JSON document from a file instead of stdin
    #[arg(short, long)]
    input: Option<String>,

    /// Write the transformed document to a file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Only rewrite raw blocks whose format is `html`
    #[arg(long)]
    html_only: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Strict mode: exit with error if any span is left open at end of input
    #[arg(long)]
    strict: bool,
}

#[cfg(feature = "cli")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> ConversionResult<()> {
    let input = match cli.input {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let options = if cli.html_only {
        ExpanderOptions::html_only()
    } else {
        ExpanderOptions::default()
    };

    let output = expand_document(&input, &options)?;

    if !cli.quiet && output.has_warnings() {
        print_warnings_to_stderr(&output.warnings);
    }

    // Nothing is written in strict mode when spans were left open
    if cli.strict && output.has_warnings() {
        eprintln!(
            "Error: {} span warning(s) in strict mode",
            output.warnings.len()
        );
        process::exit(1);
    }

    match cli.output {
        Some(ref path) => {
            let mut file = fs::File::create(path)?;
            file.write_all(output.content.as_bytes())?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(output.content.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_warnings_to_stderr(warnings: &[ConversionWarning]) {
    eprintln!("tablespan: {} warning(s):", warnings.len());
    for warning in warnings {
        eprintln!("  {}", warning);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install tablespan --features cli");
    eprintln!("  tablespan [TARGET_FORMAT] < input.json > output.json");
}
