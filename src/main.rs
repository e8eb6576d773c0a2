//! cardmark - HTML to Markdown converter for Yuque exports

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use cardmark::Converter;

#[derive(Parser)]
#[command(name = "cardmark")]
#[command(version, about = "Convert Yuque HTML exports to Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    cardmark doc.html doc.md                    Convert a file
    cardmark - < doc.html                       Read stdin, print Markdown
    cardmark --domain example.com doc.html      Resolve relative image URLs")]
struct Cli {
    /// Input HTML file, or - for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output Markdown file (prints to stdout when omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,

    /// Base domain for relative URLs
    #[arg(short, long, value_name = "URL")]
    domain: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(io::stderr)
        .init();

    match convert(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn convert(cli: &Cli) -> cardmark::Result<()> {
    let mut builder = Converter::builder().with_default_plugins();
    if let Some(domain) = &cli.domain {
        builder = builder.domain(domain.as_str());
    }
    let converter = builder.build()?;

    let markdown = if cli.input == "-" {
        converter.convert_reader(io::stdin().lock())?
    } else {
        converter.convert_reader(fs::File::open(&cli.input)?)?
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &markdown)?;
            if !cli.quiet {
                println!("Converted {} -> {}", cli.input, path);
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(markdown.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
