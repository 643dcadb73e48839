//! # posprint CLI
//!
//! Command-line interface for receipt encoding and printing.
//!
//! ## Usage
//!
//! ```bash
//! # Encode a description to raw ESC/POS bytes
//! posprint encode receipt.json -o receipt.bin
//!
//! # Show the laid-out lines without printing
//! posprint preview receipt.json
//!
//! # Print over the network (port 9100) or to a serial/RFCOMM device
//! posprint print receipt.json --host 192.168.1.50
//! posprint print receipt.json --device /dev/rfcomm0
//!
//! # Read the description from stdin with 80mm paper as the default
//! cat receipt.json | posprint --paper 80mm print - --host printer.local
//!
//! # Run the HTTP bridge
//! posprint serve --listen 0.0.0.0:8080 --host 192.168.1.50
//! ```
//!
//! Descriptions that carry `config.charsPerLine` use it; the
//! `--chars-per-line` / `--paper` flags only fill in when it is missing.

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use posprint::{
    PosPrintError, PrinterConfig, Receipt, document,
    layout::{LineKind, text},
    server::{self, PrinterTarget, ServerConfig},
    transport::network::DEFAULT_TIMEOUT_MS,
};

/// posprint - ESC/POS receipt formatter
#[derive(Parser, Debug)]
#[command(name = "posprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Chars per line for descriptions without a config
    #[arg(long, global = true, default_value_t = posprint::printer::DEFAULT_CHARS_PER_LINE)]
    chars_per_line: usize,

    /// Paper preset (58mm, 80mm, cols:N); overrides --chars-per-line
    #[arg(long, global = true, value_name = "PAPER")]
    paper: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a description into protocol bytes
    Encode {
        /// Description file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Write bytes here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the laid-out lines as plain text
    Preview {
        /// Description file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Encode a description and send it to a printer
    Print {
        /// Description file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Run the HTTP bridge
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct TargetArgs {
    /// Network printer, HOST or HOST:PORT (port defaults to 9100)
    #[arg(long, value_name = "HOST[:PORT]")]
    host: Option<String>,

    /// Serial, USB or RFCOMM device path
    #[arg(long, value_name = "PATH")]
    device: Option<PathBuf>,

    /// Network connect and write timeout
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,
}

impl TargetArgs {
    fn resolve(&self) -> Option<PrinterTarget> {
        if let Some(host) = &self.host {
            return Some(PrinterTarget::Network {
                address: host.clone(),
                timeout: Duration::from_millis(self.timeout_ms),
            });
        }
        self.device
            .as_ref()
            .map(|device| PrinterTarget::Serial { device: device.clone() })
    }
}

fn main() {
    // Logs go to stderr so `encode` can stream bytes on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PosPrintError> {
    let cli = Cli::parse();

    let default_config = match &cli.paper {
        Some(name) => PrinterConfig::by_name(name)?,
        None => PrinterConfig::new(cli.chars_per_line)?,
    };

    match cli.command {
        Commands::Encode { input, output } => {
            let receipt = load(&input, default_config)?;
            let bytes = receipt.to_bytes();
            match output {
                Some(path) => {
                    fs::write(&path, &bytes)?;
                    eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(&bytes)?;
                    stdout.flush()?;
                }
            }
        }

        Commands::Preview { input } => {
            let receipt = load(&input, default_config)?;
            print!("{}", preview(&receipt));
        }

        Commands::Print { input, target } => {
            let Some(target) = target.resolve() else {
                Cli::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "print needs a printer: pass --host or --device",
                    )
                    .exit();
            };

            let receipt = load(&input, default_config)?;
            println!("Printing to {}...", target.describe());
            let mut printer = target.open();
            let n = posprint::print(&receipt, &mut printer)?;
            println!("Printed successfully! ({} bytes)", n);
        }

        Commands::Serve { listen, target } => {
            let config = ServerConfig {
                listen_addr: listen,
                target: target.resolve(),
                default_config,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }
    }

    Ok(())
}

/// Read and parse a description from a file or stdin (`-`).
fn load(input: &Path, default_config: PrinterConfig) -> Result<Receipt, PosPrintError> {
    let description = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)?
    };
    Ok(document::parse_with_fallback(&description, Some(default_config))?)
}

/// Plain-text rendering of the laid-out receipt, framed to the line width.
fn preview(receipt: &Receipt) -> String {
    let width = receipt.config().chars_per_line();
    let edge = format!("+{}+\n", "-".repeat(width));
    let mut out = edge.clone();

    for line in receipt.layout() {
        match line.kind {
            LineKind::Text | LineKind::Divider => {
                let body = if text::display_width(&line.text) <= width {
                    text::pad(&line.text, width, line.align)
                } else {
                    line.text.clone()
                };
                let mut marks = String::new();
                if line.style.bold {
                    marks.push_str(" bold");
                }
                if line.style.underline {
                    marks.push_str(" underline");
                }
                out.push_str(&format!("|{}|{}\n", body, marks));
            }
            LineKind::LineFeed => {
                out.push_str(&format!("|{}|\n", " ".repeat(width)));
            }
            LineKind::PaperCut => {
                out.push_str(&edge);
                out.push_str(&format!("{:^w$}\n", "- cut -", w = width + 2));
                out.push_str(&edge);
            }
        }
    }

    out
}
