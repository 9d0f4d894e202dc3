//! Wikibase constraint renderer CLI
//!
//! Usage:
//!   wikibase-constraints [OPTIONS] [FILE]
//!
//! Options:
//!   -p, --property <ID>      Constrained property id (e.g. P30)
//!   -f, --format <FORMAT>    Output serialization: owl2 | rdf
//!   -o, --options <FILE>     Options file (TOML format)
//!   -q, --quiet              Suppress parse diagnostics
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use wikibase_constraints::{
    parse_constraints, render_document, OutputFormat, OutputOptions, PropertyId,
};

#[derive(Parser)]
#[command(name = "wikibase-constraints")]
#[command(about = "Render wiki constraint templates as RDF or OWL2 functional syntax")]
struct Cli {
    /// Input file with wiki markup (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Constrained property id, e.g. P30
    #[arg(short, long)]
    property: Option<String>,

    /// Output serialization
    #[arg(short, long)]
    format: Option<CliFormat>,

    /// Options file (TOML format)
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Suppress parse diagnostics
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliFormat {
    Owl2,
    Rdf,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Owl2 => OutputFormat::Owl2,
            CliFormat::Rdf => OutputFormat::Rdf,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Load the options file, then let flags override it
    let options = match &cli.options {
        Some(path) => match OutputOptions::from_file(path) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("Error loading options '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => OutputOptions::default(),
    };

    let format = cli.format.map(OutputFormat::from).unwrap_or(options.format);
    let diagnostics = !cli.quiet && options.diagnostics;

    let property = match cli.property.as_deref().or(options.property.as_deref()) {
        Some(id) => match PropertyId::new(id) {
            Ok(property) => property,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            eprintln!("Error: no property id given (use --property or an options file)");
            std::process::exit(1);
        }
    };

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let filename = cli
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());

    let (constraints, errors) = parse_constraints(&property, &source);

    if diagnostics {
        for error in &errors {
            eprintln!("{}", error.format(&source, &filename));
        }
    }

    // No recognized constraint is the normal case for most wiki text
    if constraints.is_empty() {
        return;
    }

    match render_document(&constraints, format) {
        Ok(document) => {
            print!("{}", document);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"wikibase-constraints - render wiki constraint templates as formal logic

USAGE:
    wikibase-constraints --property P30 [OPTIONS] [FILE]
    echo '<wiki markup>' | wikibase-constraints --property P30

OPTIONS:
    -p, --property   Constrained property id (e.g. P30)
    -f, --format     Output serialization: owl2 | rdf
    -o, --options    Options file (TOML)
    -q, --quiet      Suppress parse diagnostics
    -h, --help       Print help

QUICK START:
    echo '{{{{Constraint:Single value}}}}' | wikibase-constraints -p P30 -f owl2

Prints the OWL2 functional-syntax axioms for the constraint. Templates
that are not recognized constraints produce no output, which is the
normal case for most wiki text."#
    );
}
