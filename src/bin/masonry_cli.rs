//! CLI tool for masonry-grid - lays out a JSON document and outputs the report
//!
//! Usage:
//!   masonry_cli <document.json>                # Output JSON to stdout
//!   masonry_cli <document.json> -o report.json # Output JSON to file
//!
//! Set `RUST_LOG=masonry_grid=debug` to see layout pass logs on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use masonry_grid::{run_document, LayoutDocument};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: masonry_cli <document.json> [-o report.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read input file
    let json = match fs::read_to_string(input_path) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let document = match LayoutDocument::from_json(&json) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error parsing document: {}", e);
            std::process::exit(1);
        }
    };

    let report = match run_document(&document) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error laying out document: {}", e);
            std::process::exit(1);
        }
    };

    // Serialize to JSON
    let output = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(output.as_bytes()).unwrap();
            println!();
        }
    }
}
