//! CLI tool for tablegrip - reads a table description and prints its layout
//!
//! Usage:
//!   tablegrip_cli <table.json>                          # Layout report to stdout
//!   tablegrip_cli <table.json> -o out.json              # Layout report to file
//!   tablegrip_cli <table.json> --drag col <index> <px>  # Planned sizes after a drag
//!
//! Set `RUST_LOG=debug` to see how sizes were deduced.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use tablegrip::report::{describe, simulate_drag, TableDescription};
use tablegrip::Axis;

const USAGE: &str =
    "Usage: tablegrip_cli <table.json> [-o output.json] [--drag col|row <index> <delta>]";

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        fail(USAGE);
    }

    let input_path = &args[1];
    let mut output_path: Option<&String> = None;
    let mut drag: Option<(Axis, usize, f32)> = None;

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-o" => output_path = Some(rest.next().unwrap_or_else(|| fail(USAGE))),
            "--drag" => {
                let axis = rest
                    .next()
                    .and_then(|a| Axis::parse(a))
                    .unwrap_or_else(|| fail("--drag expects an axis: col or row"));
                let index = rest
                    .next()
                    .and_then(|i| i.parse().ok())
                    .unwrap_or_else(|| fail("--drag expects a boundary index"));
                let delta = rest
                    .next()
                    .and_then(|d| d.parse().ok())
                    .unwrap_or_else(|| fail("--drag expects a delta in pixels"));
                drag = Some((axis, index, delta));
            }
            other => fail(&format!("Unknown argument: {other}\n{USAGE}")),
        }
    }

    // Read input file
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => fail(&format!("Error reading {input_path}: {e}")),
    };

    let description = match TableDescription::from_json(&text) {
        Ok(d) => d,
        Err(e) => fail(&format!("Error decoding {input_path}: {e}")),
    };

    // Layout or drag plan, as JSON
    let json = match drag {
        Some((axis, index, delta)) => simulate_drag(&description, axis, index, delta)
            .and_then(|plan| Ok(serde_json::to_string_pretty(&plan)?)),
        None => describe(&description).and_then(|report| Ok(serde_json::to_string_pretty(&report)?)),
    };
    let json = match json {
        Ok(j) => j,
        Err(e) => fail(&format!("Error: {e}")),
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                fail(&format!("Error writing {path}: {e}"));
            }
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
