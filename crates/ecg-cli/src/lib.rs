/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The `ecg-digitize` command-line front end: read an image and a lead-map
//! config, run [`ecg_digitize::pipeline::digitize`], write the signals (and,
//! optionally, overlay previews) back out.
//!
//! Structured the way `zune-bin` is: a thin `main` in the workspace root
//! binary crate calls into this library's [`main`], which owns argument
//! parsing, logging setup, and the actual workflow.

use std::path::Path;

use clap::ArgMatches;
use log::{error, info, Level};

use crate::errors::CliError;
use crate::export::Delimiter;

pub mod cmd_args;
pub mod config;
pub mod errors;
pub mod export;
pub mod image_io;

/// Set up the logger from whichever of `--debug`/`--trace`/`--warn`/`--info`
/// was passed, defaulting to `Warn` when none were, matching `zune-bin`'s own
/// `global_options::setup_logger`.
fn setup_logger(options: &ArgMatches) {
    let log_level = if *options.get_one::<bool>("debug").unwrap() {
        Level::Debug
    } else if *options.get_one::<bool>("trace").unwrap() {
        Level::Trace
    } else if *options.get_one::<bool>("warn").unwrap() {
        Level::Warn
    } else if *options.get_one::<bool>("info").unwrap() {
        Level::Info
    } else {
        Level::Warn
    };

    simple_logger::init_with_level(log_level).unwrap();
    info!("Initialized logger");
    info!("Log level: {log_level}");
}

fn delimiter_from_name(name: &str) -> Delimiter {
    match name {
        "comma" => Delimiter::Comma,
        "space" => Delimiter::Space,
        _ => Delimiter::Tab
    }
}

fn read_to_string(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|source| CliError::Io { path: path.display().to_string(), source })
}

fn read_to_bytes(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Io { path: path.display().to_string(), source })
}

fn run(options: &ArgMatches) -> Result<(), CliError> {
    let input_path = Path::new(options.get_one::<std::ffi::OsString>("in").unwrap());
    let config_path = Path::new(options.get_one::<std::ffi::OsString>("config").unwrap());
    let out_path = Path::new(options.get_one::<std::ffi::OsString>("out").unwrap());
    let delimiter = delimiter_from_name(options.get_one::<String>("delimiter").unwrap());
    let preview_dir = options.get_one::<std::ffi::OsString>("preview-dir").map(Path::new);

    let input_bytes = read_to_bytes(input_path)?;
    let image = image_io::decode(&input_path.display().to_string(), &input_bytes)?;
    info!("Decoded input image '{}': {:?}", input_path.display(), image.dimensions());

    let config_json = read_to_string(config_path)?;
    let params = config::parse(&config_path.display().to_string(), &config_json)?;
    info!("Parsed lead-map config with {} lead(s)", params.leads.len());

    let output = ecg_digitize::pipeline::digitize(&image, &params)?;
    info!("Digitized {} lead(s)", output.signals.len());

    export::write_signals(out_path, &output.signals, delimiter)?;
    info!("Wrote signals to '{}'", out_path.display());

    if let Some(dir) = preview_dir {
        export::write_previews(dir, &output.previews)?;
        info!("Wrote {} preview(s) to '{}'", output.previews.len(), dir.display());
    }

    Ok(())
}

/// Parse arguments, run the digitization workflow, and report the outcome.
///
/// Returns `0` on success and `1` on failure, following the convention of a
/// library-owned `main` consumed by a thin binary entry point, as `zune-bin`
/// does with its own `pub fn main()`.
#[must_use]
pub fn main() -> i32 {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    setup_logger(&options);

    match run(&options) {
        Ok(()) => 0,
        Err(err) => {
            error!("Could not complete digitization: {err:?}");
            1
        }
    }
}
