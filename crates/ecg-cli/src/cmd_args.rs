/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Command-line argument definitions, built the same way `zune-bin` builds
//! its own `Command`: one `Arg` per flag, logging flags grouped under their
//! own help heading.

use std::ffi::OsString;

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("ecg-digitize")
        .author("ecg-digitize contributors")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Digitize a photographed or scanned paper ECG chart into per-lead signal traces")
        .next_line_help(false)
        .term_width(200)
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Chart image to read, PNG or JPEG")
            .action(ArgAction::Set)
            .value_parser(value_parser!(OsString))
            .required(true))
        .arg(Arg::new("config")
            .short('c')
            .long("config")
            .help("Lead-map config file, JSON")
            .action(ArgAction::Set)
            .value_parser(value_parser!(OsString))
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("out")
            .help("File to write the digitized signals to")
            .action(ArgAction::Set)
            .value_parser(value_parser!(OsString))
            .required(true))
        .arg(Arg::new("delimiter")
            .long("delimiter")
            .help("Field separator used in the signal export")
            .value_parser(["tab", "comma", "space"])
            .default_value("tab"))
        .arg(Arg::new("preview-dir")
            .long("preview-dir")
            .help("Directory to write one overlay preview PNG per lead into")
            .action(ArgAction::Set)
            .value_parser(value_parser!(OsString)))
        .args(add_logging_options())
}

fn add_logging_options() -> [Arg; 4] {
    [
        Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("Logging")
            .help("Display debug information and higher"),
        Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("Logging")
            .help("Display very verbose information"),
        Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("Logging")
            .help("Display warnings and errors only"),
        Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("Logging")
            .help("Display information about the digitization run")
    ]
}

#[test]
fn verify_cli() {
    create_cmd_args().debug_assert();
}
