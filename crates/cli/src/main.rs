// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario replay binary entry point.

use std::io::Write;

use clap::Parser;

use casescan::capture::CaptureLog;
use casescan::cli::Cli;
use casescan::output::write_outcome;
use casescan::output_diagnostic::{print_debug, print_error, print_warning, set_verbose};
use casescan::replay::Replay;
use casescan::scenario::Scenario;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    set_verbose(cli.verbose);

    let Some(path) = cli.scenario.clone() else {
        print_error("no scenario given (use --scenario or CASESCAN_SCENARIO)");
        std::process::exit(1);
    };

    let scenario = match Scenario::load(&path) {
        Ok(scenario) => scenario,
        Err(e) => {
            print_error(format_args!("{}: {}", path.display(), e));
            std::process::exit(1);
        }
    };

    let scanner = cli.scanner_config(scenario.scanner());
    if let Err(e) = scanner.validate() {
        print_error(e);
        std::process::exit(1);
    }
    print_debug(format_args!("scanner config: {:?}", scanner));

    let capture = match cli.capture_file.as_deref() {
        Some(capture_path) => match CaptureLog::with_file(capture_path) {
            Ok(log) => Some(log),
            Err(e) => {
                print_warning(format_args!(
                    "capture disabled, cannot open {}: {}",
                    capture_path.display(),
                    e
                ));
                None
            }
        },
        None => None,
    };

    let mut replay = Replay::new(scenario).with_scanner(scanner);
    if let Some(ms) = cli.lookup_delay_ms {
        replay = replay.with_lookup_delay_ms(ms);
    }
    if let Some(log) = capture {
        replay = replay.with_capture(log);
    }

    let outcome = replay.run().await;
    print_debug(format_args!(
        "replayed {} entries in {}ms of scenario time",
        outcome.entries.len(),
        outcome.elapsed_ms
    ));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_outcome(&mut out, &outcome, cli.output_format)?;
    out.flush()?;
    Ok(())
}
