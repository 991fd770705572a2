// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SHOPGEN CLI - storefront layouts, schedules, BOMs and quotes as JSON.
//!
//! Reads one request (or an array of requests) from the file named by the
//! first argument, or from stdin, and writes the response envelope(s) to
//! stdout. Logs go to stderr.
//!
//! # Request types
//!
//! - `elevation` - elevation scene + door schedule (`"miniature": true` for thumbnails)
//! - `plan` - top-down scene, including corner openings
//! - `schedule` - door schedule only
//! - `bom` - project bill of materials
//! - `quote` - project quote
//! - `package` - every opening's drawings plus BOM and quote

use anyhow::Context;
use serde_json::Value;
use shopgen_processing::{process_values, Processor, Response};
use std::io::{Read, Write};
use tracing_subscriber::EnvFilter;

mod config;
mod error;

use config::Config;
use error::CliError;

fn main() -> anyhow::Result<()> {
    // stdout carries the response, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,shopgen_processing=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    tracing::info!(
        worker_threads = config.worker_threads,
        layout_config = ?config.layout_config,
        quote_valid_days = config.quote_valid_days,
        "Starting SHOPGEN"
    );

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("Failed to initialize rayon thread pool")?;

    let layout = config.load_layout()?;
    let processor = Processor::new(layout).with_quote_valid_days(config.quote_valid_days);

    let input = read_input(std::env::args().nth(1))?;
    let output = respond(&processor, &input)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes()).context("Failed to write stdout")?;
    stdout.write_all(b"\n").context("Failed to write stdout")?;
    Ok(())
}

fn read_input(path: Option<String>) -> Result<String, CliError> {
    match path.as_deref() {
        Some(path) if path != "-" => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_string(),
            source,
        }),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).map_err(CliError::Stdin)?;
            Ok(text)
        }
    }
}

/// Serialized response for the raw input text
fn respond(processor: &Processor, input: &str) -> Result<String, CliError> {
    if input.trim().is_empty() {
        let empty = Response {
            success: false,
            error: Some("No input data received".to_string()),
            output: None,
        };
        return Ok(serde_json::to_string(&empty)?);
    }
    let text = match serde_json::from_str::<Value>(input) {
        Ok(Value::Array(requests)) => serde_json::to_string(&process_values(processor, requests))?,
        Ok(request) => serde_json::to_string(&processor.handle_value(request))?,
        Err(_) => serde_json::to_string(&processor.handle_json(input))?,
    };
    Ok(text)
}
