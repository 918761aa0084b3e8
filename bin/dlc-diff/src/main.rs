// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dlc-diff
//!
//! Command-line driver for the model-diff engine.
//!
//! ## Usage
//! ```bash
//! # Summary plus hint lines only
//! dlc-diff --input_dlc_one ./models/fp32 --input_dlc_two ./models/int8
//!
//! # Full detail tables
//! dlc-diff --input_dlc_one ./models/fp32 --input_dlc_two ./models/int8 \
//!     --layers --parameters --dimensions --weights
//! ```
//!
//! Exit codes: 2 when an input path does not exist (checked before
//! parsing); 1 for any load or comparison failure, with only the error
//! message printed.

use anyhow::Context;
use clap::Parser;
use diff_engine::{DiffOptions, ModelDiff, Reporter};
use model_view::DlcLoader;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dlc-diff",
    about = "Compare two model containers and report structural and numerical differences",
    version
)]
struct Cli {
    /// Path to the first model container.
    #[arg(long = "input_dlc_one", value_name = "PATH")]
    input_dlc_one: PathBuf,

    /// Path to the second model container.
    #[arg(long = "input_dlc_two", value_name = "PATH")]
    input_dlc_two: PathBuf,

    /// Show the table of layers unique to each model.
    #[arg(long)]
    layers: bool,

    /// Show the parameter diff table for shared layers.
    #[arg(long)]
    parameters: bool,

    /// Show the dimension diff table for shared layers.
    #[arg(long)]
    dimensions: bool,

    /// Show the layers whose weight tensors differ.
    #[arg(long)]
    weights: bool,

    /// Enable verbose logging (repeat for more: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Existence is checked before any parsing happens.
    for path in [&cli.input_dlc_one, &cli.input_dlc_two] {
        if !path.exists() {
            tracing::error!("input path '{}' does not exist", path.display());
            std::process::exit(2);
        }
    }

    let one = DlcLoader::load(&cli.input_dlc_one)
        .with_context(|| format!("failed to load '{}'", cli.input_dlc_one.display()))?;
    let two = DlcLoader::load(&cli.input_dlc_two)
        .with_context(|| format!("failed to load '{}'", cli.input_dlc_two.display()))?;

    let options = DiffOptions {
        layers: cli.layers,
        parameters: cli.parameters,
        dimensions: cli.dimensions,
        weights: cli.weights,
    };

    let diff = ModelDiff::new(
        &one,
        &two,
        cli.input_dlc_one.display().to_string(),
        cli.input_dlc_two.display().to_string(),
    );

    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(stdout.lock());
    diff.run(options, &mut reporter)
        .context("failed to write report")?;

    Ok(())
}

/// Initializes tracing based on the `-v` count.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
