// BSD 3-Clause License
//
// Copyright (c) 2025, BlackPortal ○
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use knnsweep::{CsvRecordSink, CsvRecordSource, Pipeline, default_threads};
use log::info;

/// Picks k by holdout validation on the training file, then labels the test file.
#[derive(Parser, Debug)]
#[command(name = "holdout", version, about, long_about = None)]
struct Cli {
    /// Labelled training CSV (x1,x2,x3,x4,y)
    #[arg(long, default_value = "data/DataTrain.csv")]
    train: PathBuf,

    /// Unlabelled CSV to predict (x1,x2,x3,x4)
    #[arg(long, default_value = "data/DataTest.csv")]
    test: PathBuf,

    /// Where predictions are written
    #[arg(long, short, default_value = "predictions.csv")]
    output: PathBuf,

    #[arg(long, default_value_t = 1)]
    k_min: usize,

    #[arg(long, default_value_t = 100)]
    k_max: usize,

    /// Number of training records held out for validation
    #[arg(long, default_value_t = 1000)]
    validation_size: usize,

    /// Seed for the validation split; derived from the clock when omitted
    #[arg(long, env = "KNNSWEEP_SEED")]
    seed: Option<u64>,

    /// Worker threads for the compute phase
    #[arg(long)]
    threads: Option<usize>,

    /// Input files have no header row
    #[arg(long)]
    no_headers: bool,

    /// Write x1,x2,x3,x4,y instead of the label alone
    #[arg(long)]
    full_rows: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let seed = match cli.seed {
        Some(seed) => seed,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs(),
    };
    info!("Using seed {}", seed);

    let pipeline = Pipeline::new()
        .k_range(cli.k_min, cli.k_max)
        .validation_size(cli.validation_size)
        .seed(seed)
        .threads(cli.threads.unwrap_or_else(default_threads))
        .build();

    let mut source = CsvRecordSource::new(&cli.train, &cli.test).with_headers(!cli.no_headers);
    let mut sink = CsvRecordSink::new(&cli.output).with_full_rows(cli.full_rows);

    let outcome = pipeline.run(&mut source, &mut sink)?;

    let best = outcome.report.best();
    println!("Best k: {} acc: {}", best.k, best.accuracy);
    println!("Predictions written to {}", cli.output.display());

    Ok(())
}
