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

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::classifier::{TieBreak, classify};
use crate::data::{RecordSink, RecordSource};
use crate::errors::{ModelError, PipelineError};
use crate::neighbors::select;
use crate::record::{Dataset, Label, Record};
use crate::validation::{AccuracyReport, Validator};
use crate::workers::{default_threads, map_chunks};

pub const DEFAULT_K_MIN: usize = 1;
pub const DEFAULT_K_MAX: usize = 100;
pub const DEFAULT_VALIDATION_SIZE: usize = 1000;

pub struct PipelineBuilder {
    k_min: usize,
    k_max: usize,
    validation_size: usize,
    seed: u64,
    num_threads: usize,
    tie_break: TieBreak,
}

impl PipelineBuilder {
    pub fn k_range(mut self, k_min: usize, k_max: usize) -> Self {
        self.k_min = k_min;
        self.k_max = k_max;
        self
    }

    pub fn validation_size(mut self, validation_size: usize) -> Self {
        self.validation_size = validation_size;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads.max(1);
        self
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            k_min: self.k_min,
            k_max: self.k_max,
            validation_size: self.validation_size,
            seed: self.seed,
            num_threads: self.num_threads,
            tie_break: self.tie_break,
            validator: Validator::new()
                .with_tie_break(self.tie_break)
                .with_threads(self.num_threads),
        }
    }
}

/// Result of a full run: the sweep, the k it picked and the predicted records.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub report: AccuracyReport,
    pub best_k: usize,
    pub predictions: Dataset,
}

/// Selects k by holdout validation, then labels the unlabelled records with it.
pub struct Pipeline {
    k_min: usize,
    k_max: usize,
    validation_size: usize,
    seed: u64,
    num_threads: usize,
    tie_break: TieBreak,
    validator: Validator,
}

impl Pipeline {
    pub fn new() -> PipelineBuilder {
        PipelineBuilder {
            k_min: DEFAULT_K_MIN,
            k_max: DEFAULT_K_MAX,
            validation_size: DEFAULT_VALIDATION_SIZE,
            seed: 0,
            num_threads: default_threads(),
            tie_break: TieBreak::default(),
        }
    }

    /// Loads both datasets from `source`, picks k, predicts, and hands the
    /// labelled records to `sink`.
    ///
    /// Any failure aborts the run; nothing is written to `sink` unless every
    /// record was classified.
    pub fn run<S, W>(
        &self,
        source: &mut S,
        sink: &mut W,
    ) -> Result<PipelineOutcome, PipelineError>
    where
        S: RecordSource,
        W: RecordSink,
    {
        let training = source.labeled().map_err(|e| PipelineError::Source(Box::new(e)))?;
        let report = self.select_k(&training)?;
        let best_k = report.best().k;

        let unlabeled = source.unlabeled().map_err(|e| PipelineError::Source(Box::new(e)))?;
        let predictions = self.predict(unlabeled, &training, best_k)?;

        sink.write(&predictions).map_err(|e| PipelineError::Sink(Box::new(e)))?;
        Ok(PipelineOutcome { report, best_k, predictions })
    }

    /// Splits `training` with the configured seed and sweeps the configured k range.
    pub fn select_k(&self, training: &Dataset) -> Result<AccuracyReport, ModelError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        debug!("Splitting {} records with seed {}", training.len(), self.seed);
        let (validation, reference) =
            self.validator.split(training, self.validation_size, &mut rng)?;
        self.validator.sweep(&validation, &reference, self.k_min, self.k_max)
    }

    /// Labels every record of `unlabeled` by majority vote among its `k`
    /// nearest records in `training`. Record order is preserved.
    ///
    /// # Errors
    /// `ModelError::AlreadyLabeled` if any input record carries a label; no
    /// label is overwritten.
    pub fn predict(
        &self,
        mut unlabeled: Dataset,
        training: &Dataset,
        k: usize,
    ) -> Result<Dataset, ModelError> {
        if let Some(index) = unlabeled.iter().position(|record| record.label().is_some()) {
            return Err(ModelError::AlreadyLabeled { index });
        }

        let chunks = map_chunks(unlabeled.records(), self.num_threads, |chunk: &[Record]| {
            chunk
                .iter()
                .map(|record| classify(&select(record, training, k)?, self.tie_break))
                .collect::<Result<Vec<Label>, ModelError>>()
        })?;

        let labels = chunks.into_iter().flatten();
        for (record, label) in unlabeled.records_mut().iter_mut().zip(labels) {
            record.set_label(label);
        }
        info!("Predicted {} records with k = {}", unlabeled.len(), k);
        Ok(unlabeled)
    }
}
