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

//! Holdout-tuned k-nearest-neighbors classification for four-feature records.
//!
//! A labelled dataset is split into validation and reference subsets, every
//! k in a range is scored on the validation subset, and the best k is used to
//! label a second, unlabelled dataset against the full training set.

pub mod classifier;
pub mod data;
pub mod distance;
pub mod errors;
pub mod neighbors;
pub mod pipeline;
pub mod record;
pub mod validation;
mod workers;

pub use classifier::{DEFAULT_TIE_BREAK, TieBreak, accuracy, classify};
pub use data::{CsvRecordSink, CsvRecordSource, RecordSink, RecordSource};
pub use distance::euclidean_distance;
pub use errors::{CsvError, DataError, ModelError, PipelineError};
pub use neighbors::select;
pub use pipeline::{Pipeline, PipelineBuilder, PipelineOutcome};
pub use record::{Dataset, Label, N_FEATURES, NeighborCandidate, Record};
pub use validation::{AccuracyReport, KAccuracy, Validator};
pub use workers::default_threads;

pub use ndarray;
pub use rand;
