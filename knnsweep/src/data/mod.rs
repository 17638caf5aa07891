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

pub mod csv;

pub use self::csv::{CsvRecordSink, CsvRecordSource};

use crate::record::Dataset;

/// A supplier of records for the pipeline.
///
/// Implementors decide where records come from; the pipeline only asks for
/// the labelled training set and the unlabelled set to predict. Any error
/// returned here aborts the run.
///
/// # Associated Types
/// - `Error`: The error type returned by the load methods.
pub trait RecordSource {
    /// The error type returned by the load methods.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads the labelled training records, in file order.
    fn labeled(&mut self) -> Result<Dataset, Self::Error>;

    /// Loads the records awaiting prediction, in file order.
    fn unlabeled(&mut self) -> Result<Dataset, Self::Error>;
}

/// A consumer of the predicted records.
///
/// Implementors must persist one row per record, preserving order.
pub trait RecordSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write(&mut self, records: &Dataset) -> Result<(), Self::Error>;
}
