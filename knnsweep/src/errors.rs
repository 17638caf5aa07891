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

use thiserror::Error;

/// Precondition violations raised by the neighbor search, the vote and the validator.
#[derive(Error, Debug, PartialEq)]
pub enum ModelError {
    #[error("Reference set is empty")]
    EmptyReferenceSet,

    #[error("Invalid k: {k} (reference set holds {available} records)")]
    InvalidK { k: usize, available: usize },

    #[error("Invalid k range: [{min}, {max}]")]
    InvalidKRange { min: usize, max: usize },

    #[error("Validation size {requested} exceeds dataset size {available}")]
    ValidationSizeTooLarge { requested: usize, available: usize },

    #[error("Validation set is empty")]
    EmptyValidationSet,

    #[error("Record {index} has no label")]
    UnlabeledRecord { index: usize },

    #[error("Cannot vote on an empty neighbor set")]
    NoNeighbors,

    #[error("Length mismatch: {predictions} predictions, {actuals} actual labels")]
    LengthMismatch { predictions: usize, actuals: usize },

    #[error("Record {index} is already labeled")]
    AlreadyLabeled { index: usize },
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("Feature x{feature} is not finite: {value}")]
    NonFiniteFeature { feature: usize, value: f64 },

    #[error("Feature matrix has {actual} columns, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Feature matrix has {features} rows but {labels} labels were given")]
    LengthMismatch { features: usize, labels: usize },
}

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Failed to open file: {0}")]
    FileOpen(#[from] std::io::Error),

    #[error("Failed to write file: {0}")]
    Write(#[source] std::io::Error),

    #[error("CSV file is empty")]
    EmptyFile,

    #[error("Row {row} has {actual} columns, expected {expected}")]
    InsufficientColumns { row: usize, actual: usize, expected: usize },

    #[error("Row {row} has {actual} columns, at most {max} allowed")]
    TooManyColumns { row: usize, actual: usize, max: usize },

    #[error("Invalid numeric value '{value}' at row {row}, column {column}: {source}")]
    InvalidNumeric { value: String, row: usize, column: usize, source: std::num::ParseFloatError },

    #[error("Missing label at row {row}")]
    MissingLabel { row: usize },

    #[error("Failed to shape data into array: {0}")]
    ArrayShape(#[from] ndarray::ShapeError),

    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),
}

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures that abort a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Record source failed: {0}")]
    Source(#[source] BoxedError),

    #[error("Record sink failed: {0}")]
    Sink(#[source] BoxedError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
