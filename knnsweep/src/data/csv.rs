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

use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, info};
use ndarray::Array2;

use crate::data::{RecordSink, RecordSource};
use crate::errors::{CsvError, DataError};
use crate::record::{Dataset, Label, N_FEATURES};

/// Reads training and test records from two CSV files.
///
/// Training rows hold `x1,x2,x3,x4,y`. Test rows hold `x1,x2,x3,x4` and may
/// carry a fifth column, which is ignored. Rows with more than five columns
/// are rejected. The first row is treated as a header unless
/// `with_headers(false)` is set.
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    train_path: PathBuf,
    test_path: PathBuf,
    has_headers: bool,
}

impl CsvRecordSource {
    pub fn new(train_path: impl Into<PathBuf>, test_path: impl Into<PathBuf>) -> Self {
        CsvRecordSource {
            train_path: train_path.into(),
            test_path: test_path.into(),
            has_headers: true,
        }
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

impl RecordSource for CsvRecordSource {
    type Error = DataError;

    fn labeled(&mut self) -> Result<Dataset, DataError> {
        load_csv_common(&self.train_path, self.has_headers, true)
    }

    fn unlabeled(&mut self) -> Result<Dataset, DataError> {
        load_csv_common(&self.test_path, self.has_headers, false)
    }
}

fn load_csv_common<P: AsRef<Path>>(
    path: P,
    has_headers: bool,
    with_labels: bool,
) -> Result<Dataset, DataError> {
    let path = path.as_ref();
    debug!("Loading records from {:?}", path);
    let file = File::open(path).map_err(CsvError::from)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let expected = if with_labels { N_FEATURES + 1 } else { N_FEATURES };
    let max = N_FEATURES + 1;
    let mut feature_data: Vec<f64> = Vec::new();
    let mut labels: Vec<Option<Label>> = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(CsvError::from)?;
        let row = i + 1;
        let actual = record.len();
        if actual < expected {
            return Err(CsvError::InsufficientColumns { row, actual, expected }.into());
        }
        if actual > max {
            return Err(CsvError::TooManyColumns { row, actual, max }.into());
        }

        for column in 0..N_FEATURES {
            let value = &record[column];
            let parsed = value.parse::<f64>().map_err(|source| CsvError::InvalidNumeric {
                value: value.to_string(),
                row,
                column: column + 1,
                source,
            })?;
            feature_data.push(parsed);
        }

        let label = if with_labels {
            match record.get(N_FEATURES) {
                Some(token) if !token.is_empty() => Some(Label::from(token)),
                _ => return Err(CsvError::MissingLabel { row }.into()),
            }
        } else {
            None
        };
        labels.push(label);
    }

    if labels.is_empty() {
        return Err(CsvError::EmptyFile.into());
    }

    let features =
        Array2::from_shape_vec((labels.len(), N_FEATURES), feature_data).map_err(CsvError::from)?;
    let dataset = Dataset::from_parts(&features, labels)?;
    info!("Loaded {} records from {:?}", dataset.len(), path);
    Ok(dataset)
}

/// Writes records to a CSV file, one row per record, without a header.
///
/// By default only the label column is written; `with_full_rows(true)` writes
/// `x1,x2,x3,x4,y`.
#[derive(Debug, Clone)]
pub struct CsvRecordSink {
    path: PathBuf,
    full_rows: bool,
}

impl CsvRecordSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvRecordSink { path: path.into(), full_rows: false }
    }

    pub fn with_full_rows(mut self, full_rows: bool) -> Self {
        self.full_rows = full_rows;
        self
    }
}

impl RecordSink for CsvRecordSink {
    type Error = CsvError;

    fn write(&mut self, records: &Dataset) -> Result<(), CsvError> {
        debug!("Writing {} records to {:?}", records.len(), self.path);
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(&self.path)?;

        for record in records {
            let label = record.label().map(Label::as_str).unwrap_or_default();
            if self.full_rows {
                let mut row: Vec<String> = record.features().iter().map(f64::to_string).collect();
                row.push(label.to_string());
                writer.write_record(&row)?;
            } else {
                writer.write_record([label])?;
            }
        }

        writer.flush().map_err(CsvError::Write)?;
        info!("Wrote {} records to {:?}", records.len(), self.path);
        Ok(())
    }
}
