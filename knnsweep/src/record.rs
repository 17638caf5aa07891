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

use std::fmt;

use ndarray::{Array2, ArrayView1, aview1};

use crate::errors::DataError;

/// Number of numeric features carried by every record.
pub const N_FEATURES: usize = 4;

/// A class token. Ordering is lexical over the token text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(String);

impl Label {
    pub fn new(token: impl Into<String>) -> Self {
        Label(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(token: &str) -> Self {
        Label(token.to_string())
    }
}

impl From<String> for Label {
    fn from(token: String) -> Self {
        Label(token)
    }
}

/// A four-feature sample with an optional class label.
///
/// Features are validated to be finite on construction. Labelled records are
/// ground truth; unlabelled ones receive their label once, from the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    features: [f64; N_FEATURES],
    label: Option<Label>,
}

impl Record {
    /// Creates a labelled record.
    pub fn labeled(
        features: [f64; N_FEATURES],
        label: impl Into<Label>,
    ) -> Result<Self, DataError> {
        Self::new(features, Some(label.into()))
    }

    /// Creates a record awaiting prediction.
    pub fn unlabeled(features: [f64; N_FEATURES]) -> Result<Self, DataError> {
        Self::new(features, None)
    }

    pub fn new(features: [f64; N_FEATURES], label: Option<Label>) -> Result<Self, DataError> {
        if let Some((i, &value)) = features.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(DataError::NonFiniteFeature { feature: i + 1, value });
        }
        Ok(Record { features, label })
    }

    pub fn features(&self) -> &[f64; N_FEATURES] {
        &self.features
    }

    pub fn feature_view(&self) -> ArrayView1<'_, f64> {
        aview1(&self.features)
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub(crate) fn set_label(&mut self, label: Label) {
        self.label = Some(label);
    }
}

/// A reference record's label paired with its distance to one query.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborCandidate {
    pub label: Label,
    pub distance: f64,
}

/// An ordered sequence of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Builds a dataset from an `(n, 4)` feature matrix and one optional label per row.
    pub fn from_parts(
        features: &Array2<f64>,
        labels: Vec<Option<Label>>,
    ) -> Result<Self, DataError> {
        if features.ncols() != N_FEATURES {
            return Err(DataError::DimensionMismatch {
                expected: N_FEATURES,
                actual: features.ncols(),
            });
        }
        if features.nrows() != labels.len() {
            return Err(DataError::LengthMismatch {
                features: features.nrows(),
                labels: labels.len(),
            });
        }

        let records = features
            .rows()
            .into_iter()
            .zip(labels)
            .map(|(row, label)| Record::new([row[0], row[1], row[2], row[3]], label))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Dataset { records })
    }

    /// Returns the feature block as an `(n, 4)` matrix.
    pub fn feature_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros((self.records.len(), N_FEATURES));
        for (mut row, record) in matrix.rows_mut().into_iter().zip(&self.records) {
            row.assign(&record.feature_view());
        }
        matrix
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub(crate) fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Dataset { records: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn record_rejects_non_finite_features() {
        let result = Record::unlabeled([0.0, f64::NAN, 1.0, 2.0]);
        assert!(matches!(result, Err(DataError::NonFiniteFeature { feature: 2, .. })));

        let result = Record::labeled([0.0, 1.0, 2.0, f64::INFINITY], "1");
        assert!(matches!(result, Err(DataError::NonFiniteFeature { feature: 4, .. })));
    }

    #[test]
    fn labels_order_lexically() {
        assert!(Label::from("0") < Label::from("1"));
        assert!(Label::from("10") < Label::from("9"));
        assert_eq!(Label::from("setosa").to_string(), "setosa");
    }

    #[test]
    fn from_parts_builds_records_in_row_order() {
        let features = array![[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]];
        let labels = vec![Some(Label::from("a")), None];
        let dataset = Dataset::from_parts(&features, labels).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].features(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(dataset.records()[0].label(), Some(&Label::from("a")));
        assert_eq!(dataset.records()[1].label(), None);
        assert_eq!(dataset.feature_matrix(), features);
    }

    #[test]
    fn from_parts_dimension_mismatch() {
        let features = array![[1.0, 2.0, 3.0]];
        let result = Dataset::from_parts(&features, vec![None]);
        assert!(matches!(result, Err(DataError::DimensionMismatch { expected: 4, actual: 3 })));
    }

    #[test]
    fn from_parts_length_mismatch() {
        let features = array![[1.0, 2.0, 3.0, 4.0]];
        let result = Dataset::from_parts(&features, vec![None, None]);
        assert!(matches!(result, Err(DataError::LengthMismatch { features: 1, labels: 2 })));
    }
}
