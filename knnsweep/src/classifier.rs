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

use std::collections::HashMap;

use crate::errors::ModelError;
use crate::record::{Label, NeighborCandidate};

/// How a vote is settled when several labels share the highest count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// The lexically greatest of the tied labels wins. For the `0`/`1` pair
    /// this hands every tie to `1`.
    GreatestLabel,
    /// The lexically smallest of the tied labels wins.
    LeastLabel,
    /// The tied label held by the nearest neighbor wins.
    NearestNeighbor,
}

pub const DEFAULT_TIE_BREAK: TieBreak = TieBreak::GreatestLabel;

impl Default for TieBreak {
    fn default() -> Self {
        DEFAULT_TIE_BREAK
    }
}

/// Majority vote over an ordered neighbor set.
///
/// Labels are whatever the neighbors carry; there is no fixed class list.
pub fn classify(neighbors: &[NeighborCandidate], tie_break: TieBreak) -> Result<Label, ModelError> {
    // label -> (votes, position of first occurrence)
    let mut class_counts: HashMap<&Label, (usize, usize)> = HashMap::new();
    for (position, neighbor) in neighbors.iter().enumerate() {
        class_counts.entry(&neighbor.label).or_insert((0, position)).0 += 1;
    }

    let winner =
        class_counts.into_iter().max_by(|(a, (a_votes, a_first)), (b, (b_votes, b_first))| {
            a_votes.cmp(b_votes).then_with(|| match tie_break {
                TieBreak::GreatestLabel => a.cmp(b),
                TieBreak::LeastLabel => b.cmp(a),
                TieBreak::NearestNeighbor => b_first.cmp(a_first),
            })
        });

    winner.map(|(label, _)| label.clone()).ok_or(ModelError::NoNeighbors)
}

/// Fraction of predictions equal to the matching ground-truth label.
pub fn accuracy(predictions: &[Label], actuals: &[Label]) -> Result<f64, ModelError> {
    if predictions.len() != actuals.len() {
        return Err(ModelError::LengthMismatch {
            predictions: predictions.len(),
            actuals: actuals.len(),
        });
    }
    if predictions.is_empty() {
        return Err(ModelError::EmptyValidationSet);
    }

    let correct = predictions.iter().zip(actuals).filter(|(pred, actual)| pred == actual).count();
    Ok(correct as f64 / predictions.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors(labels: &[&str]) -> Vec<NeighborCandidate> {
        labels
            .iter()
            .enumerate()
            .map(|(i, &label)| NeighborCandidate { label: Label::from(label), distance: i as f64 })
            .collect()
    }

    #[test]
    fn classify_majority_wins() {
        let votes = neighbors(&["0", "1", "0"]);
        assert_eq!(classify(&votes, TieBreak::GreatestLabel), Ok(Label::from("0")));

        let votes = neighbors(&["1", "1", "0", "0", "1"]);
        assert_eq!(classify(&votes, TieBreak::LeastLabel), Ok(Label::from("1")));
    }

    #[test]
    fn classify_default_tie_goes_to_greatest_label() {
        let votes = neighbors(&["0", "1"]);
        assert_eq!(classify(&votes, TieBreak::default()), Ok(Label::from("1")));
    }

    #[test]
    fn classify_tie_policies() {
        let votes = neighbors(&["b", "a", "c", "a", "b"]);
        assert_eq!(classify(&votes, TieBreak::GreatestLabel), Ok(Label::from("b")));
        assert_eq!(classify(&votes, TieBreak::LeastLabel), Ok(Label::from("a")));
        assert_eq!(classify(&votes, TieBreak::NearestNeighbor), Ok(Label::from("b")));
    }

    #[test]
    fn classify_handles_more_than_two_labels() {
        let votes = neighbors(&["setosa", "virginica", "versicolor", "virginica"]);
        assert_eq!(classify(&votes, TieBreak::LeastLabel), Ok(Label::from("virginica")));
    }

    #[test]
    fn classify_empty_neighbors() {
        assert_eq!(classify(&[], TieBreak::default()), Err(ModelError::NoNeighbors));
    }

    #[test]
    fn accuracy_counts_matches() {
        let predictions: Vec<Label> = ["0", "1", "1", "0"].into_iter().map(Label::from).collect();
        let actuals: Vec<Label> = ["0", "1", "0", "1"].into_iter().map(Label::from).collect();
        assert_eq!(accuracy(&predictions, &actuals), Ok(0.5));
    }

    #[test]
    fn accuracy_preconditions() {
        let one = vec![Label::from("0")];
        assert_eq!(
            accuracy(&one, &[]),
            Err(ModelError::LengthMismatch { predictions: 1, actuals: 0 })
        );
        assert_eq!(accuracy(&[], &[]), Err(ModelError::EmptyValidationSet));
    }
}
