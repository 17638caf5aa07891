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

use log::info;
use rand::Rng;
use rand::seq::index;

use crate::classifier::{TieBreak, accuracy, classify};
use crate::errors::ModelError;
use crate::neighbors::select;
use crate::record::{Dataset, Label, Record};
use crate::workers::{default_threads, map_chunks};

/// Validation accuracy reached with one neighborhood size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KAccuracy {
    pub k: usize,
    pub accuracy: f64,
}

/// Per-k validation accuracy, in ascending k, plus the winning k.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyReport {
    entries: Vec<KAccuracy>,
    best: KAccuracy,
}

impl AccuracyReport {
    /// The best entry is the first one, in ascending k, to reach the maximum accuracy.
    fn from_entries(entries: Vec<KAccuracy>) -> Option<Self> {
        let mut best = *entries.first()?;
        for entry in &entries[1..] {
            if entry.accuracy > best.accuracy {
                best = *entry;
            }
        }
        Some(AccuracyReport { entries, best })
    }

    pub fn entries(&self) -> &[KAccuracy] {
        &self.entries
    }

    pub fn best(&self) -> KAccuracy {
        self.best
    }

    pub fn accuracy_for(&self, k: usize) -> Option<f64> {
        self.entries.iter().find(|entry| entry.k == k).map(|entry| entry.accuracy)
    }
}

/// Holdout validation: splits a labelled dataset and sweeps k over the split.
#[derive(Debug, Clone)]
pub struct Validator {
    tie_break: TieBreak,
    num_threads: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Validator { tie_break: TieBreak::default(), num_threads: default_threads() }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads.max(1);
        self
    }

    /// Draws `validation_size` distinct records uniformly at random.
    ///
    /// Returns `(validation, reference)`. The validation set is in draw order;
    /// the reference set keeps the remaining records in their original order.
    /// `data` itself is left untouched.
    pub fn split<R: Rng + ?Sized>(
        &self,
        data: &Dataset,
        validation_size: usize,
        rng: &mut R,
    ) -> Result<(Dataset, Dataset), ModelError> {
        if validation_size > data.len() {
            return Err(ModelError::ValidationSizeTooLarge {
                requested: validation_size,
                available: data.len(),
            });
        }

        let drawn = index::sample(rng, data.len(), validation_size);
        let mut selected = vec![false; data.len()];
        let validation: Dataset = drawn
            .iter()
            .map(|i| {
                selected[i] = true;
                data.records()[i].clone()
            })
            .collect();
        let reference: Dataset = data
            .iter()
            .zip(&selected)
            .filter(|(_, &is_selected)| !is_selected)
            .map(|(record, _)| record.clone())
            .collect();

        info!("validation: {} reference: {}", validation.len(), reference.len());
        Ok((validation, reference))
    }

    /// Scores every k in `k_min..=k_max` against the validation set.
    ///
    /// Each validation record's neighbors are ordered once, up to `k_max`; the
    /// vote for a given k reads the first k of them.
    pub fn sweep(
        &self,
        validation: &Dataset,
        reference: &Dataset,
        k_min: usize,
        k_max: usize,
    ) -> Result<AccuracyReport, ModelError> {
        if k_min == 0 || k_min > k_max {
            return Err(ModelError::InvalidKRange { min: k_min, max: k_max });
        }
        if validation.is_empty() {
            return Err(ModelError::EmptyValidationSet);
        }
        if reference.is_empty() {
            return Err(ModelError::EmptyReferenceSet);
        }
        if k_max > reference.len() {
            return Err(ModelError::InvalidK { k: k_max, available: reference.len() });
        }

        let truths = validation
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let label = record.label().ok_or(ModelError::UnlabeledRecord { index })?;
                Ok((record, label))
            })
            .collect::<Result<Vec<(&Record, &Label)>, ModelError>>()?;
        let actuals: Vec<Label> = truths.iter().map(|&(_, label)| label.clone()).collect();

        // predictions[slot][record] for k = k_min + slot
        let n_k = k_max - k_min + 1;
        let partial_predictions = map_chunks(&truths, self.num_threads, |chunk| {
            let mut predictions = vec![Vec::with_capacity(chunk.len()); n_k];
            for &(record, _) in chunk {
                let neighbors = select(record, reference, k_max)?;
                for (slot, k) in (k_min..=k_max).enumerate() {
                    predictions[slot].push(classify(&neighbors[..k], self.tie_break)?);
                }
            }
            Ok::<_, ModelError>(predictions)
        })?;

        let mut predictions: Vec<Vec<Label>> = vec![Vec::with_capacity(truths.len()); n_k];
        for chunk in partial_predictions {
            for (merged, part) in predictions.iter_mut().zip(chunk) {
                merged.extend(part);
            }
        }

        let entries = (k_min..=k_max)
            .zip(&predictions)
            .map(|(k, predicted)| {
                let accuracy = accuracy(predicted, &actuals)?;
                info!("k: {} acc: {}", k, accuracy);
                Ok(KAccuracy { k, accuracy })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let report = AccuracyReport::from_entries(entries)
            .ok_or(ModelError::InvalidKRange { min: k_min, max: k_max })?;
        info!("Best k: {} acc: {}", report.best.k, report.best.accuracy);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn init_logger() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    }

    fn labeled(features: [f64; 4], label: &str) -> Record {
        Record::labeled(features, label).unwrap()
    }

    /// `n` records on a line: the first ten labelled "0", the rest "1" and
    /// shifted well away from them.
    fn line_dataset(n: usize) -> Dataset {
        (0..n)
            .map(|i| {
                if i < 10 {
                    let x = i as f64;
                    labeled([x, x * 0.5, 1.0, -x], "0")
                } else {
                    let x = i as f64 + 100.0;
                    labeled([x, x * 0.5, 1.0, -x], "1")
                }
            })
            .collect()
    }

    fn sorted_x1(records: impl IntoIterator<Item = Record>) -> Vec<f64> {
        let mut xs: Vec<f64> = records.into_iter().map(|r| r.features()[0]).collect();
        xs.sort_by(f64::total_cmp);
        xs
    }

    #[test]
    fn split_partitions_without_overlap_or_loss() {
        init_logger();
        let data = line_dataset(25);
        let mut rng = StdRng::seed_from_u64(7);
        let (validation, reference) = Validator::new().split(&data, 10, &mut rng).unwrap();

        assert_eq!(validation.len(), 10);
        assert_eq!(reference.len(), 15);
        assert!(validation.iter().all(|v| !reference.iter().any(|r| r == v)));

        let union = validation.into_records().into_iter().chain(reference.into_records());
        assert_eq!(sorted_x1(union), sorted_x1(data.into_records()));
    }

    #[test]
    fn split_keeps_reference_in_original_order() {
        let data = line_dataset(30);
        let mut rng = StdRng::seed_from_u64(11);
        let (_, reference) = Validator::new().split(&data, 12, &mut rng).unwrap();

        let xs: Vec<f64> = reference.iter().map(|r| r.features()[0]).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn split_is_reproducible_with_same_seed() {
        let data = line_dataset(40);
        let validator = Validator::new();

        let first = validator.split(&data, 15, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = validator.split(&data, 15, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn split_zero_validation_size() {
        let data = line_dataset(5);
        let (validation, reference) =
            Validator::new().split(&data, 0, &mut StdRng::seed_from_u64(1)).unwrap();

        assert!(validation.is_empty());
        assert_eq!(reference, data);
    }

    #[test]
    fn split_whole_dataset() {
        let data = line_dataset(5);
        let (validation, reference) =
            Validator::new().split(&data, 5, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(validation.len(), 5);
        assert!(reference.is_empty());
    }

    #[test]
    fn split_validation_size_too_large() {
        let data = line_dataset(5);
        let result = Validator::new().split(&data, 6, &mut StdRng::seed_from_u64(1));
        assert_eq!(result, Err(ModelError::ValidationSizeTooLarge { requested: 6, available: 5 }));
    }

    #[test]
    fn sweep_accuracy_within_unit_interval() {
        init_logger();
        let data = line_dataset(40);
        let validator = Validator::new().with_threads(3);
        let (validation, reference) =
            validator.split(&data, 12, &mut StdRng::seed_from_u64(3)).unwrap();

        let report = validator.sweep(&validation, &reference, 1, reference.len()).unwrap();
        assert_eq!(report.entries().len(), reference.len());
        assert!(report.entries().iter().all(|e| (0.0..=1.0).contains(&e.accuracy)));
        assert_eq!(report.accuracy_for(1), Some(1.0));
        assert_eq!(report.best(), KAccuracy { k: 1, accuracy: 1.0 });
    }

    #[test]
    fn sweep_full_reference_degenerates_to_majority_rate() {
        let reference = Dataset::new(vec![
            labeled([0.0, 0.0, 0.0, 0.0], "a"),
            labeled([1.0, 0.0, 0.0, 0.0], "a"),
            labeled([2.0, 0.0, 0.0, 0.0], "a"),
            labeled([9.0, 9.0, 9.0, 9.0], "b"),
            labeled([8.0, 9.0, 9.0, 9.0], "b"),
        ]);
        let validation = Dataset::new(vec![
            labeled([0.5, 0.0, 0.0, 0.0], "a"),
            labeled([9.0, 9.0, 9.0, 8.5], "b"),
            labeled([8.5, 9.0, 9.0, 9.0], "b"),
            labeled([1.5, 0.0, 0.0, 0.0], "a"),
        ]);

        let report = Validator::new().sweep(&validation, &reference, 5, 5).unwrap();
        assert_eq!(report.accuracy_for(5), Some(0.5));
    }

    #[test]
    fn sweep_first_k_wins_on_equal_accuracy() {
        let report = AccuracyReport::from_entries(vec![
            KAccuracy { k: 2, accuracy: 0.5 },
            KAccuracy { k: 3, accuracy: 0.75 },
            KAccuracy { k: 4, accuracy: 0.75 },
            KAccuracy { k: 5, accuracy: 0.25 },
        ])
        .unwrap();
        assert_eq!(report.best(), KAccuracy { k: 3, accuracy: 0.75 });
    }

    #[test]
    fn sweep_matches_direct_classification() {
        init_logger();
        let data = line_dataset(30);
        let validator = Validator::new().with_tie_break(TieBreak::LeastLabel).with_threads(4);
        let (validation, reference) =
            validator.split(&data, 10, &mut StdRng::seed_from_u64(5)).unwrap();
        let report = validator.sweep(&validation, &reference, 2, 15).unwrap();

        for k in 2..=15 {
            let correct = validation
                .iter()
                .filter(|record| {
                    let neighbors = select(record, &reference, k).unwrap();
                    let predicted = classify(&neighbors, TieBreak::LeastLabel).unwrap();
                    predicted == *record.label().unwrap()
                })
                .count();
            let expected = correct as f64 / validation.len() as f64;
            assert_eq!(report.accuracy_for(k), Some(expected), "k = {}", k);
        }
    }

    #[test]
    fn sweep_independent_of_thread_count() {
        init_logger();
        let data = line_dataset(50);
        let mut rng = StdRng::seed_from_u64(9);
        let (validation, reference) = Validator::new().split(&data, 20, &mut rng).unwrap();

        let single = Validator::new().with_threads(1);
        let many = Validator::new().with_threads(8);
        let single = single.sweep(&validation, &reference, 1, 30).unwrap();
        let many = many.sweep(&validation, &reference, 1, 30).unwrap();
        assert_eq!(single, many);
    }

    #[test]
    fn sweep_empty_validation_set() {
        let data = line_dataset(5);
        let validator = Validator::new();
        let (validation, reference) =
            validator.split(&data, 0, &mut StdRng::seed_from_u64(1)).unwrap();

        let result = validator.sweep(&validation, &reference, 1, 3);
        assert_eq!(result, Err(ModelError::EmptyValidationSet));
    }

    #[test]
    fn sweep_invalid_k_range() {
        let data = line_dataset(5);
        let validator = Validator::new();
        assert_eq!(
            validator.sweep(&data, &data, 0, 3),
            Err(ModelError::InvalidKRange { min: 0, max: 3 })
        );
        assert_eq!(
            validator.sweep(&data, &data, 4, 3),
            Err(ModelError::InvalidKRange { min: 4, max: 3 })
        );
    }

    #[test]
    fn sweep_k_max_exceeds_reference() {
        let data = line_dataset(5);
        let result = Validator::new().sweep(&data, &data, 1, 6);
        assert_eq!(result, Err(ModelError::InvalidK { k: 6, available: 5 }));
    }

    #[test]
    fn sweep_empty_reference_set() {
        let data = line_dataset(5);
        let result = Validator::new().sweep(&data, &Dataset::default(), 1, 1);
        assert_eq!(result, Err(ModelError::EmptyReferenceSet));
    }

    #[test]
    fn sweep_unlabeled_validation_record() {
        let reference = line_dataset(5);
        let validation = Dataset::new(vec![
            labeled([0.0; 4], "0"),
            Record::unlabeled([1.0; 4]).unwrap(),
        ]);
        let result = Validator::new().sweep(&validation, &reference, 1, 2);
        assert_eq!(result, Err(ModelError::UnlabeledRecord { index: 1 }));
    }
}
