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

use crate::distance::euclidean_distance;
use crate::errors::ModelError;
use crate::record::{Dataset, NeighborCandidate, Record};

/// Returns the `k` reference records closest to `query`, nearest first.
///
/// Candidates at exactly the same distance are ordered by ascending label, so
/// the result does not depend on the order of the reference set.
///
/// # Errors
/// - `ModelError::EmptyReferenceSet` if `reference` holds no records.
/// - `ModelError::InvalidK` unless `1 <= k <= reference.len()`.
/// - `ModelError::UnlabeledRecord` if a reference record carries no label.
pub fn select(
    query: &Record,
    reference: &Dataset,
    k: usize,
) -> Result<Vec<NeighborCandidate>, ModelError> {
    if reference.is_empty() {
        return Err(ModelError::EmptyReferenceSet);
    }
    if k == 0 || k > reference.len() {
        return Err(ModelError::InvalidK { k, available: reference.len() });
    }

    let mut candidates = reference
        .iter()
        .enumerate()
        .map(|(index, r)| {
            let label = r.label().ok_or(ModelError::UnlabeledRecord { index })?;
            Ok(NeighborCandidate { label: label.clone(), distance: euclidean_distance(query, r) })
        })
        .collect::<Result<Vec<_>, ModelError>>()?;

    candidates
        .sort_by(|a, b| a.distance.total_cmp(&b.distance).then_with(|| a.label.cmp(&b.label)));
    candidates.truncate(k);
    Ok(candidates)
}
