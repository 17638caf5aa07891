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

use ndarray::Zip;

use crate::record::Record;

/// Euclidean distance over the four features of two records.
///
/// Every feature contributes with equal weight. Differences are divided by
/// the largest one before squaring, so far-apart finite records never
/// overflow to infinity.
pub fn euclidean_distance(a: &Record, b: &Record) -> f64 {
    let scale = Zip::from(a.feature_view())
        .and(b.feature_view())
        .fold(0.0_f64, |max, &a_i, &b_i| max.max((a_i - b_i).abs()));
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }

    let scaled_sum = Zip::from(a.feature_view()).and(b.feature_view()).fold(
        0.0,
        |acc, &a_i, &b_i| {
            let ratio = (a_i - b_i) / scale;
            acc + ratio * ratio
        },
    );
    scale * libm::sqrt(scaled_sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(features: [f64; 4]) -> Record {
        Record::unlabeled(features).unwrap()
    }

    #[test]
    fn distance_is_symmetric() {
        let a = record([1.5, -2.0, 0.25, 7.0]);
        let b = record([-3.0, 4.0, 1.0, 0.5]);
        assert_eq!(euclidean_distance(&a, &b), euclidean_distance(&b, &a));
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = record([1.5, -2.0, 0.25, 7.0]);
        assert_eq!(euclidean_distance(&a, &a), 0.0);
    }

    #[test]
    fn distance_matches_closed_form() {
        let a = record([0.0, 0.0, 0.0, 0.0]);
        let b = record([1.0, 2.0, 2.0, 4.0]);
        assert!((euclidean_distance(&a, &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn distance_of_far_records_stays_finite() {
        let origin = record([0.0; 4]);
        let near = record([2e154, 0.0, 0.0, 0.0]);
        let far = record([3e154, 0.0, 0.0, 0.0]);

        let d_near = euclidean_distance(&origin, &near);
        let d_far = euclidean_distance(&origin, &far);
        assert!(d_near.is_finite() && d_far.is_finite());
        assert!(((d_near - 2e154) / 2e154).abs() < 1e-12);
        assert!(d_near < d_far);
    }

    #[test]
    fn distance_is_positive_when_any_feature_differs() {
        let a = record([1.0, 1.0, 1.0, 1.0]);
        let b = record([1.0, 1.0, 1.0, 1.000001]);
        assert!(euclidean_distance(&a, &b) > 0.0);
    }
}
