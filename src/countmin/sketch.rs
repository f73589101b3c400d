// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::common::random::RandomSource;
use crate::common::random::XorShift64;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash;

/// Base seed used when none is given. Sketches built with the same seed hash
/// identically, so estimates are reproducible run to run.
pub const DEFAULT_SEED: u64 = 9001;

/// Count-Min sketch over opaque 64-bit key hashes.
///
/// The sketch is a `num_hashes x num_buckets` table of u64 counters. Each row
/// hashes the key under its own seed, drawn deterministically from the base
/// seed, rather than offsetting a single hash by the row index; row positions
/// are therefore independent in the sense the standard error analysis assumes.
///
/// For a sketch with `num_buckets = w` and `num_hashes = d`, a point estimate
/// for any key overshoots its true count by more than `e/w * total_weight`
/// with probability at most `exp(-d)`. Counters only ever increase; there is
/// no reset, decrement, or eviction.
#[derive(Debug, Clone)]
pub struct CountMinSketch {
    num_hashes: u8,
    num_buckets: u32,
    seed: u64,
    row_seeds: Vec<u32>,
    counters: Vec<u64>,
    total_weight: u64,
}

impl CountMinSketch {
    /// Creates a sketch with `num_hashes` rows of `num_buckets` counters,
    /// hashed under [`DEFAULT_SEED`].
    ///
    /// More buckets lower the overestimation error; more rows lower the
    /// probability of exceeding the error bound.
    pub fn new(num_hashes: u8, num_buckets: u32) -> Result<Self, Error> {
        Self::with_seed(num_hashes, num_buckets, DEFAULT_SEED)
    }

    /// Creates a sketch hashing under an explicit base seed.
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if either dimension is zero.
    pub fn with_seed(num_hashes: u8, num_buckets: u32, seed: u64) -> Result<Self, Error> {
        if num_hashes == 0 {
            return Err(
                Error::new(ErrorKind::ConfigInvalid, "num_hashes must be at least 1")
                    .with_context("num_hashes", num_hashes),
            );
        }
        if num_buckets == 0 {
            return Err(
                Error::new(ErrorKind::ConfigInvalid, "num_buckets must be at least 1")
                    .with_context("num_buckets", num_buckets),
            );
        }

        let mut rng = XorShift64::seeded(seed);
        let row_seeds = (0..num_hashes).map(|_| rng.next_u64() as u32).collect();

        Ok(Self {
            num_hashes,
            num_buckets,
            seed,
            row_seeds,
            counters: vec![0u64; num_hashes as usize * num_buckets as usize],
            total_weight: 0,
        })
    }

    /// Suggests the number of buckets for a target relative error.
    ///
    /// `num_buckets = ceil(e / relative_error)`; the estimate then overshoots
    /// by at most `relative_error * total_weight` (at the confidence the row
    /// count provides).
    ///
    /// # Panics
    ///
    /// Panics if `relative_error` is not in (0, 1).
    pub fn suggest_num_buckets(relative_error: f64) -> u32 {
        assert!(
            relative_error > 0.0 && relative_error < 1.0,
            "relative_error must be in (0, 1)"
        );
        (std::f64::consts::E / relative_error).ceil() as u32
    }

    /// Suggests the number of rows for a target confidence level.
    ///
    /// `num_hashes = ceil(ln(1 / (1 - confidence)))`.
    ///
    /// # Panics
    ///
    /// Panics if `confidence` is not in (0, 1).
    pub fn suggest_num_hashes(confidence: f64) -> u8 {
        assert!(
            confidence > 0.0 && confidence < 1.0,
            "confidence must be in (0, 1)"
        );
        (1.0 / (1.0 - confidence)).ln().ceil() as u8
    }

    /// Returns the number of rows.
    pub fn num_hashes(&self) -> u8 {
        self.num_hashes
    }

    /// Returns the number of buckets per row.
    pub fn num_buckets(&self) -> u32 {
        self.num_buckets
    }

    /// Returns the base seed the hash family was derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the total weight of all updates.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns true if the sketch has seen no updates.
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }

    /// Counter index for a key in the given row.
    fn position(&self, row: usize, key_hash: u64) -> usize {
        let bucket = hash::hash_key(key_hash, self.row_seeds[row]) % self.num_buckets as u64;
        row * self.num_buckets as usize + bucket as usize
    }

    /// Records one occurrence of a key.
    pub fn update(&mut self, key_hash: u64) {
        self.update_with_weight(key_hash, 1);
    }

    /// Records `weight` occurrences of a key.
    ///
    /// Mutates exactly one counter per row. Counter and total-weight
    /// arithmetic saturates instead of wrapping.
    pub fn update_with_weight(&mut self, key_hash: u64, weight: u64) {
        for row in 0..self.num_hashes as usize {
            let pos = self.position(row, key_hash);
            self.counters[pos] = self.counters[pos].saturating_add(weight);
        }
        self.total_weight = self.total_weight.saturating_add(weight);
    }

    /// Estimates the total weight recorded for a key.
    ///
    /// Reads the counter at the key's position in every row and returns the
    /// minimum. Each row's counter overestimates the key (it also absorbs
    /// whatever collided there), and a collision rarely recurs in all rows,
    /// so the minimum is the tightest of the row-wise upper bounds. Never
    /// below the true weight.
    pub fn estimate(&self, key_hash: u64) -> u64 {
        (0..self.num_hashes as usize)
            .map(|row| self.counters[self.position(row, key_hash)])
            .min()
            .unwrap_or(0)
    }

    /// A-priori relative error of the sketch, `e / num_buckets`.
    pub fn relative_error(&self) -> f64 {
        std::f64::consts::E / self.num_buckets as f64
    }

    /// Upper bound on the estimate for a key,
    /// `estimate + relative_error * total_weight`.
    pub fn upper_bound(&self, key_hash: u64) -> u64 {
        let slack = (self.relative_error() * self.total_weight as f64) as u64;
        self.estimate(key_hash).saturating_add(slack)
    }
}
