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

use std::collections::HashSet;

use crate::countmin::CountMinSketch;
use crate::error::Error;
use crate::flow::FlowId;

/// One distinct flow and its estimated occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateRecord<K> {
    key: K,
    estimate: u64,
}

impl<K> EstimateRecord<K> {
    /// Returns the flow key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the estimated occurrence count, at least 1.
    pub fn estimate(&self) -> u64 {
        self.estimate
    }
}

/// Two-pass per-flow frequency estimation over a replayable key stream.
///
/// Each [`run`](Self::run) owns a fresh sketch for its whole duration, so
/// runs never contaminate each other. The stream is consumed twice: the first
/// pass feeds every observation into the sketch, the second replays the
/// stream in order and emits one record per distinct flow. Querying only
/// after the full first pass is what keeps late duplicates counted; a
/// query-as-you-go single pass would undercount any flow still arriving.
///
/// ```rust
/// use flowfreq::flow::FlowFrequencyPipeline;
///
/// let pipeline = FlowFrequencyPipeline::new(5, 1000);
/// let records = pipeline.run(&[7u64, 9, 7, 11, 9, 7]).unwrap();
///
/// let keys: Vec<u64> = records.iter().map(|r| *r.key()).collect();
/// assert_eq!(keys, [7, 9, 11]);
/// assert!(records[0].estimate() >= 3);
/// ```
#[derive(Debug, Clone)]
pub struct FlowFrequencyPipeline {
    num_hashes: u8,
    num_buckets: u32,
}

impl FlowFrequencyPipeline {
    /// Creates a pipeline whose runs use `num_hashes x num_buckets` sketches.
    ///
    /// Dimensions are validated when a run constructs its sketch.
    pub fn new(num_hashes: u8, num_buckets: u32) -> Self {
        Self {
            num_hashes,
            num_buckets,
        }
    }

    /// Estimates the frequency of every distinct flow in `keys`.
    ///
    /// Records come back in first-seen order, one per distinct flow hash, and
    /// every estimate is at least the flow's true occurrence count. Distinct
    /// flows whose hashes collide are folded into one record; that is sketch
    /// noise the caller accepted by choosing approximate counting. An empty
    /// stream yields an empty result.
    pub fn run<K>(&self, keys: &[K]) -> Result<Vec<EstimateRecord<K>>, Error>
    where
        K: FlowId + Clone,
    {
        let mut sketch = CountMinSketch::new(self.num_hashes, self.num_buckets)?;

        // Hash each observation once; the replay pass reuses the same hash.
        let hashes: Vec<u64> = keys.iter().map(FlowId::flow_hash).collect();
        for &key_hash in &hashes {
            sketch.update(key_hash);
        }

        let mut emitted = HashSet::with_capacity(hashes.len());
        let mut records = Vec::new();
        for (key, &key_hash) in keys.iter().zip(&hashes) {
            if emitted.insert(key_hash) {
                records.push(EstimateRecord {
                    key: key.clone(),
                    estimate: sketch.estimate(key_hash),
                });
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_stream() {
        let pipeline = FlowFrequencyPipeline::new(5, 1000);
        let records = pipeline.run(&[] as &[u64]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_invalid_dimensions_surface_at_run() {
        let pipeline = FlowFrequencyPipeline::new(0, 1000);
        let err = pipeline.run(&[1u64, 2, 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_late_duplicates_are_counted() {
        // The last occurrence of 7 arrives after every other key; a
        // query-as-you-go pass would have reported 2 for it.
        let pipeline = FlowFrequencyPipeline::new(5, 1000);
        let records = pipeline.run(&[7u64, 7, 9, 7]).unwrap();
        assert_eq!(records[0].estimate(), 3);
    }
}
