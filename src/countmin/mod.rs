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

//! Count-Min sketch implementation for frequency estimation.
//!
//! The Count-Min sketch provides approximate frequency counts for streaming
//! keys with configurable relative error and confidence bounds, in memory
//! fixed at construction regardless of how many distinct keys are seen.
//!
//! Estimates are one-sided: `estimate(k)` is never below the true count of
//! `k`, and exceeds it only when other keys collide with `k` in every row.
//!
//! # Usage
//!
//! ```rust
//! use flowfreq::countmin::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::new(5, 256).unwrap();
//!
//! sketch.update(0xfeed);
//! sketch.update_with_weight(0xbeef, 3);
//!
//! let beef = sketch.estimate(0xbeef);
//! assert!(beef >= 3);
//!
//! let upper = sketch.upper_bound(0xbeef);
//! assert!(upper >= beef);
//! ```
//!
//! # Configuration Helpers
//!
//! ```rust
//! use flowfreq::countmin::CountMinSketch;
//!
//! let num_buckets = CountMinSketch::suggest_num_buckets(0.01);
//! let num_hashes = CountMinSketch::suggest_num_hashes(0.99);
//!
//! let _sketch = CountMinSketch::new(num_hashes, num_buckets).unwrap();
//! ```

mod sketch;
pub use self::sketch::CountMinSketch;
pub use self::sketch::DEFAULT_SEED;
