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

//! Hashing helpers shared by the sketch and the flow layer.
//!
//! All hashing goes through MurmurHash3 x64-128 (the `mur3` crate); only the
//! low 64 bits are used. Outputs for a given seed are stable across process
//! runs and crate releases, which the sketch's determinism contract relies on.

/// Hashes an arbitrary byte string under the given seed.
pub(crate) fn hash_bytes(bytes: &[u8], seed: u32) -> u64 {
    let (h1, _) = mur3::murmurhash3_x64_128(bytes, seed);
    h1
}

/// Hashes a 64-bit key under the given seed.
///
/// The key is fed to murmur as its little-endian bytes. One call per sketch
/// row, each with that row's own seed, gives the per-row hash family.
pub(crate) fn hash_key(key_hash: u64, seed: u32) -> u64 {
    hash_bytes(&key_hash.to_le_bytes(), seed)
}
