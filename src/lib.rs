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

//! Approximate per-flow frequency estimation.
//!
//! This crate answers one question about a stream of network flow observations:
//! roughly how many times did each distinct flow occur? It does so in constant
//! memory, without keeping an entry per distinct flow, by counting into a
//! [Count-Min sketch](countmin::CountMinSketch) and reading back a one-sided
//! estimate that never undercounts.
//!
//! Two layers are provided:
//!
//! - [`countmin`]: the sketch itself. A fixed `num_hashes x num_buckets` table
//!   of counters keyed by opaque 64-bit hashes. Knows nothing about flows.
//! - [`flow`]: flow identities and the [`FlowFrequencyPipeline`](flow::FlowFrequencyPipeline),
//!   which replays a bounded stream of flow keys through one sketch and emits
//!   one estimate per distinct flow, in first-seen order.
//!
//! # Usage
//!
//! ```rust
//! use std::net::Ipv4Addr;
//!
//! use flowfreq::flow::{FlowFrequencyPipeline, FlowKey, TransportProtocol};
//!
//! let dns = FlowKey::new(
//!     Ipv4Addr::new(10, 0, 0, 1).into(),
//!     Ipv4Addr::new(10, 0, 0, 53).into(),
//!     49152,
//!     53,
//!     TransportProtocol::Udp,
//! );
//! let ssh = FlowKey::new(
//!     Ipv4Addr::new(10, 0, 0, 1).into(),
//!     Ipv4Addr::new(10, 0, 0, 2).into(),
//!     49153,
//!     22,
//!     TransportProtocol::Tcp,
//! );
//!
//! let stream = vec![dns.clone(), ssh.clone(), dns.clone()];
//!
//! let pipeline = FlowFrequencyPipeline::new(5, 1000);
//! let records = pipeline.run(&stream).unwrap();
//!
//! assert_eq!(records.len(), 2);
//! assert!(records[0].estimate() >= 2); // dns, first seen
//! assert!(records[1].estimate() >= 1); // ssh
//! ```
//!
//! Estimates are exact in the absence of hash collisions and only ever err
//! upward; see the [`countmin`] module documentation for the error bounds.

mod common;
mod hash;

pub mod countmin;
pub mod error;
pub mod flow;
