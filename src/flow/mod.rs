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

//! Flow identities and the per-flow frequency pipeline.
//!
//! A flow is the classic 5-tuple: source address, destination address, source
//! port, destination port, transport protocol. [`FlowKey`] carries the tuple
//! and hashes it stably; [`FlowFrequencyPipeline`] replays a bounded stream of
//! keys through one Count-Min sketch and reports an estimate per distinct
//! flow in first-seen order.
//!
//! Extracting flow keys from raw packets is a capture-reader concern and out
//! of scope here; any decoder that yields the 5-tuple (or a pre-hashed
//! [`u64`]) can feed the pipeline.

mod key;
mod pipeline;

pub use self::key::FlowId;
pub use self::key::FlowKey;
pub use self::key::TransportProtocol;
pub use self::pipeline::EstimateRecord;
pub use self::pipeline::FlowFrequencyPipeline;
