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

use std::fmt;
use std::net::IpAddr;

use crate::hash;

/// Seed for the flow-identity hash. Fixed so that the same flow hashes to the
/// same key in every process run.
const FLOW_HASH_SEED: u32 = 9001;

/// Transport-layer protocol of a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportProtocol {
    Tcp,
    Udp,
    /// Any other protocol, by its IANA protocol number.
    Other(u8),
}

impl TransportProtocol {
    /// IANA protocol number.
    pub const fn number(self) -> u8 {
        match self {
            TransportProtocol::Tcp => 6,
            TransportProtocol::Udp => 17,
            TransportProtocol::Other(n) => n,
        }
    }
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportProtocol::Tcp => write!(f, "TCP"),
            TransportProtocol::Udp => write!(f, "UDP"),
            TransportProtocol::Other(n) => write!(f, "IP({n})"),
        }
    }
}

/// A flow identity that can hash itself to a stable 64-bit key.
///
/// Stable means deterministic across calls, process runs, and platforms; the
/// sketch's reproducibility guarantees hold only as far as this does. The
/// hash does not need to be cryptographic, just well distributed.
pub trait FlowId {
    /// Returns the stable 64-bit hash of this flow identity.
    fn flow_hash(&self) -> u64;
}

/// Keys that are already hashes pass through unchanged.
impl FlowId for u64 {
    fn flow_hash(&self) -> u64 {
        *self
    }
}

/// One flow's identifying 5-tuple.
///
/// The tuple is opaque to the sketch; only its [`FlowId`] hash ever reaches a
/// counter. Two `FlowKey`s compare equal exactly when all five fields match,
/// so a flow and its reverse direction are distinct flows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlowKey {
    src_addr: IpAddr,
    dst_addr: IpAddr,
    src_port: u16,
    dst_port: u16,
    protocol: TransportProtocol,
}

impl FlowKey {
    pub fn new(
        src_addr: IpAddr,
        dst_addr: IpAddr,
        src_port: u16,
        dst_port: u16,
        protocol: TransportProtocol,
    ) -> Self {
        Self {
            src_addr,
            dst_addr,
            src_port,
            dst_port,
            protocol,
        }
    }

    pub fn src_addr(&self) -> IpAddr {
        self.src_addr
    }

    pub fn dst_addr(&self) -> IpAddr {
        self.dst_addr
    }

    pub fn src_port(&self) -> u16 {
        self.src_port
    }

    pub fn dst_port(&self) -> u16 {
        self.dst_port
    }

    pub fn protocol(&self) -> TransportProtocol {
        self.protocol
    }

    /// Canonical byte encoding fed to the flow hash.
    ///
    /// Each address is prefixed with a version tag so a v4 address can never
    /// alias a prefix of a v6 one; ports are big-endian. The encoding is part
    /// of the hash-stability contract and must not change between releases.
    fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(39);
        write_addr(&mut buf, self.src_addr);
        write_addr(&mut buf, self.dst_addr);
        buf.extend_from_slice(&self.src_port.to_be_bytes());
        buf.extend_from_slice(&self.dst_port.to_be_bytes());
        buf.push(self.protocol.number());
        buf
    }
}

fn write_addr(buf: &mut Vec<u8>, addr: IpAddr) {
    match addr {
        IpAddr::V4(v4) => {
            buf.push(4);
            buf.extend_from_slice(&v4.octets());
        }
        IpAddr::V6(v6) => {
            buf.push(6);
            buf.extend_from_slice(&v6.octets());
        }
    }
}

impl FlowId for FlowKey {
    fn flow_hash(&self) -> u64 {
        hash::hash_bytes(&self.canonical_bytes(), FLOW_HASH_SEED)
    }
}

impl fmt::Display for FlowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} -> {}:{} {}",
            self.src_addr, self.src_port, self.dst_addr, self.dst_port, self.protocol
        )
    }
}
