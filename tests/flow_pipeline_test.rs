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

use std::net::Ipv4Addr;

use flowfreq::error::ErrorKind;
use flowfreq::flow::FlowFrequencyPipeline;
use flowfreq::flow::FlowId;
use flowfreq::flow::FlowKey;
use flowfreq::flow::TransportProtocol;

fn flow(src_last: u8, dst_port: u16, protocol: TransportProtocol) -> FlowKey {
    FlowKey::new(
        Ipv4Addr::new(192, 168, 1, src_last).into(),
        Ipv4Addr::new(10, 0, 0, 1).into(),
        40000 + dst_port,
        dst_port,
        protocol,
    )
}

#[test]
fn test_dedupes_and_preserves_first_seen_order() {
    let a = flow(1, 443, TransportProtocol::Tcp);
    let b = flow(2, 53, TransportProtocol::Udp);
    let c = flow(3, 22, TransportProtocol::Tcp);

    let stream = vec![
        a.clone(),
        b.clone(),
        a.clone(),
        c.clone(),
        b.clone(),
        a.clone(),
    ];

    let pipeline = FlowFrequencyPipeline::new(5, 1000);
    let records = pipeline.run(&stream).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(*records[0].key(), a);
    assert_eq!(*records[1].key(), b);
    assert_eq!(*records[2].key(), c);

    assert!(records[0].estimate() >= 3);
    assert!(records[1].estimate() >= 2);
    assert!(records[2].estimate() >= 1);

    // Nothing can exceed the stream length.
    for record in &records {
        assert!(record.estimate() <= stream.len() as u64);
    }
}

#[test]
fn test_empty_stream_yields_empty_result() {
    let pipeline = FlowFrequencyPipeline::new(5, 1000);
    let records = pipeline.run(&[] as &[FlowKey]).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_skewed_stream_is_exact_without_collisions() {
    let heavy = flow(1, 443, TransportProtocol::Tcp);
    let light = flow(2, 53, TransportProtocol::Udp);

    let mut stream = vec![heavy.clone(); 100];
    stream.push(light.clone());

    let pipeline = FlowFrequencyPipeline::new(5, 1000);
    let records = pipeline.run(&stream).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].estimate(), 100);
    assert_eq!(records[1].estimate(), 1);
}

#[test]
fn test_repeated_runs_agree() {
    let stream: Vec<FlowKey> = (0..200u16)
        .map(|i| flow((i % 20) as u8, 1000 + i % 7, TransportProtocol::Tcp))
        .collect();

    let pipeline = FlowFrequencyPipeline::new(5, 256);
    let first = pipeline.run(&stream).unwrap();
    let second = pipeline.run(&stream).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_runs_do_not_contaminate_each_other() {
    let a = flow(1, 443, TransportProtocol::Tcp);
    let pipeline = FlowFrequencyPipeline::new(5, 1000);

    // Each run owns a fresh sketch, so a second identical run must not see
    // the first run's counts.
    for _ in 0..2 {
        let records = pipeline.run(&[a.clone(), a.clone()]).unwrap();
        assert_eq!(records[0].estimate(), 2);
    }
}

#[test]
fn test_accepts_pre_hashed_keys() {
    let pipeline = FlowFrequencyPipeline::new(5, 1000);
    let records = pipeline.run(&[7u64, 9, 7, 11, 9, 7]).unwrap();

    let keys: Vec<u64> = records.iter().map(|r| *r.key()).collect();
    assert_eq!(keys, [7, 9, 11]);
    assert_eq!(records[0].estimate(), 3);
    assert_eq!(records[1].estimate(), 2);
    assert_eq!(records[2].estimate(), 1);
}

#[test]
fn test_flow_hash_matches_between_key_and_pipeline() {
    // Feeding FlowKeys or their hashes must give the same estimates.
    let a = flow(1, 443, TransportProtocol::Tcp);
    let b = flow(2, 53, TransportProtocol::Udp);
    let keys = vec![a.clone(), b.clone(), a.clone()];
    let hashes: Vec<u64> = keys.iter().map(FlowId::flow_hash).collect();

    let pipeline = FlowFrequencyPipeline::new(5, 1000);
    let from_keys = pipeline.run(&keys).unwrap();
    let from_hashes = pipeline.run(&hashes).unwrap();

    assert_eq!(from_keys.len(), from_hashes.len());
    for (k, h) in from_keys.iter().zip(&from_hashes) {
        assert_eq!(k.estimate(), h.estimate());
        assert_eq!(k.key().flow_hash(), *h.key());
    }
}

#[test]
fn test_invalid_configuration_is_propagated() {
    let pipeline = FlowFrequencyPipeline::new(5, 0);
    let err = pipeline
        .run(&[flow(1, 443, TransportProtocol::Tcp)])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}
