// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chrono::Utc;
use remora::{
    redact, CaptureInfo, CaptureLimits, CaptureRecorder, RedactionRules, Request,
    RequestSnapshot, ResponseSnapshot,
};

fn snapshot_benchmark(c: &mut Criterion) {
    let recorder = CaptureRecorder::new(CaptureLimits::default());
    let request = Request::post("https://api.example.com/v1/orders")
        .unwrap()
        .header("authorization", "Bearer benchmark-token")
        .header("content-type", "application/json")
        .body(r#"{"item":"widget","quantity":3,"password":"hunter2"}"#);

    c.bench_function("snapshot_request", |b| {
        b.iter(|| black_box(recorder.snapshot_request(&request)))
    });
}

fn redaction_benchmark(c: &mut Criterion) {
    let rules = RedactionRules::default();
    let record = CaptureInfo::new(
        "cap_1",
        "bench",
        RequestSnapshot::new("https://api.example.com/v1/orders", "POST")
            .with_header("authorization", "Bearer benchmark-token")
            .with_body(r#"{"item":"widget","password":"hunter2"}"#),
        Utc::now(),
    )
    .with_response(
        ResponseSnapshot::new(200, "OK")
            .with_header("set-cookie", "session=abc")
            .with_body(r#"{"token":"tok-1","items":[{"api_key":"k"}]}"#),
    );

    c.bench_function("redact_record", |b| {
        b.iter(|| {
            let mut info = record.clone();
            redact(&mut info, &rules);
            black_box(info)
        })
    });
}

criterion_group!(benches, snapshot_benchmark, redaction_benchmark);
criterion_main!(benches);
