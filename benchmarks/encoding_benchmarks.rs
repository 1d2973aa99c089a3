#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Serialization benchmarks: paramlist vs url crate form serializer
use criterion::{Criterion, criterion_group, criterion_main};
use paramlist::{Encoding, ParamList};
use std::hint::black_box;

fn sample_pairs() -> Vec<(String, String)> {
    (0..64)
        .rev()
        .map(|i| (format!("Param.member.{i}"), format!("value {i} with/reserved&chars")))
        .collect()
}

fn bench_to_string(c: &mut Criterion) {
    let pairs = sample_pairs();
    let mut list = ParamList::with_encoding(Encoding::FormUrlencoded);
    for (name, value) in &pairs {
        list.set(name, Some(value.as_str())).unwrap();
    }

    let mut group = c.benchmark_group("serialize_64_params");
    group.bench_function("paramlist", |b| {
        b.iter(|| black_box(&list).to_string());
    });
    group.bench_function("url_form_urlencoded", |b| {
        b.iter(|| {
            let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
            sorted.sort_by(|x, y| x.0.cmp(&y.0));
            url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(sorted.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .finish()
        });
    });
    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let pairs = sample_pairs();
    let mut list = ParamList::new();
    for (name, value) in &pairs {
        list.set(name, Some(value.as_str())).unwrap();
    }

    c.bench_function("to_stream_and_drain", |b| {
        b.iter(|| {
            let mut view = black_box(&list).to_stream();
            let mut total = 0;
            while let Some(chunk) = view.read(Some(256)) {
                total += chunk.len();
            }
            total
        });
    });
}

criterion_group!(benches, bench_to_string, bench_stream);
criterion_main!(benches);
