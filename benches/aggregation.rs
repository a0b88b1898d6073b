use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use equipment_datasets::aggregate::summarize;
use equipment_datasets::ingest::parse_csv_text;

fn synthetic_csv(rows: usize) -> String {
    let mut text = String::from("Equipment Name,Type,Flowrate,Pressure,Temperature\n");
    let types = ["Pump", "Valve", "Compressor", "Heat Exchanger"];
    for i in 0..rows {
        let kind = types[i % types.len()];
        text.push_str(&format!("P-{i:05},{kind},{}.5,4.2,{}\n", i % 500, 50 + i % 120));
    }
    text
}

fn bench_aggregation(c: &mut Criterion) {
    let table = parse_csv_text(&synthetic_csv(10_000)).unwrap();
    c.bench_function("summarize_10k_rows", |b| {
        b.iter(|| summarize(black_box(&table)))
    });
}

fn bench_parse(c: &mut Criterion) {
    let text = synthetic_csv(10_000);
    c.bench_function("parse_10k_rows", |b| {
        b.iter(|| parse_csv_text(black_box(&text)).unwrap())
    });
}

criterion_group!(benches, bench_aggregation, bench_parse);
criterion_main!(benches);
