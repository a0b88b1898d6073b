use std::hint::black_box;

use chrono::{TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use equipment_datasets::aggregate::summarize;
use equipment_datasets::ingest::parse_csv_text;
use equipment_datasets::report::render_report;
use equipment_datasets::types::{Dataset, DatasetId, DatasetSummary};

fn synthetic_dataset(rows: usize) -> Dataset {
    let mut text = String::from("Equipment Name,Type,Flowrate,Pressure,Temperature\n");
    for i in 0..rows {
        text.push_str(&format!("P-{i:05},Pump,{}.5,4.2,95\n", i % 500));
    }
    let table = parse_csv_text(&text).unwrap();
    Dataset {
        summary: DatasetSummary {
            id: DatasetId(1),
            name: "bench.csv".to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap(),
            stats: summarize(&table),
        },
        csv_file: text,
    }
}

fn bench_render(c: &mut Criterion) {
    let dataset = synthetic_dataset(1_000);
    c.bench_function("render_report_1k_rows", |b| {
        b.iter(|| render_report(black_box(&dataset)).unwrap())
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
