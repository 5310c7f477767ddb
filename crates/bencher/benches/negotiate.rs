use std::hint::black_box;

use bencher::{HeaderCase, HEADER_CASES};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use micro_encoding::codec::Tokenizer;
use micro_encoding::protocol::ContentCoding;
use micro_encoding::Negotiator;

const SUPPORTED: [ContentCoding; 4] = [ContentCoding::Br, ContentCoding::Gzip, ContentCoding::Deflate, ContentCoding::Identity];

fn bench_cases(criterion: &mut Criterion, group_name: &str, mut routine: impl FnMut(&HeaderCase)) {
    let mut group = criterion.benchmark_group(group_name);

    for case in HEADER_CASES {
        group.throughput(Throughput::Bytes(case.value().len() as u64));
        group.bench_with_input(BenchmarkId::new(case.group().as_str(), case.name()), case, |b, case| {
            b.iter(|| routine(black_box(case)));
        });
    }

    group.finish();
}

fn benchmark_tokenizer(criterion: &mut Criterion) {
    bench_cases(criterion, "tokenizer", |case| {
        black_box(Tokenizer::new(case.value()).count());
    });
}

fn benchmark_resolve(criterion: &mut Criterion) {
    let negotiator = Negotiator::default();
    bench_cases(criterion, "resolve", |case| {
        black_box(negotiator.resolve(case.value()));
    });
}

fn benchmark_select(criterion: &mut Criterion) {
    let negotiator = Negotiator::default();
    bench_cases(criterion, "select", |case| {
        let _ = black_box(negotiator.select(case.value(), &SUPPORTED));
    });
}

criterion_group!(negotiate, benchmark_tokenizer, benchmark_resolve, benchmark_select);
criterion_main!(negotiate);
