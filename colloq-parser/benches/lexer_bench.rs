//! Benchmarks for the request path lexer and pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use colloq_parser::request::{process, tokenize, Parser, Schema};

fn bench_simple_request(c: &mut Criterion) {
    let input = "/paper:topic=vogonpoetry";

    let mut group = c.benchmark_group("lexer");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("simple_request", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(input));
            black_box(tokens)
        })
    });

    group.finish();
}

fn bench_join_request(c: &mut Criterion) {
    let input = "/paper:author=Daniel+Klingbein&topic=vogonpoetry$author:obit=1993+05+22";

    let mut group = c.benchmark_group("lexer");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("join_request", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(input));
            black_box(tokens)
        })
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let input = "/paper:author=Daniel+Klingbein&topic=vogonpoetry$author:obit=1993+05+22";

    let mut group = c.benchmark_group("parser");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("join_request", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(input)).expect("lexes");
            let tree = Parser::new(tokens).parse();
            black_box(tree)
        })
    });

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let input = "/paper:author=Daniel+Klingbein&topic=vogonpoetry$author:obit=1993+05+22";
    let schema = Schema::knowledge_base();

    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("join_request", |b| {
        b.iter(|| {
            let tree = process(black_box(input), &schema);
            black_box(tree)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_simple_request,
    bench_join_request,
    bench_parse,
    bench_full_pipeline
);
criterion_main!(benches);
