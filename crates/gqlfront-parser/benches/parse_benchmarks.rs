mod fixtures;

use criterion::Criterion;
use criterion::Throughput;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use gqlfront_parser::GraphQLParser;
use gqlfront_parser::ParserOptions;
use gqlfront_parser::scanner::Scanner;
use gqlfront_parser::token::GraphQLTokenKind;

// ─── Group 1: Schema Parsing ─────────────────────────────

fn schema_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_parse");

    group.bench_function("starwars", |b| {
        b.iter(|| black_box(GraphQLParser::new(fixtures::STARWARS_SCHEMA).parse_document()))
    });

    for type_count in [10, 100, 1000] {
        let schema = fixtures::synthetic_schema(type_count);
        group.bench_function(format!("synthetic_{type_count}_types"), |b| {
            b.iter(|| black_box(GraphQLParser::new(&schema).parse_document()))
        });
    }

    let schema = fixtures::synthetic_schema(100);
    group.bench_function("synthetic_100_types (no locations)", |b| {
        b.iter(|| {
            let options = ParserOptions::new().with_source_locations(false);
            black_box(GraphQLParser::with_options(&schema, options).parse_document())
        })
    });

    group.finish();
}

// ─── Group 2: Executable Document Parsing ─────────────────

fn executable_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("executable_parse");

    group.bench_function("simple_query", |b| {
        b.iter(|| black_box(GraphQLParser::new(fixtures::SIMPLE_QUERY).parse_document()))
    });

    group.bench_function("complex_query", |b| {
        b.iter(|| black_box(GraphQLParser::new(fixtures::COMPLEX_QUERY).parse_document()))
    });

    let nested = fixtures::operations::deeply_nested_query(30);
    group.bench_function("nested_depth_30", |b| {
        b.iter(|| black_box(GraphQLParser::new(&nested).parse_document()))
    });

    let many_ops = fixtures::operations::many_operations(50);
    group.bench_function("many_operations_50", |b| {
        b.iter(|| black_box(GraphQLParser::new(&many_ops).parse_document()))
    });

    group.finish();
}

// ─── Group 3: Scanner (Tokenization Only) ────────────────

fn scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner");

    let schema = fixtures::synthetic_schema(100);
    let inputs = [("starwars_schema", fixtures::STARWARS_SCHEMA), ("synthetic_100", schema.as_str())];
    for (label, source) in inputs {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut scanner = Scanner::new(source);
                while let Ok(token) = scanner.scan() {
                    if token.kind == GraphQLTokenKind::Eof {
                        break;
                    }
                    black_box(token);
                }
            })
        });
    }

    group.finish();
}

// ─── Group 4: SDL Writing ────────────────────────────────

fn sdl_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("sdl_write");

    let starwars = GraphQLParser::new(fixtures::STARWARS_SCHEMA).parse_document().into_value();
    if let Some(document) = starwars {
        group.bench_function("starwars", |b| b.iter(|| black_box(document.to_sdl())));
    }

    group.finish();
}

// ─── Criterion Entrypoint ────────────────────────────────

criterion_group!(benches, schema_parse, executable_parse, scanner, sdl_write);
criterion_main!(benches);
