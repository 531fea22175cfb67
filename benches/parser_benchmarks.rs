//! End-to-End Parser Benchmarks
//!
//! Measures the front end's performance (lexing, parsing, and the type
//! checking performed while the parse tree is built) across source sizes
//! and shapes:
//!
//! - **Simple Programs**: a handful of declarations and statements
//! - **Expression-Heavy Programs**: deeply nested arithmetic/relational
//!   expressions exercising the prime-production recursion
//! - **Procedure-Heavy Programs**: many nested procedure declarations and
//!   scope pushes/pops
//! - **Pipeline Stages**: lexer vs. full parse, in isolation
//!
//! ```bash
//! cargo bench
//! cargo bench simple_programs
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pascal_front::{parse, tokenize};

fn program(body: &str) -> String {
    format!("PROGRAM P IS {body} END PROGRAM .")
}

fn bench_simple_programs(c: &mut Criterion) {
    let mut group = c.benchmark_group("simple_programs");

    let programs = vec![
        ("empty", program("BEGIN")),
        (
            "one_variable",
            program("VARIABLE X : INTEGER ; BEGIN X := 1 ;"),
        ),
        (
            "few_statements",
            program(
                "VARIABLE X : INTEGER ; VARIABLE Y : FLOAT ; \
                 BEGIN X := 1 ; Y := 2.5 ; X := X + 1 ;",
            ),
        ),
    ];

    for (name, src) in &programs {
        group.throughput(Throughput::Bytes(src.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), src, |b, src| {
            b.iter(|| parse(black_box(src)));
        });
    }

    group.finish();
}

fn bench_expression_heavy_programs(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression_heavy");

    for depth in [4usize, 16, 64] {
        let mut expr = String::from("1");
        for _ in 0..depth {
            expr.push_str(" + 1");
        }
        let src = program(&format!("VARIABLE X : INTEGER ; BEGIN X := {expr} ;"));
        group.throughput(Throughput::Bytes(src.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &src, |b, src| {
            b.iter(|| parse(black_box(src)));
        });
    }

    group.finish();
}

fn bench_procedure_heavy_programs(c: &mut Criterion) {
    let mut group = c.benchmark_group("procedure_heavy");

    for count in [1usize, 8, 32] {
        let mut src = String::from("PROGRAM P IS ");
        for i in 0..count {
            src.push_str(&format!(
                "PROCEDURE F{i} : INTEGER ( VARIABLE A : INTEGER ) \
                 BEGIN RETURN A ; END PROCEDURE ; "
            ));
        }
        src.push_str("BEGIN END PROGRAM .");
        group.throughput(Throughput::Bytes(src.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &src, |b, src| {
            b.iter(|| parse(black_box(src)));
        });
    }

    group.finish();
}

fn bench_pipeline_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_stages");

    let src = program(
        "VARIABLE X : INTEGER ; BEGIN X := 1 + 2 * 3 ; \
         IF ( X < 10 ) THEN X := X + 1 ; END IF ;",
    );

    group.bench_function("01_lexer_only", |b| {
        b.iter(|| tokenize(black_box(&src)));
    });

    group.bench_function("02_lex_and_parse", |b| {
        b.iter(|| parse(black_box(&src)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_simple_programs,
    bench_expression_heavy_programs,
    bench_procedure_heavy_programs,
    bench_pipeline_stages,
);

criterion_main!(benches);
