//! Line Reader benchmarks.
//!
//! Measures reading and registering lines of several lengths, including
//! the growth path past the initial buffer capacity.

use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use stdprompt_core::{INITIAL_CAPACITY, Session};

const LINES_PER_ITER: usize = 64;

fn input_of(len: usize, terminator: &str) -> Vec<u8> {
    let line = "x".repeat(len);
    format!("{line}{terminator}")
        .repeat(LINES_PER_ITER)
        .into_bytes()
}

fn bench_read_line_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_line");
    for len in [0, INITIAL_CAPACITY - 1, INITIAL_CAPACITY + 1, 1024, 64 * 1024] {
        let input = input_of(len, "\n");
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| {
                let mut session = Session::new(Cursor::new(input.as_slice()), std::io::sink());
                for _ in 0..LINES_PER_ITER {
                    criterion::black_box(session.read_line(None).ok());
                }
            });
        });
    }
    group.finish();
}

fn bench_terminators(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminator");
    for (name, terminator) in [("lf", "\n"), ("cr", "\r"), ("crlf", "\r\n")] {
        let input = input_of(32, terminator);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| {
                let mut session = Session::new(Cursor::new(input.as_slice()), std::io::sink());
                for _ in 0..LINES_PER_ITER {
                    criterion::black_box(session.read_line(None).ok());
                }
            });
        });
    }
    group.finish();
}

fn bench_close(c: &mut Criterion) {
    let input = input_of(16, "\n");
    c.bench_function("close_64_lines", |b| {
        b.iter(|| {
            let mut session = Session::new(Cursor::new(input.as_slice()), std::io::sink());
            while session.read_line(None).is_ok() {}
            criterion::black_box(session.close());
        });
    });
}

criterion_group!(
    benches,
    bench_read_line_lengths,
    bench_terminators,
    bench_close
);
criterion_main!(benches);
