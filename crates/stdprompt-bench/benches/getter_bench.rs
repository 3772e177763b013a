//! Typed getter benchmarks.
//!
//! Measures the parse half of the getters directly and the full retry loop
//! through a session.

use std::io::Cursor;

use criterion::{Criterion, criterion_group, criterion_main};
use stdprompt_core::Session;
use stdprompt_core::getter::{parse_float, parse_signed, parse_unsigned};

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_signed_i32", |b| {
        b.iter(|| criterion::black_box(parse_signed::<i32>(criterion::black_box(b"  -123456  "))));
    });
    c.bench_function("parse_unsigned_u64", |b| {
        b.iter(|| {
            criterion::black_box(parse_unsigned::<u64>(criterion::black_box(
                b"18446744073709551615",
            )))
        });
    });
    c.bench_function("parse_float_f64", |b| {
        b.iter(|| criterion::black_box(parse_float::<f64>(criterion::black_box(b"3.14159e-2"))));
    });
}

fn bench_get_int_with_retries(c: &mut Criterion) {
    // Three rejected lines before each accepted one.
    let input = "abc\n\n-\n42\n".repeat(16).into_bytes();
    c.bench_function("get_int_retry_loop", |b| {
        b.iter(|| {
            let mut session = Session::new(Cursor::new(input.as_slice()), std::io::sink());
            while let Ok(v) = session.get_int(Some(format_args!("> "))) {
                criterion::black_box(v);
            }
        });
    });
}

criterion_group!(benches, bench_parse, bench_get_int_with_retries);
criterion_main!(benches);
