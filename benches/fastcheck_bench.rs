use criterion::{criterion_group, criterion_main, Criterion};
use fastcheck_fmmseg::delimiter_set::is_ignorable;
use fastcheck_fmmseg::FastCheck;
use std::hint::black_box;
use std::time::Duration;

const TEXT: &str = "This is a test text with badword and anotherbadword.";
const TEXT_MIXED_CASE: &str = "This is a test text with BadWord and AnotherBadWord.";

fn checker(ignore_case: bool) -> FastCheck {
    let fc = FastCheck::new(ignore_case);
    fc.insert("badword").unwrap();
    fc.insert("anotherbadword").unwrap();
    fc
}

fn bench_replace(c: &mut Criterion) {
    let fc = checker(false);
    c.bench_function("replace", |b| {
        b.iter(|| fc.replace(black_box(TEXT), '*', None));
    });
}

fn bench_has_word(c: &mut Criterion) {
    let fc = checker(false);
    c.bench_function("has_word", |b| {
        b.iter(|| fc.has_word(black_box(TEXT), None));
    });
}

fn bench_replace_case_insensitive(c: &mut Criterion) {
    let fc = checker(true);
    c.bench_function("replace_case_insensitive", |b| {
        b.iter(|| fc.replace(black_box(TEXT_MIXED_CASE), '*', None));
    });
}

fn bench_has_word_case_insensitive(c: &mut Criterion) {
    let fc = checker(true);
    c.bench_function("has_word_case_insensitive", |b| {
        b.iter(|| fc.has_word(black_box(TEXT_MIXED_CASE), None));
    });
}

fn bench_replace_ignorable_100k(c: &mut Criterion) {
    let input = "一段 b.a.d.w.o.r.d 测试文字，没有问题的句子。".repeat(3334); // ~100,020 characters
    let fc = checker(true);

    c.bench_function("replace_ignorable_100k", |b| {
        b.iter(|| fc.replace(black_box(&input), '*', Some(&is_ignorable)));
    });
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(5))
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_replace, bench_has_word, bench_replace_case_insensitive,
        bench_has_word_case_insensitive, bench_replace_ignorable_100k
}
criterion_main!(benches);
