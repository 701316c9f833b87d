//! Benchmarks for the substitution pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use publish_core::substitution::{
    apply_substitutions, RegexSubstitution, SimpleSubstitution, Substitution,
};

fn sample_text() -> String {
    let paragraph = "The quick brown fox jumps over the lazy dog. \
                     Cows say moo, ships say ahoy.\n\n";
    paragraph.repeat(200)
}

fn bench_substitutions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Substitutions");
    let text = sample_text();

    group.bench_function("simple_10", |b| {
        let subs: Vec<Substitution> = (0..10)
            .map(|i| SimpleSubstitution::new(format!("word{i}"), "replacement").into())
            .collect();
        b.iter(|| black_box(apply_substitutions(&text, &subs)))
    });

    group.bench_function("simple_matching", |b| {
        let subs: Vec<Substitution> = vec![
            SimpleSubstitution::new("fox", "cat").into(),
            SimpleSubstitution::new("dog", "bird").into(),
        ];
        b.iter(|| black_box(apply_substitutions(&text, &subs)))
    });

    group.bench_function("regex_backreference", |b| {
        let subs: Vec<Substitution> = vec![RegexSubstitution::new(r"(\w+) say", "$1 shout")
            .unwrap()
            .into()];
        b.iter(|| black_box(apply_substitutions(&text, &subs)))
    });

    group.finish();
}

criterion_group!(benches, bench_substitutions);
criterion_main!(benches);
