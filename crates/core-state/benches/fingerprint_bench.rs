use core_state::{EditorSession, NoopPersistence, NoopRenderSink, Snapshot, fingerprint};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn sample_text(lines: usize) -> String {
    let mut s = String::new();
    for i in 0..lines {
        s.push_str(&format!("key_{i} = \"value number {i}\"\n"));
    }
    s
}

fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");
    for lines in [10usize, 1_000, 10_000] {
        let text = sample_text(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &text, |b, t| {
            b.iter(|| fingerprint(black_box(t)))
        });
    }
    group.finish();
}

fn bench_push_undo_redo(c: &mut Criterion) {
    let text = sample_text(1_000);
    c.bench_function("push_undo_redo_1k_lines", |b| {
        b.iter(|| {
            let mut s = EditorSession::new(Some(&text), NoopRenderSink, NoopPersistence);
            s.push(Snapshot::caret_at_end(format!("{text}x")));
            s.undo();
            s.redo();
            black_box(s.is_dirty())
        })
    });
}

criterion_group!(benches, bench_fingerprint, bench_push_undo_redo);
criterion_main!(benches);
