use core_actions::{EditOptions, default_table, dispatch};
use core_events::{KeyModifiers, Platform, RawKeyEvent, keycode};
use core_keymap::KeyTuple;
use core_state::{EditorSession, NoopPersistence, NoopRenderSink};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn sample_text(lines: usize) -> String {
    let mut s = String::new();
    for i in 0..lines {
        s.push_str(&format!("    line {i} {{ value: {i} }}\n"));
    }
    s
}

fn bench_resolve(c: &mut Criterion) {
    let table = default_table(EditOptions::default());
    let tuple = KeyTuple::new(Platform::Win, KeyModifiers::SHIFT, 65, false);
    c.bench_function("resolve_typing_key", |b| {
        b.iter(|| black_box(table.resolve(black_box(&tuple)).is_unbound()))
    });
}

fn bench_typing(c: &mut Criterion) {
    let table = default_table(EditOptions::default());
    let text = sample_text(500);
    let caret = text.chars().count();
    c.bench_function("dispatch_type_char_500_lines", |b| {
        b.iter(|| {
            let mut s = EditorSession::new(Some(&text), NoopRenderSink, NoopPersistence);
            let ev = RawKeyEvent::new(65, KeyModifiers::empty(), text.as_str(), caret, caret);
            black_box(dispatch(&mut s, &table, Platform::Win, &ev).is_ok())
        })
    });
}

fn bench_indent_block(c: &mut Criterion) {
    let table = default_table(EditOptions::default());
    let text = sample_text(500);
    let len = text.chars().count();
    c.bench_function("dispatch_indent_500_lines", |b| {
        b.iter(|| {
            let mut s = EditorSession::new(Some(&text), NoopRenderSink, NoopPersistence);
            let ev = RawKeyEvent::new(keycode::TAB, KeyModifiers::empty(), text.as_str(), 0, len);
            black_box(dispatch(&mut s, &table, Platform::Win, &ev).is_ok())
        })
    });
}

criterion_group!(benches, bench_resolve, bench_typing, bench_indent_block);
criterion_main!(benches);
