//! Benchmarks for the voice manager and its overflow store.
//!
//! Run with: cargo bench
//!
//! Every `handle` call has to fit inside an audio callback, so these track
//! the worst-case paths: steals into a nearly full store, restores that walk
//! the whole store, and releases of queued notes from the middle.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use voicesteal::{NoteEvent, OverflowStore, PressedNote, VoiceManager};

fn bench_overflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("overflow");

    group.bench_function("fill_and_drain_16", |b| {
        let mut store = OverflowStore::<16>::new();
        b.iter(|| {
            for note in 0..16 {
                store.insert(black_box(PressedNote::new(note, 100)));
            }
            while let Some(pressed) = store.take_most_recent() {
                black_box(pressed);
            }
        })
    });

    group.bench_function("remove_middle_16", |b| {
        let mut store = OverflowStore::<16>::new();
        b.iter(|| {
            for note in 0..16 {
                store.insert(PressedNote::new(note, 100));
            }
            for note in (0..16).rev().step_by(2) {
                black_box(store.remove_by_note(note));
            }
            store.clear();
        })
    });

    group.finish();
}

fn bench_manager(c: &mut Criterion) {
    let mut group = c.benchmark_group("manager");

    // chord stacks deeper than the voice count, then lets go top-down
    for &depth in &[4u8, 12, 20] {
        group.bench_with_input(BenchmarkId::new("steal_restore", depth), &depth, |b, &depth| {
            let mut manager = VoiceManager::<4>::new(0);
            b.iter(|| {
                for note in 0..depth {
                    black_box(manager.handle(NoteEvent::press(0, 40 + note, 100)));
                }
                for note in (0..depth).rev() {
                    black_box(manager.handle(NoteEvent::release(0, 40 + note)));
                }
            })
        });
    }

    group.bench_function("ignored_channel", |b| {
        let mut manager = VoiceManager::<4>::new(0);
        b.iter(|| black_box(manager.handle(black_box(NoteEvent::press(9, 60, 100)))))
    });

    group.finish();
}

criterion_group!(benches, bench_overflow, bench_manager);
criterion_main!(benches);
