//! Benchmarks for the transcription pipeline
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use monoscribe::{transcribe, BeatTrack, PitchFrame, TranscriptionConfig};

/// Synthetic melody: `note_count` notes of 0.4s each, stepping through a
/// scale, with unvoiced gaps between them, at 100 frames per second
fn synthetic_frames(note_count: usize) -> Vec<PitchFrame> {
    let scale = [261.63, 293.66, 329.63, 349.23, 392.0, 440.0, 493.88];
    let step = 0.01;
    let mut frames = Vec::new();
    let mut t = 0.0f32;
    for i in 0..note_count {
        let freq = scale[i % scale.len()];
        for _ in 0..40 {
            frames.push(PitchFrame {
                time: t,
                frequency: Some(freq),
                confidence: 0.9,
            });
            t += step;
        }
        frames.push(PitchFrame {
            time: t,
            frequency: None,
            confidence: 0.1,
        });
        t += step;
    }
    frames
}

fn bench_transcribe(c: &mut Criterion) {
    let config = TranscriptionConfig::default();
    let beats = BeatTrack {
        tempo: 120.0,
        beats: (0..64).map(|i| i as f32 * 0.5).collect(),
    };

    let mut group = c.benchmark_group("transcribe");
    for &note_count in &[16usize, 64, 256] {
        let frames = synthetic_frames(note_count);
        group.bench_function(format!("{}_notes", note_count), |b| {
            b.iter(|| {
                transcribe(
                    black_box(&frames),
                    None,
                    Some(black_box(&beats)),
                    &config,
                )
                .expect("benchmark input must transcribe")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transcribe);
criterion_main!(benches);
