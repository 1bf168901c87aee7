//! Havan Benchmarks
//!
//! Cost of generating the fire loop and rendering a paper.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use havan::engine::{LoopPlayer, NullDevice};
use havan::markdown;
use havan::synth::FireSynth;

fn benchmark_fire_synthesis(c: &mut Criterion) {
    let synth = FireSynth::default();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("fire_loop_10s", |b| {
        b.iter(|| black_box(synth.generate_with_rng(&mut rng)))
    });
}

fn benchmark_loop_render(c: &mut Criterion) {
    let mut player = LoopPlayer::new(NullDevice::default());
    player.play().unwrap();
    let mut block = vec![0.0f32; 512];

    c.bench_function("loop_render_512", |b| {
        b.iter(|| player.render(black_box(&mut block)))
    });
}

fn benchmark_markdown_render(c: &mut Criterion) {
    let section = "\
## Method

Participants gazed at a *single flame* for **ten minutes** [Smith et al., 2020].
Attention was scored with `SART` & compared to baseline.

1. Gaze
2. Close the eyes
3. Hold the after-image

- calm
- focus

---
";
    let document = section.repeat(50);

    c.bench_function("markdown_paper_50_sections", |b| {
        b.iter(|| markdown::render(black_box(&document)))
    });
}

criterion_group!(
    benches,
    benchmark_fire_synthesis,
    benchmark_loop_render,
    benchmark_markdown_render
);
criterion_main!(benches);
