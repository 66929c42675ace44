//! Compare the scalar kernels against the vector backend picked for this CPU
//!
//! A 1920x1080 4:2:0 frame has 960x540 chroma planes, that is what gets
//! upsampled here.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zune_upsample::{SamplePlane, SubSampRatios, Upsampler, UpsamplerOptions};

fn chroma_plane() -> SamplePlane {
    let (width, height) = (960, 540);
    let data: Vec<u8> = (0..width * height).map(|x| (x * 7 % 251) as u8).collect();

    SamplePlane::from_packed(&data, width, height).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let plane = chroma_plane();

    let scalar = Upsampler::new_with_options(UpsamplerOptions::default().set_use_simd(false));
    let fastest = Upsampler::new();

    for ratio in [SubSampRatios::H2V2, SubSampRatios::H1V2] {
        c.bench_function(&format!("{:?} upsampling scalar", ratio), |b| {
            b.iter(|| black_box(scalar.upsample_plane(&plane, ratio).unwrap()))
        });
        c.bench_function(
            &format!("{:?} upsampling {:?}", ratio, fastest.backend()),
            |b| b.iter(|| black_box(fastest.upsample_plane(&plane, ratio).unwrap())),
        );
    }

    let planes = [(&plane, SubSampRatios::H2V2), (&plane, SubSampRatios::H2V2)];

    c.bench_function("Two chroma planes threaded", |b| {
        b.iter(|| black_box(fastest.upsample_planes(&planes).unwrap()))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
