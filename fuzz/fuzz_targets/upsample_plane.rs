#![no_main]
use libfuzzer_sys::fuzz_target;
use zune_upsample::{SamplePlane, SubSampRatios, Upsampler, UpsamplerOptions};

fuzz_target!(|data: &[u8]| {
    // first byte picks the width, the rest are samples
    let Some((&w, samples)) = data.split_first() else {
        return;
    };
    let width = usize::from(w) + 1;
    let height = samples.len() / width;

    if height == 0 {
        return;
    }
    let plane = SamplePlane::from_packed(&samples[..width * height], width, height).unwrap();

    let scalar = Upsampler::new_with_options(UpsamplerOptions::default().set_use_simd(false));
    let fastest = Upsampler::new();

    for ratio in [SubSampRatios::H2V2, SubSampRatios::H1V2] {
        let a = scalar.upsample_plane(&plane, ratio).unwrap();
        let b = fastest.upsample_plane(&plane, ratio).unwrap();

        assert_eq!(a.to_packed(), b.to_packed());
    }
});
