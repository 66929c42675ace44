//! AVX2 upsampling
//!
//! Same layout as the SSE2 routines but a whole 16 column step is widened
//! into one ymm register, so there is no low/high split.
#![cfg(feature = "x86")]
#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#![allow(clippy::module_name_repetitions, clippy::cast_ptr_alignment)]

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::components::RowWindow;
use crate::sample::{input_capacity, output_capacity_h1v2, output_capacity_h2v2};

pub(crate) fn upsample_h2v2_avx2(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    // Safety
    // - The chooser only hands this function out when avx2 is detected
    // - The public entry points checked every row against the padded capacities
    unsafe { upsample_h2v2_avx2_u(width, window, out_top, out_bottom) }
}

pub(crate) fn upsample_h1v2_avx2(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    // Safety: see upsample_h2v2_avx2
    unsafe { upsample_h1v2_avx2_u(width, window, out_top, out_bottom) }
}

/// # Safety
/// - The CPU must support avx2
/// - Window rows must hold [`input_capacity`] bytes and output rows
///   [`output_capacity_h2v2`] bytes for `width`
#[target_feature(enable = "avx2")]
unsafe fn upsample_h2v2_avx2_u(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    debug_assert!(width > 0 && window.min_len() >= input_capacity(width));
    debug_assert!(out_top.len().min(out_bottom.len()) >= output_capacity_h2v2(width));

    let three = _mm256_set1_epi16(3);
    let seven = _mm256_set1_epi16(7);
    let eight = _mm256_set1_epi16(8);

    let above = window.above.as_ptr();
    let current = window.current.as_ptr();
    let below = window.below.as_ptr();

    let top = out_top.as_mut_ptr();
    let bottom = out_bottom.as_mut_ptr();

    // load 16 samples and widen them to 16 bits
    macro_rules! load {
        ($ptr:expr) => {
            _mm256_cvtepu8_epi16(_mm_loadu_si128($ptr.cast()))
        };
    }
    // 3 * near + far
    macro_rules! colsum {
        ($near:expr, $far:expr) => {
            _mm256_add_epi16(_mm256_mullo_epi16($near, three), $far)
        };
    }

    let s0colsum0 = 3 * u16::from(window.current[0]) + u16::from(window.above[0]);
    let s0colsum1 = 3 * u16::from(window.current[0]) + u16::from(window.below[0]);
    *top = ((s0colsum0 * 4 + 8) >> 4) as u8;
    *bottom = ((s0colsum1 * 4 + 8) >> 4) as u8;

    macro_rules! block {
        ($j:expr) => {{
            let j: usize = $j;

            let s0r1 = load!(current.add(j));
            let s1r1 = load!(current.add(j + 1));

            let s0colsum0 = colsum!(s0r1, load!(above.add(j)));
            let s0colsum1 = colsum!(s0r1, load!(below.add(j)));
            let s1colsum0 = colsum!(s1r1, load!(above.add(j + 1)));
            let s1colsum1 = colsum!(s1r1, load!(below.add(j + 1)));

            // odd pixels get 7 and a truncating shift, even pixels round with 8
            let output0_p1 =
                _mm256_srli_epi16::<4>(_mm256_add_epi16(colsum!(s0colsum0, s1colsum0), seven));
            let output0_p2 =
                _mm256_srli_epi16::<4>(_mm256_add_epi16(colsum!(s1colsum0, s0colsum0), eight));
            let output1_p1 =
                _mm256_srli_epi16::<4>(_mm256_add_epi16(colsum!(s0colsum1, s1colsum1), seven));
            let output1_p2 =
                _mm256_srli_epi16::<4>(_mm256_add_epi16(colsum!(s1colsum1, s0colsum1), eight));

            // p1 in the low byte, p2 in the high byte, 32 interleaved pixels
            let output0 = _mm256_or_si256(output0_p1, _mm256_slli_epi16::<8>(output0_p2));
            let output1 = _mm256_or_si256(output1_p1, _mm256_slli_epi16::<8>(output1_p2));

            _mm256_storeu_si256(top.add(2 * j + 1).cast(), output0);
            _mm256_storeu_si256(bottom.add(2 * j + 1).cast(), output1);
        }};
    }

    block!(0);

    for colctr in (16..width).step_by(16) {
        block!(colctr - 1);
    }

    let s1colsum0 = 3 * u16::from(window.current[width - 1]) + u16::from(window.above[width - 1]);
    let s1colsum1 = 3 * u16::from(window.current[width - 1]) + u16::from(window.below[width - 1]);
    *top.add(2 * width - 1) = ((s1colsum0 * 4 + 7) >> 4) as u8;
    *bottom.add(2 * width - 1) = ((s1colsum1 * 4 + 7) >> 4) as u8;
}

/// # Safety
/// - The CPU must support avx2
/// - Window rows must hold [`input_capacity`] bytes and output rows
///   [`output_capacity_h1v2`] bytes for `width`
#[target_feature(enable = "avx2")]
unsafe fn upsample_h1v2_avx2_u(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    debug_assert!(width > 0 && window.min_len() >= input_capacity(width));
    debug_assert!(out_top.len().min(out_bottom.len()) >= output_capacity_h1v2(width));

    let one = _mm256_set1_epi16(1);
    let two = _mm256_set1_epi16(2);
    let three = _mm256_set1_epi16(3);

    let above = window.above.as_ptr();
    let current = window.current.as_ptr();
    let below = window.below.as_ptr();

    let top = out_top.as_mut_ptr();
    let bottom = out_bottom.as_mut_ptr();

    // packus works per 128 bit lane, keep quad words 0 and 2
    macro_rules! narrow {
        ($v:expr) => {
            _mm256_castsi256_si128(_mm256_permute4x64_epi64::<0b00_00_10_00>(
                _mm256_packus_epi16($v, $v),
            ))
        };
    }

    for colctr in (0..width).step_by(16) {
        let r0 = _mm256_cvtepu8_epi16(_mm_loadu_si128(above.add(colctr).cast()));
        let r1 = _mm256_cvtepu8_epi16(_mm_loadu_si128(current.add(colctr).cast()));
        let r2 = _mm256_cvtepu8_epi16(_mm_loadu_si128(below.add(colctr).cast()));

        let near = _mm256_mullo_epi16(r1, three);

        let colsum0 = _mm256_add_epi16(_mm256_add_epi16(near, r0), one);
        let colsum1 = _mm256_add_epi16(_mm256_add_epi16(near, r2), two);

        let output0 = narrow!(_mm256_srli_epi16::<2>(colsum0));
        let output1 = narrow!(_mm256_srli_epi16::<2>(colsum1));

        _mm_storeu_si128(top.add(colctr).cast(), output0);
        _mm_storeu_si128(bottom.add(colctr).cast(), output1);
    }
}
