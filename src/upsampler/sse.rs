//! SSE2 upsampling, 16 input columns per step
//!
//! Samples are widened to 16 bits, blended and narrowed back. For h2v2 the two
//! output pixels of a column boundary are merged into one 16 bit lane as
//! `p1 | p2 << 8`, which on a little endian machine stores them already
//! interleaved, so no shuffles are needed.
#![cfg(feature = "x86")]
#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#![allow(clippy::module_name_repetitions, clippy::cast_ptr_alignment)]

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::components::RowWindow;
use crate::sample::{input_capacity, output_capacity_h1v2, output_capacity_h2v2};

/// Widen the low or high 8 samples of `near`/`far` and compute `3 * near + far`
macro_rules! colsum {
    ($unpack:ident, $near:expr, $far:expr, $zero:expr, $three:expr) => {
        _mm_add_epi16(
            _mm_mullo_epi16($unpack($near, $zero), $three),
            $unpack($far, $zero),
        )
    };
}

/// Blend two column sums horizontally, returning the odd/even output pair
/// for 8 column boundaries packed as `p1 | p2 << 8`
macro_rules! blend_columns {
    ($s0:expr, $s1:expr, $three:expr, $seven:expr, $eight:expr) => {{
        // odd outputs, nearer to column s0, dither bias 7
        let p1 = _mm_srli_epi16::<4>(_mm_add_epi16(
            _mm_add_epi16(_mm_mullo_epi16($s0, $three), $s1),
            $seven,
        ));
        // even outputs, nearer to column s1, rounding bias 8
        let p2 = _mm_srli_epi16::<4>(_mm_add_epi16(
            _mm_add_epi16(_mm_mullo_epi16($s1, $three), $s0),
            $eight,
        ));
        _mm_or_si128(p1, _mm_slli_epi16::<8>(p2))
    }};
}

pub(crate) fn upsample_h2v2_sse2(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    // Safety
    // - The chooser only hands this function out when sse2 is detected
    // - The public entry points checked every row against the padded capacities
    unsafe { upsample_h2v2_sse2_u(width, window, out_top, out_bottom) }
}

pub(crate) fn upsample_h1v2_sse2(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    // Safety: see upsample_h2v2_sse2
    unsafe { upsample_h1v2_sse2_u(width, window, out_top, out_bottom) }
}

/// Upsample one row h2v2 using SSE2
///
/// # Safety
/// - The CPU must support sse2
/// - Window rows must hold [`input_capacity`] bytes and output rows
///   [`output_capacity_h2v2`] bytes for `width`
#[target_feature(enable = "sse2")]
unsafe fn upsample_h2v2_sse2_u(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    debug_assert!(width > 0 && window.min_len() >= input_capacity(width));
    debug_assert!(out_top.len().min(out_bottom.len()) >= output_capacity_h2v2(width));

    let zero = _mm_setzero_si128();
    let three = _mm_set1_epi16(3);
    let seven = _mm_set1_epi16(7);
    let eight = _mm_set1_epi16(8);

    let above = window.above.as_ptr();
    let current = window.current.as_ptr();
    let below = window.below.as_ptr();

    let top = out_top.as_mut_ptr();
    let bottom = out_bottom.as_mut_ptr();

    // first pixel
    let s0colsum0 = 3 * u16::from(window.current[0]) + u16::from(window.above[0]);
    let s0colsum1 = 3 * u16::from(window.current[0]) + u16::from(window.below[0]);
    *top = ((s0colsum0 * 4 + 8) >> 4) as u8;
    *bottom = ((s0colsum1 * 4 + 8) >> 4) as u8;

    // Blends the boundaries between columns j..j+16 and j+1..j+17 and writes
    // them to out[2j+1..2j+33]
    macro_rules! block {
        ($j:expr) => {{
            let j: usize = $j;

            let s0r0 = _mm_loadu_si128(above.add(j).cast());
            let s0r1 = _mm_loadu_si128(current.add(j).cast());
            let s0r2 = _mm_loadu_si128(below.add(j).cast());

            let s1r0 = _mm_loadu_si128(above.add(j + 1).cast());
            let s1r1 = _mm_loadu_si128(current.add(j + 1).cast());
            let s1r2 = _mm_loadu_si128(below.add(j + 1).cast());

            // vertical pass, '_l' and '_h' are the low and high 8 columns
            let s0colsum0_l = colsum!(_mm_unpacklo_epi8, s0r1, s0r0, zero, three);
            let s0colsum0_h = colsum!(_mm_unpackhi_epi8, s0r1, s0r0, zero, three);
            let s0colsum1_l = colsum!(_mm_unpacklo_epi8, s0r1, s0r2, zero, three);
            let s0colsum1_h = colsum!(_mm_unpackhi_epi8, s0r1, s0r2, zero, three);

            let s1colsum0_l = colsum!(_mm_unpacklo_epi8, s1r1, s1r0, zero, three);
            let s1colsum0_h = colsum!(_mm_unpackhi_epi8, s1r1, s1r0, zero, three);
            let s1colsum1_l = colsum!(_mm_unpacklo_epi8, s1r1, s1r2, zero, three);
            let s1colsum1_h = colsum!(_mm_unpackhi_epi8, s1r1, s1r2, zero, three);

            // horizontal pass
            let output0_l = blend_columns!(s0colsum0_l, s1colsum0_l, three, seven, eight);
            let output0_h = blend_columns!(s0colsum0_h, s1colsum0_h, three, seven, eight);
            let output1_l = blend_columns!(s0colsum1_l, s1colsum1_l, three, seven, eight);
            let output1_h = blend_columns!(s0colsum1_h, s1colsum1_h, three, seven, eight);

            let pos = 2 * j + 1;

            _mm_storeu_si128(top.add(pos).cast(), output0_l);
            _mm_storeu_si128(top.add(pos + 16).cast(), output0_h);
            _mm_storeu_si128(bottom.add(pos).cast(), output1_l);
            _mm_storeu_si128(bottom.add(pos + 16).cast(), output1_h);
        }};
    }

    // The first pixel shifted loads and stores by one byte, realign on the
    // 32/33 pixel boundary so that every later block stays inside the padded
    // rows without a scalar tail. Boundary 15 is computed twice.
    block!(0);

    for colctr in (16..width).step_by(16) {
        block!(colctr - 1);
    }

    // last pixel, overwrites what the last block wrote from padding
    let s1colsum0 = 3 * u16::from(window.current[width - 1]) + u16::from(window.above[width - 1]);
    let s1colsum1 = 3 * u16::from(window.current[width - 1]) + u16::from(window.below[width - 1]);
    *top.add(2 * width - 1) = ((s1colsum0 * 4 + 7) >> 4) as u8;
    *bottom.add(2 * width - 1) = ((s1colsum1 * 4 + 7) >> 4) as u8;
}

/// Upsample one row h1v2 using SSE2
///
/// # Safety
/// - The CPU must support sse2
/// - Window rows must hold [`input_capacity`] bytes and output rows
///   [`output_capacity_h1v2`] bytes for `width`
#[target_feature(enable = "sse2")]
unsafe fn upsample_h1v2_sse2_u(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    debug_assert!(width > 0 && window.min_len() >= input_capacity(width));
    debug_assert!(out_top.len().min(out_bottom.len()) >= output_capacity_h1v2(width));

    let zero = _mm_setzero_si128();
    let one = _mm_set1_epi16(1);
    let two = _mm_set1_epi16(2);
    let three = _mm_set1_epi16(3);

    let above = window.above.as_ptr();
    let current = window.current.as_ptr();
    let below = window.below.as_ptr();

    let top = out_top.as_mut_ptr();
    let bottom = out_bottom.as_mut_ptr();

    // rows are padded to 32 bytes, the last step may run into the padding
    for colctr in (0..width).step_by(16) {
        let r0 = _mm_loadu_si128(above.add(colctr).cast());
        let r1 = _mm_loadu_si128(current.add(colctr).cast());
        let r2 = _mm_loadu_si128(below.add(colctr).cast());

        let colsum0_l = colsum!(_mm_unpacklo_epi8, r1, r0, zero, three);
        let colsum0_h = colsum!(_mm_unpackhi_epi8, r1, r0, zero, three);
        let colsum1_l = colsum!(_mm_unpacklo_epi8, r1, r2, zero, three);
        let colsum1_h = colsum!(_mm_unpackhi_epi8, r1, r2, zero, three);

        // even output rows get a bias of 1, odd rows round with 2
        let output0 = _mm_packus_epi16(
            _mm_srli_epi16::<2>(_mm_add_epi16(colsum0_l, one)),
            _mm_srli_epi16::<2>(_mm_add_epi16(colsum0_h, one)),
        );
        let output1 = _mm_packus_epi16(
            _mm_srli_epi16::<2>(_mm_add_epi16(colsum1_l, two)),
            _mm_srli_epi16::<2>(_mm_add_epi16(colsum1_h, two)),
        );

        _mm_storeu_si128(top.add(colctr).cast(), output0);
        _mm_storeu_si128(bottom.add(colctr).cast(), output1);
    }
}
