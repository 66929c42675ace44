//! Arm NEON upsampling
//!
//! NEON has widening multiply-accumulate (`vmlal`) as well as truncating
//! (`vshrn`) and rounding (`vrshrn`) narrowing shifts, so the dither biases map
//! straight onto instructions: the pixels that carry a bias of 7 (or 1) get it
//! added before a truncating shift, the others use the rounding shift.
#![cfg(feature = "neon")]
#![cfg(target_arch = "aarch64")]
#![allow(clippy::module_name_repetitions)]

use std::arch::aarch64::*;

use crate::components::RowWindow;
use crate::sample::{input_capacity, output_capacity_h1v2, output_capacity_h2v2};

pub(crate) fn upsample_h2v2_neon(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    // Safety
    // - The chooser only hands this function out when neon is detected
    // - The public entry points checked every row against the padded capacities
    unsafe { upsample_h2v2_neon_u(width, window, out_top, out_bottom) }
}

pub(crate) fn upsample_h1v2_neon(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    // Safety: see upsample_h2v2_neon
    unsafe { upsample_h1v2_neon_u(width, window, out_top, out_bottom) }
}

/// # Safety
/// - The CPU must support neon
/// - Window rows must hold [`input_capacity`] bytes and output rows
///   [`output_capacity_h2v2`] bytes for `width`
#[target_feature(enable = "neon")]
unsafe fn upsample_h2v2_neon_u(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    debug_assert!(width > 0 && window.min_len() >= input_capacity(width));
    debug_assert!(out_top.len().min(out_bottom.len()) >= output_capacity_h2v2(width));

    let seven_u16 = vdupq_n_u16(7);
    let three_u8 = vdup_n_u8(3);
    let three_u16 = vdupq_n_u16(3);

    let inptr0 = window.above.as_ptr();
    let inptr1 = window.current.as_ptr();
    let inptr2 = window.below.as_ptr();

    // suffixes 0 and 1 are the top and bottom output rows
    let outptr0 = out_top.as_mut_ptr();
    let outptr1 = out_bottom.as_mut_ptr();

    let s0colsum0 = 3 * u16::from(window.current[0]) + u16::from(window.above[0]);
    let s0colsum1 = 3 * u16::from(window.current[0]) + u16::from(window.below[0]);
    *outptr0 = ((s0colsum0 * 4 + 8) >> 4) as u8;
    *outptr1 = ((s0colsum1 * 4 + 8) >> 4) as u8;

    // 3 * near + far, '_l' and '_h' are the low and high 8 columns
    macro_rules! colsum {
        ($near:expr, $far:expr) => {
            (
                vmlal_u8(vmovl_u8(vget_low_u8($far)), vget_low_u8($near), three_u8),
                vmlal_u8(vmovl_u8(vget_high_u8($far)), vget_high_u8($near), three_u8),
            )
        };
    }

    macro_rules! block {
        ($j:expr) => {{
            let j: usize = $j;

            let s0r0 = vld1q_u8(inptr0.add(j));
            let s0r1 = vld1q_u8(inptr1.add(j));
            let s0r2 = vld1q_u8(inptr2.add(j));
            let (s0colsum0_l, s0colsum0_h) = colsum!(s0r1, s0r0);
            let (s0colsum1_l, s0colsum1_h) = colsum!(s0r1, s0r2);

            let s1r0 = vld1q_u8(inptr0.add(j + 1));
            let s1r1 = vld1q_u8(inptr1.add(j + 1));
            let s1r2 = vld1q_u8(inptr2.add(j + 1));
            let (s1colsum0_l, s1colsum0_h) = colsum!(s1r1, s1r0);
            let (s1colsum1_l, s1colsum1_h) = colsum!(s1r1, s1r2);

            // blend the already blended columns
            let output0_p1_l = vaddq_u16(vmlaq_u16(s1colsum0_l, s0colsum0_l, three_u16), seven_u16);
            let output0_p1_h = vaddq_u16(vmlaq_u16(s1colsum0_h, s0colsum0_h, three_u16), seven_u16);
            let output0_p2_l = vmlaq_u16(s0colsum0_l, s1colsum0_l, three_u16);
            let output0_p2_h = vmlaq_u16(s0colsum0_h, s1colsum0_h, three_u16);
            let output1_p1_l = vaddq_u16(vmlaq_u16(s1colsum1_l, s0colsum1_l, three_u16), seven_u16);
            let output1_p1_h = vaddq_u16(vmlaq_u16(s1colsum1_h, s0colsum1_h, three_u16), seven_u16);
            let output1_p2_l = vmlaq_u16(s0colsum1_l, s1colsum1_l, three_u16);
            let output1_p2_h = vmlaq_u16(s0colsum1_h, s1colsum1_h, three_u16);

            let output_pixels0 = uint8x16x2_t(
                vcombine_u8(vshrn_n_u16::<4>(output0_p1_l), vshrn_n_u16::<4>(output0_p1_h)),
                vcombine_u8(vrshrn_n_u16::<4>(output0_p2_l), vrshrn_n_u16::<4>(output0_p2_h)),
            );
            let output_pixels1 = uint8x16x2_t(
                vcombine_u8(vshrn_n_u16::<4>(output1_p1_l), vshrn_n_u16::<4>(output1_p1_h)),
                vcombine_u8(vrshrn_n_u16::<4>(output1_p2_l), vrshrn_n_u16::<4>(output1_p2_h)),
            );
            // interleaving store
            vst2q_u8(outptr0.add(2 * j + 1), output_pixels0);
            vst2q_u8(outptr1.add(2 * j + 1), output_pixels1);
        }};
    }

    block!(0);

    for colctr in (16..width).step_by(16) {
        block!(colctr - 1);
    }

    let s1colsum0 = 3 * u16::from(window.current[width - 1]) + u16::from(window.above[width - 1]);
    let s1colsum1 = 3 * u16::from(window.current[width - 1]) + u16::from(window.below[width - 1]);
    *outptr0.add(2 * width - 1) = ((s1colsum0 * 4 + 7) >> 4) as u8;
    *outptr1.add(2 * width - 1) = ((s1colsum1 * 4 + 7) >> 4) as u8;
}

/// # Safety
/// - The CPU must support neon
/// - Window rows must hold [`input_capacity`] bytes and output rows
///   [`output_capacity_h1v2`] bytes for `width`
#[target_feature(enable = "neon")]
unsafe fn upsample_h1v2_neon_u(
    width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8],
) {
    debug_assert!(width > 0 && window.min_len() >= input_capacity(width));
    debug_assert!(out_top.len().min(out_bottom.len()) >= output_capacity_h1v2(width));

    let one_u16 = vdupq_n_u16(1);
    let three_u8 = vdup_n_u8(3);

    let inptr0 = window.above.as_ptr();
    let inptr1 = window.current.as_ptr();
    let inptr2 = window.below.as_ptr();

    let outptr0 = out_top.as_mut_ptr();
    let outptr1 = out_bottom.as_mut_ptr();

    for colctr in (0..width).step_by(16) {
        let r0 = vld1q_u8(inptr0.add(colctr));
        let r1 = vld1q_u8(inptr1.add(colctr));
        let r2 = vld1q_u8(inptr2.add(colctr));

        let colsum0_l = vaddq_u16(
            vmlal_u8(vmovl_u8(vget_low_u8(r0)), vget_low_u8(r1), three_u8),
            one_u16,
        );
        let colsum0_h = vaddq_u16(
            vmlal_u8(vmovl_u8(vget_high_u8(r0)), vget_high_u8(r1), three_u8),
            one_u16,
        );
        let colsum1_l = vmlal_u8(vmovl_u8(vget_low_u8(r2)), vget_low_u8(r1), three_u8);
        let colsum1_h = vmlal_u8(vmovl_u8(vget_high_u8(r2)), vget_high_u8(r1), three_u8);

        let output_pixels0 =
            vcombine_u8(vshrn_n_u16::<2>(colsum0_l), vshrn_n_u16::<2>(colsum0_h));
        let output_pixels1 =
            vcombine_u8(vrshrn_n_u16::<2>(colsum1_l), vrshrn_n_u16::<2>(colsum1_h));

        vst1q_u8(outptr0.add(colctr), output_pixels0);
        vst1q_u8(outptr1.add(colctr), output_pixels1);
    }
}
