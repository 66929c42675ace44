//! Up-sampling routines
//!
//! The upsampling method is a bi-linear interpolation or a "triangle
//! filter", libjpeg turbo's `fancy_upsampling`, which is a good compromise
//! between speed and visual quality
//!
//! # The filter
//! Each output pixel is made from `(3*A+B)/4` where A is the sample
//! closer to the output and B is the one further.
//!
//! # Vertical bi-linear (h1v2)
//!
//! ```text
//! +----+----+
//! | A1 | A2 |   row above
//! +----+----+
//! +----+----+
//! | p1 | p2 |   top output row
//! +----+----+
//! | p3 | p4 |   bottom output row
//! +----+----+
//! +----+----+
//! | B1 | B2 |   row below
//! +----+----+
//! ```
//! Both output rows come from the same input row `C`, for `p1`
//! `C1` is given a weight of 3 and `A1` a weight of 1, for `p3` `C1` is given
//! a weight of 3 and `B1` a weight of 1.
//!
//! The bias for the divide by 4 is split unevenly, the top row adds 1 and the
//! bottom row 2. That is a 2x1 ordered dither and it is kept so that output is
//! identical to libjpeg-turbo.
//!
//! # Horizontal vertical (h2v2)
//! ```text
//!              s0        s1
//!         +---------+---------+
//!   r0    |         |         |
//!         +---------+---------+
//!         | p0   p1 | p2   p3 |
//!   r1    |         |         |
//!         | p4   p5 | p6   p7 |
//!         +---------+---------+
//!   r2    |         |         |
//!         +---------+---------+
//! ```
//! First blend each column vertically in the ratio 3:1 (`r1` against `r0` for
//! the top row, against `r2` for the bottom row), then blend neighbouring
//! column sums horizontally in the ratio 3:1. `p1` is
//! `(3 * s0colsum + s1colsum) / 16` and `p2` is `(3 * s1colsum + s0colsum) / 16`.
//!
//! Odd output pixels add a dither bias of 7, even ones 8. The very first pixel
//! of a row only sees column 0 and rounds with 8, the very last only sees the
//! last column and rounds with 7.
//!
//! # Safety of the vector code
//! Vector kernels load and store whole lanes without bounds checks, every
//! precondition (width, row counts and padded row capacities, see
//! [`crate::sample`]) is verified once per call in this module before a
//! kernel runs.
use std::sync::OnceLock;

use crate::components::{RowWindow, SubSampRatios};
use crate::errors::UpsampleErrors;
use crate::image::Upsampler;
use crate::options::UpsamplerOptions;
use crate::sample::checked_input_capacity;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[cfg(feature = "x86")]
mod avx2;
#[cfg(target_arch = "aarch64")]
#[cfg(feature = "neon")]
mod neon;
pub(crate) mod scalar;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[cfg(feature = "x86")]
mod sse;

/// Upsample one input row and its context rows into two output rows
///
/// Arguments are the sample width, the three row window, and the top and
/// bottom output rows.
pub(crate) type FancyUpsampler = fn(usize, RowWindow<'_>, &mut [u8], &mut [u8]);

/// Implementations an [`Upsampler`] can run on
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Portable code, the reference every other backend must match
    Scalar,
    /// x86 SSE2
    Sse2,
    /// x86 AVX2
    Avx2,
    /// Arm NEON
    Neon,
}

/// Choose the best backend allowed by `options` that this CPU supports
#[allow(unused_variables)]
pub(crate) fn choose_backend(options: &UpsamplerOptions) -> Backend {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    #[cfg(feature = "x86")]
    {
        if options.use_avx2() && is_x86_feature_detected!("avx2") {
            debug!("Using AVX2 upsampler");
            return Backend::Avx2;
        }
        if options.use_sse2() && is_x86_feature_detected!("sse2") {
            debug!("Using SSE2 upsampler");
            return Backend::Sse2;
        }
    }
    #[cfg(target_arch = "aarch64")]
    #[cfg(feature = "neon")]
    {
        if options.use_neon() && std::arch::is_aarch64_feature_detected!("neon") {
            debug!("Using NEON upsampler");
            return Backend::Neon;
        }
    }
    debug!("Using scalar upsampler");
    return Backend::Scalar;
}

/// Kernels for `backend` as `(h2v2, h1v2)`
///
/// A backend that was not compiled in falls back to scalar, [`choose_backend`]
/// never returns one.
pub(crate) fn kernels(backend: Backend) -> (FancyUpsampler, FancyUpsampler) {
    match backend {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        #[cfg(feature = "x86")]
        Backend::Avx2 => (avx2::upsample_h2v2_avx2, avx2::upsample_h1v2_avx2),
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        #[cfg(feature = "x86")]
        Backend::Sse2 => (sse::upsample_h2v2_sse2, sse::upsample_h1v2_sse2),
        #[cfg(target_arch = "aarch64")]
        #[cfg(feature = "neon")]
        Backend::Neon => (neon::upsample_h2v2_neon, neon::upsample_h1v2_neon),
        _ => (scalar::upsample_h2v2, scalar::upsample_h1v2),
    }
}

/// Check every precondition of a row group call
///
/// `input_rows[0]` is the row above the group, the group itself starts at
/// `input_rows[1]`.
pub(crate) fn check_row_group(
    ratio: SubSampRatios, row_group_size: usize, sample_width: usize, input_rows: &[&[u8]],
    output_rows: &[&mut [u8]],
) -> Result<(), UpsampleErrors> {
    if sample_width == 0 {
        return Err(UpsampleErrors::ZeroWidth);
    }
    if row_group_size == 0 || row_group_size % 2 != 0 {
        return Err(UpsampleErrors::BadRowGroup(row_group_size));
    }
    // capacities must fit a usize before any row is measured against them
    let in_capacity =
        checked_input_capacity(sample_width).ok_or(UpsampleErrors::WidthTooLarge(sample_width))?;
    let out_capacity = ratio
        .checked_output_capacity(sample_width)
        .ok_or(UpsampleErrors::WidthTooLarge(sample_width))?;

    let needed_inputs = row_group_size / 2 + 2;

    if input_rows.len() < needed_inputs {
        return Err(UpsampleErrors::MissingContextRows {
            expected: needed_inputs,
            found: input_rows.len(),
        });
    }
    if output_rows.len() < row_group_size {
        return Err(UpsampleErrors::MissingOutputRows {
            expected: row_group_size,
            found: output_rows.len(),
        });
    }
    for (row, data) in input_rows[..needed_inputs].iter().enumerate() {
        if data.len() < in_capacity {
            return Err(UpsampleErrors::ShortInputRow {
                row,
                expected: in_capacity,
                found: data.len(),
            });
        }
    }
    for (row, data) in output_rows[..row_group_size].iter().enumerate() {
        if data.len() < out_capacity {
            return Err(UpsampleErrors::ShortOutputRow {
                row,
                expected: out_capacity,
                found: data.len(),
            });
        }
    }
    Ok(())
}

/// Run `kernel` over a row group that already passed [`check_row_group`]
pub(crate) fn run_row_group(
    kernel: FancyUpsampler, row_group_size: usize, sample_width: usize, input_rows: &[&[u8]],
    output_rows: &mut [&mut [u8]],
) {
    let inputs = &input_rows[..row_group_size / 2 + 2];
    let outputs = &mut output_rows[..row_group_size];

    for (window, pair) in inputs.windows(3).zip(outputs.chunks_exact_mut(2)) {
        if let [top, bottom] = pair {
            kernel(sample_width, RowWindow::from_rows(window), top, bottom);
        }
    }
}

/// Upsampler for the best backend of this CPU, created on first use
fn default_upsampler() -> &'static Upsampler {
    static DEFAULT: OnceLock<Upsampler> = OnceLock::new();

    DEFAULT.get_or_init(Upsampler::new)
}

/// Upsample a row group of a component subsampled 2:1 in both directions
///
/// Writes `row_group_size` output rows of `2 * sample_width` samples, two
/// for each of the `row_group_size / 2` input rows.
///
/// `input_rows[0]` is the row above the group and
/// `input_rows[row_group_size / 2 + 1]` the row below it. At the image edges
/// the caller repeats the first or last row.
///
/// # Errors
/// If `sample_width` is zero or so large its padded rows overflow `usize`,
/// `row_group_size` is zero or odd, there are too few rows, or a row is
/// shorter than [`crate::input_capacity`] (inputs) or
/// [`crate::output_capacity_h2v2`] (outputs).
pub fn upsample_h2v2(
    row_group_size: usize, sample_width: usize, input_rows: &[&[u8]], output_rows: &mut [&mut [u8]],
) -> Result<(), UpsampleErrors> {
    default_upsampler().upsample_h2v2(row_group_size, sample_width, input_rows, output_rows)
}

/// Upsample a row group of a component subsampled 2:1 along the column axis
///
/// Writes `row_group_size` output rows of `sample_width` samples, two for
/// each of the `row_group_size / 2` input rows. Row tables are laid out as
/// for [`upsample_h2v2`].
///
/// # Errors
/// As for [`upsample_h2v2`], with output rows measured against
/// [`crate::output_capacity_h1v2`].
pub fn upsample_h1v2(
    row_group_size: usize, sample_width: usize, input_rows: &[&[u8]], output_rows: &mut [&mut [u8]],
) -> Result<(), UpsampleErrors> {
    default_upsampler().upsample_h1v2(row_group_size, sample_width, input_rows, output_rows)
}
