//! Bit-exact fancy upsampling for JPEG chroma planes
//!
//! # Features
//!  - libjpeg-turbo compatible "fancy" (triangle filter) upsampling for
//!    h2v2 (4:2:0) and h1v2 subsampled components
//!  - SSE2, AVX2 and NEON accelerated kernels, selected at runtime
//!  - A whole-plane driver that supplies edge context rows itself
//!  - Parallel upsampling of independent planes
//!
//! # Accuracy
//! Output is identical, byte for byte, to libjpeg-turbo's fancy upsampling,
//! including its ordered dither rounding. Every vector backend is tested
//! against the portable scalar code.
//!
//! # Buffers
//! Vector kernels read and write whole 16 byte lanes and may touch bytes past
//! the logical end of a row. Rows therefore carry padding, see
//! [`input_capacity`], [`output_capacity_h2v2`] and [`output_capacity_h1v2`],
//! and [`SamplePlane`] allocates it for you. The public functions check all of
//! this once per call and return an [`UpsampleErrors`] instead of touching
//! memory they don't own. The kernels themselves have no checks.
//!
//! # Unsafety
//! Platform specific vendor intrinsics are unsafe, they are annotated with
//! `#[target_feature(enable = "a feature")]` and only called after
//! `is_x86_feature_detected`/`is_aarch64_feature_detected` confirmed support.
//! Otherwise the scalar implementation is used.
//!
//! - x86 intrinsics can be removed from the binary by disabling the `x86`
//!   feature, Arm ones by disabling `neon`.
//!
//! # Example
//! ```
//! use zune_upsample::{SamplePlane, SubSampRatios, Upsampler};
//!
//! let chroma = SamplePlane::from_packed(&[10, 20, 30, 40, 50, 60], 3, 2).unwrap();
//! let full = Upsampler::new().upsample_plane(&chroma, SubSampRatios::H2V2).unwrap();
//!
//! assert_eq!((full.width(), full.height()), (6, 4));
//! ```

#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::cast_possible_truncation
)]
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![deny(missing_docs)]

#[macro_use]
extern crate log;

pub use crate::components::SubSampRatios;
pub use crate::errors::UpsampleErrors;
pub use crate::image::Upsampler;
pub use crate::options::UpsamplerOptions;
pub use crate::sample::{
    checked_input_capacity, checked_output_capacity_h1v2, checked_output_capacity_h2v2,
    checked_padded_len, input_capacity, output_capacity_h1v2, output_capacity_h2v2, padded_len,
    SamplePlane, ROW_ALIGNMENT,
};
pub use crate::upsampler::{upsample_h1v2, upsample_h2v2, Backend};

mod components;
pub mod errors;
mod image;
mod options;
mod sample;
mod threads;
mod upsampler;
