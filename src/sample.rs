//! Padded sample buffers
//!
//! Vector kernels load and store whole 16 byte lanes, so they may touch bytes
//! past the logical end of a row. Instead of letting that depend on how a
//! caller happened to allocate memory, every row has a logical width and a
//! separate, larger capacity, and the public entry points refuse rows whose
//! capacity is too small for the width being processed.
//!
//! Bytes between the width and the capacity of a row are scratch space, their
//! content is unspecified after an upsampling call.

use crate::components::SubSampRatios;
use crate::errors::UpsampleErrors;

/// Row capacities are rounded up to a multiple of this many bytes
pub const ROW_ALIGNMENT: usize = 32;

/// Round `len` up to the next multiple of [`ROW_ALIGNMENT`]
///
/// Zero stays zero, `None` if the result does not fit a `usize`.
#[must_use]
pub const fn checked_padded_len(len: usize) -> Option<usize> {
    match len.checked_add(ROW_ALIGNMENT - 1) {
        Some(len) => Some(len / ROW_ALIGNMENT * ROW_ALIGNMENT),
        None => None,
    }
}

/// Minimum length of an input row holding `width` samples, `None` on overflow
#[must_use]
pub const fn checked_input_capacity(width: usize) -> Option<usize> {
    checked_padded_len(width)
}

/// Minimum length of an h2v2 output row, `None` on overflow
///
/// The first vector store starts one byte into the row and is 32 bytes wide,
/// so short rows need two alignment units.
#[must_use]
pub const fn checked_output_capacity_h2v2(width: usize) -> Option<usize> {
    let padded = match width.checked_mul(2) {
        Some(len) => checked_padded_len(len),
        None => None,
    };
    match padded {
        Some(padded) if padded < 2 * ROW_ALIGNMENT => Some(2 * ROW_ALIGNMENT),
        padded => padded,
    }
}

/// Minimum length of an h1v2 output row, `None` on overflow
#[must_use]
pub const fn checked_output_capacity_h1v2(width: usize) -> Option<usize> {
    checked_padded_len(width)
}

// No row can be usize::MAX bytes long, so a saturated capacity is never met.
const fn saturate(capacity: Option<usize>) -> usize {
    match capacity {
        Some(capacity) => capacity,
        None => usize::MAX,
    }
}

/// Round `len` up to the next multiple of [`ROW_ALIGNMENT`]
///
/// Zero stays zero. Saturates to `usize::MAX` when the result would overflow.
#[must_use]
pub const fn padded_len(len: usize) -> usize {
    saturate(checked_padded_len(len))
}

/// Minimum length of an input row holding `width` samples
///
/// Saturates like [`padded_len`].
#[must_use]
pub const fn input_capacity(width: usize) -> usize {
    saturate(checked_input_capacity(width))
}

/// Minimum length of an output row for the h2v2 upsampler
///
/// Saturates like [`padded_len`].
#[must_use]
pub const fn output_capacity_h2v2(width: usize) -> usize {
    saturate(checked_output_capacity_h2v2(width))
}

/// Minimum length of an output row for the h1v2 upsampler
///
/// Saturates like [`padded_len`].
#[must_use]
pub const fn output_capacity_h1v2(width: usize) -> usize {
    saturate(checked_output_capacity_h1v2(width))
}

/// A plane of 8 bit samples stored row by row with padded rows
///
/// `width` is the number of meaningful samples in a row, `stride` is the
/// distance between the start of two rows and therefore the capacity of
/// each row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamplePlane {
    data: Vec<u8>,
    width: usize,
    height: usize,
    stride: usize,
}

impl SamplePlane {
    /// Create a zeroed plane
    ///
    /// `stride` is raised to at least [`input_capacity`]`(width)`.
    ///
    /// # Errors
    /// - If `width` or `height` is zero
    /// - If a padded row of `width` samples or the whole plane overflows `usize`
    pub fn new(
        width: usize, height: usize, stride: usize,
    ) -> Result<SamplePlane, UpsampleErrors> {
        if width == 0 {
            return Err(UpsampleErrors::ZeroWidth);
        }
        if height == 0 {
            return Err(UpsampleErrors::ZeroHeight);
        }
        let min_stride =
            checked_input_capacity(width).ok_or(UpsampleErrors::WidthTooLarge(width))?;
        let stride = stride.max(min_stride);
        let size = stride.checked_mul(height).ok_or_else(|| {
            UpsampleErrors::BadPlane(format!(
                "Plane of {} rows with stride {} overflows usize",
                height, stride
            ))
        })?;

        Ok(SamplePlane {
            data: vec![0; size],
            width,
            height,
            stride,
        })
    }

    /// Create a plane from tightly packed rows of `width` samples
    ///
    /// # Errors
    /// - If `width` or `height` is zero
    /// - If `data` does not hold exactly `width * height` samples
    pub fn from_packed(
        data: &[u8], width: usize, height: usize,
    ) -> Result<SamplePlane, UpsampleErrors> {
        let mut plane = SamplePlane::new(width, height, 0)?;

        if Some(data.len()) != width.checked_mul(height) {
            return Err(UpsampleErrors::BadPlane(format!(
                "Expected {} samples for a {}x{} plane but found {}",
                width.saturating_mul(height),
                width,
                height,
                data.len()
            )));
        }
        for (row, packed) in plane.rows_mut().zip(data.chunks_exact(width)) {
            row[..width].copy_from_slice(packed);
        }
        Ok(plane)
    }

    /// Allocate the full resolution plane `plane` upsamples into with `ratio`
    ///
    /// # Errors
    /// If the output plane size overflows `usize`
    pub fn for_upsampled(
        plane: &SamplePlane, ratio: SubSampRatios,
    ) -> Result<SamplePlane, UpsampleErrors> {
        let width = plane.width();

        let out_width = ratio
            .checked_output_width(width)
            .ok_or(UpsampleErrors::WidthTooLarge(width))?;
        let out_height = plane.height().checked_mul(2).ok_or_else(|| {
            UpsampleErrors::BadPlane(format!("Plane of {} rows is too tall", plane.height()))
        })?;
        let stride = ratio
            .checked_output_capacity(width)
            .ok_or(UpsampleErrors::WidthTooLarge(width))?;

        SamplePlane::new(out_width, out_height, stride)
    }

    /// Number of meaningful samples in a row
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Capacity of each row
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Full capacity of row `y`, padding included
    ///
    /// # Panics
    /// If `y >= self.height()`
    #[must_use]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.stride..(y + 1) * self.stride]
    }

    /// Mutable full capacity of row `y`, padding included
    ///
    /// # Panics
    /// If `y >= self.height()`
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        &mut self.data[y * self.stride..(y + 1) * self.stride]
    }

    /// Iterate over rows, padding included
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.stride)
    }

    /// Iterate mutably over rows, padding included
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(self.stride)
    }

    /// Copy the meaningful samples out, dropping row padding
    #[must_use]
    pub fn to_packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width * self.height);

        for row in self.rows() {
            out.extend_from_slice(&row[..self.width]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_rounds_to_alignment() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 32);
        assert_eq!(padded_len(32), 32);
        assert_eq!(padded_len(33), 64);
    }

    #[test]
    fn h2v2_output_holds_first_store() {
        // first store covers bytes 1..33
        assert_eq!(output_capacity_h2v2(1), 64);
        assert_eq!(output_capacity_h2v2(16), 64);
        assert_eq!(output_capacity_h2v2(33), 96);
        assert_eq!(output_capacity_h1v2(17), 32);
    }

    #[test]
    fn capacities_near_usize_max() {
        assert_eq!(checked_padded_len(usize::MAX - 15), None);
        assert_eq!(checked_padded_len(usize::MAX - 31), Some(usize::MAX - 31));
        assert_eq!(checked_output_capacity_h2v2(usize::MAX / 2 + 1), None);
        // saturated capacities can never be met by a real row
        assert_eq!(input_capacity(usize::MAX - 15), usize::MAX);
        assert_eq!(output_capacity_h1v2(usize::MAX), usize::MAX);
        assert_eq!(output_capacity_h2v2(usize::MAX / 2 + 1), usize::MAX);
    }

    #[test]
    fn huge_width_is_rejected() {
        let err = SamplePlane::new(usize::MAX - 15, 1, 0).unwrap_err();
        assert!(matches!(err, UpsampleErrors::WidthTooLarge(w) if w == usize::MAX - 15));
    }

    #[test]
    fn upsampled_plane_shape() {
        let plane = SamplePlane::new(5, 3, 0).unwrap();

        let h2v2 = SamplePlane::for_upsampled(&plane, SubSampRatios::H2V2).unwrap();
        assert_eq!((h2v2.width(), h2v2.height(), h2v2.stride()), (10, 6, 64));

        let h1v2 = SamplePlane::for_upsampled(&plane, SubSampRatios::H1V2).unwrap();
        assert_eq!((h1v2.width(), h1v2.height(), h1v2.stride()), (5, 6, 32));
    }

    #[test]
    fn packed_round_trip_strips_padding() {
        let data: Vec<u8> = (0..15).collect();
        let plane = SamplePlane::from_packed(&data, 5, 3).unwrap();

        assert_eq!(plane.stride(), 32);
        assert_eq!(&plane.row(1)[..5], &[5, 6, 7, 8, 9]);
        assert_eq!(plane.to_packed(), data);
    }

    #[test]
    fn packed_length_mismatch() {
        let err = SamplePlane::from_packed(&[0; 14], 5, 3).unwrap_err();
        assert!(matches!(err, UpsampleErrors::BadPlane(_)));
    }
}
