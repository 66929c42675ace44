use crate::sample::{
    checked_output_capacity_h1v2, checked_output_capacity_h2v2, output_capacity_h1v2,
    output_capacity_h2v2,
};

/// Sub-sampling ratios handled by the fancy upsampler
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub enum SubSampRatios {
    /// Component was halved horizontally and vertically (4:2:0)
    H2V2,
    /// Component was halved along the row axis only, the usual
    /// layout of a rotated or transposed 4:2:2 image
    H1V2,
}

impl SubSampRatios {
    /// Logical width of an output row for `width` input samples
    ///
    /// Saturates to `usize::MAX` on overflow.
    #[must_use]
    pub const fn output_width(self, width: usize) -> usize {
        match self {
            Self::H2V2 => width.saturating_mul(2),
            Self::H1V2 => width,
        }
    }
    /// Logical width of an output row, `None` if it overflows
    #[must_use]
    pub const fn checked_output_width(self, width: usize) -> Option<usize> {
        match self {
            Self::H2V2 => width.checked_mul(2),
            Self::H1V2 => Some(width),
        }
    }
    /// Minimum length of an output row for `width` input samples
    ///
    /// Saturates to `usize::MAX` on overflow.
    #[must_use]
    pub const fn output_capacity(self, width: usize) -> usize {
        match self {
            Self::H2V2 => output_capacity_h2v2(width),
            Self::H1V2 => output_capacity_h1v2(width),
        }
    }
    /// Minimum length of an output row, `None` if it overflows
    #[must_use]
    pub const fn checked_output_capacity(self, width: usize) -> Option<usize> {
        match self {
            Self::H2V2 => checked_output_capacity_h2v2(width),
            Self::H1V2 => checked_output_capacity_h1v2(width),
        }
    }
}

/// The three rows a pair of output rows is blended from
///
/// `above` and `below` are the nearest neighbouring sample rows of `current`,
/// at the top and bottom of an image the caller passes `current` again.
#[derive(Copy, Clone)]
pub(crate) struct RowWindow<'a> {
    pub above: &'a [u8],
    pub current: &'a [u8],
    pub below: &'a [u8],
}

impl<'a> RowWindow<'a> {
    /// Create a window from three consecutive rows of an input table
    #[inline]
    pub fn from_rows(rows: &[&'a [u8]]) -> RowWindow<'a> {
        RowWindow {
            above: rows[0],
            current: rows[1],
            below: rows[2],
        }
    }
    /// Shortest row in the window, vector kernels may read up to here
    #[inline]
    pub fn min_len(&self) -> usize {
        self.above
            .len()
            .min(self.current.len())
            .min(self.below.len())
    }
}
