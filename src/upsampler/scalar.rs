//! Portable upsampling
//!
//! These are the reference routines, every vector backend must produce
//! exactly the same bytes as the functions here.
use crate::components::RowWindow;

/// Vertical 3:1 blend of one column, weight 3 on the current row
#[inline(always)]
fn colsum(near: u8, far: u8) -> u16 {
    3 * u16::from(near) + u16::from(far)
}

/// Upsample one input row horizontally and vertically into two output rows
///
/// The up-sampling algorithm used is libjpeg-turbo `fancy_upsampling`, see
/// module docs for an explanation. Both output rows must hold at least
/// `2 * width` samples.
pub fn upsample_h2v2(width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8]) {
    let (above, current, below) = (
        &window.above[..width],
        &window.current[..width],
        &window.below[..width],
    );
    let out_top = &mut out_top[..width * 2];
    let out_bottom = &mut out_bottom[..width * 2];

    // first pixel, it only sees column 0
    let first_top = colsum(current[0], above[0]);
    let first_bottom = colsum(current[0], below[0]);

    out_top[0] = ((first_top * 4 + 8) >> 4) as u8;
    out_bottom[0] = ((first_bottom * 4 + 8) >> 4) as u8;

    // The readable code is
    //
    //      for c in 1..width {
    //          out[2c-1] = (3 * colsum[c-1] + colsum[c] + 7) >> 4;
    //          out[2c]   = (3 * colsum[c] + colsum[c-1] + 8) >> 4;
    //      }
    //
    // every output pixel gives weight 3 to its nearer column, odd pixels get
    // a dither bias of 7 and even pixels a bias of 8.
    for c in 1..width {
        let last_top = colsum(current[c - 1], above[c - 1]);
        let this_top = colsum(current[c], above[c]);

        let last_bottom = colsum(current[c - 1], below[c - 1]);
        let this_bottom = colsum(current[c], below[c]);

        out_top[2 * c - 1] = ((3 * last_top + this_top + 7) >> 4) as u8;
        out_top[2 * c] = ((3 * this_top + last_top + 8) >> 4) as u8;

        out_bottom[2 * c - 1] = ((3 * last_bottom + this_bottom + 7) >> 4) as u8;
        out_bottom[2 * c] = ((3 * this_bottom + last_bottom + 8) >> 4) as u8;
    }

    // last pixel, bias is 7 here and not 8
    let last_top = colsum(current[width - 1], above[width - 1]);
    let last_bottom = colsum(current[width - 1], below[width - 1]);

    out_top[width * 2 - 1] = ((last_top * 4 + 7) >> 4) as u8;
    out_bottom[width * 2 - 1] = ((last_bottom * 4 + 7) >> 4) as u8;
}

/// Upsample one input row vertically into two output rows
///
/// Both output rows must hold at least `width` samples.
pub fn upsample_h1v2(width: usize, window: RowWindow, out_top: &mut [u8], out_bottom: &mut [u8]) {
    let rows = window.above[..width]
        .iter()
        .zip(&window.current[..width])
        .zip(&window.below[..width]);

    for (((above, current), below), (top, bottom)) in rows.zip(
        out_top[..width]
            .iter_mut()
            .zip(out_bottom[..width].iter_mut()),
    ) {
        // top row carries a bias of 1, bottom row the plain rounding bias of 2
        *top = ((colsum(*current, *above) + 1) >> 2) as u8;
        *bottom = ((colsum(*current, *below) + 2) >> 2) as u8;
    }
}
