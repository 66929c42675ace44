use zune_upsample::errors::UpsampleErrors;
use zune_upsample::{upsample_h1v2, upsample_h2v2, SamplePlane, SubSampRatios, Upsampler};

#[test]
fn zero_width() {
    let row = vec![0_u8; 32];
    let input = [&row[..]; 3];
    let mut out = vec![vec![0_u8; 64]; 2];
    let mut out_rows: Vec<&mut [u8]> = out.iter_mut().map(Vec::as_mut_slice).collect();

    let err = upsample_h2v2(2, 0, &input, &mut out_rows).unwrap_err();
    assert!(matches!(err, UpsampleErrors::ZeroWidth));
}

#[test]
fn width_too_large_for_padding() {
    // padding this width to 32 bytes overflows usize, short rows must not pass
    let width = usize::MAX - 15;
    let row = [1_u8; 32];
    let input = [&row[..]; 3];
    let mut out = [[0_u8; 32]; 2];
    let mut out_rows: Vec<&mut [u8]> = out.iter_mut().map(|r| r.as_mut_slice()).collect();

    let err = upsample_h1v2(2, width, &input, &mut out_rows).unwrap_err();
    assert!(matches!(err, UpsampleErrors::WidthTooLarge(w) if w == width));

    let err = upsample_h2v2(2, width, &input, &mut out_rows).unwrap_err();
    assert!(matches!(err, UpsampleErrors::WidthTooLarge(w) if w == width));

    // nothing was written
    assert!(out.iter().flatten().all(|x| *x == 0));
}

#[test]
fn width_too_large_for_h2v2_output() {
    // input rows of this width can be padded, twice the width can not
    let width = usize::MAX / 2 + 1;
    let row = [1_u8; 32];
    let input = [&row[..]; 3];
    let mut out = [[0_u8; 64]; 2];
    let mut out_rows: Vec<&mut [u8]> = out.iter_mut().map(|r| r.as_mut_slice()).collect();

    let err = upsample_h2v2(2, width, &input, &mut out_rows).unwrap_err();
    assert!(matches!(err, UpsampleErrors::WidthTooLarge(w) if w == width));

    // h1v2 output rows are fine, the rows themselves are too short
    let err = upsample_h1v2(2, width, &input, &mut out_rows).unwrap_err();
    assert!(matches!(err, UpsampleErrors::ShortInputRow { row: 0, .. }));
}

#[test]
fn plane_width_too_large() {
    let err = SamplePlane::new(usize::MAX - 15, 1, 0).unwrap_err();
    assert!(matches!(err, UpsampleErrors::WidthTooLarge(_)));
}

#[test]
fn missing_context_row() {
    let row = vec![0_u8; 32];
    // a group of 4 needs the row above, two rows and the row below
    let input = [&row[..]; 3];
    let mut out = vec![vec![0_u8; 64]; 4];
    let mut out_rows: Vec<&mut [u8]> = out.iter_mut().map(Vec::as_mut_slice).collect();

    let err = upsample_h1v2(4, 8, &input, &mut out_rows).unwrap_err();
    assert!(matches!(
        err,
        UpsampleErrors::MissingContextRows {
            expected: 4,
            found: 3
        }
    ));
}

#[test]
fn missing_output_row() {
    let row = vec![0_u8; 32];
    let input = [&row[..]; 3];
    let mut out = vec![vec![0_u8; 64]; 1];
    let mut out_rows: Vec<&mut [u8]> = out.iter_mut().map(Vec::as_mut_slice).collect();

    let err = upsample_h2v2(2, 8, &input, &mut out_rows).unwrap_err();
    assert!(matches!(
        err,
        UpsampleErrors::MissingOutputRows {
            expected: 2,
            found: 1
        }
    ));
}

#[test]
fn unpadded_input_row() {
    // exactly `width` samples is not enough, the vector kernels read whole lanes
    let padded = vec![0_u8; 32];
    let tight = vec![0_u8; 5];
    let input = [&padded[..], &tight[..], &padded[..]];
    let mut out = vec![vec![0_u8; 64]; 2];
    let mut out_rows: Vec<&mut [u8]> = out.iter_mut().map(Vec::as_mut_slice).collect();

    let err = upsample_h2v2(2, 5, &input, &mut out_rows).unwrap_err();
    assert!(matches!(
        err,
        UpsampleErrors::ShortInputRow {
            row: 1,
            expected: 32,
            found: 5
        }
    ));
    // nothing was written
    assert!(out.iter().flatten().all(|x| *x == 0));
}

#[test]
fn unpadded_output_row() {
    let row = vec![0_u8; 32];
    let input = [&row[..]; 3];
    // 2 * width fits but the h2v2 store margin does not
    let mut out = vec![vec![0_u8; 10]; 2];
    let mut out_rows: Vec<&mut [u8]> = out.iter_mut().map(Vec::as_mut_slice).collect();

    let err = upsample_h2v2(2, 5, &input, &mut out_rows).unwrap_err();
    assert!(matches!(
        err,
        UpsampleErrors::ShortOutputRow {
            row: 0,
            expected: 64,
            found: 10
        }
    ));
}

#[test]
fn mismatched_output_plane() {
    let plane = SamplePlane::from_packed(&[1, 2, 3, 4, 5, 6], 3, 2).unwrap();
    let mut wrong = SamplePlane::new(3, 4, 64).unwrap();

    let err = Upsampler::new()
        .upsample_plane_into(&plane, SubSampRatios::H2V2, &mut wrong)
        .unwrap_err();
    assert!(matches!(err, UpsampleErrors::BadPlane(_)));
}

#[test]
fn empty_plane() {
    assert!(matches!(
        SamplePlane::from_packed(&[], 0, 4).unwrap_err(),
        UpsampleErrors::ZeroWidth
    ));
    assert!(matches!(
        SamplePlane::new(4, 0, 32).unwrap_err(),
        UpsampleErrors::ZeroHeight
    ));
}
