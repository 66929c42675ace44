use zune_upsample::{
    input_capacity, output_capacity_h1v2, output_capacity_h2v2, upsample_h1v2, upsample_h2v2,
    SamplePlane, SubSampRatios, Upsampler,
};

/// Copy `rows` into rows padded to the input capacity for `width`
fn padded_rows(rows: &[&[u8]], width: usize) -> Vec<Vec<u8>> {
    rows.iter()
        .map(|row| {
            let mut padded = vec![0xEE; input_capacity(width)];
            padded[..row.len()].copy_from_slice(row);
            padded
        })
        .collect()
}

fn run_h2v2(rows: &[&[u8]], width: usize, group: usize) -> Vec<Vec<u8>> {
    let inputs = padded_rows(rows, width);
    let input_refs: Vec<&[u8]> = inputs.iter().map(Vec::as_slice).collect();
    let mut outputs = vec![vec![0xAA; output_capacity_h2v2(width)]; group];
    let mut output_refs: Vec<&mut [u8]> = outputs.iter_mut().map(Vec::as_mut_slice).collect();

    upsample_h2v2(group, width, &input_refs, &mut output_refs).unwrap();

    outputs
        .into_iter()
        .map(|mut row| {
            row.truncate(width * 2);
            row
        })
        .collect()
}

fn run_h1v2(rows: &[&[u8]], width: usize, group: usize) -> Vec<Vec<u8>> {
    let inputs = padded_rows(rows, width);
    let input_refs: Vec<&[u8]> = inputs.iter().map(Vec::as_slice).collect();
    let mut outputs = vec![vec![0xAA; output_capacity_h1v2(width)]; group];
    let mut output_refs: Vec<&mut [u8]> = outputs.iter_mut().map(Vec::as_mut_slice).collect();

    upsample_h1v2(group, width, &input_refs, &mut output_refs).unwrap();

    outputs
        .into_iter()
        .map(|mut row| {
            row.truncate(width);
            row
        })
        .collect()
}

#[test]
fn h2v2_known_vector() {
    let out = run_h2v2(&[&[10, 20, 30], &[40, 50, 60], &[70, 80, 90]], 3, 2);

    // ((40 * 3 + 10) * 4 + 8) >> 4 = 33
    assert_eq!(out[0], [33, 35, 40, 45, 50, 52]);
    assert_eq!(out[1], [48, 50, 55, 60, 65, 67]);
}

#[test]
fn h1v2_known_vector() {
    let out = run_h1v2(&[&[10, 20, 30], &[40, 50, 60], &[70, 80, 90]], 3, 2);

    assert_eq!(out[0], [32, 42, 52]);
    assert_eq!(out[1], [48, 58, 68]);
}

#[test]
fn single_column_uses_both_edge_formulas() {
    // colsum = 3 * 100 + 60 = 360, first (1440 + 8) >> 4 = 90, last (1440 + 7) >> 4 = 90
    let out = run_h2v2(&[&[60], &[100], &[20]], 1, 2);
    assert_eq!(out[0], [90, 90]);
    // colsum = 320, 80 either way
    assert_eq!(out[1], [80, 80]);

    // colsum = 2 is where the biases split: (8 + 8) >> 4 = 1, (8 + 7) >> 4 = 0
    let out = run_h2v2(&[&[2], &[0], &[2]], 1, 2);
    assert_eq!(out, [[1, 0], [1, 0]]);
}

#[test]
fn last_pixel_rounding_is_not_symmetric() {
    // colsum = 3 * 1 + 3 = 6, 6 * 4 = 24 -> (24 + 8) >> 4 = 2 but (24 + 7) >> 4 = 1
    let out = run_h2v2(&[&[0, 0, 3], &[0, 0, 1], &[0, 0, 3]], 3, 2);

    let symmetric_last = ((6 * 4 + 8) >> 4) as u8;
    assert_eq!(symmetric_last, 2);
    assert_eq!(out[0][5], 1);
    assert_eq!(out[1][5], 1);
}

#[test]
fn interior_rounding_alternates_by_parity() {
    // every colsum is 2, so each blend is 8 before the bias:
    // odd pixels (8 + 7) >> 4 = 0, even pixels (8 + 8) >> 4 = 1
    let out = run_h2v2(&[&[2, 2], &[0, 0], &[2, 2]], 2, 2);

    assert_eq!(out[0], [1, 0, 1, 0]);
    assert_eq!(out[1], [1, 0, 1, 0]);
}

#[test]
fn output_shape_matches_ratio() {
    let rows: Vec<Vec<u8>> = (0..6).map(|r| vec![r as u8 * 40; 5]).collect();
    let refs: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();

    for group in [2, 4, 6, 8] {
        let out = run_h2v2(&refs[..group / 2 + 2], 5, group);
        assert_eq!(out.len(), group);
        assert!(out.iter().all(|row| row.len() == 10));

        let out = run_h1v2(&refs[..group / 2 + 2], 5, group);
        assert_eq!(out.len(), group);
        assert!(out.iter().all(|row| row.len() == 5));
    }
}

#[test]
fn flat_input_is_reproduced() {
    for v in [0_u8, 1, 7, 8, 128, 200, 255] {
        for width in [1, 2, 15, 16, 17, 33, 100] {
            let row = vec![v; width];
            let rows = [&row[..], &row[..], &row[..], &row[..]];

            for out in run_h2v2(&rows, width, 4) {
                assert!(out.iter().all(|x| *x == v), "h2v2 value {} width {}", v, width);
            }
            for out in run_h1v2(&rows, width, 4) {
                assert!(out.iter().all(|x| *x == v), "h1v2 value {} width {}", v, width);
            }
        }
    }
}

#[test]
fn rows_are_consumed_as_a_sliding_window() {
    // group of 4: input rows 1 and 2 each produce two output rows
    let rows: [&[u8]; 4] = [&[0], &[4], &[8], &[12]];
    let out = run_h1v2(&rows, 1, 4);

    // row 1: (12 + 0 + 1) >> 2 = 3, (12 + 8 + 2) >> 2 = 5
    // row 2: (24 + 4 + 1) >> 2 = 7, (24 + 12 + 2) >> 2 = 9
    assert_eq!(out, [[3], [5], [7], [9]]);
}

#[test]
fn plane_driver_matches_row_groups() {
    let data: Vec<u8> = (0..5 * 3).map(|x| (x * 17) as u8).collect();
    let plane = SamplePlane::from_packed(&data, 5, 3).unwrap();
    let out = Upsampler::new().upsample_plane(&plane, SubSampRatios::H2V2).unwrap();

    let rows: Vec<&[u8]> = data.chunks_exact(5).collect();
    // top edge uses row 0 as its own context
    let first = run_h2v2(&[rows[0], rows[0], rows[1]], 5, 2);
    let middle = run_h2v2(&[rows[0], rows[1], rows[2]], 5, 2);
    let last = run_h2v2(&[rows[1], rows[2], rows[2]], 5, 2);

    let expected: Vec<u8> = first
        .into_iter()
        .chain(middle)
        .chain(last)
        .flatten()
        .collect();
    assert_eq!(out.to_packed(), expected);
}
