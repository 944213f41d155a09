use super::*;
use crate::source::transparency::channel_bits_to_float;

#[test]
fn new_fills_every_pixel() {
    let buf = ArgbBuffer::new(3, 2, Argb(0x11223344)).unwrap();
    assert_eq!(buf.pixels().len(), 6);
    assert!(buf.pixels().iter().all(|&p| p == 0x11223344));
}

#[test]
fn from_pixels_checks_length() {
    assert!(ArgbBuffer::from_pixels(2, 2, vec![0; 4]).is_ok());
    assert!(matches!(
        ArgbBuffer::from_pixels(2, 2, vec![0; 3]),
        Err(StackcompError::Validation(_))
    ));
}

#[test]
fn get_and_row_are_row_major() {
    let buf = ArgbBuffer::from_pixels(2, 2, vec![1, 2, 3, 4]).unwrap();
    assert_eq!(buf.get(1, 0), Some(Argb(2)));
    assert_eq!(buf.get(0, 1), Some(Argb(3)));
    assert_eq!(buf.get(2, 0), None);
    assert_eq!(buf.row(1), Some(&[3u32, 4][..]));
    assert_eq!(buf.row(2), None);
}

#[test]
fn alpha_mask_samples_decode_to_the_original_floats() {
    let mask = [0.0f32, 0.5, 1.0, 0.25];
    let buf = ArgbBuffer::from_alpha_mask(2, 2, &mask).unwrap();
    let decoded: Vec<f32> = buf.pixels().iter().map(|&b| channel_bits_to_float(b)).collect();
    assert_eq!(decoded, mask);
}

#[test]
fn read_row_reports_out_of_range_and_width_mismatch() {
    let buf = ArgbBuffer::from_pixels(2, 1, vec![7, 8]).unwrap();
    let mut dst = [0u32; 2];
    buf.read_row(0, &mut dst).unwrap();
    assert_eq!(dst, [7, 8]);

    assert!(matches!(buf.read_row(1, &mut dst), Err(StackcompError::Sample(_))));
    let mut short = [0u32; 1];
    assert!(matches!(buf.read_row(0, &mut short), Err(StackcompError::Sample(_))));
}
