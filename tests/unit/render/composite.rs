use super::*;

#[test]
fn transparent_source_keeps_destination() {
    assert_eq!(over([10, 20, 30, 40], [0, 0, 0, 0]), [10, 20, 30, 40]);
}

#[test]
fn opaque_source_replaces_destination() {
    assert_eq!(over([10, 20, 30, 255], [1, 2, 3, 255]), [1, 2, 3, 255]);
}

#[test]
fn half_alpha_blends_against_opaque_white() {
    let out = over([255, 255, 255, 255], [128, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 255);
    assert!((126..=128).contains(&out[1]));
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(over_in_place(&mut dst, &[0u8; 8]).is_ok());
}

#[test]
fn fill_writes_every_pixel() {
    let mut buf = vec![0u8; 12];
    fill(&mut buf, Rgba8Premul::from_straight_rgba(255, 0, 0, 255));
    assert_eq!(buf, [255, 0, 0, 255].repeat(3));
}
