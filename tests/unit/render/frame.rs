use super::*;

#[test]
fn new_checks_buffer_length() {
    assert!(Frame::new(2, 2, vec![0; 16]).is_ok());
    assert!(Frame::new(2, 2, vec![0; 15]).is_err());
}

#[test]
fn clones_share_storage() {
    let a = Frame::solid(
        Canvas {
            width: 3,
            height: 2,
        },
        Rgba8Premul::from_straight_rgba(0, 0, 255, 255),
    );
    let b = a.clone();
    assert!(Frame::ptr_eq(&a, &b));
    assert_eq!(b.pixel(2, 1), Some([0, 0, 255, 255]));
    assert_eq!(b.pixel(3, 0), None);

    let c = Frame::new(3, 2, a.data().to_vec()).unwrap();
    assert!(!Frame::ptr_eq(&a, &c));
}

#[test]
fn straight_conversion_unpremultiplies() {
    let f = Frame::new(1, 1, vec![64, 0, 128, 128]).unwrap();
    let s = f.to_straight_rgba();
    assert_eq!(s[3], 128);
    assert_eq!(s[1], 0);
    assert!((127..=128).contains(&s[0]));
    assert_eq!(s[2], 255);
}
