use super::*;

#[test]
fn new_and_len() {
    let r = TokenRange::new(4, 10);
    assert_eq!(r.len(), 6);
    assert!(!r.is_empty());
}

#[test]
fn dummy_range_is_recognized() {
    let r = TokenRange::dummy();
    assert!(r.is_dummy());
    assert!(!TokenRange::new(0, 1).is_dummy());
}

#[test]
fn contains_offset() {
    let r = TokenRange::new(10, 20);
    assert!(r.contains(10));
    assert!(r.contains(19));
    assert!(!r.contains(20));
    assert!(!r.contains(9));
}

#[test]
fn contains_range() {
    let outer = TokenRange::new(0, 100);
    let inner = TokenRange::new(10, 20);
    assert!(outer.contains_range(inner));
    assert!(!inner.contains_range(outer));
}
