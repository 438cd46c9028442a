use alloc::vec;

use crate::{produce_chunks, produce_prefixes, split_at_seed};

#[test]
fn produce_helpers_example() {
    let payload = b"Host: a\r\nX: b\r\n\r\n";
    let chunks = produce_chunks(payload, 4);
    assert_eq!(
        chunks,
        vec![&b"Host:"[..], &b" a\r\nX"[..], &b": b\r\n"[..], &b"\r\n"[..]]
    );
    let prefixes = produce_prefixes(payload, 4);
    assert_eq!(prefixes.last().copied(), Some(&payload[..]));
    assert_eq!(prefixes[1], b"Host: a\r\nX");
}

#[test]
fn produce_chunks_of_empty_payload() {
    assert!(produce_chunks(b"", 3).is_empty());
}

#[test]
fn split_at_seed_covers_payload() {
    let payload = b"abcdefghij";
    let chunks = split_at_seed(payload, &[0, 2, 100]);
    assert_eq!(chunks, vec![&b"a"[..], &b"bcd"[..], &b"efghi"[..], &b"j"[..]]);
    assert_eq!(chunks.concat(), payload);

    let chunks = split_at_seed(payload, &[]);
    assert_eq!(chunks, vec![&payload[..]]);
}
