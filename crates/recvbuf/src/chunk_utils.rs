use alloc::vec::Vec;

/// Split `payload` into approximately equal-sized chunks.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    if payload.is_empty() {
        return Vec::new();
    }
    payload.chunks(payload.len().div_ceil(parts)).collect()
}

/// Return a sequence of prefixes converging to `payload`.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_prefixes(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    let chunks = produce_chunks(payload, parts);
    let mut prefixes = Vec::with_capacity(chunks.len());
    let mut end = 0;
    for chunk in chunks {
        end += chunk.len();
        prefixes.push(&payload[..end]);
    }
    prefixes
}

/// Split `payload` into non-empty chunks whose sizes are derived from
/// `splits`, the way a transport might deliver it.
///
/// Each entry of `splits` picks the size of the next chunk; once the entries
/// run out the remainder is returned as one chunk.
#[cfg(any(test, feature = "fuzzing"))]
#[must_use]
pub fn split_at_seed<'a>(payload: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = payload;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + s % rest.len());
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
