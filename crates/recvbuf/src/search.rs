//! Delimiter search with memoized progress.
//!
//! A failed search for a needle remembers how far into the live bytes the
//! needle is known to be absent. Since a match could straddle the end of the
//! scanned bytes, the remembered offset stops `needle.len() - 1` bytes short of
//! the end. The next search for the same needle starts there, so a stream of
//! appends each followed by one probe scans every byte a bounded number of
//! times.
//!
//! Offsets are relative to the front of the live bytes and are reset on every
//! consumption.

use alloc::vec::Vec;
use core::fmt;

use bstr::{BStr, ByteSlice};
use log::trace;

use crate::{buffer::ReceiveBuffer, error::BufferError};

const BLANK_LINE: &[u8] = b"\r\n\r\n";
const BARE_BLANK_LINE: &[u8] = b"\n\n";

/// The needle most recently searched for without success, and how far it is
/// known to be absent. An empty needle means no memo.
#[derive(Default)]
pub(crate) struct SearchMemo {
    needle: Vec<u8>,
    progress: usize,
}

impl SearchMemo {
    fn resume_point(&self, needle: &[u8]) -> usize {
        if !self.needle.is_empty() && self.needle == needle {
            self.progress
        } else {
            0
        }
    }

    fn record(&mut self, needle: &[u8], progress: usize) {
        if self.needle != needle {
            self.needle.clear();
            self.needle.extend_from_slice(needle);
        }
        self.progress = progress;
    }

    pub(crate) fn reset(&mut self) {
        self.needle.clear();
        self.progress = 0;
    }
}

impl fmt::Debug for SearchMemo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchMemo")
            .field("needle", &BStr::new(&self.needle))
            .field("progress", &self.progress)
            .finish()
    }
}

/// Progress of the blank-line search, kept apart from [`SearchMemo`] because
/// it tracks the canonical and the lenient terminator at once.
#[derive(Debug, Default)]
pub(crate) struct BlankLineMemo {
    canonical: usize,
    lenient: usize,
}

impl BlankLineMemo {
    pub(crate) fn reset(&mut self) {
        self.canonical = 0;
        self.lenient = 0;
    }
}

/// Searches `hay[from..]` for `needle`.
///
/// Returns the end offset of the first match (one past the needle's last
/// byte) and the number of bytes examined.
fn find_from(hay: &[u8], needle: &[u8], from: usize) -> (Option<usize>, usize) {
    assert!(
        from <= hay.len(),
        "search progress {from} is beyond the {} live bytes",
        hay.len()
    );
    let rest = &hay[from..];
    match rest.find(needle) {
        Some(at) => (Some(from + at + needle.len()), at + needle.len()),
        None => (None, rest.len()),
    }
}

/// Offset up to which `needle` is known absent after a miss over `live_len`
/// bytes.
fn progress_after_miss(live_len: usize, needle_len: usize) -> usize {
    (live_len + 1).saturating_sub(needle_len)
}

impl ReceiveBuffer {
    /// Removes and returns everything up to and including the first
    /// occurrence of `needle`.
    ///
    /// Returns `None` without consuming anything when the needle is not yet
    /// present. A repeated call with the same needle only scans bytes that
    /// could not be ruled out last time; a different needle starts over.
    ///
    /// Header lines parked by an unfinished
    /// [`take_header_block`](Self::take_header_block) are not returned; bytes
    /// come back out of arrival order if this is called before the block
    /// completes.
    ///
    /// # Panics
    ///
    /// Panics if `needle` is empty. Use
    /// [`try_take_until`](Self::try_take_until) for untrusted needles.
    pub fn take_until(&mut self, needle: &[u8]) -> Option<Vec<u8>> {
        assert!(!needle.is_empty(), "take_until called with an empty needle");
        self.abandon_reservation();
        let live_len = self.live_len();
        let from = self.search.resume_point(needle);
        let (found, examined) = find_from(self.live(), needle, from);
        self.scanned += examined;
        if let Some(end) = found {
            return Some(self.consume(end));
        }
        self.search
            .record(needle, progress_after_miss(live_len, needle.len()));
        None
    }

    /// Like [`take_until`](Self::take_until), but reports an empty needle as
    /// [`BufferError::EmptyNeedle`] instead of panicking.
    pub fn try_take_until(&mut self, needle: &[u8]) -> Result<Option<Vec<u8>>, BufferError> {
        if needle.is_empty() {
            return Err(BufferError::EmptyNeedle);
        }
        Ok(self.take_until(needle))
    }

    /// End offset of the first `CR LF CR LF` in the live bytes, resuming
    /// where the last miss left off.
    pub(crate) fn find_canonical_blank_line(&mut self) -> Option<usize> {
        let live_len = self.live_len();
        let (found, examined) = find_from(self.live(), BLANK_LINE, self.blank_line.canonical);
        self.scanned += examined;
        if found.is_none() {
            self.blank_line.canonical = progress_after_miss(live_len, BLANK_LINE.len());
        }
        found
    }

    /// Removes and returns everything through the first blank line, i.e. the
    /// whole header section of a message including its `CR LF CR LF`.
    ///
    /// When the canonical terminator is absent but a bare `LF LF` is present
    /// (and [`allow_bare_lf`](crate::BufferOptions::allow_bare_lf) is set),
    /// the shorter match is returned instead.
    ///
    /// Header lines parked by an unfinished
    /// [`take_header_block`](Self::take_header_block) are not returned; bytes
    /// come back out of arrival order if this is called before the block
    /// completes.
    pub fn take_through_blank_line(&mut self) -> Option<Vec<u8>> {
        self.abandon_reservation();
        let live_len = self.live_len();

        if let Some(end) = self.find_canonical_blank_line() {
            return Some(self.consume(end));
        }

        if !self.options.allow_bare_lf {
            return None;
        }
        let (found, examined) = find_from(self.live(), BARE_BLANK_LINE, self.blank_line.lenient);
        self.scanned += examined;
        if let Some(end) = found {
            trace!("accepted bare LF LF as blank-line terminator");
            return Some(self.consume(end));
        }
        self.blank_line.lenient = progress_after_miss(live_len, BARE_BLANK_LINE.len());
        None
    }
}
