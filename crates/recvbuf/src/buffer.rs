//! Backing storage and the raw append/peek/take primitives.
//!
//! Storage layout
//! - `data` is a single `Vec<u8>`. Bytes in `data[..start]` have been handed
//!   to the caller, `data[start..data.len() - reserved]` are live, and the
//!   last `reserved` bytes belong to an uncommitted `chunk_mut` reservation.
//! - Consumption only moves `start`. The consumed prefix is reclaimed when it
//!   is both past `compact_threshold` and at least as large as the live data,
//!   or immediately (without copying) when the buffer drains completely.
//! - Search memos and parked header lines live in `search.rs` and `lines.rs`;
//!   every offset they hold is relative to `start`, so compaction never has
//!   to touch them.

use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;
use log::trace;

use crate::{
    error::BufferError,
    lines::PendingLines,
    options::BufferOptions,
    search::{BlankLineMemo, SearchMemo},
};

/// Accumulates bytes from a transport and hands out complete framing units.
///
/// See the [crate documentation](crate) for an overview.
pub struct ReceiveBuffer {
    pub(crate) data: Vec<u8>,
    pub(crate) start: usize,
    reserved: usize,
    pub(crate) search: SearchMemo,
    pub(crate) blank_line: BlankLineMemo,
    pub(crate) lines: PendingLines,
    pub(crate) scanned: usize,
    pub(crate) options: BufferOptions,
}

impl ReceiveBuffer {
    /// Creates an empty buffer with default [`BufferOptions`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(BufferOptions::default())
    }

    /// Creates an empty buffer with the given options.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        Self {
            data: Vec::new(),
            start: 0,
            reserved: 0,
            search: SearchMemo::default(),
            blank_line: BlankLineMemo::default(),
            lines: PendingLines::default(),
            scanned: 0,
            options,
        }
    }

    /// The options this buffer was created with.
    #[must_use]
    pub fn options(&self) -> &BufferOptions {
        &self.options
    }

    /// Appends `data` to the end of the buffer.
    ///
    /// Search progress is kept: bytes already proven free of a needle stay
    /// that way when more bytes arrive.
    pub fn append(&mut self, data: &[u8]) {
        self.abandon_reservation();
        if data.is_empty() {
            return;
        }
        self.maybe_compact();
        self.data.extend_from_slice(data);
    }

    /// Total bytes held: raw bytes not yet consumed plus header lines already
    /// split off by an unfinished [`take_header_block`](Self::take_header_block).
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_len() + self.lines.len()
    }

    /// Returns `true` if no bytes are held at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns up to `n` raw bytes from the front without consuming them.
    #[must_use]
    pub fn peek(&self, n: usize) -> &[u8] {
        let live = self.live();
        &live[..n.min(live.len())]
    }

    /// The raw bytes not yet consumed.
    ///
    /// Header lines parked by an unfinished header block are not included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.live()
    }

    /// Removes and returns up to `count` bytes from the front.
    ///
    /// Returns `None` when no raw bytes are held, even if `count` is zero, so
    /// callers can tell "no data yet" apart from "asked for nothing".
    ///
    /// Header lines parked by an unfinished
    /// [`take_header_block`](Self::take_header_block) are not returned; bytes
    /// come back out of arrival order if this is called before the block
    /// completes.
    pub fn take_at_most(&mut self, count: usize) -> Option<Vec<u8>> {
        self.abandon_reservation();
        let live_len = self.live_len();
        if live_len == 0 {
            return None;
        }
        Some(self.consume(count.min(live_len)))
    }

    /// Reserves writable space at the end of the buffer for a transport to
    /// read into directly.
    ///
    /// A `size_hint` of zero reserves
    /// [`chunk_size_hint`](BufferOptions::chunk_size_hint) bytes. The reserved
    /// bytes become visible only after [`commit`](Self::commit); any other
    /// mutating call discards the reservation.
    pub fn chunk_mut(&mut self, size_hint: usize) -> &mut [u8] {
        self.abandon_reservation();
        self.maybe_compact();
        let size = if size_hint == 0 {
            self.options.chunk_size_hint
        } else {
            size_hint
        };
        let filled = self.data.len();
        self.data.resize(filled + size, 0);
        self.reserved = size;
        &mut self.data[filled..]
    }

    /// Marks the first `written` bytes of the last [`chunk_mut`](Self::chunk_mut)
    /// reservation as received data and releases the rest.
    ///
    /// Committing more than was reserved leaves the reservation untouched and
    /// returns [`BufferError::CommitOverrun`].
    pub fn commit(&mut self, written: usize) -> Result<(), BufferError> {
        if written > self.reserved {
            return Err(BufferError::CommitOverrun {
                written,
                reserved: self.reserved,
            });
        }
        let end = self.data.len() - self.reserved + written;
        self.data.truncate(end);
        self.reserved = 0;
        trace!("committed {written} bytes into receive buffer");
        Ok(())
    }

    /// Moves live data to the start of the backing storage, releasing the
    /// consumed prefix.
    pub fn compact(&mut self) {
        self.abandon_reservation();
        if self.start == 0 {
            return;
        }
        trace!("compacting receive buffer, reclaiming {} bytes", self.start);
        self.data.drain(..self.start);
        self.start = 0;
    }

    /// Total bytes examined by delimiter searches since the buffer was
    /// created.
    ///
    /// Repeated probing with the same needle resumes where the last probe
    /// stopped, so this grows with the bytes appended rather than with the
    /// number of probes.
    #[must_use]
    pub fn bytes_scanned(&self) -> usize {
        self.scanned
    }

    pub(crate) fn live(&self) -> &[u8] {
        &self.data[self.start..self.data.len() - self.reserved]
    }

    pub(crate) fn live_len(&self) -> usize {
        self.data.len() - self.reserved - self.start
    }

    /// Removes `n` live bytes from the front, resetting every search memo.
    pub(crate) fn consume(&mut self, n: usize) -> Vec<u8> {
        assert!(n <= self.live_len(), "consumed past the end of the buffer");
        let out = self.data[self.start..self.start + n].to_vec();
        self.skip(n);
        out
    }

    /// Like [`consume`](Self::consume) but discards the bytes.
    pub(crate) fn skip(&mut self, n: usize) {
        debug_assert_eq!(self.reserved, 0);
        assert!(n <= self.live_len(), "skipped past the end of the buffer");
        self.start += n;
        self.search.reset();
        self.blank_line.reset();
        if self.start == self.data.len() {
            self.data.clear();
            self.start = 0;
        }
    }

    pub(crate) fn abandon_reservation(&mut self) {
        if self.reserved > 0 {
            let end = self.data.len() - self.reserved;
            self.data.truncate(end);
            self.reserved = 0;
        }
    }

    fn maybe_compact(&mut self) {
        if self.start >= self.options.compact_threshold && self.start >= self.live_len() {
            self.compact();
        }
    }
}

impl Default for ReceiveBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReceiveBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiveBuffer")
            .field("pending", &BStr::new(self.live()))
            .field("pending_lines", &self.lines)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "std")]
impl std::io::Write for ReceiveBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
