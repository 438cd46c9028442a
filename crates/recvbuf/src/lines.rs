//! Line and header block extraction.
//!
//! Lines are returned with their terminator. A header block is collected one
//! line at a time into [`PendingLines`], so a block that arrives over many
//! appends is split incrementally and never re-copied: each call picks up
//! after the last complete line it parked.

use alloc::vec::Vec;
use core::{fmt, mem};

use bstr::BStr;
use log::trace;

use crate::buffer::ReceiveBuffer;

/// Header lines already split off the front of the buffer but not yet
/// delivered, with their total length.
#[derive(Default)]
pub(crate) struct PendingLines {
    lines: Vec<Vec<u8>>,
    len: usize,
}

impl PendingLines {
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push(&mut self, line: Vec<u8>) {
        self.len += line.len();
        self.lines.push(line);
    }

    fn take(&mut self) -> Vec<Vec<u8>> {
        self.len = 0;
        mem::take(&mut self.lines)
    }
}

impl fmt::Debug for PendingLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.lines.iter().map(|line| BStr::new(line)))
            .finish()
    }
}

impl ReceiveBuffer {
    /// Removes and returns one complete line, terminator included.
    ///
    /// Lines end in `CR LF`. With
    /// [`allow_bare_lf`](crate::BufferOptions::allow_bare_lf) a line ends at
    /// the first `LF` whether or not a `CR` precedes it.
    pub fn take_line(&mut self) -> Option<Vec<u8>> {
        let terminator: &'static [u8] = if self.options.allow_bare_lf {
            b"\n"
        } else {
            b"\r\n"
        };
        self.take_until(terminator)
    }

    /// Collects the lines of a header block up to and including the blank
    /// line that ends it.
    ///
    /// Returns the non-blank lines in arrival order, terminators included; a
    /// block that is only a blank line yields an empty vector. Until the blank
    /// line arrives this returns `None`, but lines already complete are kept
    /// aside (and still counted by [`len`](Self::len)) so the next call does
    /// not split them again.
    ///
    /// A lone `LF` ends the block only when no `CR LF CR LF` is buffered
    /// after it, so the block ends where
    /// [`take_through_blank_line`](Self::take_through_blank_line) would end
    /// it. A lone `LF` before a canonical terminator is returned as a line.
    pub fn take_header_block(&mut self) -> Option<Vec<Vec<u8>>> {
        self.abandon_reservation();
        if self.lines.is_empty() && self.peek(2) == b"\r\n" {
            self.skip(2);
            return Some(Vec::new());
        }
        loop {
            if self.options.allow_bare_lf && self.peek(1) == b"\n" {
                return Some(self.finish_at_bare_blank_line());
            }
            let line = self.take_line()?;
            if line == b"\r\n" {
                return Some(self.finish_header_block());
            }
            self.lines.push(line);
        }
    }

    /// Ends the block at the lone `LF` at the front, or at the first
    /// `CR LF CR LF` if one is buffered.
    fn finish_at_bare_blank_line(&mut self) -> Vec<Vec<u8>> {
        let Some(end) = self.find_canonical_blank_line() else {
            trace!("accepted bare LF as header block terminator");
            self.skip(1);
            return self.finish_header_block();
        };
        // The bytes before the final CR LF end in a line terminator, so they
        // split into whole lines.
        let mut remaining = end - 2;
        while remaining > 0 {
            let Some(line) = self.take_line() else {
                break;
            };
            remaining -= line.len();
            self.lines.push(line);
        }
        self.skip(2);
        self.finish_header_block()
    }

    fn finish_header_block(&mut self) -> Vec<Vec<u8>> {
        let lines = self.lines.take();
        trace!("header block complete with {} lines", lines.len());
        lines
    }
}
