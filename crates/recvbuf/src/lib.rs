//! An incremental receive buffer for line-oriented, delimiter-framed byte
//! protocols such as HTTP/1.1.
//!
//! A transport appends bytes as they arrive; a protocol parser repeatedly asks
//! for framing units (at most N bytes, everything through a delimiter, a
//! header block up to the blank line). Every extraction either returns a
//! complete unit or `None`, meaning "not enough data yet". A failed search
//! remembers how far it got so the next attempt does not rescan.
//!
//! ```rust
//! use recvbuf::ReceiveBuffer;
//!
//! let mut buf = ReceiveBuffer::new();
//! buf.append(b"GET / HTTP/1.1\r\nHost: a\r");
//! assert_eq!(buf.take_line().as_deref(), Some(&b"GET / HTTP/1.1\r\n"[..]));
//! assert_eq!(buf.take_header_block(), None);
//!
//! buf.append(b"\n\r\nbody");
//! assert_eq!(buf.take_header_block(), Some(vec![b"Host: a\r\n".to_vec()]));
//! assert_eq!(buf.as_bytes(), b"body");
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
mod chunk_utils;
mod error;
mod lines;
mod options;
mod search;

#[cfg(test)]
mod tests;

pub use buffer::ReceiveBuffer;
#[doc(hidden)]
pub use chunk_utils::{produce_chunks, produce_prefixes};
#[cfg(any(test, feature = "fuzzing"))]
#[doc(hidden)]
pub use chunk_utils::split_at_seed;
pub use error::BufferError;
pub use options::BufferOptions;
