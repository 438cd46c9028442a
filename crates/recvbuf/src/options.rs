/// Configuration options for a [`ReceiveBuffer`](crate::ReceiveBuffer).
///
/// These control line-ending leniency and the storage policy. None of them
/// change which bytes an extraction returns for canonical `CR LF` input.
///
/// # Examples
///
/// ```rust
/// use recvbuf::{BufferOptions, ReceiveBuffer};
///
/// let buf = ReceiveBuffer::with_options(BufferOptions {
///     allow_bare_lf: false,
///     ..Default::default()
/// });
/// assert!(buf.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BufferOptions {
    /// Whether a bare `LF` is accepted where `CR LF` is expected.
    ///
    /// Many transports and intermediaries emit `LF LF` instead of
    /// `CR LF CR LF` after a header block. When enabled, line extraction ends
    /// a line at any `LF`, a lone `LF` counts as a blank line, and the
    /// blank-line search falls back to `LF LF` when the canonical terminator
    /// is absent.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_bare_lf: bool,

    /// Minimum number of consumed bytes before the buffer considers moving
    /// live data back to the start of its storage.
    ///
    /// Compaction only happens once the consumed prefix is also at least as
    /// large as the live data, so its cost is amortized over consumption.
    ///
    /// # Default
    ///
    /// `4096`
    pub compact_threshold: usize,

    /// Size of the chunk reserved by
    /// [`chunk_mut`](crate::ReceiveBuffer::chunk_mut) when the caller passes a
    /// size hint of zero.
    ///
    /// # Default
    ///
    /// `8192`
    pub chunk_size_hint: usize,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            allow_bare_lf: true,
            compact_threshold: 4096,
            chunk_size_hint: 8192,
        }
    }
}
