use thiserror::Error;

/// Recoverable misuse of the buffer's checked entry points.
///
/// Running out of data is never an error; extractions report it as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A delimiter search was asked for a zero-length needle.
    #[error("needle must not be empty")]
    EmptyNeedle,
    /// More bytes were committed than the last `chunk_mut` reserved.
    #[error("committed {written} bytes but only {reserved} were reserved")]
    CommitOverrun {
        /// Bytes the caller claimed to have written.
        written: usize,
        /// Bytes available in the outstanding reservation.
        reserved: usize,
    },
}
