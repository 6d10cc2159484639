//! Errors reported by the map operations

/// Result type for fallible map operations.
pub type Result<T> = std::result::Result<T, ResizeError>;

/// Reasons a resize request was ignored.
///
/// [`resize`](crate::ProbingMap::resize) discards these; use `try_resize` to observe them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResizeError {
    /// An open-addressing table must keep at least one slot more than it has entries.
    #[error("requested capacity {requested} does not exceed the current size {size}")]
    BelowSize {
        /// The capacity that was asked for
        requested: usize,
        /// Number of live entries at the time of the request
        size: usize,
    },

    /// A chained table needs at least one bucket.
    #[error("requested capacity must be at least 1")]
    ZeroCapacity,
}
