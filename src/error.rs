use thiserror::Error;

/// Errors surfaced by the album coordinator.
///
/// The taxonomy is deliberately narrow: stale deliveries and quality
/// regressions are normal operating conditions handled internally, never
/// errors. Only caller contract violations are reported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AlbumError {
    /// A page index outside `[0, N-1]` was supplied by the paging container.
    ///
    /// This indicates a bug in the container integration and fails fast
    /// rather than being silently ignored.
    #[error("page index {index} out of range: album has {count} photo(s)")]
    PageOutOfRange { index: usize, count: usize },

    /// The supplied configuration failed validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}
