/// Errors raised while turning an ordering list into a reorder
/// strategy.
///
/// These only ever come out of compilation. Once a strategy exists,
/// reordering cannot fail.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReorderError {
    #[error("the ordering list is empty")]
    EmptyOrdering,

    #[error("the ordering list does not specify the order of unmatched tests")]
    MissingUnmatchedMarker,

    #[error("the pattern at position {position} is empty")]
    EmptyPattern { position: usize },

    #[error("invalid pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ReorderError {
    /// Stable name of the error kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ReorderError::EmptyOrdering => "EmptyOrderingError",
            ReorderError::MissingUnmatchedMarker => "MissingUnmatchedMarkerError",
            ReorderError::EmptyPattern { .. } => "EmptyPatternError",
            ReorderError::InvalidPattern { .. } => "InvalidPatternError",
        }
    }
}
