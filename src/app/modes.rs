//! Query cycle state.
//!
//! A query cycle starts when a term settles (or on mount) and ends when the
//! result for that cycle arrives. Only the most recently issued cycle is ever
//! in flight from the application's point of view:
//!
//! - **Idle**: no query outstanding, `isLoading` is false
//! - **Loading**: waiting for the result tagged with `seq`

/// Phase of the current query cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryPhase {
    /// No query in flight.
    #[default]
    Idle,

    /// Waiting for the result of query `seq`, issued for `term`.
    Loading {
        /// Sequence number of the latest issued query.
        seq: u64,
        /// Settled term the query was issued for.
        term: String,
    },
}

impl QueryPhase {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Sequence number awaited, if any.
    #[must_use]
    pub const fn awaiting(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Loading { seq, .. } => Some(*seq),
        }
    }
}
