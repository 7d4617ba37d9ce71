//! Search filter applied to the notice board.

use std::collections::HashSet;

use crate::domain::foundation::NoticeId;

/// Resolved state of the AI-backed notice search.
///
/// The inactive filter and an active filter with zero matches are
/// distinct states: the first shows every notice, the second shows
/// none. Collapsing them would make "no results" indistinguishable
/// from "not searching".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    /// No search in effect. Every notice is visible.
    Inactive,
    /// A search resolved to this set of notice ids. May be empty.
    Matches(HashSet<NoticeId>),
}

impl SearchFilter {
    /// Whether a notice with this id passes the filter.
    pub fn allows(&self, id: NoticeId) -> bool {
        match self {
            SearchFilter::Inactive => true,
            SearchFilter::Matches(ids) => ids.contains(&id),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SearchFilter::Matches(_))
    }
}

impl Default for SearchFilter {
    fn default() -> Self {
        SearchFilter::Inactive
    }
}
